/// Rich-text sanitizer applied to blog content before it is stored.
///
/// Implementations keep a fixed allowlist of tags and attributes (including
/// image and iframe embeds) and strip everything else.
pub trait ContentSanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}
