//! HTML sanitizer for blog content.

use ammonia::Builder;

use inkwell_core::ports::ContentSanitizer;

/// Ammonia-backed sanitizer.
///
/// Starts from ammonia's conservative allowlist and additionally keeps
/// headings, underline, images and iframe embeds. Scripts, event handler
/// attributes and `javascript:` URLs are always removed.
pub struct AmmoniaSanitizer {
    builder: Builder<'static>,
}

impl AmmoniaSanitizer {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .add_tags(["img", "h1", "h2", "u", "iframe"])
            .add_tag_attributes("img", ["src", "alt", "title", "width", "height"])
            .add_tag_attributes(
                "iframe",
                ["src", "width", "height", "frameborder", "allow", "allowfullscreen"],
            );

        Self { builder }
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_removed() {
        let clean = AmmoniaSanitizer::new().sanitize("<p>hello</p><script>alert(1)</script>");
        assert_eq!(clean, "<p>hello</p>");
    }

    #[test]
    fn test_event_handlers_are_removed() {
        let clean = AmmoniaSanitizer::new().sanitize(r#"<img src="a.png" onerror="alert(1)">"#);
        assert!(clean.contains(r#"src="a.png""#));
        assert!(!clean.contains("onerror"));
    }

    #[test]
    fn test_embeds_and_headings_survive() {
        let sanitizer = AmmoniaSanitizer::new();
        let clean = sanitizer.sanitize(
            r#"<h1>Title</h1><u>u</u><iframe src="https://www.youtube.com/embed/x" width="560"></iframe>"#,
        );
        assert!(clean.contains("<h1>Title</h1>"));
        assert!(clean.contains("<u>u</u>"));
        assert!(clean.contains(r#"<iframe src="https://www.youtube.com/embed/x" width="560">"#));
    }

    #[test]
    fn test_script_only_content_becomes_empty() {
        let clean = AmmoniaSanitizer::new().sanitize("<script>alert(1)</script>");
        assert!(clean.trim().is_empty());
    }
}
