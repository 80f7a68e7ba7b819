//! Explicit input validation.
//!
//! Every mutating operation runs its input through a [`Validator`] before
//! touching a store. The validator collects all field errors of a request and
//! either yields the normalized values or a [`ValidationErrors`] list.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const NAME_MAX_CHARS: usize = 50;
pub const BIO_MAX_CHARS: usize = 200;
pub const TITLE_MAX_CHARS: usize = 150;
pub const COMMENT_MAX_CHARS: usize = 300;
pub const PASSWORD_MIN_CHARS: usize = 8;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("valid email pattern")
});

static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/.+$").expect("valid linkedin pattern")
});

static INSTAGRAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?instagram\.com/[A-Za-z0-9_.]+$")
        .expect("valid instagram pattern")
});

static X_PROFILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(twitter\.com|x\.com)/[A-Za-z0-9_]+$").expect("valid x pattern")
});

/// Platforms accepted in a profile's social links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    LinkedIn,
    Instagram,
    X,
}

impl SocialPlatform {
    fn field(self) -> &'static str {
        match self {
            Self::LinkedIn => "socials.linkedin",
            Self::Instagram => "socials.instagram",
            Self::X => "socials.x",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::LinkedIn => &LINKEDIN,
            Self::Instagram => &INSTAGRAM,
            Self::X => &X_PROFILE,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn profile URL",
            Self::Instagram => "Instagram profile URL",
            Self::X => "X/Twitter profile URL",
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects field errors while normalizing input.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Trimmed, non-empty text of at most `max_chars` characters.
    pub fn required_text(
        &mut self,
        field: &str,
        label: &str,
        value: &str,
        max_chars: usize,
    ) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.reject(field, format!("{label} is required"));
        } else if trimmed.chars().count() > max_chars {
            self.reject(
                field,
                format!("{label} cannot exceed {max_chars} characters"),
            );
        }
        trimmed.to_string()
    }

    /// Trimmed text where an empty value means "no value".
    pub fn optional_text(
        &mut self,
        field: &str,
        label: &str,
        value: &str,
        max_chars: usize,
    ) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.chars().count() > max_chars {
            self.reject(
                field,
                format!("{label} cannot exceed {max_chars} characters"),
            );
        }
        Some(trimmed.to_string())
    }

    /// Trimmed, lowercased email address.
    pub fn email(&mut self, value: &str) -> String {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            self.reject("email", "Email is required");
        } else if !EMAIL.is_match(&normalized) {
            self.reject("email", "Please enter a valid email address");
        }
        normalized
    }

    pub fn new_password(&mut self, value: &str) {
        if value.is_empty() {
            self.reject("password", "Password is required");
        } else if value.chars().count() < PASSWORD_MIN_CHARS {
            self.reject(
                "password",
                format!("Password must be at least {PASSWORD_MIN_CHARS} characters long"),
            );
        }
    }

    /// A social link; empty clears it.
    pub fn social_link(&mut self, platform: SocialPlatform, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        if !platform.pattern().is_match(trimmed) {
            self.reject(platform.field(), format!("Invalid {}", platform.label()));
        }
        Some(trimmed.to_string())
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Validate comment text on its own.
pub fn comment_text(text: &str) -> Result<String, ValidationErrors> {
    let mut v = Validator::new();
    let text = v.required_text("text", "Comment", text, COMMENT_MAX_CHARS);
    v.finish(text)
}
