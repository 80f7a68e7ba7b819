//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod sanitizer;

pub use auth::{AuthError, PasswordService, TokenService};
pub use repository::{BlogRepository, UserRepository};
pub use sanitizer::ContentSanitizer;
