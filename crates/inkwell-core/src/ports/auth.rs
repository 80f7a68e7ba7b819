//! Authentication ports: credential hashing and session tokens.

use uuid::Uuid;

/// Issues and verifies signed, time-limited session tokens.
///
/// The identity is carried in a single canonical claim; the issuer and the
/// verifier of one implementation must agree on it.
pub trait TokenService: Send + Sync {
    /// Issue a token bound to `user_id`.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify a token and return the identity it was issued for.
    fn verify(&self, token: &str) -> Result<Uuid, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt. Rejects empty input.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
