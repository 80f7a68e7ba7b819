//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`:
//! PostgreSQL and in-memory stores, JWT sessions, Argon2 hashing and the
//! HTML sanitizer.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory stores only
//! - `postgres` - PostgreSQL stores via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod memory;
pub mod sanitize;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use memory::{InMemoryBlogRepository, InMemoryUserRepository};
pub use sanitize::AmmoniaSanitizer;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresBlogRepository, PostgresUserRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
