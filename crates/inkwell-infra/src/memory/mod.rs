//! In-memory stores - used when no database is configured and in tests.
//!
//! Data is lost on process restart.

mod blogs;
mod users;

pub use blogs::InMemoryBlogRepository;
pub use users::InMemoryUserRepository;
