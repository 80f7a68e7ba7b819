//! SeaORM entities.

pub mod blog;
pub mod blog_comment;
pub mod blog_reaction;
pub mod user;
