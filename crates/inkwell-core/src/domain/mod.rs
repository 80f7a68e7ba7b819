//! Domain entities - the core business objects.

mod blog;
mod patch;
mod user;

pub use blog::{
    Blog, BlogChanges, BlogCounts, Comment, Reaction, ReactionAction, ReactionTally, is_owner,
};
pub use patch::FieldUpdate;
pub use user::{ProfileChanges, Socials, User, UserProfile, mask_email};
