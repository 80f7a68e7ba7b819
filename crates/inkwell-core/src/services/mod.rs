//! Application services - the use cases, built on top of the ports.
//!
//! Each service is constructed once at start-up with its collaborators passed
//! in explicitly and then shared behind an `Arc`.

mod auth;
mod blog;
mod gate;
mod interaction;
mod people;
mod profile;

pub use auth::{AuthService, Credentials, NewAccount, Session};
pub use blog::{BlogPatch, BlogService, BlogView, NewBlog};
pub use gate::{AuthGate, select_token};
pub use interaction::InteractionEngine;
pub use people::{AuthorSummary, CommentView, CommenterSummary};
pub use profile::{ProfilePatch, ProfileService};

#[cfg(test)]
pub(crate) mod fakes;
