//! Interaction engine: like/dislike toggling and comment appends.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, ReactionAction, ReactionTally};
use crate::error::DomainError;
use crate::ports::{BlogRepository, UserRepository};
use crate::services::people::{CommentView, Directory};
use crate::validation;

/// Drives the per-(blog, identity) reaction state machine and the append-only
/// comment list. Each transition is delegated to the store as a single atomic
/// operation on the blog.
pub struct InteractionEngine {
    blogs: Arc<dyn BlogRepository>,
    users: Arc<dyn UserRepository>,
}

impl InteractionEngine {
    pub fn new(blogs: Arc<dyn BlogRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { blogs, users }
    }

    /// Toggle a like. Any dislike by the same identity is dropped first.
    /// Returns the new like count.
    pub async fn like(&self, blog_id: Uuid, identity: Uuid) -> Result<usize, DomainError> {
        let tally = self.react(blog_id, identity, ReactionAction::Like).await?;
        Ok(tally.likes)
    }

    /// Toggle a dislike. Any like by the same identity is dropped first.
    /// Returns the new dislike count.
    pub async fn dislike(&self, blog_id: Uuid, identity: Uuid) -> Result<usize, DomainError> {
        let tally = self.react(blog_id, identity, ReactionAction::Dislike).await?;
        Ok(tally.dislikes)
    }

    pub async fn react(
        &self,
        blog_id: Uuid,
        identity: Uuid,
        action: ReactionAction,
    ) -> Result<ReactionTally, DomainError> {
        let tally = self
            .blogs
            .apply_reaction(blog_id, identity, action)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(blog_id))?;

        tracing::debug!(
            blog_id = %blog_id,
            user_id = %identity,
            ?action,
            likes = tally.likes,
            dislikes = tally.dislikes,
            "Reaction applied"
        );
        Ok(tally)
    }

    /// Append a comment and return the whole list in append order, each
    /// comment with its author resolved.
    pub async fn add_comment(
        &self,
        blog_id: Uuid,
        identity: Uuid,
        text: &str,
    ) -> Result<Vec<CommentView>, DomainError> {
        if !self.blogs.exists(blog_id).await? {
            return Err(DomainError::blog_not_found(blog_id));
        }
        let text = validation::comment_text(text)?;

        let comments = self
            .blogs
            .append_comment(blog_id, Comment::new(identity, text))
            .await?
            .ok_or_else(|| DomainError::blog_not_found(blog_id))?;

        tracing::debug!(blog_id = %blog_id, user_id = %identity, "Comment added");

        let directory =
            Directory::load(self.users.as_ref(), comments.iter().map(|c| c.author_id)).await?;
        Ok(directory.comments(comments))
    }
}
