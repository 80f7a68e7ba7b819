use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Blog, BlogChanges, Comment, ProfileChanges, ReactionAction, ReactionTally, User,
};
use crate::error::RepoError;

/// Identity store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their (already normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Users whose ids are in `ids`, in no particular order.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    /// Persist a new user. A taken email is a `RepoError::Constraint`.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Write only the fields set in `changes` plus `updated_at`. Returns
    /// `None` if the user does not exist; a taken email is a
    /// `RepoError::Constraint`.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepoError>;

    /// Stamp a successful login. Returns `None` if the user does not exist.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<User>, RepoError>;
}

/// Blog store.
///
/// `apply_reaction` and `append_comment` are read-modify-write operations on a
/// single blog and must be atomic per blog: two concurrent calls on the same
/// blog may not lose each other's update.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError>;

    async fn exists(&self, id: Uuid) -> Result<bool, RepoError>;

    /// All blogs newest-first, restricted to full-text matches of `search`
    /// when given.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Blog>, RepoError>;

    /// Blogs written by `author_id`, newest-first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Blog>, RepoError>;

    /// Apply validated changes. Returns `None` if the blog does not exist.
    async fn update_content(
        &self,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, RepoError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Run one like/dislike transition for `user_id`. Returns `None` if the
    /// blog does not exist.
    async fn apply_reaction(
        &self,
        blog_id: Uuid,
        user_id: Uuid,
        action: ReactionAction,
    ) -> Result<Option<ReactionTally>, RepoError>;

    /// Append a comment and return the full, ordered comment list. Returns
    /// `None` if the blog does not exist.
    async fn append_comment(
        &self,
        blog_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Vec<Comment>>, RepoError>;
}
