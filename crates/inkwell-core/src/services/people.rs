//! Batch lookup of the users a blog view refers to.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Comment, User};
use crate::error::DomainError;
use crate::ports::UserRepository;

/// Public fields of a blog's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Who wrote a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommenterSummary {
    pub id: Uuid,
    pub name: String,
}

/// A comment with its author resolved. `user` is `None` only when the
/// author's account no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub user: Option<CommenterSummary>,
}

/// Users loaded in one query, keyed by id.
pub(crate) struct Directory(HashMap<Uuid, User>);

impl Directory {
    pub(crate) async fn load(
        users: &dyn UserRepository,
        ids: impl IntoIterator<Item = Uuid>,
    ) -> Result<Self, DomainError> {
        let mut ids: Vec<Uuid> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let found = users.find_by_ids(&ids).await?;
        Ok(Self(found.into_iter().map(|u| (u.id, u)).collect()))
    }

    pub(crate) fn author(&self, id: Uuid) -> Option<AuthorSummary> {
        self.0.get(&id).map(|u| AuthorSummary {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        })
    }

    pub(crate) fn comments(&self, comments: Vec<Comment>) -> Vec<CommentView> {
        comments
            .into_iter()
            .map(|comment| CommentView {
                user: self.0.get(&comment.author_id).map(|u| CommenterSummary {
                    id: u.id,
                    name: u.name.clone(),
                }),
                comment,
            })
            .collect()
    }
}
