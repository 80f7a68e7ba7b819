use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reaction state of one identity towards one blog.
///
/// Exactly one state holds for every (blog, identity) pair; `Liked` and
/// `Disliked` are never both true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    #[default]
    Neutral,
    Liked,
    Disliked,
}

/// What the identity asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionAction {
    Like,
    Dislike,
}

impl Reaction {
    /// Transition table of the like/dislike state machine.
    ///
    /// A like first drops any dislike, then toggles the like; a dislike is
    /// symmetric. Hence `Disliked -> Liked`, `Neutral -> Liked` and
    /// `Liked -> Neutral` on like.
    pub fn apply(self, action: ReactionAction) -> Self {
        match (self, action) {
            (Self::Liked, ReactionAction::Like) => Self::Neutral,
            (_, ReactionAction::Like) => Self::Liked,
            (Self::Disliked, ReactionAction::Dislike) => Self::Neutral,
            (_, ReactionAction::Dislike) => Self::Disliked,
        }
    }
}

/// Like/dislike totals after a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactionTally {
    pub likes: usize,
    pub dislikes: usize,
}

/// Counts derived from a blog's live sets; never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlogCounts {
    pub likes: usize,
    pub dislikes: usize,
    pub comments: usize,
}

/// A comment on a blog. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Blog entity - an authored post together with its interaction state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    /// Fixed at creation.
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub likes: BTreeSet<Uuid>,
    pub dislikes: BTreeSet<Uuid>,
    /// In append order.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated changes to a blog's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Blog {
    /// Create a new blog with no reactions and no comments.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            likes: BTreeSet::new(),
            dislikes: BTreeSet::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reaction_of(&self, user_id: Uuid) -> Reaction {
        if self.likes.contains(&user_id) {
            Reaction::Liked
        } else if self.dislikes.contains(&user_id) {
            Reaction::Disliked
        } else {
            Reaction::Neutral
        }
    }

    /// Run one transition of the reaction state machine for `user_id` and
    /// return the new state.
    pub fn apply_reaction(&mut self, user_id: Uuid, action: ReactionAction) -> Reaction {
        let next = self.reaction_of(user_id).apply(action);

        self.likes.remove(&user_id);
        self.dislikes.remove(&user_id);
        match next {
            Reaction::Liked => {
                self.likes.insert(user_id);
            }
            Reaction::Disliked => {
                self.dislikes.insert(user_id);
            }
            Reaction::Neutral => {}
        }

        next
    }

    pub fn tally(&self) -> ReactionTally {
        ReactionTally {
            likes: self.likes.len(),
            dislikes: self.dislikes.len(),
        }
    }

    pub fn counts(&self) -> BlogCounts {
        BlogCounts {
            likes: self.likes.len(),
            dislikes: self.dislikes.len(),
            comments: self.comments.len(),
        }
    }

    pub fn apply_changes(&mut self, changes: BlogChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}

/// Ownership gate shared by every mutating blog operation.
pub fn is_owner(identity: Uuid, blog: &Blog) -> bool {
    blog.author_id == identity
}
