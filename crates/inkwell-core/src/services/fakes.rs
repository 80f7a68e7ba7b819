//! Test doubles for the ports.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Blog, BlogChanges, Comment, ProfileChanges, ReactionAction, ReactionTally, User,
};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BlogRepository, ContentSanitizer, PasswordService, TokenService, UserRepository,
};

#[derive(Default)]
pub struct FakeUsers {
    users: Mutex<Vec<User>>,
}

impl FakeUsers {
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email taken".into()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepoError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            changes.apply_to(u, at);
            u.clone()
        }))
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<User>, RepoError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.last_login = Some(at);
            u.clone()
        }))
    }
}

/// Keeps blogs in insertion order; listing is newest-first.
#[derive(Default)]
pub struct FakeBlogs {
    blogs: Mutex<Vec<Blog>>,
}

impl FakeBlogs {
    pub async fn get(&self, id: Uuid) -> Option<Blog> {
        self.blogs.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }
}

#[async_trait]
impl BlogRepository for FakeBlogs {
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.blogs.lock().unwrap().push(blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.get(id).await)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.get(id).await.is_some())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Blog>, RepoError> {
        let blogs = self.blogs.lock().unwrap();
        let needle = search.map(str::to_lowercase);
        Ok(blogs
            .iter()
            .rev()
            .filter(|b| match &needle {
                Some(n) => {
                    b.title.to_lowercase().contains(n) || b.content.to_lowercase().contains(n)
                }
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Blog>, RepoError> {
        let blogs = self.blogs.lock().unwrap();
        Ok(blogs
            .iter()
            .rev()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn update_content(
        &self,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, RepoError> {
        let mut blogs = self.blogs.lock().unwrap();
        Ok(blogs.iter_mut().find(|b| b.id == id).map(|b| {
            b.apply_changes(changes);
            b.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut blogs = self.blogs.lock().unwrap();
        let before = blogs.len();
        blogs.retain(|b| b.id != id);
        Ok(blogs.len() != before)
    }

    async fn apply_reaction(
        &self,
        blog_id: Uuid,
        user_id: Uuid,
        action: ReactionAction,
    ) -> Result<Option<ReactionTally>, RepoError> {
        let mut blogs = self.blogs.lock().unwrap();
        Ok(blogs.iter_mut().find(|b| b.id == blog_id).map(|b| {
            b.apply_reaction(user_id, action);
            b.tally()
        }))
    }

    async fn append_comment(
        &self,
        blog_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Vec<Comment>>, RepoError> {
        let mut blogs = self.blogs.lock().unwrap();
        Ok(blogs.iter_mut().find(|b| b.id == blog_id).map(|b| {
            b.comments.push(comment);
            b.comments.clone()
        }))
    }
}

/// "Hashes" by prefixing.
pub struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}

/// Tokens of the form `token:<uuid>`.
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        Ok(format!("token:{user_id}"))
    }

    fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        token
            .strip_prefix("token:")
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or_else(|| AuthError::InvalidToken(token.to_string()))
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}

/// Drops every tag, keeps text.
pub struct StripTags;

impl ContentSanitizer for StripTags {
    fn sanitize(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }
        out
    }
}
