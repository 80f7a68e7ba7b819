//! Blog CRUD with ownership-gated mutation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Blog, BlogChanges, BlogCounts, FieldUpdate, is_owner};
use crate::error::DomainError;
use crate::ports::{BlogRepository, ContentSanitizer, UserRepository};
use crate::services::people::{AuthorSummary, CommentView, Directory};
use crate::validation::{TITLE_MAX_CHARS, Validator};

/// Blog creation input.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
}

/// Partial blog update.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: FieldUpdate<String>,
    pub content: FieldUpdate<String>,
}

/// A blog as returned to callers: the record, its author, its comments with
/// their authors, and derived counts. `blog.comments` is moved into
/// `comments`.
#[derive(Debug, Clone)]
pub struct BlogView {
    pub blog: Blog,
    pub author: Option<AuthorSummary>,
    pub comments: Vec<CommentView>,
    pub counts: BlogCounts,
}

pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    users: Arc<dyn UserRepository>,
    sanitizer: Arc<dyn ContentSanitizer>,
}

impl BlogService {
    pub fn new(
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        sanitizer: Arc<dyn ContentSanitizer>,
    ) -> Self {
        Self {
            blogs,
            users,
            sanitizer,
        }
    }

    pub async fn create(&self, author_id: Uuid, input: NewBlog) -> Result<BlogView, DomainError> {
        let mut v = Validator::new();
        let title = v.required_text("title", "Title", &input.title, TITLE_MAX_CHARS);
        let content = self.clean_content(&mut v, &input.content);
        let (title, content) = v.finish((title, content))?;

        let blog = self.blogs.insert(Blog::new(author_id, title, content)).await?;
        tracing::info!(blog_id = %blog.id, author_id = %author_id, "Blog created");

        self.view(blog).await
    }

    /// Only the author may update. Fields absent from `patch` are kept;
    /// new content is sanitized again.
    pub async fn update(
        &self,
        blog_id: Uuid,
        identity: Uuid,
        patch: BlogPatch,
    ) -> Result<BlogView, DomainError> {
        self.owned_blog(blog_id, identity, "update").await?;

        let mut v = Validator::new();
        let title = patch
            .title
            .map(|t| v.required_text("title", "Title", &t, TITLE_MAX_CHARS));
        let content = patch.content.map(|c| self.clean_content(&mut v, &c));
        let changes = v.finish(BlogChanges {
            title: title.as_set().cloned(),
            content: content.as_set().cloned(),
        })?;

        let blog = self
            .blogs
            .update_content(blog_id, changes)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(blog_id))?;
        tracing::info!(blog_id = %blog_id, "Blog updated");

        self.view(blog).await
    }

    /// Only the author may delete. Deletion is permanent.
    pub async fn delete(&self, blog_id: Uuid, identity: Uuid) -> Result<(), DomainError> {
        self.owned_blog(blog_id, identity, "delete").await?;

        if !self.blogs.delete(blog_id).await? {
            return Err(DomainError::blog_not_found(blog_id));
        }
        tracing::info!(blog_id = %blog_id, "Blog deleted");
        Ok(())
    }

    /// All blogs newest-first, or full-text matches of `search`.
    pub async fn get_all(&self, search: Option<&str>) -> Result<Vec<BlogView>, DomainError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let blogs = self.blogs.list(search).await?;
        self.views(blogs).await
    }

    pub async fn get_by_id(&self, blog_id: Uuid) -> Result<BlogView, DomainError> {
        let blog = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(blog_id))?;
        self.view(blog).await
    }

    pub async fn get_mine(&self, identity: Uuid) -> Result<Vec<BlogView>, DomainError> {
        let blogs = self.blogs.find_by_author(identity).await?;
        self.views(blogs).await
    }

    async fn owned_blog(
        &self,
        blog_id: Uuid,
        identity: Uuid,
        action: &str,
    ) -> Result<Blog, DomainError> {
        let blog = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(blog_id))?;

        if !is_owner(identity, &blog) {
            tracing::warn!(blog_id = %blog_id, user_id = %identity, action, "Ownership check failed");
            return Err(DomainError::Forbidden(format!(
                "Not authorized to {action} this blog"
            )));
        }
        Ok(blog)
    }

    fn clean_content(&self, v: &mut Validator, raw: &str) -> String {
        if raw.trim().is_empty() {
            v.reject("content", "Content is required");
            return String::new();
        }
        let clean = self.sanitizer.sanitize(raw);
        if clean.trim().is_empty() {
            v.reject("content", "Content is empty after sanitization");
        }
        clean
    }

    async fn view(&self, blog: Blog) -> Result<BlogView, DomainError> {
        let mut views = self.views(vec![blog]).await?;
        views
            .pop()
            .ok_or_else(|| DomainError::Internal("blog view lost".to_string()))
    }

    /// Blog authors and comment authors are resolved in one lookup.
    async fn views(&self, blogs: Vec<Blog>) -> Result<Vec<BlogView>, DomainError> {
        let ids = blogs.iter().flat_map(|b| {
            std::iter::once(b.author_id).chain(b.comments.iter().map(|c| c.author_id))
        });
        let directory = Directory::load(self.users.as_ref(), ids).await?;

        Ok(blogs
            .into_iter()
            .map(|mut blog| {
                let counts = blog.counts();
                let comments = directory.comments(std::mem::take(&mut blog.comments));
                BlogView {
                    author: directory.author(blog.author_id),
                    comments,
                    counts,
                    blog,
                }
            })
            .collect())
    }
}
