use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkwell_core::domain::{Blog, BlogChanges, Comment, ReactionAction, ReactionTally};
use inkwell_core::error::RepoError;
use inkwell_core::ports::BlogRepository;

/// In-memory blog store.
///
/// Blogs are kept in insertion order. Every read-modify-write runs under the
/// store's write lock, which makes reactions and comments atomic per blog.
pub struct InMemoryBlogRepository {
    store: RwLock<Vec<Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased alphanumeric words of `text`.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Text of `html` with tags dropped, as the Postgres parser sees it. Tags
/// become spaces so words on either side stay apart.
fn visible_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Every word of the query occurs in the title or the visible content.
fn matches(blog: &Blog, query: &str) -> bool {
    let content = visible_text(&blog.content);
    let haystack: Vec<String> = words(&blog.title).chain(words(&content)).collect();
    let mut terms = words(query).peekable();
    if terms.peek().is_none() {
        return true;
    }
    terms.all(|term| haystack.iter().any(|w| w == &term))
}

/// Newest first; among equal timestamps the later insert wins.
fn newest_first<'a>(blogs: impl DoubleEndedIterator<Item = &'a Blog>) -> Vec<Blog> {
    let mut out: Vec<Blog> = blogs.rev().cloned().collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|b| b.id == blog.id) {
            return Err(RepoError::Constraint("Blog already exists".to_string()));
        }
        store.push(blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|b| b.id == id).cloned())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().any(|b| b.id == id))
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(match search {
            Some(query) => newest_first(store.iter().filter(|b| matches(b, query))),
            None => newest_first(store.iter()),
        })
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(newest_first(
            store.iter().filter(|b| b.author_id == author_id),
        ))
    }

    async fn update_content(
        &self,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.iter_mut().find(|b| b.id == id).map(|blog| {
            blog.apply_changes(changes);
            blog.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|b| b.id != id);
        Ok(store.len() != before)
    }

    async fn apply_reaction(
        &self,
        blog_id: Uuid,
        user_id: Uuid,
        action: ReactionAction,
    ) -> Result<Option<ReactionTally>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.iter_mut().find(|b| b.id == blog_id).map(|blog| {
            blog.apply_reaction(user_id, action);
            blog.tally()
        }))
    }

    async fn append_comment(
        &self,
        blog_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Vec<Comment>>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.iter_mut().find(|b| b.id == blog_id).map(|blog| {
            blog.comments.push(comment);
            blog.comments.clone()
        }))
    }
}
