//! PostgreSQL repository implementations.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use inkwell_core::domain::{
    Blog, BlogChanges, Comment, FieldUpdate, ProfileChanges, ReactionAction, ReactionTally, User,
    mask_email,
};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BlogRepository, UserRepository};

use super::entity::blog_reaction::ReactionKind;
use super::entity::{blog, blog_comment, blog_reaction, user};

/// Full-text predicate over title and content, backed by a GIN index.
const SEARCH_PREDICATE: &str = "to_tsvector('english', title || ' ' || content) @@ plainto_tsquery('english', $1)";

fn repo_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    pub(crate) db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(model.into())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepoError> {
        // Only columns that are `Set` end up in the UPDATE.
        let mut patch = user::ActiveModel {
            id: Set(id),
            updated_at: Set(at.into()),
            ..Default::default()
        };
        if let FieldUpdate::Set(name) = changes.name {
            patch.name = Set(name);
        }
        if let FieldUpdate::Set(email) = changes.email {
            patch.email = Set(email);
        }
        if let FieldUpdate::Set(bio) = changes.bio {
            patch.bio = Set(bio);
        }
        if let FieldUpdate::Set(socials) = changes.socials {
            patch.linkedin = Set(socials.linkedin);
            patch.instagram = Set(socials.instagram);
            patch.x = Set(socials.x);
        }

        match patch.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(repo_err(e)),
        }
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<User>, RepoError> {
        let stamp = user::ActiveModel {
            id: Set(id),
            last_login: Set(Some(at.into())),
            ..Default::default()
        };

        match stamp.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(repo_err(e)),
        }
    }
}

/// PostgreSQL blog repository.
///
/// Reactions and comments are stored in child tables and folded back into
/// [`Blog`] values on read. Per-blog read-modify-write operations run in a
/// transaction holding a row lock on the blog.
pub struct PostgresBlogRepository {
    pub(crate) db: DbConn,
}

impl PostgresBlogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn bare_blog(model: blog::Model) -> Blog {
    Blog {
        id: model.id,
        author_id: model.author_id,
        title: model.title,
        content: model.content,
        likes: BTreeSet::new(),
        dislikes: BTreeSet::new(),
        comments: Vec::new(),
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

/// Attach reactions and ordered comments to blog rows, keeping row order.
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<blog::Model>,
) -> Result<Vec<Blog>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let reactions = blog_reaction::Entity::find()
        .filter(blog_reaction::Column::BlogId.is_in(ids.iter().copied()))
        .all(conn)
        .await?;
    let comments = blog_comment::Entity::find()
        .filter(blog_comment::Column::BlogId.is_in(ids.iter().copied()))
        .order_by_asc(blog_comment::Column::Position)
        .all(conn)
        .await?;

    let mut blogs: Vec<Blog> = models.into_iter().map(bare_blog).collect();
    let index: HashMap<Uuid, usize> = ids.into_iter().enumerate().map(|(i, id)| (id, i)).collect();

    for reaction in reactions {
        if let Some(&i) = index.get(&reaction.blog_id) {
            match reaction.kind {
                ReactionKind::Like => blogs[i].likes.insert(reaction.user_id),
                ReactionKind::Dislike => blogs[i].dislikes.insert(reaction.user_id),
            };
        }
    }
    for comment in comments {
        if let Some(&i) = index.get(&comment.blog_id) {
            blogs[i].comments.push(comment.into());
        }
    }

    Ok(blogs)
}

async fn count_reactions<C: ConnectionTrait>(
    conn: &C,
    blog_id: Uuid,
    kind: ReactionKind,
) -> Result<usize, DbErr> {
    let count = blog_reaction::Entity::find()
        .filter(blog_reaction::Column::BlogId.eq(blog_id))
        .filter(blog_reaction::Column::Kind.eq(kind))
        .count(conn)
        .await?;

    Ok(count as usize)
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        blog::ActiveModel::from(&blog)
            .insert(&txn)
            .await
            .map_err(repo_err)?;

        let now = Utc::now();
        let reactions: Vec<blog_reaction::ActiveModel> = blog
            .likes
            .iter()
            .map(|id| (*id, ReactionKind::Like))
            .chain(blog.dislikes.iter().map(|id| (*id, ReactionKind::Dislike)))
            .map(|(user_id, kind)| blog_reaction::ActiveModel {
                blog_id: Set(blog.id),
                user_id: Set(user_id),
                kind: Set(kind),
                created_at: Set(now.into()),
            })
            .collect();
        if !reactions.is_empty() {
            blog_reaction::Entity::insert_many(reactions)
                .exec(&txn)
                .await
                .map_err(repo_err)?;
        }

        let comments: Vec<blog_comment::ActiveModel> = blog
            .comments
            .iter()
            .cloned()
            .zip(0..)
            .map(|(comment, position)| {
                blog_comment::ActiveModel::from_comment(blog.id, position, comment)
            })
            .collect();
        if !comments.is_empty() {
            blog_comment::Entity::insert_many(comments)
                .exec(&txn)
                .await
                .map_err(repo_err)?;
        }

        txn.commit().await.map_err(repo_err)?;
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let Some(model) = blog::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?
        else {
            return Ok(None);
        };

        let mut blogs = hydrate(&self.db, vec![model]).await.map_err(repo_err)?;
        Ok(blogs.pop())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepoError> {
        let count = blog::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(count > 0)
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Blog>, RepoError> {
        let mut query = blog::Entity::find().order_by_desc(blog::Column::CreatedAt);
        if let Some(term) = search {
            query = query.filter(Expr::cust_with_values(SEARCH_PREDICATE, [term.to_owned()]));
        }

        let models = query.all(&self.db).await.map_err(repo_err)?;
        hydrate(&self.db, models).await.map_err(repo_err)
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Blog>, RepoError> {
        let models = blog::Entity::find()
            .filter(blog::Column::AuthorId.eq(author_id))
            .order_by_desc(blog::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        hydrate(&self.db, models).await.map_err(repo_err)
    }

    async fn update_content(
        &self,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, RepoError> {
        let Some(model) = blog::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await.map_err(repo_err)?;
        let mut blogs = hydrate(&self.db, vec![updated]).await.map_err(repo_err)?;
        Ok(blogs.pop())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        // Reactions and comments go with it via ON DELETE CASCADE.
        let result = blog::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn apply_reaction(
        &self,
        blog_id: Uuid,
        user_id: Uuid,
        action: ReactionAction,
    ) -> Result<Option<ReactionTally>, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        let locked = blog::Entity::find_by_id(blog_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(repo_err)?;
        if locked.is_none() {
            return Ok(None);
        }

        let existing = blog_reaction::Entity::find_by_id((blog_id, user_id))
            .one(&txn)
            .await
            .map_err(repo_err)?;
        let current = existing
            .as_ref()
            .map(|row| row.kind.reaction())
            .unwrap_or_default();
        let next = current.apply(action);

        match (existing, ReactionKind::for_reaction(next)) {
            (Some(_), None) => {
                blog_reaction::Entity::delete_by_id((blog_id, user_id))
                    .exec(&txn)
                    .await
                    .map_err(repo_err)?;
            }
            (Some(row), Some(kind)) => {
                let mut active = row.into_active_model();
                active.kind = Set(kind);
                active.update(&txn).await.map_err(repo_err)?;
            }
            (None, Some(kind)) => {
                blog_reaction::ActiveModel {
                    blog_id: Set(blog_id),
                    user_id: Set(user_id),
                    kind: Set(kind),
                    created_at: Set(Utc::now().into()),
                }
                .insert(&txn)
                .await
                .map_err(repo_err)?;
            }
            (None, None) => {}
        }

        let tally = ReactionTally {
            likes: count_reactions(&txn, blog_id, ReactionKind::Like)
                .await
                .map_err(repo_err)?,
            dislikes: count_reactions(&txn, blog_id, ReactionKind::Dislike)
                .await
                .map_err(repo_err)?,
        };

        txn.commit().await.map_err(repo_err)?;
        tracing::debug!(%blog_id, %user_id, reaction = ?next, "Reaction applied");

        Ok(Some(tally))
    }

    async fn append_comment(
        &self,
        blog_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Vec<Comment>>, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        let locked = blog::Entity::find_by_id(blog_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(repo_err)?;
        if locked.is_none() {
            return Ok(None);
        }

        let existing = blog_comment::Entity::find()
            .filter(blog_comment::Column::BlogId.eq(blog_id))
            .count(&txn)
            .await
            .map_err(repo_err)?;
        let position = i32::try_from(existing)
            .map_err(|_| RepoError::Query("comment position out of range".to_string()))?;

        blog_comment::ActiveModel::from_comment(blog_id, position, comment)
            .insert(&txn)
            .await
            .map_err(repo_err)?;

        let comments = blog_comment::Entity::find()
            .filter(blog_comment::Column::BlogId.eq(blog_id))
            .order_by_asc(blog_comment::Column::Position)
            .all(&txn)
            .await
            .map_err(repo_err)?;

        txn.commit().await.map_err(repo_err)?;

        Ok(Some(comments.into_iter().map(Into::into).collect()))
    }
}
