//! Blog comment entity. `position` keeps the append order of a blog's comments.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use inkwell_core::domain::Comment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub blog_id: Uuid,
    pub user_id: Uuid,
    pub position: i32,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blog::Entity",
        from = "Column::BlogId",
        to = "super::blog::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Blog,
}

impl Related<super::blog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.user_id,
            text: model.text,
            created_at: model.created_at.into(),
        }
    }
}

impl ActiveModel {
    pub fn from_comment(blog_id: Uuid, position: i32, comment: Comment) -> Self {
        Self {
            id: Set(comment.id),
            blog_id: Set(blog_id),
            user_id: Set(comment.author_id),
            position: Set(position),
            text: Set(comment.text),
            created_at: Set(comment.created_at.into()),
        }
    }
}
