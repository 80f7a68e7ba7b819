//! One row per (blog, user) holding a reaction. Neutral is the absence of a
//! row, so a user can never like and dislike the same blog at once.

use sea_orm::entity::prelude::*;

use inkwell_core::domain::Reaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ReactionKind {
    #[sea_orm(string_value = "like")]
    Like,
    #[sea_orm(string_value = "dislike")]
    Dislike,
}

impl ReactionKind {
    pub fn reaction(self) -> Reaction {
        match self {
            Self::Like => Reaction::Liked,
            Self::Dislike => Reaction::Disliked,
        }
    }

    /// Row kind for a reaction state; `None` for neutral.
    pub fn for_reaction(reaction: Reaction) -> Option<Self> {
        match reaction {
            Reaction::Liked => Some(Self::Like),
            Reaction::Disliked => Some(Self::Dislike),
            Reaction::Neutral => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_reactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub blog_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub kind: ReactionKind,
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
