use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Expression index backing full-text search over title and content.
const SEARCH_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_blogs_search ON blogs \
     USING GIN (to_tsvector('english', title || ' ' || content))";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Blogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Blogs::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Blogs::Title).string_len(150).not_null())
                    .col(ColumnDef::new(Blogs::Content).text().not_null())
                    .col(
                        ColumnDef::new(Blogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Blogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blogs_author")
                            .from(Blogs::Table, Blogs::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blogs_author_id")
                    .table(Blogs::Table)
                    .col(Blogs::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blogs_created_at")
                    .table(Blogs::Table)
                    .col(Blogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(SEARCH_INDEX)
            .await?;

        // Neutral is the absence of a row; the key makes like and dislike
        // mutually exclusive per (blog, user).
        manager
            .create_table(
                Table::create()
                    .table(BlogReactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogReactions::BlogId).uuid().not_null())
                    .col(ColumnDef::new(BlogReactions::UserId).uuid().not_null())
                    .col(ColumnDef::new(BlogReactions::Kind).text().not_null())
                    .col(
                        ColumnDef::new(BlogReactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(BlogReactions::BlogId)
                            .col(BlogReactions::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_reactions_blog")
                            .from(BlogReactions::Table, BlogReactions::BlogId)
                            .to(Blogs::Table, Blogs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_reactions_user")
                            .from(BlogReactions::Table, BlogReactions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blog_reactions_blog_kind")
                    .table(BlogReactions::Table)
                    .col(BlogReactions::BlogId)
                    .col(BlogReactions::Kind)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogComments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogComments::BlogId).uuid().not_null())
                    .col(ColumnDef::new(BlogComments::UserId).uuid().not_null())
                    .col(ColumnDef::new(BlogComments::Position).integer().not_null())
                    .col(ColumnDef::new(BlogComments::Text).text().not_null())
                    .col(
                        ColumnDef::new(BlogComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_comments_blog")
                            .from(BlogComments::Table, BlogComments::BlogId)
                            .to(Blogs::Table, Blogs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_comments_user")
                            .from(BlogComments::Table, BlogComments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blog_comments_position")
                    .table(BlogComments::Table)
                    .col(BlogComments::BlogId)
                    .col(BlogComments::Position)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogReactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Blogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Blogs {
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogReactions {
    Table,
    BlogId,
    UserId,
    Kind,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BlogComments {
    Table,
    Id,
    BlogId,
    UserId,
    Position,
    Text,
    CreatedAt,
}
