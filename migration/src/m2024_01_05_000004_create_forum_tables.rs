//! Migration to create course discussion threads and posts.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, index, set_null, updated_at, uuid_pk, uuid_ref,
    uuid_ref_null,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumThreads::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ForumThreads::Id))
                    .col(uuid_ref(ForumThreads::CourseId))
                    .col(uuid_ref(ForumThreads::AuthorId))
                    .col(ColumnDef::new(ForumThreads::Title).string().not_null())
                    .col(ColumnDef::new(ForumThreads::Body).text().not_null())
                    .col(
                        ColumnDef::new(ForumThreads::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::IsLocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_forum_threads_course_id",
                        ForumThreads::Table,
                        ForumThreads::CourseId,
                        Courses::Table,
                        Courses::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_forum_threads_author_id",
                        ForumThreads::Table,
                        ForumThreads::AuthorId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // Replies keep their place in the thread when the post they answered is removed.
        manager
            .create_table(
                Table::create()
                    .table(ForumPosts::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ForumPosts::Id))
                    .col(uuid_ref(ForumPosts::ForumThreadId))
                    .col(uuid_ref(ForumPosts::AuthorId))
                    .col(uuid_ref_null(ForumPosts::ParentPostId))
                    .col(ColumnDef::new(ForumPosts::Body).text().not_null())
                    .col(
                        ColumnDef::new(ForumPosts::EditedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_forum_posts_forum_thread_id",
                        ForumPosts::Table,
                        ForumPosts::ForumThreadId,
                        ForumThreads::Table,
                        ForumThreads::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_forum_posts_author_id",
                        ForumPosts::Table,
                        ForumPosts::AuthorId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_forum_posts_parent_post_id",
                        ForumPosts::Table,
                        ForumPosts::ParentPostId,
                        ForumPosts::Table,
                        ForumPosts::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_forum_posts_parent_post_id",
                ForumPosts::Table,
                [ForumPosts::ParentPostId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["forum_posts", "forum_threads"]).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ForumThreads {
    Table,
    Id,
    CourseId,
    AuthorId,
    Title,
    Body,
    IsPinned,
    IsLocked,
}

#[derive(DeriveIden)]
enum ForumPosts {
    Table,
    Id,
    ForumThreadId,
    AuthorId,
    ParentPostId,
    Body,
    EditedAt,
}
