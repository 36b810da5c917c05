//! Migration to create the review and favorite tables.
//!
//! Both tables carry a unique (user_id, cafe_id) index: a user holds at
//! most one review and one favorite per cafe, and concurrent submissions
//! are serialized by the constraint rather than by application locking.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create review table
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Review::UserId).string().not_null())
                    .col(ColumnDef::new(Review::CafeId).string().not_null())
                    .col(ColumnDef::new(Review::Taste).integer().not_null())
                    .col(ColumnDef::new(Review::Aesthetic).integer().not_null())
                    .col(ColumnDef::new(Review::Study).integer().not_null())
                    .col(ColumnDef::new(Review::Price).double())
                    .col(ColumnDef::new(Review::Comment).string())
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Review::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_cafe")
                            .from(Review::Table, Review::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One review per (user, cafe); upserts key on this
        manager
            .create_index(
                Index::create()
                    .name("ux_review_user_cafe")
                    .table(Review::Table)
                    .col(Review::UserId)
                    .col(Review::CafeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_cafe")
                    .table(Review::Table)
                    .col(Review::CafeId)
                    .to_owned(),
            )
            .await?;

        // Create favorite table
        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorite::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorite::UserId).string().not_null())
                    .col(ColumnDef::new(Favorite::CafeId).string().not_null())
                    .col(
                        ColumnDef::new(Favorite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user")
                            .from(Favorite::Table, Favorite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_cafe")
                            .from(Favorite::Table, Favorite::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One favorite per (user, cafe)
        manager
            .create_index(
                Index::create()
                    .name("ux_favorite_user_cafe")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .col(Favorite::CafeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorite::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    UserId,
    CafeId,
    Taste,
    Aesthetic,
    Study,
    Price,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Favorite {
    Table,
    Id,
    UserId,
    CafeId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Cafe {
    Table,
    Id,
}
