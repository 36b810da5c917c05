//! Migration to create the user and cafe tables.
//!
//! Cafes carry the external place reference used as the import upsert
//! key and the hidden flag consulted by every public query.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user table
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(User::Subject)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::DisplayName).string())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create cafe table
        manager
            .create_table(
                Table::create()
                    .table(Cafe::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cafe::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cafe::Name).string().not_null())
                    .col(ColumnDef::new(Cafe::Address).string())
                    .col(ColumnDef::new(Cafe::City).string().not_null())
                    .col(ColumnDef::new(Cafe::Latitude).double())
                    .col(ColumnDef::new(Cafe::Longitude).double())
                    .col(
                        ColumnDef::new(Cafe::PlaceRef)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Cafe::Hidden)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Cafe::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes for the public filter path (city + hidden)
        manager
            .create_index(
                Index::create()
                    .name("idx_cafe_city")
                    .table(Cafe::Table)
                    .col(Cafe::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cafe_hidden")
                    .table(Cafe::Table)
                    .col(Cafe::Hidden)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cafe::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Subject,
    Email,
    DisplayName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Cafe {
    Table,
    Id,
    Name,
    Address,
    City,
    Latitude,
    Longitude,
    PlaceRef,
    Hidden,
    CreatedAt,
}
