pub use sea_orm_migration::prelude::*;

mod m20260810_120000_create_user_cafe_tables;
mod m20260810_120500_create_review_favorite_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_120000_create_user_cafe_tables::Migration),
            Box::new(m20260810_120500_create_review_favorite_tables::Migration),
        ]
    }
}
