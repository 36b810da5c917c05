//! Viewer accounts provisioned from verified token claims.
//!
//! There is no signup flow. An account row appears the first time an
//! authenticated user performs a write; reads never create rows.

use entity::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

use super::jwt::Claims;

/// Account lookup and provisioning keyed by the token subject.
pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find the account for a token subject, if one exists.
    pub async fn find_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<user::Model>, sea_orm::DbErr> {
        user::Entity::find()
            .filter(user::Column::Subject.eq(subject))
            .one(self.db)
            .await
    }

    /// Return the account for these claims, creating it on first use.
    ///
    /// Concurrent first writes race on the unique subject column; an
    /// insert that loses the race falls back to the winning row.
    pub async fn ensure_user(&self, claims: &Claims) -> Result<user::Model, sea_orm::DbErr> {
        if let Some(existing) = self.find_by_subject(&claims.sub).await? {
            return Ok(existing);
        }

        let record = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            subject: Set(claims.sub.clone()),
            email: Set(claims.email.clone()),
            display_name: Set(claims.name.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };

        match record.insert(self.db).await {
            Ok(created) => {
                info!(user_id = %created.id, "Provisioned account on first write");
                Ok(created)
            }
            Err(insert_err) => match self.find_by_subject(&claims.sub).await? {
                Some(existing) => Ok(existing),
                None => Err(insert_err),
            },
        }
    }
}
