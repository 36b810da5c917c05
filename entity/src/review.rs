//! Entity for per-user cafe reviews.
//!
//! A user holds at most one review per cafe; resubmitting updates the
//! existing row. Enforced by a unique (user_id, cafe_id) index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub user_id: String,

    pub cafe_id: String,

    /// Taste rating, 1 to 5
    pub taste: i32,

    /// Aesthetic rating, 1 to 5
    pub aesthetic: i32,

    /// Study-friendliness rating, 1 to 5
    pub study: i32,

    /// Estimated price of a typical order, non-negative
    pub price: Option<f64>,

    /// Free-text comment, bounded length
    pub comment: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::cafe::Entity",
        from = "Column::CafeId",
        to = "super::cafe::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Cafe,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::cafe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cafe.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
