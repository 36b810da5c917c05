//! Entity for cafe listings.
//!
//! A cafe is uniquely identified by its external place reference so
//! repeated imports upsert instead of duplicating rows. Hidden cafes
//! stay out of public queries but remain visible to moderators.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    pub name: String,

    /// Street address, when known
    pub address: Option<String>,

    /// Metro label (LA, OC, Bay Area, Seattle, NYC)
    pub city: String,

    /// Latitude; present together with longitude or not at all
    pub latitude: Option<f64>,

    /// Longitude; present together with latitude or not at all
    pub longitude: Option<f64>,

    /// External place reference (unique upsert key)
    #[sea_orm(unique)]
    pub place_ref: String,

    /// Hidden cafes are excluded from public queries
    pub hidden: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorite,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorite.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
