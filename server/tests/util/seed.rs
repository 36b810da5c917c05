//! Seed helpers for integration tests.
//!
//! Ids are deterministic so tests can assert on them directly; the
//! token helpers mint against the test secret set up by the server
//! bootstrap.

use entity::{cafe, favorite, review, user};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use server::modules::auth::jwt;

use crate::bootstrap::init::ADMIN_EMAIL;

pub async fn seed_cafe(db: &DatabaseConnection, id: &str, name: &str, city: &str) {
    seed_cafe_at(db, id, name, city, Some(&format!("{id} Roast Ave")), false).await;
}

pub async fn seed_hidden_cafe(db: &DatabaseConnection, id: &str, name: &str, city: &str) {
    seed_cafe_at(db, id, name, city, Some(&format!("{id} Roast Ave")), true).await;
}

pub async fn seed_cafe_at(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    city: &str,
    address: Option<&str>,
    hidden: bool,
) {
    let model = cafe::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        address: Set(address.map(|a| a.to_string())),
        city: Set(city.to_string()),
        latitude: Set(None),
        longitude: Set(None),
        place_ref: Set(format!("place-{id}")),
        hidden: Set(hidden),
        created_at: Set(chrono::Utc::now().into()),
    };
    cafe::Entity::insert(model).exec(db).await.unwrap();
}

/// Seed a user whose subject matches the tokens from `mint_user_token`.
pub async fn seed_user(db: &DatabaseConnection, id: &str) {
    let model = user::ActiveModel {
        id: Set(id.to_string()),
        subject: Set(format!("auth0|{id}")),
        email: Set(format!("{id}@example.com")),
        display_name: Set(Some(format!("User {id}"))),
        created_at: Set(chrono::Utc::now().into()),
    };
    user::Entity::insert(model).exec(db).await.unwrap();
}

pub async fn seed_review(
    db: &DatabaseConnection,
    user_id: &str,
    cafe_id: &str,
    taste: i32,
    aesthetic: i32,
    study: i32,
) {
    let model = review::ActiveModel {
        id: Set(format!("rev-{user_id}-{cafe_id}")),
        user_id: Set(user_id.to_string()),
        cafe_id: Set(cafe_id.to_string()),
        taste: Set(taste),
        aesthetic: Set(aesthetic),
        study: Set(study),
        price: Set(None),
        comment: Set(None),
        created_at: Set(chrono::Utc::now().into()),
        updated_at: Set(chrono::Utc::now().into()),
    };
    review::Entity::insert(model).exec(db).await.unwrap();
}

/// Seed a review scoring `rating` on every dimension.
pub async fn seed_review_rated(db: &DatabaseConnection, user_id: &str, cafe_id: &str, rating: i32) {
    seed_review(db, user_id, cafe_id, rating, rating, rating).await;
}

pub async fn seed_favorite(db: &DatabaseConnection, user_id: &str, cafe_id: &str) {
    let model = favorite::ActiveModel {
        id: Set(format!("fav-{user_id}-{cafe_id}")),
        user_id: Set(user_id.to_string()),
        cafe_id: Set(cafe_id.to_string()),
        created_at: Set(chrono::Utc::now().into()),
    };
    favorite::Entity::insert(model).exec(db).await.unwrap();
}

/// Token for the user seeded as `id` by `seed_user`.
pub fn mint_user_token(id: &str) -> String {
    jwt::generate_token(
        &format!("auth0|{id}"),
        &format!("{id}@example.com"),
        Some(&format!("User {id}")),
    )
    .unwrap()
}

/// Token whose email is on the default test allowlist.
pub fn mint_admin_token() -> String {
    jwt::generate_token("auth0|admin", ADMIN_EMAIL, Some("Admin")).unwrap()
}
