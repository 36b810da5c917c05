pub use super::cafe::Entity as Cafe;
pub use super::favorite::Entity as Favorite;
pub use super::review::Entity as Review;
pub use super::user::Entity as User;
