pub mod prelude;

pub mod cafe;
pub mod favorite;
pub mod review;
pub mod user;
