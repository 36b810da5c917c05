//! Cafe discovery service: rating aggregation, weighted ranking,
//! diacritic-insensitive search, favorites, and catalog moderation
//! behind a REST API.

pub mod api;
pub mod bootstrap;
pub mod modules;
pub mod runner;
pub mod utils;
