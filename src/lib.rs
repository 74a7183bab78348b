//! Parental Guide - a parental-guidance ratings aggregation server
//!
//! Normalizes content ratings from third-party review sites and serves them
//! through a small HTTP API backed by a persistent SQLite cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;

pub use api::AppState;
pub use cache::ReviewCache;
pub use config::Config;
