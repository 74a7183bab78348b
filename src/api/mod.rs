//! API Module
//!
//! HTTP handlers and routing for the ratings server REST API.
//!
//! # Endpoints
//! - `GET /get_data` - Look up a review record by identifier/title + provider
//! - `GET /stats` - Cached record count
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
