//! Request, response, and review models for the ratings API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP bodies, plus the typed review record
//! exchanged with providers.

pub mod requests;
pub mod responses;
pub mod review;

// Re-export commonly used types
pub use requests::LookupParams;
pub use responses::{HealthResponse, StatsResponse};
pub use review::{ReviewItem, ReviewRecord, ReviewStatus};
