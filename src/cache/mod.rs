//! Cache Module
//!
//! Persistent review caching: a single-file SQLite store, a JSON byte codec,
//! a lazy expiry policy, and the facade tying them together.

pub mod codec;
pub mod expiry;
pub mod keys;

mod facade;
mod store;


// Re-export public types
pub use expiry::{DEFAULT_TTL_SECS, NEVER_EXPIRES};
pub use facade::ReviewCache;
pub use keys::derive_key;
pub use store::SqliteStore;
