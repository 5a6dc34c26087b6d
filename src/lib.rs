//! Sieved - an incremental sieve computation server
//!
//! Generates sieve-filtered integer sequences over HTTP, caching the
//! largest computed prefix per domain and extending it incrementally.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod sieve;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_eviction_task;
