//! API Module
//!
//! HTTP handlers and routing for the sieve server REST API.
//!
//! # Endpoints
//! - `GET /sieve?domain=<id>&lower=<int>&upper=<int>` - Sieve a range
//! - `GET /domains` - List configured domains
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
