//! Request and Response models for the sieve server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing query parameters and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::SieveQuery;
pub use responses::{DomainsResponse, HealthResponse, SieveResponse, StatsResponse};
