//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Eviction: Removes idle domain entries at configured intervals

mod eviction;

pub use eviction::spawn_eviction_task;
