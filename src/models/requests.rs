//! Request DTOs for the sieve server API
//!
//! Defines the structure of incoming query parameters.

use serde::Deserialize;

use crate::error::SieveError;

/// Query parameters for the sieve endpoint (GET /sieve)
///
/// Bounds arrive as signed integers so negative inputs can be rejected
/// with a structured error instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct SieveQuery {
    /// Which configured domain to sieve
    pub domain: String,
    /// Lower bound of the requested slice, inclusive (default 0)
    #[serde(default)]
    pub lower: i64,
    /// Upper bound of the requested slice, inclusive
    pub upper: i64,
}

impl SieveQuery {
    /// Validates the bounds against the configured maximum.
    ///
    /// Runs before the store is consulted; a failing request never
    /// reaches the engine.
    pub fn validate(&self, max_bound: u64) -> Result<(u64, u64), SieveError> {
        if self.lower < 0 || self.upper < 0 {
            return Err(SieveError::InvalidBound(
                "bounds must be non-negative".to_string(),
            ));
        }
        let (lower, upper) = (self.lower as u64, self.upper as u64);
        if lower > upper {
            return Err(SieveError::InvalidBound(format!(
                "lower bound {} exceeds upper bound {}",
                lower, upper
            )));
        }
        if upper > max_bound {
            return Err(SieveError::InvalidBound(format!(
                "upper bound {} exceeds configured maximum {}",
                upper, max_bound
            )));
        }
        Ok((lower, upper))
    }
}
