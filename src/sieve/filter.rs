//! Sieve Filter Module
//!
//! The pluggable elimination predicate. Filters are declared in the
//! configuration file and identify independent cached domains.

use serde::{Deserialize, Serialize};

// == Sieve Filter ==
/// Elimination predicate applied by the engine.
///
/// A filter starts from the full candidate range and removes multiples
/// of its base values; the survivors form the result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum SieveFilter {
    /// Classic prime sieve: base values are discovered as the smallest
    /// surviving candidates and their multiples are eliminated.
    Primes,
    /// Fixed-base sieve: every multiple of each configured base is
    /// eliminated. Survivors are integers divisible by none of the bases.
    Multiples { bases: Vec<u64> },
}

impl SieveFilter {
    /// Short human-readable description used in logs and the domain catalog.
    pub fn describe(&self) -> String {
        match self {
            SieveFilter::Primes => "primes".to_string(),
            SieveFilter::Multiples { bases } => {
                format!("multiples excluded: {:?}", bases)
            }
        }
    }
}
