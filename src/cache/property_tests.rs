//! Property-Based Tests for the Sieve Cache
//!
//! Uses proptest to verify the store and engine invariants the design
//! depends on: idempotence, incremental extension, slice containment,
//! and statistics accounting.

use proptest::prelude::*;

use crate::cache::DomainStore;
use crate::config::Config;
use crate::sieve::{compute, extend_range, SieveFilter};

// == Strategies ==
/// Bounds small enough to keep the suite fast, large enough to cross
/// the small-factor boundary several times.
fn bound_strategy() -> impl Strategy<Value = u64> {
    0u64..3000
}

/// Non-degenerate base sets for the fixed-base filter.
fn bases_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(2u64..50, 1..4)
}

fn store_with_max(max_bound: u64) -> DomainStore {
    let config = Config {
        max_bound,
        ..Config::default()
    };
    DomainStore::new(&config)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: recomputing the same range is idempotent.
    #[test]
    fn prop_compute_is_idempotent(bound in bound_strategy()) {
        let first = compute(&SieveFilter::Primes, bound);
        let second = compute(&SieveFilter::Primes, bound);
        prop_assert_eq!(first.values(), second.values());
    }

    // Property: a prefix grown through any increasing bound sequence
    // equals a single from-scratch computation of the final bound.
    #[test]
    fn prop_incremental_extension_matches_scratch(
        mut bounds in prop::collection::vec(bound_strategy(), 1..8)
    ) {
        bounds.sort_unstable();
        let filter = SieveFilter::Primes;

        let mut prefix = compute(&filter, 0);
        for &bound in &bounds {
            let target = prefix.bound().max(bound);
            let delta = extend_range(&filter, prefix.values(), prefix.bound(), bound);
            prefix.extend_to(target, delta);
        }

        let final_bound = *bounds.last().unwrap();
        let scratch = compute(&filter, final_bound);
        prop_assert_eq!(prefix.values(), scratch.values());
    }

    // Property: every slice is sorted, duplicate-free, and confined to
    // the requested inclusive range.
    #[test]
    fn prop_slice_containment(
        bound in bound_strategy(),
        a in 0u64..3000,
        b in 0u64..3000
    ) {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        let upper = upper.min(bound);
        let lower = lower.min(upper);
        let prefix = compute(&SieveFilter::Primes, bound);
        let slice = prefix.slice(lower, upper);

        for window in slice.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
        if let (Some(&first), Some(&last)) = (slice.first(), slice.last()) {
            prop_assert!(first >= lower);
            prop_assert!(last <= upper);
        }
    }

    // Property: the fixed-base filter keeps exactly the integers none
    // of its bases divide.
    #[test]
    fn prop_multiples_filter_exactness(
        bases in bases_strategy(),
        bound in bound_strategy()
    ) {
        let filter = SieveFilter::Multiples { bases: bases.clone() };
        let prefix = compute(&filter, bound);

        let survivors: std::collections::HashSet<u64> =
            prefix.values().iter().copied().collect();
        for n in 1..=bound {
            let divisible = bases.iter().any(|&b| n % b == 0);
            prop_assert_eq!(
                survivors.contains(&n),
                !divisible,
                "disagreement at {} for bases {:?}",
                n,
                &bases
            );
        }
    }

    // Property: every request is accounted as exactly one hit or one
    // miss, and the engine never runs more often than there are misses.
    #[test]
    fn prop_statistics_accounting(
        uppers in prop::collection::vec(bound_strategy(), 1..20)
    ) {
        let store = store_with_max(3000);
        let total = uppers.len() as u64;

        tokio_test::block_on(async {
            for upper in uppers {
                store.get_or_extend("primes", 0, upper).await.unwrap();
            }
        });

        let stats = store.stats();
        prop_assert_eq!(stats.hits + stats.misses, total);
        prop_assert!(stats.computations <= stats.misses);
    }

    // Property: bounds above the configured maximum are always rejected
    // before any computation happens.
    #[test]
    fn prop_over_max_is_rejected(excess in 1u64..1000) {
        let max_bound = 500;
        let store = store_with_max(max_bound);

        let result = tokio_test::block_on(
            store.get_or_extend("primes", 0, max_bound + excess)
        );
        prop_assert!(result.is_err());
        prop_assert_eq!(store.stats().computations, 0);
    }
}
