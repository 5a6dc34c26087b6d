//! Sieve Engine
//!
//! Elimination over integer ranges. The engine only ever computes the
//! delta `(from, to]` of a request: callers hold the already-computed
//! prefix and pass its survivors back in as the seed, so monotonically
//! growing bounds cost `O((to - from) log log to)` amortized instead of
//! a full rebuild per request.

use crate::sieve::{SieveFilter, SievePrefix};

// == Integer Square Root ==
/// Largest `x` with `x * x <= n`.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = (n as f64).sqrt() as u64;
    // float rounding can land one off in either direction
    while (x as u128 + 1) * (x as u128 + 1) <= n as u128 {
        x += 1;
    }
    while (x as u128) * (x as u128) > n as u128 {
        x -= 1;
    }
    x
}

// == Extend Range ==
/// Survivors of `filter` in `(from, to]`, ascending.
///
/// `seed` holds the survivors already known up to `from`. For the prime
/// filter, small factors are taken from the seed when `isqrt(to)` does
/// not exceed `from`; otherwise small-factor coverage is rebuilt from
/// scratch up to `isqrt(to)`.
pub fn extend_range(filter: &SieveFilter, seed: &[u64], from: u64, to: u64) -> Vec<u64> {
    if to <= from {
        return Vec::new();
    }
    match filter {
        SieveFilter::Primes => primes_between(seed, from, to),
        SieveFilter::Multiples { bases } => indivisible_between(bases, from, to),
    }
}

// == Compute ==
/// Builds a full prefix for `[0, bound]` from scratch.
pub fn compute(filter: &SieveFilter, bound: u64) -> SievePrefix {
    let delta = extend_range(filter, &[], 0, bound);
    let mut prefix = SievePrefix::empty();
    prefix.extend_to(bound, delta);
    prefix
}

// == Prime Sieve ==
/// Primes up to `limit` by plain elimination. Only used for
/// small-factor coverage, so `limit` is at most `isqrt(to)`.
fn simple_sieve(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }
    let n = limit as usize;
    let mut composite = vec![false; n + 1];
    let mut primes = Vec::new();
    for i in 2..=n {
        if composite[i] {
            continue;
        }
        primes.push(i as u64);
        let mut j = i.saturating_mul(i);
        while j <= n {
            composite[j] = true;
            j += i;
        }
    }
    primes
}

/// Segmented prime sieve over `(from, to]`.
fn primes_between(seed: &[u64], from: u64, to: u64) -> Vec<u64> {
    // candidates start past `from` and never below 2
    let lo = (from + 1).max(2);
    if to < lo {
        return Vec::new();
    }

    let root = isqrt(to);
    let base: Vec<u64> = if root <= from {
        // the seed already covers every factor the segment needs
        seed.iter().copied().take_while(|&p| p <= root).collect()
    } else {
        simple_sieve(root)
    };

    let len = (to - lo) as usize + 1;
    let mut composite = vec![false; len];
    for &p in &base {
        let first_in_segment = ((lo + p - 1) / p) * p;
        // never mark the prime itself, only proper multiples
        let mut m = first_in_segment.max(p * p);
        while m <= to {
            composite[(m - lo) as usize] = true;
            m += p;
        }
    }

    composite
        .iter()
        .enumerate()
        .filter(|(_, &c)| !c)
        .map(|(i, _)| lo + i as u64)
        .collect()
}

// == Fixed-Base Sieve ==
/// Survivors in `(from, to]` that no base divides.
fn indivisible_between(bases: &[u64], from: u64, to: u64) -> Vec<u64> {
    (from + 1..=to)
        .filter(|&n| !bases.iter().any(|&b| b != 0 && n % b == 0))
        .collect()
}
