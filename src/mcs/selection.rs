//! Culling and parent selection.
//!
//! - [`soft_truncation`]: rank-biased stochastic culling of a population
//!   sorted ascending by score
//! - [`roulette_select`]: fitness-proportionate parent selection on integer
//!   weights, with an optional excluded index
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::random::RandomSource;

/// Marks `remove_count` distinct indices of a population of `len` for removal.
///
/// Candidate index `k` cycles through `0..len`. For each candidate a draw
/// `r` in `[0, len)` is taken, and `k` is marked when `r > k` and it is not
/// marked yet. On a population sorted ascending by score this removes weak
/// individuals with higher probability while leaving every index except the
/// last one exposed. The last index is never removed.
///
/// Returns the marked indices in descending order, ready for removal.
///
/// # Panics
/// Panics if `remove_count >= len` while `remove_count > 0`, since at most
/// `len - 1` indices can ever be marked.
pub fn soft_truncation<R: RandomSource + ?Sized>(
    len: usize,
    remove_count: usize,
    rng: &mut R,
) -> Vec<usize> {
    if remove_count == 0 {
        return Vec::new();
    }
    assert!(
        remove_count < len,
        "cannot remove {remove_count} of {len} individuals"
    );

    let mut marked = vec![false; len];
    let mut removed = Vec::with_capacity(remove_count);
    let mut k = 0;
    while removed.len() < remove_count {
        let r = rng.next_in_range(len);
        if r > k && !marked[k] {
            marked[k] = true;
            removed.push(k);
        }
        k = (k + 1) % len;
    }

    removed.sort_unstable_by(|a, b| b.cmp(a));
    removed
}

/// Fitness-proportionate selection on integer weights.
///
/// Equivalent to drawing uniformly from a list in which index `j` appears
/// `weights[j]` times, with `blocked` left out of the list. The list is
/// never built: a single draw in `[0, total)` is resolved by a cumulative
/// walk, which picks the same element the list would.
///
/// If nothing but `blocked` carries weight (a single-survivor population),
/// `blocked` itself is returned.
///
/// # Panics
/// Panics if `weights` is empty or all weights are zero.
pub fn roulette_select<R: RandomSource + ?Sized>(
    weights: &[u64],
    blocked: Option<usize>,
    rng: &mut R,
) -> usize {
    assert!(!weights.is_empty(), "cannot select from empty population");

    let weight_of = |i: usize| -> u64 {
        if Some(i) == blocked {
            0
        } else {
            weights[i]
        }
    };

    let total: u64 = (0..weights.len()).map(&weight_of).sum();
    if total == 0 {
        return match blocked {
            Some(b) if weights.get(b).is_some_and(|&w| w > 0) => b,
            _ => panic!("roulette selection needs at least one positive weight"),
        };
    }

    let mut threshold = rng.next_in_range(total as usize) as u64;
    for i in 0..weights.len() {
        let w = weight_of(i);
        if threshold < w {
            return i;
        }
        threshold -= w;
    }

    unreachable!("threshold is below the total weight")
}
