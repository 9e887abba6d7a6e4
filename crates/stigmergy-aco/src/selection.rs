// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Transition rules shared by every ant.
//!
//! Foragers weigh each candidate edge by its desirability
//! `pheromone^α · (1/cost)^β` and pick one by roulette-wheel selection: a
//! value `r` is drawn uniformly from `[0, total)` and the first candidate
//! whose cumulative weight exceeds `r` wins. Candidates with zero weight can
//! therefore never be chosen, and in the long run every candidate is chosen
//! in proportion to its weight. Solution ants skip the randomness and take
//! the candidate with the largest score.

use rand::Rng;

/// Weight of an edge for probabilistic transitions.
///
/// Returns `0.0` for degenerate inputs (non-finite or negative results), so
/// such edges are never selected while others are available.
#[inline]
pub fn edge_desirability(pheromone: f64, cost: f64, alpha: f64, beta: f64) -> f64 {
    let weight = pheromone.max(0.0).powf(alpha) * (1.0 / cost).powf(beta);
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

#[inline]
fn sanitize(weight: f64) -> f64 {
    if weight > 0.0 { weight } else { 0.0 }
}

/// Picks a key with probability proportional to its weight.
///
/// Returns `None` for an empty candidate list. If no candidate carries
/// positive weight the pick is uniform over all candidates; if some carry
/// infinite weight the pick is uniform over those.
pub fn roulette_wheel<K, R>(candidates: &[(K, f64)], rng: &mut R) -> Option<K>
where
    K: Copy,
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    let total: f64 = candidates.iter().map(|(_, w)| sanitize(*w)).sum();
    if total == f64::INFINITY {
        let unbounded: Vec<K> = candidates
            .iter()
            .filter(|(_, w)| *w == f64::INFINITY)
            .map(|(k, _)| *k)
            .collect();
        return Some(unbounded[rng.random_range(0..unbounded.len())]);
    }
    if total <= 0.0 {
        return Some(candidates[rng.random_range(0..candidates.len())].0);
    }

    let draw = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for &(key, weight) in candidates {
        let weight = sanitize(weight);
        if weight == 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(key);
        if cumulative > draw {
            return Some(key);
        }
    }
    // Rounding can leave the running sum a hair below the draw.
    last_positive
}

/// Picks the key with the largest score; ties go to the earliest candidate.
/// NaN scores are ignored.
pub fn greedy_max<K, I>(candidates: I) -> Option<K>
where
    I: IntoIterator<Item = (K, f64)>,
{
    let mut best: Option<(K, f64)> = None;
    for (key, score) in candidates {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((key, score)),
        }
    }
    best.map(|(key, _)| key)
}
