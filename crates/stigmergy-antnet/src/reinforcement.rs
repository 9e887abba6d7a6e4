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

//! Reinforcement strength of a backward ant.
//!
//! For a trip time `t` observed at a node whose statistic window is `W`:
//!
//! ```text
//! t_best = min(W)
//! t_sup  = mean + variance / (sqrt(1 - γ) · sqrt(|W|))
//! r      = c1 · (t_best / t)
//!        + c2 · (t_sup - t_best) / ((t_sup - t_best) + (t - t_best))
//! ```
//!
//! The first term rewards trips close to the best one seen recently, the
//! second rewards trips that fall inside the confidence bound `t_sup`. When
//! the second term's denominator vanishes (every sample equals `t`) it
//! contributes nothing. `r` is clamped to `[0, 1]`.

use crate::traffic::TrafficStat;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reinforcement {
    c1: f64,
    c2: f64,
    gamma: f64,
}

impl Default for Reinforcement {
    fn default() -> Self {
        Self {
            c1: 0.6,
            c2: 0.3,
            gamma: 0.7,
        }
    }
}

impl Reinforcement {
    /// Creates the rule without validation; see `AntNetConfigBuilder` for
    /// the checked path.
    #[inline]
    pub const fn new_unchecked(c1: f64, c2: f64, gamma: f64) -> Self {
        Self { c1, c2, gamma }
    }

    #[inline]
    pub fn c1(&self) -> f64 {
        self.c1
    }

    #[inline]
    pub fn c2(&self) -> f64 {
        self.c2
    }

    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Reinforcement for trip time `t`, which must already be folded into
    /// `stat`. Returns `0.0` for an empty statistic.
    pub fn strength(&self, stat: &TrafficStat, t: f64) -> f64 {
        let Some(t_best) = stat.best() else {
            return 0.0;
        };

        let first = if t > 0.0 { self.c1 * (t_best / t) } else { self.c1 };

        let n = stat.len() as f64;
        let t_sup = stat.mean() + stat.variance() / ((1.0 - self.gamma).sqrt() * n.sqrt());
        let numerator = t_sup - t_best;
        let denominator = numerator + (t - t_best);
        let second = if denominator == 0.0 || !denominator.is_finite() {
            0.0
        } else {
            self.c2 * (numerator / denominator)
        };

        let r = first + second;
        if r.is_finite() { r.clamp(0.0, 1.0) } else { 0.0 }
    }
}
