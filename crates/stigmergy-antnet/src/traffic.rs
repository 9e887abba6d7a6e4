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

//! Trip-time statistics per `(node, destination)` pair.
//!
//! Every backward ant reports, for each node on its path, how long the trip
//! from that node to the destination took. `TrafficStat` keeps the last
//! `w_max` of those trip times in a `SlidingWindow` and derives two
//! quantities from them after each observation:
//!
//! - `mean = sum(W) / |W|`
//! - `variance = (t - mean)² / |W|`, a biased estimate based on the latest
//!   observation `t` only.
//!
//! The window is updated first (evicting the oldest sample when full) and the
//! statistics are recomputed from the resulting window, so they always agree
//! with its contents.

use rustc_hash::FxHashMap;
use stigmergy_core::math::window::SlidingWindow;
use stigmergy_model::index::NodeIndex;

/// Window capacity used when none is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficStat {
    window: SlidingWindow<f64>,
    mean: f64,
    variance: f64,
}

impl TrafficStat {
    /// Creates an empty statistic keeping at most `window_size` trip times.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    #[inline]
    pub fn new(window_size: usize) -> Self {
        Self {
            window: SlidingWindow::new(window_size),
            mean: 0.0,
            variance: 0.0,
        }
    }

    /// Folds the trip time `t` into the window and refreshes the statistics.
    pub fn observe(&mut self, t: f64) {
        self.window.push(t);
        let len = self.window.len() as f64;
        self.mean = self.window.mean().unwrap_or(t);
        self.variance = (t - self.mean).powi(2) / len;
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Best (smallest) trip time in the window.
    #[inline]
    pub fn best(&self) -> Option<f64> {
        self.window.min()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    #[inline]
    pub fn window(&self) -> &SlidingWindow<f64> {
        &self.window
    }
}

/// All traffic statistics of a network, created lazily on first observation.
#[derive(Debug, Clone)]
pub struct TrafficTable {
    window_size: usize,
    stats: FxHashMap<(NodeIndex, NodeIndex), TrafficStat>,
}

impl TrafficTable {
    #[inline]
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            stats: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Records that a trip from `node` to `destination` took `t` and returns
    /// the refreshed statistic.
    pub fn observe(&mut self, node: NodeIndex, destination: NodeIndex, t: f64) -> &TrafficStat {
        let window_size = self.window_size;
        let stat = self
            .stats
            .entry((node, destination))
            .or_insert_with(|| TrafficStat::new(window_size));
        stat.observe(t);
        stat
    }

    #[inline]
    pub fn get(&self, node: NodeIndex, destination: NodeIndex) -> Option<&TrafficStat> {
        self.stats.get(&(node, destination))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.stats.clear();
    }
}

impl Default for TrafficTable {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_observation_has_zero_variance() {
        let mut stat = TrafficStat::new(7);
        stat.observe(4.0);
        assert_eq!(stat.mean(), 4.0);
        assert_eq!(stat.variance(), 0.0);
        assert_eq!(stat.best(), Some(4.0));
    }

    #[test]
    fn test_variance_uses_latest_observation() {
        let mut stat = TrafficStat::new(7);
        stat.observe(2.0);
        stat.observe(6.0);
        // mean = 4, variance = (6 - 4)^2 / 2
        assert_eq!(stat.mean(), 4.0);
        assert_eq!(stat.variance(), 2.0);
    }

    #[test]
    fn test_window_evicts_before_recomputing() {
        let mut stat = TrafficStat::new(2);
        stat.observe(100.0);
        stat.observe(2.0);
        stat.observe(4.0);
        assert_eq!(stat.len(), 2);
        assert_eq!(stat.mean(), 3.0);
        assert_eq!(stat.best(), Some(2.0));
        assert_eq!(stat.variance(), 0.5);
    }

    #[test]
    fn test_table_keys_by_node_and_destination() {
        let mut table = TrafficTable::default();
        let (a, b, d) = (NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(3));
        table.observe(a, d, 5.0);
        table.observe(a, d, 7.0);
        table.observe(b, d, 1.0);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(a, d).unwrap().mean(), 6.0);
        assert_eq!(table.get(b, d).unwrap().len(), 1);
        assert!(table.get(d, a).is_none());
        assert_eq!(table.window_size(), DEFAULT_WINDOW_SIZE);
    }

    proptest! {
        #[test]
        fn prop_window_bounded_and_mean_consistent(
            window_size in 1usize..10,
            times in proptest::collection::vec(1.0f64..500.0, 1..80),
        ) {
            let mut stat = TrafficStat::new(window_size);
            for t in times {
                stat.observe(t);
                prop_assert!(stat.len() <= window_size);
                let expected = stat.window().iter().sum::<f64>() / stat.len() as f64;
                prop_assert!((stat.mean() - expected).abs() <= 1e-9 * expected.max(1.0));
                prop_assert!(stat.variance() >= 0.0);
            }
        }
    }
}
