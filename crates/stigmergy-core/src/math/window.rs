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

//! Bounded sliding window over floating point observations.
//!
//! `SlidingWindow<T>` keeps at most `capacity` of the most recent samples in
//! arrival order. Pushing into a full window evicts the oldest sample first,
//! so the window never grows past its capacity. Aggregates (`sum`, `mean`,
//! `min`) are always recomputed from the samples currently held, which keeps
//! them exactly consistent with the window contents at the cost of an
//! `O(capacity)` pass. Capacities used for routing statistics are tiny, so the
//! pass is cheaper than maintaining running aggregates that drift under
//! floating point cancellation.

use num_traits::Float;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T> SlidingWindow<T>
where
    T: Float,
{
    /// Creates an empty window holding at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity > 0,
            "called `SlidingWindow::new()` with zero capacity"
        );
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `sample`, evicting and returning the oldest sample if the
    /// window was already full.
    #[inline]
    pub fn push(&mut self, sample: T) -> Option<T> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently pushed sample.
    #[inline]
    pub fn latest(&self) -> Option<T> {
        self.samples.back().copied()
    }

    /// Sum of all samples; zero for an empty window.
    #[inline]
    pub fn sum(&self) -> T {
        self.samples.iter().fold(T::zero(), |acc, &s| acc + s)
    }

    /// Arithmetic mean of the samples, `None` when empty.
    #[inline]
    pub fn mean(&self) -> Option<T> {
        if self.samples.is_empty() {
            return None;
        }
        let len = T::from(self.samples.len())?;
        Some(self.sum() / len)
    }

    /// Smallest sample, `None` when empty.
    #[inline]
    pub fn min(&self) -> Option<T> {
        self.samples.iter().copied().reduce(T::min)
    }

    /// Largest sample, `None` when empty.
    #[inline]
    pub fn max(&self) -> Option<T> {
        self.samples.iter().copied().reduce(T::max)
    }

    /// Iterates the samples from oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.samples.iter()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl<T> std::fmt::Display for SlidingWindow<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlidingWindow[")?;
        for (i, s) in self.samples.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, "] ({}/{})", self.samples.len(), self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_window_has_no_aggregates() {
        let w = SlidingWindow::<f64>::new(3);
        assert!(w.is_empty());
        assert_eq!(w.mean(), None);
        assert_eq!(w.min(), None);
        assert_eq!(w.latest(), None);
        assert_eq!(w.sum(), 0.0);
    }

    #[test]
    #[should_panic(expected = "zero capacity")]
    fn test_zero_capacity_panics() {
        let _ = SlidingWindow::<f64>::new(0);
    }

    #[test]
    fn test_push_evicts_oldest_when_full() {
        let mut w = SlidingWindow::new(3);
        assert_eq!(w.push(1.0), None);
        assert_eq!(w.push(2.0), None);
        assert_eq!(w.push(3.0), None);
        assert!(w.is_full());
        assert_eq!(w.push(4.0), Some(1.0));
        assert_eq!(w.iter().copied().collect::<Vec<f64>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(w.latest(), Some(4.0));
    }

    #[test]
    fn test_aggregates_track_current_samples() {
        let mut w = SlidingWindow::new(2);
        w.push(10.0);
        w.push(4.0);
        assert_eq!(w.mean(), Some(7.0));
        assert_eq!(w.min(), Some(4.0));
        assert_eq!(w.max(), Some(10.0));

        w.push(6.0);
        assert_eq!(w.mean(), Some(5.0));
        assert_eq!(w.min(), Some(4.0));
        assert_eq!(w.max(), Some(6.0));
    }

    #[test]
    fn test_display_lists_samples_and_fill() {
        let mut w = SlidingWindow::new(4);
        w.push(1.5);
        w.push(2.0);
        assert_eq!(format!("{}", w), "SlidingWindow[1.5, 2] (2/4)");
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(
            capacity in 1usize..16,
            samples in proptest::collection::vec(0.0f64..1_000.0, 0..64),
        ) {
            let mut w = SlidingWindow::new(capacity);
            for s in samples {
                w.push(s);
                prop_assert!(w.len() <= capacity);
            }
        }

        #[test]
        fn prop_mean_is_sum_over_len(
            capacity in 1usize..16,
            samples in proptest::collection::vec(0.0f64..1_000.0, 1..64),
        ) {
            let mut w = SlidingWindow::new(capacity);
            for s in samples {
                w.push(s);
                let mean = w.mean().unwrap();
                let expected = w.iter().sum::<f64>() / w.len() as f64;
                prop_assert!((mean - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }
}
