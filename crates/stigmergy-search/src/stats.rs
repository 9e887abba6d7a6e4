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

//! Statistics reporting for colony runs.
//!
//! `SearchStatistics` aggregates counters over a whole solver run: completed
//! cycles, spawned ants and how many of them reached the destination, the
//! number of moves taken and the number of pheromone (or routing table)
//! reinforcements applied. Counters saturate instead of overflowing so they
//! can be bumped from the hot loop without checks.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchStatistics {
    /// Number of completed learning cycles.
    pub cycles: u64,

    /// Number of ants spawned over all cycles.
    pub ants_spawned: u64,

    /// Number of ants that reached the destination within their step budget.
    pub fit_ants: u64,

    /// Number of ants that did not reach the destination.
    pub unfit_ants: u64,

    /// Total number of moves taken by all ants.
    pub steps: u64,

    /// Number of path reinforcements applied.
    pub deposits: u64,

    /// Wall-clock time of the run.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_cycle(&mut self) {
        self.cycles = self.cycles.saturating_add(1);
    }

    #[inline]
    pub fn on_ant_spawned(&mut self) {
        self.ants_spawned = self.ants_spawned.saturating_add(1);
    }

    /// Records an ant that finished its forward walk.
    #[inline]
    pub fn on_ant_finished(&mut self, fit: bool, steps: u64) {
        if fit {
            self.fit_ants = self.fit_ants.saturating_add(1);
        } else {
            self.unfit_ants = self.unfit_ants.saturating_add(1);
        }
        self.steps = self.steps.saturating_add(steps);
    }

    #[inline]
    pub fn on_deposit(&mut self) {
        self.deposits = self.deposits.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Share of finished ants that were fit, `0.0` before any ant finished.
    #[inline]
    pub fn fit_ratio(&self) -> f64 {
        let finished = self.fit_ants.saturating_add(self.unfit_ants);
        if finished == 0 {
            0.0
        } else {
            self.fit_ants as f64 / finished as f64
        }
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Stigmergy Search Statistics:")?;
        writeln!(f, "   Cycles:           {}", self.cycles)?;
        writeln!(f, "   Ants Spawned:     {}", self.ants_spawned)?;
        writeln!(f, "   Fit Ants:         {}", self.fit_ants)?;
        writeln!(f, "   Unfit Ants:       {}", self.unfit_ants)?;
        writeln!(f, "   Steps:            {}", self.steps)?;
        writeln!(f, "   Deposits:         {}", self.deposits)?;
        writeln!(f, "   Total Time:       {:?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = SearchStatistics::default();
        assert_eq!(stats.cycles, 0);
        assert_eq!(stats.ants_spawned, 0);
        assert_eq!(stats.fit_ratio(), 0.0);
        assert_eq!(stats.time_total, Duration::ZERO);
    }

    #[test]
    fn test_on_ant_finished_splits_fit_and_unfit() {
        let mut stats = SearchStatistics::default();
        stats.on_ant_finished(true, 4);
        stats.on_ant_finished(true, 5);
        stats.on_ant_finished(false, 50);
        assert_eq!(stats.fit_ants, 2);
        assert_eq!(stats.unfit_ants, 1);
        assert_eq!(stats.steps, 59);
        assert!((stats.fit_ratio() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStatistics {
            cycles: u64::MAX,
            steps: u64::MAX - 1,
            ..Default::default()
        };
        stats.on_cycle();
        stats.on_ant_finished(false, 10);
        assert_eq!(stats.cycles, u64::MAX);
        assert_eq!(stats.steps, u64::MAX);
    }

    #[test]
    fn test_display_mentions_every_counter() {
        let mut stats = SearchStatistics::default();
        stats.on_cycle();
        stats.on_deposit();
        let text = format!("{}", stats);
        assert!(text.contains("Cycles:           1"));
        assert!(text.contains("Deposits:         1"));
        assert!(text.contains("Total Time:"));
    }
}
