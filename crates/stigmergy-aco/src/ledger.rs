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

//! Batched pheromone deposits.
//!
//! During a cycle, the paths of fit ants are recorded in a `DepositLedger`
//! instead of being written to the graph directly. The ledger accumulates
//! `1 / path_cost` per edge and is applied in one serialized reduction after
//! evaporation, so the forward phase only ever needs shared access to the
//! graph and evaporation always precedes the deposits of the same cycle.

use crate::config::PheromoneUpdate;
use rustc_hash::FxHashMap;
use stigmergy_model::{
    graph::Graph,
    index::{EdgeIndex, NodeIndex},
};

#[derive(Debug, Clone, Default)]
pub struct DepositLedger {
    amounts: FxHashMap<EdgeIndex, f64>,
    paths: usize,
}

impl DepositLedger {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a deposit of `1 / cost(path)` on every edge of `path`.
    ///
    /// Returns `false` without recording anything if the path has fewer than
    /// two nodes or a non-finite cost.
    pub fn record_path(&mut self, graph: &Graph, path: &[NodeIndex]) -> bool {
        let cost = graph.compute_path_cost(path);
        if path.len() < 2 || !cost.is_finite() || cost <= 0.0 {
            return false;
        }
        let amount = 1.0 / cost;
        for hop in path.windows(2) {
            if let Some(edge) = graph.find_edge(hop[0], hop[1]) {
                *self.amounts.entry(edge).or_insert(0.0) += amount;
            }
        }
        self.paths += 1;
        true
    }

    /// Total amount pending for `edge`.
    #[inline]
    pub fn amount(&self, edge: EdgeIndex) -> f64 {
        self.amounts.get(&edge).copied().unwrap_or(0.0)
    }

    /// Number of paths recorded since the last application.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.paths
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Writes all pending deposits to `graph` and clears the ledger.
    ///
    /// With `PheromoneUpdate::LocalEvaporation` every touched edge is
    /// evaporated once right before its deposit. With
    /// `PheromoneUpdate::Global` the caller evaporates the whole graph
    /// beforehand.
    pub fn apply(&mut self, graph: &mut Graph, update: PheromoneUpdate) {
        for (&edge, &amount) in &self.amounts {
            if update == PheromoneUpdate::LocalEvaporation {
                graph.evaporate_edge(edge);
            }
            graph.deposit_pheromone(edge, amount);
        }
        self.amounts.clear();
        self.paths = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "D", 1.0);
        g.add_edge("A", "C", 2.0);
        g.add_edge("C", "D", 2.0);
        g
    }

    fn path(g: &Graph, names: &[&str]) -> Vec<NodeIndex> {
        names.iter().map(|n| g.node_index(n).unwrap()).collect()
    }

    #[test]
    fn test_records_accumulate_per_edge() {
        let g = diamond();
        let mut ledger = DepositLedger::new();
        assert!(ledger.record_path(&g, &path(&g, &["A", "B", "D"])));
        assert!(ledger.record_path(&g, &path(&g, &["A", "B", "D"])));
        assert!(ledger.record_path(&g, &path(&g, &["A", "C", "D"])));

        let ab = g.find_edge(g.node_index("A").unwrap(), g.node_index("B").unwrap()).unwrap();
        let ac = g.find_edge(g.node_index("A").unwrap(), g.node_index("C").unwrap()).unwrap();
        assert_eq!(ledger.amount(ab), 1.0);
        assert_eq!(ledger.amount(ac), 0.25);
        assert_eq!(ledger.num_paths(), 3);
    }

    #[test]
    fn test_rejects_trivial_and_broken_paths() {
        let g = diamond();
        let mut ledger = DepositLedger::new();
        assert!(!ledger.record_path(&g, &path(&g, &["A"])));
        assert!(!ledger.record_path(&g, &path(&g, &["A", "D"])));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_apply_writes_and_clears() {
        let mut g = diamond();
        let mut ledger = DepositLedger::new();
        ledger.record_path(&g, &path(&g, &["A", "B", "D"]));
        g.evaporate();
        ledger.apply(&mut g, PheromoneUpdate::Global);

        let (a, b, c) = (
            g.node_index("A").unwrap(),
            g.node_index("B").unwrap(),
            g.node_index("C").unwrap(),
        );
        assert!((g.edge_pheromone(a, b).unwrap() - 1.4).abs() < 1e-12);
        assert!((g.edge_pheromone(a, c).unwrap() - 0.9).abs() < 1e-12);
        assert!(ledger.is_empty());
        assert_eq!(ledger.num_paths(), 0);
    }

    #[test]
    fn test_local_evaporation_only_touches_recorded_edges() {
        let mut g = diamond();
        let mut ledger = DepositLedger::new();
        ledger.record_path(&g, &path(&g, &["A", "C", "D"]));
        ledger.apply(&mut g, PheromoneUpdate::LocalEvaporation);

        let (a, b, c) = (
            g.node_index("A").unwrap(),
            g.node_index("B").unwrap(),
            g.node_index("C").unwrap(),
        );
        assert!((g.edge_pheromone(a, c).unwrap() - 1.15).abs() < 1e-12);
        assert_eq!(g.edge_pheromone(a, b), Some(1.0));
    }
}
