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

//! Per-node routing tables.
//!
//! Each node holds a weight in `[0, 1]` for every outgoing neighbor. Weights
//! start uniform (`1/k` for `k` neighbors) and move under reinforcement:
//!
//! ```text
//! rt[m] += r · (1 - rt[m])      for the reinforced neighbor m
//! rt[k] -= r · rt[k]            for every other neighbor k
//! ```
//!
//! Starting from a uniform table the weights keep summing to one.

use smallvec::SmallVec;
use std::fmt;
use stigmergy_model::{graph::Graph, index::NodeIndex};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutingTable {
    entries: SmallVec<[(NodeIndex, f64); 4]>,
}

impl RoutingTable {
    /// Creates a uniform table over `neighbors`. Duplicates are kept once.
    pub fn uniform<I>(neighbors: I) -> Self
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        let mut entries: SmallVec<[(NodeIndex, f64); 4]> = SmallVec::new();
        for neighbor in neighbors {
            if !entries.iter().any(|(n, _)| *n == neighbor) {
                entries.push((neighbor, 0.0));
            }
        }
        let weight = if entries.is_empty() {
            0.0
        } else {
            1.0 / entries.len() as f64
        };
        for entry in &mut entries {
            entry.1 = weight;
        }
        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn weight(&self, neighbor: NodeIndex) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| *n == neighbor)
            .map(|(_, w)| *w)
    }

    #[inline]
    pub fn entries(&self) -> &[(NodeIndex, f64)] {
        &self.entries
    }

    pub fn neighbors(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Reinforces `neighbor` with strength `r` and decays the others.
    /// Returns `false`, leaving the table untouched, if `neighbor` is not in
    /// the table.
    pub fn reinforce(&mut self, neighbor: NodeIndex, r: f64) -> bool {
        if !self.entries.iter().any(|(n, _)| *n == neighbor) {
            return false;
        }
        let r = r.clamp(0.0, 1.0);
        for (n, w) in &mut self.entries {
            if *n == neighbor {
                *w += r * (1.0 - *w);
            } else {
                *w -= r * *w;
            }
        }
        true
    }

    fn has_same_neighbors(&self, graph: &Graph, node: NodeIndex) -> bool {
        graph.out_degree(node) == self.len()
            && graph.neighbors(node).all(|n| self.weight(n).is_some())
    }
}

impl fmt::Display for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoutingTable[")?;
        for (i, (n, w)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.4}", n.get(), w)?;
        }
        write!(f, "]")
    }
}

/// Routing tables for every node of a graph, indexed by `NodeIndex`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutingTables {
    tables: Vec<RoutingTable>,
}

impl RoutingTables {
    pub fn new(graph: &Graph) -> Self {
        let tables = graph
            .nodes()
            .map(|node| RoutingTable::uniform(graph.neighbors(node)))
            .collect();
        Self { tables }
    }

    /// Brings the tables in line with the graph's current topology. Nodes
    /// added since the last sync get uniform tables; a node whose neighbor
    /// set changed is reset to uniform. Everything else keeps its learned
    /// weights. Returns the number of tables that were (re)initialized.
    pub fn sync(&mut self, graph: &Graph) -> usize {
        let mut reset = 0;
        self.tables.truncate(graph.num_nodes());
        for node in graph.nodes() {
            match self.tables.get_mut(node.get()) {
                Some(table) if table.has_same_neighbors(graph, node) => {}
                Some(table) => {
                    *table = RoutingTable::uniform(graph.neighbors(node));
                    reset += 1;
                }
                None => {
                    self.tables.push(RoutingTable::uniform(graph.neighbors(node)));
                    reset += 1;
                }
            }
        }
        reset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[inline]
    pub fn table(&self, node: NodeIndex) -> Option<&RoutingTable> {
        self.tables.get(node.get())
    }

    /// Weight of the hop `node -> neighbor`, `0.0` if unknown.
    #[inline]
    pub fn weight(&self, node: NodeIndex, neighbor: NodeIndex) -> f64 {
        self.table(node)
            .and_then(|t| t.weight(neighbor))
            .unwrap_or(0.0)
    }

    /// See `RoutingTable::reinforce`.
    #[inline]
    pub fn reinforce(&mut self, node: NodeIndex, neighbor: NodeIndex, r: f64) -> bool {
        self.tables
            .get_mut(node.get())
            .is_some_and(|t| t.reinforce(neighbor, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn idx(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn test_uniform_start() {
        let table = RoutingTable::uniform([idx(1), idx(2), idx(3), idx(1)]);
        assert_eq!(table.len(), 3);
        for n in [1, 2, 3] {
            assert!((table.weight(idx(n)).unwrap() - 1.0 / 3.0).abs() < 1e-12);
        }
        assert_eq!(table.weight(idx(9)), None);
        assert!(RoutingTable::uniform(std::iter::empty::<NodeIndex>()).is_empty());
    }

    #[test]
    fn test_reinforce_moves_weight_to_neighbor() {
        let mut table = RoutingTable::uniform([idx(1), idx(2)]);
        assert!(table.reinforce(idx(1), 0.5));
        assert_eq!(table.weight(idx(1)), Some(0.75));
        assert_eq!(table.weight(idx(2)), Some(0.25));
        assert!(!table.reinforce(idx(7), 0.5));
        assert_eq!(table.weight(idx(1)), Some(0.75));
    }

    #[test]
    fn test_display() {
        let table = RoutingTable::uniform([idx(1), idx(2)]);
        assert_eq!(table.to_string(), "RoutingTable[1: 0.5000, 2: 0.5000]");
    }

    #[test]
    fn test_tables_follow_graph() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("A", "C", 1.0);
        g.add_edge("B", "C", 1.0);

        let mut tables = RoutingTables::new(&g);
        assert_eq!(tables.len(), 3);
        let (a, b, c) = (idx(0), idx(1), idx(2));
        assert_eq!(tables.weight(a, b), 0.5);
        assert_eq!(tables.weight(b, c), 1.0);
        assert!(tables.table(c).unwrap().is_empty());

        assert!(tables.reinforce(a, b, 0.2));
        g.add_edge("C", "D", 1.0);
        assert_eq!(tables.sync(&g), 2);
        assert_eq!(tables.len(), 4);
        assert!((tables.weight(a, b) - 0.6).abs() < 1e-12);
        assert_eq!(tables.weight(c, idx(3)), 1.0);

        g.set_edge_cost(g.find_edge(a, b).unwrap(), 4.0);
        assert_eq!(tables.sync(&g), 0);
    }

    proptest! {
        #[test]
        fn prop_reinforcement_preserves_unit_sum(
            k in 1usize..6,
            updates in proptest::collection::vec((0usize..6, 0.0f64..=1.0), 0..50),
        ) {
            let mut table = RoutingTable::uniform((0..k).map(idx));
            for (n, r) in updates {
                table.reinforce(idx(n % k), r);
                let sum: f64 = table.entries().iter().map(|(_, w)| w).sum();
                prop_assert!((sum - 1.0).abs() < 1e-9);
                prop_assert!(table.entries().iter().all(|(_, w)| (0.0..=1.0).contains(w)));
            }
        }
    }
}
