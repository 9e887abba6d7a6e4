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

//! Ordered node paths.

use stigmergy_model::{graph::Graph, index::NodeIndex};

/// A path through a graph, source first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Route {
    nodes: Vec<NodeIndex>,
}

impl Route {
    #[inline]
    pub fn new(nodes: Vec<NodeIndex>) -> Self {
        Self { nodes }
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn source(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn destination(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }

    /// Number of edges traversed.
    #[inline]
    pub fn num_hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Returns `true` if some node occurs more than once.
    pub fn has_cycle(&self) -> bool {
        self.nodes
            .iter()
            .enumerate()
            .any(|(i, n)| self.nodes[..i].contains(n))
    }

    /// Resolves the node names of this route in `graph`.
    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.nodes.iter().map(|n| graph.node_name(*n)).collect()
    }

    #[inline]
    pub fn into_nodes(self) -> Vec<NodeIndex> {
        self.nodes
    }
}

impl From<Vec<NodeIndex>> for Route {
    #[inline]
    fn from(nodes: Vec<NodeIndex>) -> Self {
        Self::new(nodes)
    }
}

impl AsRef<[NodeIndex]> for Route {
    #[inline]
    fn as_ref(&self) -> &[NodeIndex] {
        &self.nodes
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Route[")?;
        for (i, n) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", n.get())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn test_endpoints_and_hops() {
        let route = Route::new(vec![n(0), n(3), n(2)]);
        assert_eq!(route.source(), Some(n(0)));
        assert_eq!(route.destination(), Some(n(2)));
        assert_eq!(route.num_hops(), 2);
        assert!(!route.has_cycle());

        let empty = Route::default();
        assert_eq!(empty.source(), None);
        assert_eq!(empty.num_hops(), 0);
    }

    #[test]
    fn test_has_cycle_detects_repeated_nodes() {
        let route = Route::from(vec![n(0), n(1), n(2), n(1)]);
        assert!(route.has_cycle());
    }

    #[test]
    fn test_names_resolve_against_graph() {
        let mut graph = Graph::new();
        graph.add_edge("A", "B", 1.0);
        let route = Route::new(vec![
            graph.node_index("A").unwrap(),
            graph.node_index("B").unwrap(),
        ]);
        assert_eq!(route.names(&graph), vec!["A", "B"]);
        assert_eq!(format!("{}", route), "Route[0 -> 1]");
    }
}
