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

//! Exact reference solvers.

use std::{cmp::Ordering, collections::BinaryHeap, fmt};
use stigmergy_model::{graph::Graph, index::NodeIndex};

/// Path and cost reported by a baseline. An unreachable destination yields
/// an empty path and an infinite cost.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineRoute {
    pub path: Vec<NodeIndex>,
    pub cost: f64,
}

impl BaselineRoute {
    #[inline]
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}

/// A deterministic shortest-path solver the stochastic solvers are measured
/// against.
pub trait Baseline {
    fn name(&self) -> &str;
    fn find_shortest_path(
        &self,
        graph: &Graph,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> BaselineRoute;
}

impl fmt::Debug for dyn Baseline + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Baseline({})", self.name())
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first.
#[derive(Debug, Clone, Copy)]
struct State {
    distance: f64,
    node: NodeIndex,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Binary-heap Dijkstra over the edge costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dijkstra;

impl Dijkstra {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Baseline for Dijkstra {
    fn name(&self) -> &str {
        "Dijkstra"
    }

    fn find_shortest_path(
        &self,
        graph: &Graph,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> BaselineRoute {
        let n = graph.num_nodes();
        if source.get() >= n || destination.get() >= n {
            return BaselineRoute::unreachable();
        }

        let mut distances = vec![f64::INFINITY; n];
        let mut parents: Vec<Option<NodeIndex>> = vec![None; n];
        let mut heap = BinaryHeap::new();
        distances[source.get()] = 0.0;
        heap.push(State {
            distance: 0.0,
            node: source,
        });

        while let Some(State { distance, node }) = heap.pop() {
            if node == destination {
                break;
            }
            if distance > distances[node.get()] {
                continue;
            }
            for &edge_index in graph.outgoing_edges(node) {
                let edge = graph.edge(edge_index);
                let next = edge.target();
                let candidate = distance + edge.cost();
                if candidate < distances[next.get()] {
                    distances[next.get()] = candidate;
                    parents[next.get()] = Some(node);
                    heap.push(State {
                        distance: candidate,
                        node: next,
                    });
                }
            }
        }

        let cost = distances[destination.get()];
        if !cost.is_finite() {
            return BaselineRoute::unreachable();
        }

        let mut path = vec![destination];
        let mut current = destination;
        while let Some(parent) = parents[current.get()] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        BaselineRoute { path, cost }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_graph() -> Graph {
        let mut g = Graph::new();
        for (s, t, c) in [
            ("A", "B", 2.0),
            ("B", "C", 2.0),
            ("A", "H", 2.0),
            ("H", "G", 2.0),
            ("C", "F", 1.0),
            ("F", "G", 1.0),
            ("G", "F", 1.0),
            ("F", "C", 1.0),
            ("C", "D", 10.0),
            ("E", "D", 2.0),
            ("G", "E", 2.0),
        ] {
            g.add_edge(s, t, c);
        }
        g
    }

    fn idx(g: &Graph, name: &str) -> NodeIndex {
        g.node_index(name).unwrap()
    }

    #[test]
    fn test_reference_graph_shortest_path() {
        let g = reference_graph();
        let route = Dijkstra::new().find_shortest_path(&g, idx(&g, "A"), idx(&g, "D"));
        assert_eq!(g.format_path(&route.path), "A -> H -> G -> E -> D");
        assert_eq!(route.cost, 8.0);
        assert_eq!(route.cost, g.compute_path_cost(&route.path));
    }

    #[test]
    fn test_every_pair_matches_path_cost() {
        let g = reference_graph();
        let dijkstra = Dijkstra::new();
        for s in g.nodes() {
            for t in g.nodes() {
                let route = dijkstra.find_shortest_path(&g, s, t);
                if route.is_reachable() {
                    assert_eq!(route.path.first(), Some(&s));
                    assert_eq!(route.path.last(), Some(&t));
                    assert_eq!(route.cost, g.compute_path_cost(&route.path));
                } else {
                    assert_eq!(route.cost, f64::INFINITY);
                }
            }
        }
    }

    #[test]
    fn test_source_is_destination() {
        let g = reference_graph();
        let a = idx(&g, "A");
        let route = Dijkstra::new().find_shortest_path(&g, a, a);
        assert_eq!(route, BaselineRoute { path: vec![a], cost: 0.0 });
    }

    #[test]
    fn test_unreachable_and_unknown() {
        let g = reference_graph();
        let route = Dijkstra::new().find_shortest_path(&g, idx(&g, "D"), idx(&g, "A"));
        assert_eq!(route, BaselineRoute::unreachable());
        assert!(!route.is_reachable());

        let route = Dijkstra::new().find_shortest_path(&g, idx(&g, "A"), NodeIndex::new(42));
        assert_eq!(route.cost, f64::INFINITY);
    }

    #[test]
    fn test_follows_updated_costs() {
        let mut g = reference_graph();
        let e = g.find_edge(idx(&g, "C"), idx(&g, "D")).unwrap();
        g.set_edge_cost(e, 1.0);
        let route = Dijkstra::new().find_shortest_path(&g, idx(&g, "A"), idx(&g, "D"));
        assert_eq!(g.format_path(&route.path), "A -> B -> C -> D");
        assert_eq!(route.cost, 5.0);
    }
}
