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

//! # Pheromone Graph
//!
//! A directed, weighted graph whose edges carry a travel cost and a pheromone
//! level. The graph is the shared store every ant reads from; pheromone is only
//! ever written by the serialized update steps of a solver (evaporation and
//! deposit), never by an ant while it walks.
//!
//! ## Invariants
//!
//! - At most one edge per ordered `(source, target)` pair. Adding an existing
//!   pair replaces its cost and resets its pheromone to `INITIAL_PHEROMONE`.
//! - Adding an edge creates missing endpoints.
//! - Pheromone never drops below zero.
//! - Costs that are zero, negative or NaN are stored as `MIN_COST`.
//!
//! ## Usage
//!
//! ```rust
//! use stigmergy_model::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 2.0);
//! graph.add_edge("B", "C", 3.0);
//!
//! let a = graph.node_index("A").unwrap();
//! let b = graph.node_index("B").unwrap();
//! let c = graph.node_index("C").unwrap();
//! assert_eq!(graph.compute_path_cost(&[a, b, c]), 5.0);
//! assert_eq!(graph.compute_path_cost(&[a, c]), f64::INFINITY);
//! ```

use crate::{
    error::GraphError,
    index::{EdgeIndex, NodeIndex},
};
use rand::Rng;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Pheromone level of a freshly inserted edge.
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Lower bound applied to degenerate and perturbed costs.
pub const MIN_COST: f64 = 1.0;

/// Evaporation rate used by `Graph::new`.
pub const DEFAULT_EVAPORATION_RATE: f64 = 0.1;

/// Maps a user supplied cost onto the admissible range.
///
/// Zero, negative and NaN costs become `MIN_COST`; every other value,
/// including `+∞`, is kept as is.
#[inline]
pub fn normalize_cost(cost: f64) -> f64 {
    if cost > 0.0 { cost } else { MIN_COST }
}

/// A directed edge with its travel cost and pheromone level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    source: NodeIndex,
    target: NodeIndex,
    cost: f64,
    pheromone: f64,
}

impl Edge {
    #[inline]
    fn new(source: NodeIndex, target: NodeIndex, cost: f64) -> Self {
        Self {
            source,
            target,
            cost: normalize_cost(cost),
            pheromone: INITIAL_PHEROMONE,
        }
    }

    #[inline]
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    #[inline]
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// The travel time of the edge.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn pheromone(&self) -> f64 {
        self.pheromone
    }
}

/// Pheromone-augmented directed graph.
#[derive(Clone)]
pub struct Graph {
    names: Vec<String>,
    lookup: FxHashMap<String, NodeIndex>,
    outgoing: Vec<SmallVec<[EdgeIndex; 4]>>,
    edges: Vec<Edge>,
    evaporation_rate: f64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty graph evaporating at `DEFAULT_EVAPORATION_RATE`.
    #[inline]
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            lookup: FxHashMap::default(),
            outgoing: Vec::new(),
            edges: Vec::new(),
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
        }
    }

    /// Creates an empty graph with the given evaporation rate `ρ ∈ [0, 1]`.
    pub fn with_evaporation_rate(evaporation_rate: f64) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        graph.set_evaporation_rate(evaporation_rate)?;
        Ok(graph)
    }

    #[inline]
    pub fn evaporation_rate(&self) -> f64 {
        self.evaporation_rate
    }

    /// Replaces the evaporation rate `ρ`. Values outside `[0, 1]` are rejected.
    pub fn set_evaporation_rate(&mut self, evaporation_rate: f64) -> Result<(), GraphError> {
        if !(0.0..=1.0).contains(&evaporation_rate) {
            return Err(GraphError::InvalidEvaporationRate(evaporation_rate));
        }
        self.evaporation_rate = evaporation_rate;
        Ok(())
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Inserts a node named `name` unless it already exists and returns its index.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.lookup.get(name) {
            return index;
        }
        let index = NodeIndex::new(self.names.len());
        self.names.push(name.to_owned());
        self.lookup.insert(name.to_owned(), index);
        self.outgoing.push(SmallVec::new());
        index
    }

    /// Inserts the directed edge `source -> target`, creating missing endpoints.
    ///
    /// If the edge already exists its cost is replaced and its pheromone is
    /// reset, so the graph never holds two edges for the same ordered pair.
    pub fn add_edge(&mut self, source: &str, target: &str, cost: f64) -> EdgeIndex {
        let from = self.add_node(source);
        let to = self.add_node(target);

        if let Some(existing) = self.find_edge(from, to) {
            self.edges[existing.get()] = Edge::new(from, to, cost);
            return existing;
        }

        let index = EdgeIndex::new(self.edges.len());
        self.edges.push(Edge::new(from, to, cost));
        self.outgoing[from.get()].push(index);
        index
    }

    /// Removes the edge `source -> target` and returns it.
    ///
    /// The last edge takes over the freed slot, so the index of that edge
    /// changes. Nodes are never removed.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> Option<Edge> {
        let from = self.node_index(source)?;
        let to = self.node_index(target)?;
        let index = self.find_edge(from, to)?;

        self.outgoing[from.get()].retain(|e| *e != index);
        let removed = self.edges.swap_remove(index.get());

        if index.get() < self.edges.len() {
            let moved_from = EdgeIndex::new(self.edges.len());
            let owner = self.edges[index.get()].source;
            for slot in self.outgoing[owner.get()].iter_mut() {
                if *slot == moved_from {
                    *slot = index;
                }
            }
        }
        Some(removed)
    }

    #[inline]
    pub fn node_exists(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn edge_exists(&self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(from), Some(to)) => self.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    #[inline]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.lookup.get(name).copied()
    }

    /// Like `node_index`, but reports unknown names as an error.
    #[inline]
    pub fn resolve(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.node_index(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_owned()))
    }

    /// Returns the name of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not part of this graph.
    #[inline]
    pub fn node_name(&self, node: NodeIndex) -> &str {
        debug_assert!(
            node.get() < self.names.len(),
            "called `Graph::node_name` with node index out of bounds: the len is {} but the index is {}",
            self.names.len(),
            node.get()
        );
        &self.names[node.get()]
    }

    /// Iterates all nodes in insertion order.
    #[inline]
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeIndex> + '_ {
        (0..self.names.len()).map(NodeIndex::new)
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the edge at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        debug_assert!(
            index.get() < self.edges.len(),
            "called `Graph::edge` with edge index out of bounds: the len is {} but the index is {}",
            self.edges.len(),
            index.get()
        );
        &self.edges[index.get()]
    }

    /// Indices of the edges leaving `node`, in insertion order.
    #[inline]
    pub fn outgoing_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        debug_assert!(
            node.get() < self.outgoing.len(),
            "called `Graph::outgoing_edges` with node index out of bounds: the len is {} but the index is {}",
            self.outgoing.len(),
            node.get()
        );
        &self.outgoing[node.get()]
    }

    /// Targets of the edges leaving `node`, in insertion order.
    #[inline]
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.outgoing_edges(node)
            .iter()
            .map(move |e| self.edges[e.get()].target)
    }

    /// Costs of the edges leaving `node`.
    #[inline]
    pub fn travel_times(&self, node: NodeIndex) -> impl Iterator<Item = f64> + '_ {
        self.outgoing_edges(node)
            .iter()
            .map(move |e| self.edges[e.get()].cost)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.outgoing_edges(node).len()
    }

    /// Looks up the edge `from -> to`.
    pub fn find_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
        self.outgoing
            .get(from.get())?
            .iter()
            .copied()
            .find(|e| self.edges[e.get()].target == to)
    }

    /// Cost of `from -> to`, or `+∞` when the nodes are not connected.
    #[inline]
    pub fn edge_cost(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.find_edge(from, to)
            .map_or(f64::INFINITY, |e| self.edges[e.get()].cost)
    }

    #[inline]
    pub fn edge_pheromone(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.find_edge(from, to)
            .map(|e| self.edges[e.get()].pheromone)
    }

    /// Overwrites the cost of an edge; the value is normalized first.
    #[inline]
    pub fn set_edge_cost(&mut self, index: EdgeIndex, cost: f64) {
        self.edges[index.get()].cost = normalize_cost(cost);
    }

    /// Overwrites the pheromone of an edge, clamping negative values to zero.
    #[inline]
    pub fn set_pheromone(&mut self, index: EdgeIndex, pheromone: f64) {
        self.edges[index.get()].pheromone = pheromone.max(0.0);
    }

    /// Sum of the edge costs along `path`.
    ///
    /// Returns `+∞` if two consecutive nodes are not connected and `0` for
    /// paths with fewer than two nodes.
    pub fn compute_path_cost(&self, path: &[NodeIndex]) -> f64 {
        let mut total = 0.0;
        for hop in path.windows(2) {
            match self.find_edge(hop[0], hop[1]) {
                Some(e) => total += self.edges[e.get()].cost,
                None => return f64::INFINITY,
            }
        }
        total
    }

    /// Applies `pheromone ← (1 − ρ) · pheromone` to every edge.
    pub fn evaporate(&mut self) {
        let retain = 1.0 - self.evaporation_rate;
        for edge in &mut self.edges {
            edge.pheromone = (edge.pheromone * retain).max(0.0);
        }
    }

    /// Evaporates a single edge at the graph's rate.
    #[inline]
    pub fn evaporate_edge(&mut self, index: EdgeIndex) {
        let edge = &mut self.edges[index.get()];
        edge.pheromone = (edge.pheromone * (1.0 - self.evaporation_rate)).max(0.0);
    }

    /// Adds `amount` to the pheromone of an edge.
    #[inline]
    pub fn deposit_pheromone(&mut self, index: EdgeIndex, amount: f64) {
        let edge = &mut self.edges[index.get()];
        edge.pheromone = (edge.pheromone + amount).max(0.0);
    }

    /// Deposits `1 / path_cost` on every edge of `path` and returns the
    /// amount deposited per edge.
    ///
    /// Nothing is deposited for paths with fewer than two nodes or with a
    /// non-finite cost; `0.0` is returned in that case.
    pub fn deposit_along_path(&mut self, path: &[NodeIndex]) -> f64 {
        let cost = self.compute_path_cost(path);
        if path.len() < 2 || !cost.is_finite() || cost <= 0.0 {
            return 0.0;
        }
        let amount = 1.0 / cost;
        for hop in path.windows(2) {
            if let Some(e) = self.find_edge(hop[0], hop[1]) {
                self.deposit_pheromone(e, amount);
            }
        }
        amount
    }

    /// Randomly perturbs edge costs to emulate changing traffic.
    ///
    /// Every edge is picked with probability `probability`; a picked edge
    /// changes by an integer delta drawn uniformly from
    /// `[-max_delta, max_delta] \ {0}` and is floored at `MIN_COST`.
    /// Returns the number of perturbed edges.
    pub fn perturb_costs<R>(&mut self, max_delta: u32, probability: f64, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        if max_delta == 0 || !(probability > 0.0) {
            return 0;
        }
        let probability = probability.min(1.0);
        let span = i64::from(max_delta);

        let mut perturbed = 0;
        for edge in &mut self.edges {
            if !rng.random_bool(probability) {
                continue;
            }
            let draw = rng.random_range(0..2 * span);
            let delta = if draw < span {
                draw - span
            } else {
                draw - span + 1
            };
            edge.cost = (edge.cost + delta as f64).max(MIN_COST);
            perturbed += 1;
        }
        perturbed
    }

    /// Renders `path` as node names joined by ` -> `.
    pub fn format_path(&self, path: &[NodeIndex]) -> String {
        path.iter()
            .map(|n| self.node_name(*n))
            .collect::<Vec<&str>>()
            .join(" -> ")
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("num_nodes", &self.num_nodes())
            .field("num_edges", &self.num_edges())
            .field("evaporation_rate", &self.evaporation_rate)
            .finish()
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Graph(nodes: {}, edges: {}, evaporation_rate: {})",
            self.num_nodes(),
            self.num_edges(),
            self.evaporation_rate
        )?;
        for node in self.nodes() {
            for e in self.outgoing_edges(node) {
                let edge = &self.edges[e.get()];
                writeln!(
                    f,
                    "  {} -> {} (cost: {}, pheromone: {:.4})",
                    self.node_name(edge.source),
                    self.node_name(edge.target),
                    edge.cost,
                    edge.pheromone
                )?;
            }
        }
        Ok(())
    }
}

/// Incremental constructor for graphs with a validated evaporation rate.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    graph: Graph,
    evaporation_rate: f64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
        }
    }

    #[inline]
    pub fn evaporation_rate(&mut self, evaporation_rate: f64) -> &mut Self {
        self.evaporation_rate = evaporation_rate;
        self
    }

    #[inline]
    pub fn add_node(&mut self, name: &str) -> &mut Self {
        self.graph.add_node(name);
        self
    }

    #[inline]
    pub fn add_edge(&mut self, source: &str, target: &str, cost: f64) -> &mut Self {
        self.graph.add_edge(source, target, cost);
        self
    }

    /// Finishes the graph, validating the evaporation rate.
    pub fn build(&mut self) -> Result<Graph, GraphError> {
        let mut graph = std::mem::take(&mut self.graph);
        graph.set_evaporation_rate(self.evaporation_rate)?;
        Ok(graph)
    }
}
