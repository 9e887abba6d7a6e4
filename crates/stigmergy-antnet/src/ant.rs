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

//! # Net Ants
//!
//! A `NetAnt` is AntNet's forward agent. It walks from its start node toward
//! a destination, choosing each hop from the routing table of the node it is
//! on, mixed with a local cost heuristic:
//!
//! ```text
//! P(n -> m) = (rt[n][m] + α · L(n, m)) / (1 + α · (|N(n)| - 1))
//! L(n, m)   = 1 - cost(n, m) / Σ cost(n, ·)
//! ```
//!
//! Only neighbors not already on the ant's path compete. If every neighbor is
//! on the path the ant takes a uniformly random one, and the cycle removal at
//! the start of the next step cuts the loop out again. The recorded hops
//! therefore always describe a simple path from the start node.
//!
//! Once arrived, `backward_pass` replays the hops in reverse, folding the
//! cumulative trip time from every hop's node into the traffic statistics and
//! reinforcing the routing table entry of that hop.
//!
//! `lazy_route` is the zero-exploration read-out: it follows the largest
//! routing weight among unvisited neighbors from the source.

use crate::{reinforcement::Reinforcement, routing::RoutingTables, traffic::TrafficTable};
use rand::Rng;
use smallvec::SmallVec;
use stigmergy_aco::{
    ant::StepOutcome,
    error::AntError,
    selection::{greedy_max, roulette_wheel},
};
use stigmergy_model::{graph::Graph, index::NodeIndex};

/// One move of a net ant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct NetAnt<'g> {
    graph: &'g Graph,
    start: NodeIndex,
    destination: NodeIndex,
    current: NodeIndex,
    hops: Vec<Hop>,
    steps: usize,
    exploration: f64,
}

impl<'g> NetAnt<'g> {
    #[inline]
    pub fn new(graph: &'g Graph, start: NodeIndex, destination: NodeIndex, exploration: f64) -> Self {
        Self {
            graph,
            start,
            destination,
            current: start,
            hops: Vec::new(),
            steps: 0,
            exploration,
        }
    }

    #[inline]
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    #[inline]
    pub fn destination(&self) -> NodeIndex {
        self.destination
    }

    #[inline]
    pub fn current_node(&self) -> NodeIndex {
        self.current
    }

    /// Hops of the current (loop-free) path.
    #[inline]
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Moves taken so far, including moves later cut out as loops.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn has_arrived(&self) -> bool {
        self.current == self.destination
    }

    /// Nodes of the recorded path, start node first.
    pub fn path(&self) -> Vec<NodeIndex> {
        std::iter::once(self.start)
            .chain(self.hops.iter().map(|h| h.to))
            .collect()
    }

    /// Sum of the hop costs of the recorded path.
    #[inline]
    pub fn trip_time(&self) -> f64 {
        self.hops.iter().map(|h| h.cost).sum()
    }

    fn on_path(&self, node: NodeIndex) -> bool {
        node == self.start || self.hops.iter().any(|h| h.to == node)
    }

    /// Truncates the recorded path back to the first visit of the current
    /// node and returns the number of hops removed.
    pub fn remove_cycle(&mut self) -> usize {
        if self.current == self.start {
            let removed = self.hops.len();
            self.hops.clear();
            return removed;
        }
        match self.hops.iter().position(|h| h.to == self.current) {
            Some(first) => {
                let removed = self.hops.len() - (first + 1);
                self.hops.truncate(first + 1);
                removed
            }
            None => 0,
        }
    }

    /// Advances the ant by one move.
    pub fn take_step<R>(&mut self, tables: &RoutingTables, rng: &mut R) -> StepOutcome
    where
        R: Rng + ?Sized,
    {
        if self.has_arrived() {
            return StepOutcome::Arrived;
        }
        self.remove_cycle();

        let outgoing = self.graph.outgoing_edges(self.current);
        if outgoing.is_empty() {
            return StepOutcome::Stuck;
        }

        let degree = outgoing.len() as f64;
        let total_cost: f64 = self.graph.travel_times(self.current).sum();
        let normalizer = 1.0 + self.exploration * (degree - 1.0);

        let candidates: SmallVec<[(usize, f64); 8]> = outgoing
            .iter()
            .enumerate()
            .map(|(slot, e)| (slot, self.graph.edge(*e)))
            .filter(|(_, edge)| !self.on_path(edge.target()))
            .map(|(slot, edge)| {
                let local = if total_cost > 0.0 {
                    1.0 - edge.cost() / total_cost
                } else {
                    0.0
                };
                let weight = tables.weight(self.current, edge.target());
                (slot, (weight + self.exploration * local) / normalizer)
            })
            .collect();

        let slot = if candidates.is_empty() {
            rng.random_range(0..outgoing.len())
        } else {
            match roulette_wheel(&candidates, rng) {
                Some(slot) => slot,
                None => return StepOutcome::Stuck,
            }
        };

        let edge = self.graph.edge(outgoing[slot]);
        self.hops.push(Hop {
            from: self.current,
            to: edge.target(),
            cost: edge.cost(),
        });
        self.current = edge.target();
        self.steps += 1;

        if self.has_arrived() {
            StepOutcome::Arrived
        } else {
            StepOutcome::Moved(self.current)
        }
    }

    /// Walks until the ant arrives, gets stuck or has used `max_steps`
    /// moves. Returns whether it arrived.
    pub fn walk<R>(&mut self, tables: &RoutingTables, max_steps: usize, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        while self.steps < max_steps {
            match self.take_step(tables, rng) {
                StepOutcome::Moved(_) => {}
                StepOutcome::Arrived => return true,
                StepOutcome::Stuck => return false,
            }
        }
        self.has_arrived()
    }

    /// Replays the hops in reverse: for each hop the cumulative trip time to
    /// the destination is folded into the traffic statistics of the hop's
    /// node, and the hop is reinforced in that node's routing table.
    ///
    /// Does nothing for an ant that has not arrived. Returns the number of
    /// routing table updates.
    pub fn backward_pass(
        &self,
        tables: &mut RoutingTables,
        traffic: &mut TrafficTable,
        rule: &Reinforcement,
    ) -> usize {
        if !self.has_arrived() {
            return 0;
        }
        let mut trip_time = 0.0;
        let mut updates = 0;
        for hop in self.hops.iter().rev() {
            trip_time += hop.cost;
            let stat = traffic.observe(hop.from, self.destination, trip_time);
            let r = rule.strength(stat, trip_time);
            if tables.reinforce(hop.from, hop.to, r) {
                updates += 1;
            }
        }
        updates
    }
}

/// Follows the largest routing weight from `source` until `destination` is
/// reached. Neighbors already on the path are never revisited; ties go to
/// the first neighbor in insertion order.
///
/// Returns the path and its cost, or `AntError::NoPathFound` when the walk
/// gets stuck or exceeds `max_steps` moves.
pub fn lazy_route(
    graph: &Graph,
    tables: &RoutingTables,
    source: NodeIndex,
    destination: NodeIndex,
    max_steps: usize,
) -> Result<(Vec<NodeIndex>, f64), AntError> {
    let no_path = AntError::NoPathFound {
        from: source,
        to: destination,
    };
    let mut path = vec![source];
    let mut cost = 0.0;
    let mut current = source;

    while current != destination {
        if path.len() > max_steps {
            return Err(no_path);
        }
        let next = greedy_max(
            graph
                .neighbors(current)
                .filter(|n| !path.contains(n))
                .map(|n| (n, tables.weight(current, n))),
        )
        .ok_or(no_path)?;
        cost += graph.edge_cost(current, next);
        path.push(next);
        current = next;
    }
    Ok((path, cost))
}
