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

//! # Ant Agent
//!
//! An `Ant` constructs one path through a borrowed `Graph`. It is a small
//! state machine that is `Traveling` until it steps onto its destination and
//! `Arrived` afterwards. Each step marks the current node as visited, picks
//! an unvisited neighbor, appends it to the path and accumulates the edge
//! cost. The ant never writes to the graph; pheromone updates are left to the
//! colony.
//!
//! Two roles share the same bookkeeping:
//!
//! - **Foragers** choose probabilistically by roulette wheel over the edge
//!   desirability `pheromone^α · (1/cost)^β`. A forager without unvisited
//!   neighbors reports `StepOutcome::Stuck` and stays where it is.
//! - **Solution ants** follow the strongest pheromone greedily. Running out of
//!   unvisited neighbors is an error (`AntError::NoPathFound`), since the
//!   solution ant is the colony's final answer.
//!
//! Because an ant never moves onto a visited node, its path never contains a
//! node twice and a solution ant terminates after at most `|V| - 1` steps.

use crate::{
    error::AntError,
    selection::{edge_desirability, greedy_max, roulette_wheel},
};
use fixedbitset::FixedBitSet;
use rand::Rng;
use smallvec::SmallVec;
use stigmergy_model::{graph::Graph, index::NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AntRole {
    /// Explores with probabilistic transitions.
    Forager,
    /// Reads out the learned route with greedy transitions.
    Solution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AntState {
    Traveling,
    Arrived,
}

/// Result of a single `Ant::take_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The ant moved to the given node and is still traveling.
    Moved(NodeIndex),
    /// The ant is at its destination.
    Arrived,
    /// A forager has no unvisited neighbor left.
    Stuck,
}

#[derive(Debug, Clone)]
pub struct Ant<'g> {
    graph: &'g Graph,
    role: AntRole,
    source: NodeIndex,
    destination: NodeIndex,
    current: NodeIndex,
    path: Vec<NodeIndex>,
    visited: FixedBitSet,
    path_cost: f64,
    state: AntState,
    alpha: f64,
    beta: f64,
}

impl<'g> Ant<'g> {
    /// Creates a forager at `source` weighing edges with exponents `alpha`
    /// (pheromone) and `beta` (inverse cost).
    #[inline]
    pub fn forager(
        graph: &'g Graph,
        source: NodeIndex,
        destination: NodeIndex,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self::new(graph, AntRole::Forager, source, destination, alpha, beta)
    }

    /// Creates a greedy solution ant at `source`.
    #[inline]
    pub fn solution(graph: &'g Graph, source: NodeIndex, destination: NodeIndex) -> Self {
        Self::new(graph, AntRole::Solution, source, destination, 1.0, 0.0)
    }

    fn new(
        graph: &'g Graph,
        role: AntRole,
        source: NodeIndex,
        destination: NodeIndex,
        alpha: f64,
        beta: f64,
    ) -> Self {
        debug_assert!(
            source.get() < graph.num_nodes() && destination.get() < graph.num_nodes(),
            "called `Ant::new` with a node outside the graph: source {}, destination {}, len {}",
            source.get(),
            destination.get(),
            graph.num_nodes()
        );

        let mut visited = FixedBitSet::with_capacity(graph.num_nodes());
        visited.insert(source.get());

        Self {
            graph,
            role,
            source,
            destination,
            current: source,
            path: vec![source],
            visited,
            path_cost: 0.0,
            state: if source == destination {
                AntState::Arrived
            } else {
                AntState::Traveling
            },
            alpha,
            beta,
        }
    }

    #[inline]
    pub fn role(&self) -> AntRole {
        self.role
    }

    #[inline]
    pub fn is_solution_ant(&self) -> bool {
        self.role == AntRole::Solution
    }

    #[inline]
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    #[inline]
    pub fn destination(&self) -> NodeIndex {
        self.destination
    }

    #[inline]
    pub fn current_node(&self) -> NodeIndex {
        self.current
    }

    #[inline]
    pub fn state(&self) -> AntState {
        self.state
    }

    #[inline]
    pub fn path(&self) -> &[NodeIndex] {
        &self.path
    }

    /// Accumulated cost of the edges walked so far.
    #[inline]
    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    /// Number of moves taken.
    #[inline]
    pub fn steps(&self) -> usize {
        self.path.len() - 1
    }

    #[inline]
    pub fn has_visited(&self, node: NodeIndex) -> bool {
        self.visited.contains(node.get())
    }

    /// An ant is fit once it has reached its destination.
    #[inline]
    pub fn is_fit(&self) -> bool {
        self.state == AntState::Arrived
    }

    #[inline]
    pub fn into_path(self) -> Vec<NodeIndex> {
        self.path
    }

    /// Advances the ant by one move according to its role.
    ///
    /// `rng` is only consulted by foragers.
    pub fn take_step<R>(&mut self, rng: &mut R) -> Result<StepOutcome, AntError>
    where
        R: Rng + ?Sized,
    {
        if self.state == AntState::Arrived {
            return Ok(StepOutcome::Arrived);
        }
        self.visited.insert(self.current.get());

        let next = match self.role {
            AntRole::Forager => self.choose_probabilistic(rng),
            AntRole::Solution => Some(self.choose_greedy()?),
        };
        match next {
            Some(node) => Ok(self.move_to(node)),
            None => Ok(StepOutcome::Stuck),
        }
    }

    /// Walks a solution ant until it arrives or fails.
    pub fn walk_to_destination(&mut self) -> Result<(), AntError> {
        debug_assert!(
            self.is_solution_ant(),
            "called `Ant::walk_to_destination` on a forager"
        );
        while self.state == AntState::Traveling {
            self.visited.insert(self.current.get());
            let next = self.choose_greedy()?;
            self.move_to(next);
        }
        Ok(())
    }

    fn choose_probabilistic<R>(&self, rng: &mut R) -> Option<NodeIndex>
    where
        R: Rng + ?Sized,
    {
        let candidates: SmallVec<[(NodeIndex, f64); 8]> = self
            .graph
            .outgoing_edges(self.current)
            .iter()
            .map(|e| self.graph.edge(*e))
            .filter(|edge| !self.visited.contains(edge.target().get()))
            .map(|edge| {
                let weight =
                    edge_desirability(edge.pheromone(), edge.cost(), self.alpha, self.beta);
                (edge.target(), weight)
            })
            .collect();
        roulette_wheel(&candidates, rng)
    }

    fn choose_greedy(&self) -> Result<NodeIndex, AntError> {
        let candidates = self
            .graph
            .outgoing_edges(self.current)
            .iter()
            .map(|e| self.graph.edge(*e))
            .filter(|edge| !self.visited.contains(edge.target().get()))
            .map(|edge| (edge.target(), edge.pheromone()));

        greedy_max(candidates).ok_or(AntError::NoPathFound {
            from: self.source,
            to: self.destination,
        })
    }

    fn move_to(&mut self, next: NodeIndex) -> StepOutcome {
        self.path_cost += self.graph.edge_cost(self.current, next);
        self.path.push(next);
        self.visited.insert(next.get());
        self.current = next;

        if next == self.destination {
            self.state = AntState::Arrived;
            StepOutcome::Arrived
        } else {
            StepOutcome::Moved(next)
        }
    }
}
