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

//! # Episode Simulator
//!
//! Measures a stochastic `RouteSolver` against a `Baseline` on a graph whose
//! costs drift over time. One episode runs the baseline, runs the candidate
//! on the same graph, records both costs and finally perturbs the edge costs
//! for the next episode. The candidate keeps whatever it learned (pheromone
//! on the graph, routing tables in the solver) across episodes, so the
//! report shows how well it tracks a changing network.
//!
//! Candidate failures are recorded in their episode and left out of the
//! mean squared error.

use crate::{
    baseline::{Baseline, BaselineRoute, Dijkstra},
    error::EvalError,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use stigmergy_model::{graph::Graph, index::NodeIndex};
use stigmergy_search::{monitor::no_op::NoOpMonitor, route::Route, solver::RouteSolver};
use tracing::{debug, info, warn};

/// Cost drift applied after every episode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerturbationConfig {
    max_delta: u32,
    probability: f64,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            max_delta: 1,
            probability: 0.7,
        }
    }
}

impl PerturbationConfig {
    pub fn new(max_delta: u32, probability: f64) -> Result<Self, EvalError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(EvalError::InvalidProbability(probability));
        }
        Ok(Self {
            max_delta,
            probability,
        })
    }

    /// No drift at all; every episode sees the same costs.
    #[inline]
    pub fn none() -> Self {
        Self {
            max_delta: 0,
            probability: 0.0,
        }
    }

    #[inline]
    pub fn max_delta(&self) -> u32 {
        self.max_delta
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// One-based episode number.
    pub index: usize,
    pub baseline: BaselineRoute,
    /// Candidate route, empty if the candidate failed.
    pub candidate: Route,
    /// Candidate cost, `+∞` if the candidate failed.
    pub candidate_cost: f64,
    pub failure: Option<String>,
    /// Number of edges whose cost changed after this episode.
    pub perturbed_edges: usize,
}

impl Episode {
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Whether the candidate returned exactly the baseline path.
    #[inline]
    pub fn is_exact_match(&self) -> bool {
        !self.is_failure() && self.candidate.nodes() == self.baseline.path.as_slice()
    }

    /// Squared cost difference, `None` unless both sides found a route.
    pub fn squared_error(&self) -> Option<f64> {
        if self.is_failure() || !self.baseline.is_reachable() {
            return None;
        }
        Some((self.candidate_cost - self.baseline.cost).powi(2))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationReport {
    pub episodes: Vec<Episode>,
}

impl EvaluationReport {
    #[inline]
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Mean squared cost error over the episodes in which both sides found a
    /// route. `None` if there is no such episode.
    pub fn mse(&self) -> Option<f64> {
        let errors: Vec<f64> = self.episodes.iter().filter_map(Episode::squared_error).collect();
        if errors.is_empty() {
            return None;
        }
        Some(errors.iter().sum::<f64>() / errors.len() as f64)
    }

    /// Share of episodes in which the candidate matched the baseline path.
    pub fn exact_match_rate(&self) -> f64 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        let matches = self.episodes.iter().filter(|e| e.is_exact_match()).count();
        matches as f64 / self.episodes.len() as f64
    }

    #[inline]
    pub fn failures(&self) -> usize {
        self.episodes.iter().filter(|e| e.is_failure()).count()
    }

    /// `(baseline_cost, candidate_cost)` per episode.
    pub fn cost_pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.episodes
            .iter()
            .map(|e| (e.baseline.cost, e.candidate_cost))
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluation Report:")?;
        writeln!(f, "   Episodes:         {}", self.len())?;
        writeln!(f, "   Failures:         {}", self.failures())?;
        writeln!(f, "   Exact Matches:    {:.1}%", self.exact_match_rate() * 100.0)?;
        match self.mse() {
            Some(mse) => writeln!(f, "   Mean Sq. Error:   {:.4}", mse),
            None => writeln!(f, "   Mean Sq. Error:   n/a"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Simulator<B = Dijkstra> {
    baseline: B,
    perturbation: PerturbationConfig,
    rng: ChaCha8Rng,
}

impl Simulator<Dijkstra> {
    /// Simulator against `Dijkstra` with a seeded perturbation stream.
    pub fn new(perturbation: PerturbationConfig, seed: u64) -> Self {
        Self::with_baseline(Dijkstra::new(), perturbation, seed)
    }
}

impl<B> Simulator<B>
where
    B: Baseline,
{
    pub fn with_baseline(baseline: B, perturbation: PerturbationConfig, seed: u64) -> Self {
        Self {
            baseline,
            perturbation,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn baseline(&self) -> &B {
        &self.baseline
    }

    #[inline]
    pub fn perturbation(&self) -> PerturbationConfig {
        self.perturbation
    }

    /// Runs `episodes` episodes of `solver` against the baseline.
    pub fn run<S>(
        &mut self,
        solver: &mut S,
        graph: &mut Graph,
        source: NodeIndex,
        destination: NodeIndex,
        episodes: usize,
    ) -> Result<EvaluationReport, EvalError>
    where
        S: RouteSolver,
    {
        for node in [source, destination] {
            if node.get() >= graph.num_nodes() {
                return Err(EvalError::UnknownNode(node));
            }
        }

        info!(
            solver = solver.name(),
            baseline = self.baseline.name(),
            episodes,
            "simulation started"
        );
        let mut report = EvaluationReport {
            episodes: Vec::with_capacity(episodes),
        };
        for index in 1..=episodes {
            let episode = self.run_episode(solver, graph, source, destination, index);
            report.episodes.push(episode);
        }

        info!(
            failures = report.failures(),
            exact_match_rate = report.exact_match_rate(),
            mse = report.mse().unwrap_or(f64::NAN),
            "simulation finished"
        );
        Ok(report)
    }

    fn run_episode<S>(
        &mut self,
        solver: &mut S,
        graph: &mut Graph,
        source: NodeIndex,
        destination: NodeIndex,
        index: usize,
    ) -> Episode
    where
        S: RouteSolver,
    {
        let baseline = self.baseline.find_shortest_path(graph, source, destination);

        let (candidate, candidate_cost, failure) =
            match solver.solve(graph, source, destination, &mut NoOpMonitor::new()) {
                Ok(outcome) => {
                    let (route, cost) = outcome.into_parts();
                    (route, cost, None)
                }
                Err(err) => {
                    warn!(episode = index, error = %err, "candidate solver failed");
                    (Route::default(), f64::INFINITY, Some(err.to_string()))
                }
            };

        let perturbed_edges = graph.perturb_costs(
            self.perturbation.max_delta,
            self.perturbation.probability,
            &mut self.rng,
        );

        debug!(
            episode = index,
            baseline_cost = baseline.cost,
            candidate_cost,
            perturbed_edges,
            "episode completed"
        );
        Episode {
            index,
            baseline,
            candidate,
            candidate_cost,
            failure,
            perturbed_edges,
        }
    }
}
