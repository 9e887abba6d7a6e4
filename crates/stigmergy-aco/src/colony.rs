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

//! # Ant Colony
//!
//! `AntColony` learns a route by repeating a forward/backward cycle:
//!
//! 1. Spawn `num_ants` foragers at the source, or at nodes drawn from the
//!    spawn table when random spawning is enabled.
//! 2. Forward phase: every forager takes up to `max_iterations` moves and is
//!    fit if it reaches the destination within that budget.
//! 3. Evaporate pheromone on the whole graph (global update only).
//! 4. Backward phase: fit ants deposit `1 / path_cost` along their paths.
//!
//! After the last cycle a greedy solution ant walks from the source along
//! the strongest pheromone; its path is the result.
//!
//! The forward phase reads the graph immutably, and each forager owns an RNG
//! seeded from the colony RNG. With the `parallel` feature the foragers of a
//! cycle run on the rayon pool; a seeded colony produces the same result
//! either way. Deposits are collected in a `DepositLedger` and reduced
//! serially, after evaporation.

use crate::{
    ant::{Ant, StepOutcome},
    config::{AcoConfig, PheromoneUpdate, UnfitPolicy},
    error::ColonyError,
    ledger::DepositLedger,
    spawn::SpawnTable,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use stigmergy_model::{graph::Graph, index::NodeIndex};
use stigmergy_search::{
    monitor::{
        no_op::NoOpMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
    },
    result::{RouteOutcome, TerminationReason},
    route::Route,
    solver::RouteSolver,
    stats::SearchStatistics,
};
use tracing::{debug, info, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Start node and RNG seed of one forager.
#[derive(Debug, Clone, Copy)]
struct Launch {
    start: NodeIndex,
    seed: u64,
}

/// What the colony needs to know about a forager after its walk.
#[derive(Debug, Clone)]
struct ForagerReport {
    start: NodeIndex,
    fit: bool,
    steps: usize,
    path: Vec<NodeIndex>,
}

fn run_forager(
    graph: &Graph,
    launch: Launch,
    destination: NodeIndex,
    config: &AcoConfig,
) -> ForagerReport {
    let mut rng = ChaCha8Rng::seed_from_u64(launch.seed);
    let mut ant = Ant::forager(graph, launch.start, destination, config.alpha(), config.beta());

    for _ in 0..config.max_iterations() {
        match ant.take_step(&mut rng) {
            Ok(StepOutcome::Moved(_)) => {}
            Ok(StepOutcome::Arrived) | Ok(StepOutcome::Stuck) | Err(_) => break,
        }
    }

    ForagerReport {
        start: launch.start,
        fit: ant.is_fit(),
        steps: ant.steps(),
        path: ant.into_path(),
    }
}

#[derive(Debug, Clone)]
pub struct AntColony {
    config: AcoConfig,
    rng: ChaCha8Rng,
}

impl AntColony {
    /// Creates a colony. Seeded configurations are reproducible; otherwise
    /// the colony draws a fresh seed.
    pub fn new(config: AcoConfig) -> Self {
        let seed = config.seed().unwrap_or_else(rand::random);
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Learns a route from `source` to `destination` and returns it with its
    /// cost.
    #[inline]
    pub fn find_shortest_path(
        &mut self,
        graph: &mut Graph,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Result<RouteOutcome, ColonyError> {
        self.find_shortest_path_with_monitor(graph, source, destination, &mut NoOpMonitor::new())
    }

    /// Name based variant of `find_shortest_path`.
    pub fn find_shortest_path_by_name(
        &mut self,
        graph: &mut Graph,
        source: &str,
        destination: &str,
    ) -> Result<RouteOutcome, ColonyError> {
        let source = graph.resolve(source)?;
        let destination = graph.resolve(destination)?;
        self.find_shortest_path(graph, source, destination)
    }

    /// Learns a route while reporting to `monitor`, which may cut the
    /// learning phase short. The solution ant runs regardless.
    pub fn find_shortest_path_with_monitor(
        &mut self,
        graph: &mut Graph,
        source: NodeIndex,
        destination: NodeIndex,
        monitor: &mut dyn SearchMonitor,
    ) -> Result<RouteOutcome, ColonyError> {
        for node in [source, destination] {
            if node.get() >= graph.num_nodes() {
                return Err(ColonyError::UnknownNode(node));
            }
        }

        let start_time = Instant::now();
        let mut stats = SearchStatistics::default();
        let mut ledger = DepositLedger::new();
        let mut spawn_table = SpawnTable::uniform(graph.num_nodes());
        let mut reason = TerminationReason::Completed;

        monitor.on_enter_search(graph);
        debug!(
            source = graph.node_name(source),
            destination = graph.node_name(destination),
            cycles = self.config.cycles(),
            num_ants = self.config.num_ants(),
            "colony search started"
        );

        for cycle in 0..self.config.cycles() {
            if let SearchCommand::StopLearning(msg) = monitor.search_command() {
                debug!(cycle, reason = %msg, "colony learning stopped early by monitor");
                reason = TerminationReason::StoppedEarly(msg);
                break;
            }

            let launches = self.launches(source, &spawn_table);
            let reports = self.forward_phase(graph, &launches, destination);

            let mut fit = 0usize;
            for report in &reports {
                stats.on_ant_spawned();
                stats.on_ant_finished(report.fit, report.steps as u64);
                monitor.on_ant_finished(report.fit);

                if report.fit {
                    fit += 1;
                    if ledger.record_path(graph, &report.path) {
                        stats.on_deposit();
                    }
                } else {
                    trace!(start = report.start.get(), steps = report.steps, "unfit ant dropped");
                    if let UnfitPolicy::PenalizeSpawn { factor } = self.config.unfit_policy() {
                        spawn_table.penalize(report.start, factor);
                    }
                }
            }

            if self.config.pheromone_update() == PheromoneUpdate::Global {
                graph.evaporate();
            }
            ledger.apply(graph, self.config.pheromone_update());

            stats.on_cycle();
            monitor.on_cycle(&stats);
            debug!(cycle, fit, unfit = reports.len() - fit, "cycle completed");
        }

        if self.config.cycles() > 0 && stats.fit_ants == 0 && reason == TerminationReason::Completed {
            warn!(
                source = graph.node_name(source),
                destination = graph.node_name(destination),
                "no ant reached the destination during learning"
            );
        }

        let mut solution = Ant::solution(graph, source, destination);
        let walk = solution.walk_to_destination();

        stats.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&stats);

        walk.map_err(|_| ColonyError::NoPathFound {
            from: graph.node_name(source).to_owned(),
            to: graph.node_name(destination).to_owned(),
        })?;

        let cost = solution.path_cost();
        let route = Route::new(solution.into_path());
        info!(
            route = %graph.format_path(route.nodes()),
            cost,
            cycles = stats.cycles,
            "colony search finished"
        );
        Ok(RouteOutcome::new(route, cost, reason, stats))
    }

    fn launches(&mut self, source: NodeIndex, spawn_table: &SpawnTable) -> Vec<Launch> {
        (0..self.config.num_ants())
            .map(|_| {
                let start = if self.config.random_spawn() {
                    spawn_table.draw(&mut self.rng).unwrap_or(source)
                } else {
                    source
                };
                Launch {
                    start,
                    seed: self.rng.random(),
                }
            })
            .collect()
    }

    fn forward_phase(
        &self,
        graph: &Graph,
        launches: &[Launch],
        destination: NodeIndex,
    ) -> Vec<ForagerReport> {
        #[cfg(feature = "parallel")]
        {
            forward_parallel(graph, launches, destination, &self.config)
        }
        #[cfg(not(feature = "parallel"))]
        {
            forward_serial(graph, launches, destination, &self.config)
        }
    }
}

#[cfg(any(not(feature = "parallel"), test))]
fn forward_serial(
    graph: &Graph,
    launches: &[Launch],
    destination: NodeIndex,
    config: &AcoConfig,
) -> Vec<ForagerReport> {
    launches
        .iter()
        .map(|launch| run_forager(graph, *launch, destination, config))
        .collect()
}

/// Runs the foragers on the rayon pool. Reports come back in launch order.
#[cfg(feature = "parallel")]
fn forward_parallel(
    graph: &Graph,
    launches: &[Launch],
    destination: NodeIndex,
    config: &AcoConfig,
) -> Vec<ForagerReport> {
    launches
        .par_iter()
        .map(|launch| run_forager(graph, *launch, destination, config))
        .collect()
}

impl RouteSolver for AntColony {
    type Error = ColonyError;

    fn name(&self) -> &str {
        "AntColony"
    }

    fn solve(
        &mut self,
        graph: &mut Graph,
        source: NodeIndex,
        destination: NodeIndex,
        monitor: &mut dyn SearchMonitor,
    ) -> Result<RouteOutcome, Self::Error> {
        self.find_shortest_path_with_monitor(graph, source, destination, monitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use stigmergy_search::monitor::interrupt::InterruptMonitor;

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

    fn names(g: &Graph, outcome: &RouteOutcome) -> Vec<String> {
        outcome
            .route()
            .names(g)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn seeded(seed: u64) -> AcoConfig {
        AcoConfig::builder()
            .with_num_ants(20)
            .with_cycles(60)
            .with_seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_converges_on_reference_graph() {
        let mut hits = 0;
        for seed in 0..5 {
            let mut g = reference_graph();
            let mut colony = AntColony::new(seeded(seed));
            let outcome = colony.find_shortest_path_by_name(&mut g, "A", "D").unwrap();
            assert!((outcome.cost() - g.compute_path_cost(outcome.route().nodes())).abs() < 1e-12);
            if names(&g, &outcome) == ["A", "H", "G", "E", "D"] {
                assert_eq!(outcome.cost(), 8.0);
                hits += 1;
            }
        }
        assert!(hits >= 4, "only {hits} of 5 seeded runs converged");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut first = reference_graph();
        let mut second = reference_graph();
        let a = AntColony::new(seeded(42))
            .find_shortest_path_by_name(&mut first, "A", "D")
            .unwrap();
        let b = AntColony::new(seeded(42))
            .find_shortest_path_by_name(&mut second, "A", "D")
            .unwrap();

        assert_eq!(a.route(), b.route());
        for (x, y) in first.edges().iter().zip(second.edges()) {
            assert_eq!(x.pheromone(), y.pheromone());
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_run_matches_serial_learning() {
        let config = AcoConfig::builder()
            .with_num_ants(20)
            .with_cycles(60)
            .with_random_spawn(true)
            .with_seed(42)
            .build()
            .unwrap();

        let mut parallel_graph = reference_graph();
        let (a, d) = (
            parallel_graph.node_index("A").unwrap(),
            parallel_graph.node_index("D").unwrap(),
        );
        let outcome = AntColony::new(config)
            .find_shortest_path(&mut parallel_graph, a, d)
            .unwrap();

        // Same cycles, driven through the serial forward phase.
        let mut serial_graph = reference_graph();
        let mut colony = AntColony::new(config);
        let spawn_table = SpawnTable::uniform(serial_graph.num_nodes());
        let mut ledger = DepositLedger::new();
        for _ in 0..config.cycles() {
            let launches = colony.launches(a, &spawn_table);
            let reports = forward_serial(&serial_graph, &launches, d, &config);
            for report in reports.iter().filter(|r| r.fit) {
                ledger.record_path(&serial_graph, &report.path);
            }
            serial_graph.evaporate();
            ledger.apply(&mut serial_graph, config.pheromone_update());
        }
        let mut solution = Ant::solution(&serial_graph, a, d);
        solution.walk_to_destination().unwrap();

        assert_eq!(outcome.route().nodes(), solution.path());
        for (p, s) in parallel_graph.edges().iter().zip(serial_graph.edges()) {
            assert_eq!(p.pheromone().to_bits(), s.pheromone().to_bits());
        }
    }

    #[test]
    fn test_optimal_edges_outweigh_dead_ends() {
        let mut g = reference_graph();
        g.add_edge("A", "X", 1.0);
        g.add_edge("X", "Y", 1.0);

        let mut colony = AntColony::new(seeded(3));
        colony.find_shortest_path_by_name(&mut g, "A", "D").unwrap();

        let n = |s: &str| g.node_index(s).unwrap();
        let optimal = [n("A"), n("H"), n("G"), n("E"), n("D")];
        let weakest_optimal = optimal
            .windows(2)
            .map(|hop| g.edge_pheromone(hop[0], hop[1]).unwrap())
            .fold(f64::INFINITY, f64::min);
        let dead_end = g
            .edge_pheromone(n("A"), n("X"))
            .unwrap()
            .max(g.edge_pheromone(n("X"), n("Y")).unwrap());

        assert!(
            weakest_optimal > dead_end,
            "optimal {weakest_optimal} vs dead end {dead_end}"
        );
    }

    #[test]
    fn test_source_equals_destination() {
        let mut g = reference_graph();
        let outcome = AntColony::new(seeded(1))
            .find_shortest_path_by_name(&mut g, "C", "C")
            .unwrap();
        assert_eq!(outcome.cost(), 0.0);
        assert_eq!(names(&g, &outcome), ["C"]);
    }

    #[test]
    fn test_unreachable_destination_is_an_error() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1.0);
        g.add_node("C");
        let err = AntColony::new(seeded(2))
            .find_shortest_path_by_name(&mut g, "A", "C")
            .unwrap_err();
        assert_eq!(
            err,
            ColonyError::NoPathFound {
                from: "A".to_string(),
                to: "C".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_nodes_are_rejected() {
        let mut g = reference_graph();
        let mut colony = AntColony::new(seeded(0));
        assert!(matches!(
            colony.find_shortest_path_by_name(&mut g, "A", "Q"),
            Err(ColonyError::Graph(_))
        ));
        assert_eq!(
            colony.find_shortest_path(&mut g, NodeIndex::new(0), NodeIndex::new(99)),
            Err(ColonyError::UnknownNode(NodeIndex::new(99)))
        );
    }

    #[test]
    fn test_greedy_readout_can_fail_on_misleading_pheromone() {
        let mut g = Graph::new();
        let dead_end = g.add_edge("A", "B", 1.0);
        g.add_edge("A", "D", 1.0);
        g.set_pheromone(dead_end, 5.0);

        let config = AcoConfig::builder().with_cycles(0).with_seed(0).build().unwrap();
        let result = AntColony::new(config).find_shortest_path_by_name(&mut g, "A", "D");
        assert!(matches!(result, Err(ColonyError::NoPathFound { .. })));
    }

    #[test]
    fn test_global_and_local_updates_differ_on_untouched_edges() {
        let build = || {
            let mut g = Graph::new();
            g.add_edge("A", "B", 1.0);
            g.add_edge("B", "C", 1.0);
            g.add_edge("C", "Z", 1.0);
            g
        };
        let config = |update| {
            AcoConfig::builder()
                .with_num_ants(3)
                .with_cycles(1)
                .with_pheromone_update(update)
                .with_seed(9)
                .build()
                .unwrap()
        };

        let mut global = build();
        AntColony::new(config(PheromoneUpdate::Global))
            .find_shortest_path_by_name(&mut global, "A", "C")
            .unwrap();
        let mut local = build();
        AntColony::new(config(PheromoneUpdate::LocalEvaporation))
            .find_shortest_path_by_name(&mut local, "A", "C")
            .unwrap();

        let pheromone = |g: &Graph, s: &str, t: &str| {
            g.edge_pheromone(g.node_index(s).unwrap(), g.node_index(t).unwrap())
                .unwrap()
        };
        // Three fit ants with path cost 2 deposit 1.5 on every path edge.
        assert!((pheromone(&global, "A", "B") - 2.4).abs() < 1e-12);
        assert!((pheromone(&local, "A", "B") - 2.4).abs() < 1e-12);
        assert!((pheromone(&global, "C", "Z") - 0.9).abs() < 1e-12);
        assert_eq!(pheromone(&local, "C", "Z"), 1.0);
    }

    #[test]
    fn test_statistics_count_fit_and_unfit_ants() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("A", "X", 1.0);
        let config = AcoConfig::builder()
            .with_num_ants(10)
            .with_cycles(5)
            .with_seed(4)
            .build()
            .unwrap();
        let outcome = AntColony::new(config)
            .find_shortest_path_by_name(&mut g, "A", "B")
            .unwrap();
        let stats = outcome.statistics();
        assert_eq!(stats.cycles, 5);
        assert_eq!(stats.ants_spawned, 50);
        assert_eq!(stats.fit_ants + stats.unfit_ants, 50);
        assert!(stats.fit_ants > 0);
        assert!(stats.unfit_ants > 0);
        assert_eq!(stats.deposits, stats.fit_ants);
        assert_eq!(outcome.reason(), &TerminationReason::Completed);
    }

    #[test]
    fn test_step_budget_marks_long_walks_unfit() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("C", "D", 1.0);
        let config = AcoConfig::builder()
            .with_num_ants(4)
            .with_cycles(3)
            .with_max_iterations(2)
            .with_seed(5)
            .build()
            .unwrap();
        let outcome = AntColony::new(config)
            .find_shortest_path_by_name(&mut g, "A", "D")
            .unwrap();
        assert_eq!(outcome.statistics().fit_ants, 0);
        // The read-out ant is not bound by the budget.
        assert_eq!(outcome.cost(), 3.0);
        assert!(g.edges().iter().all(|e| e.pheromone() < 1.0));
    }

    #[test]
    fn test_early_stop_still_reads_out_route() {
        let flag = AtomicBool::new(true);
        let mut monitor = InterruptMonitor::new(&flag);
        let mut g = reference_graph();
        let (a, d) = (g.node_index("A").unwrap(), g.node_index("D").unwrap());

        let outcome = AntColony::new(seeded(0))
            .find_shortest_path_with_monitor(&mut g, a, d, &mut monitor)
            .unwrap();
        assert!(outcome.is_stopped_early());
        assert_eq!(outcome.statistics().cycles, 0);
        assert_eq!(outcome.route().destination(), Some(d));
        assert_eq!(names(&g, &outcome), ["A", "B", "C", "F", "G", "E", "D"]);
    }

    #[test]
    fn test_random_spawn_with_penalty_still_finds_route() {
        let mut g = reference_graph();
        g.add_edge("Y", "X", 1.0);
        let config = AcoConfig::builder()
            .with_num_ants(20)
            .with_cycles(40)
            .with_random_spawn(true)
            .with_unfit_policy(UnfitPolicy::PenalizeSpawn { factor: 0.5 })
            .with_seed(8)
            .build()
            .unwrap();
        let outcome = AntColony::new(config)
            .find_shortest_path_by_name(&mut g, "A", "D")
            .unwrap();
        assert_eq!(outcome.route().source(), g.node_index("A"));
        assert_eq!(outcome.route().destination(), g.node_index("D"));
        assert!(outcome.statistics().unfit_ants > 0);
    }

    #[test]
    fn test_route_solver_interface() {
        let mut g = reference_graph();
        let (a, d) = (g.node_index("A").unwrap(), g.node_index("D").unwrap());
        let mut colony = AntColony::new(seeded(6));
        assert_eq!(colony.name(), "AntColony");
        let outcome = colony.solve(&mut g, a, d, &mut NoOpMonitor::new()).unwrap();
        assert_eq!(outcome.route().source(), Some(a));
    }
}
