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

//! # AntNet
//!
//! `AntNet` learns per-node routing tables instead of edge pheromone. Each
//! cycle it launches net ants from random non-destination nodes, lets them
//! walk forward (reading the routing tables), and then replays every arrived
//! ant backward (writing the traffic statistics and routing tables). The
//! forward walks of a cycle all see the same tables; the backward passes are
//! applied one after another once the forward phase is over.
//!
//! After the last cycle a lazy ant reads the route out of the tables.
//!
//! The graph is never modified. Routing tables and traffic statistics live in
//! the `AntNet` value and carry over between calls, so repeated searches on a
//! slowly changing graph keep refining what was learned before. Tables are
//! re-synced with the graph's topology at the start of every search.

use crate::{
    ant::{NetAnt, lazy_route},
    config::AntNetConfig,
    error::AntNetError,
    routing::RoutingTables,
    traffic::TrafficTable,
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

#[derive(Debug, Clone)]
pub struct AntNet {
    config: AntNetConfig,
    rng: ChaCha8Rng,
    tables: RoutingTables,
    traffic: TrafficTable,
}

impl AntNet {
    pub fn new(config: AntNetConfig) -> Self {
        let seed = config.seed().unwrap_or_else(rand::random);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            tables: RoutingTables::default(),
            traffic: TrafficTable::new(config.window_size()),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &AntNetConfig {
        &self.config
    }

    #[inline]
    pub fn routing_tables(&self) -> &RoutingTables {
        &self.tables
    }

    #[inline]
    pub fn traffic(&self) -> &TrafficTable {
        &self.traffic
    }

    /// Forgets everything learned so far.
    pub fn reset(&mut self) {
        self.tables = RoutingTables::default();
        self.traffic.clear();
    }

    #[inline]
    pub fn find_shortest_path(
        &mut self,
        graph: &Graph,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Result<RouteOutcome, AntNetError> {
        self.find_shortest_path_with_monitor(graph, source, destination, &mut NoOpMonitor::new())
    }

    pub fn find_shortest_path_by_name(
        &mut self,
        graph: &Graph,
        source: &str,
        destination: &str,
    ) -> Result<RouteOutcome, AntNetError> {
        let source = graph.resolve(source)?;
        let destination = graph.resolve(destination)?;
        self.find_shortest_path(graph, source, destination)
    }

    pub fn find_shortest_path_with_monitor(
        &mut self,
        graph: &Graph,
        source: NodeIndex,
        destination: NodeIndex,
        monitor: &mut dyn SearchMonitor,
    ) -> Result<RouteOutcome, AntNetError> {
        for node in [source, destination] {
            if node.get() >= graph.num_nodes() {
                return Err(AntNetError::UnknownNode(node));
            }
        }

        let start_time = Instant::now();
        let mut stats = SearchStatistics::default();
        let mut reason = TerminationReason::Completed;

        let reset = self.tables.sync(graph);
        if reset > 0 {
            trace!(tables = reset, "routing tables initialized");
        }

        let spawn_nodes: Vec<NodeIndex> = graph.nodes().filter(|n| *n != destination).collect();
        let ants_per_cycle = self.config.num_ants().unwrap_or(spawn_nodes.len());
        let rule = self.config.reinforcement();

        monitor.on_enter_search(graph);
        debug!(
            source = graph.node_name(source),
            destination = graph.node_name(destination),
            cycles = self.config.cycles(),
            ants_per_cycle,
            "antnet search started"
        );

        for cycle in 0..self.config.cycles() {
            if let SearchCommand::StopLearning(msg) = monitor.search_command() {
                debug!(cycle, reason = %msg, "antnet learning stopped early by monitor");
                reason = TerminationReason::StoppedEarly(msg);
                break;
            }
            if spawn_nodes.is_empty() {
                break;
            }

            let launches: Vec<(NodeIndex, u64)> = (0..ants_per_cycle)
                .map(|_| {
                    let start = spawn_nodes[self.rng.random_range(0..spawn_nodes.len())];
                    (start, self.rng.random())
                })
                .collect();

            let ants: Vec<NetAnt<'_>> = launches
                .into_iter()
                .map(|(start, seed)| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    let mut ant = NetAnt::new(graph, start, destination, self.config.exploration());
                    ant.walk(&self.tables, self.config.max_steps(), &mut rng);
                    ant
                })
                .collect();

            let mut arrived = 0usize;
            for ant in &ants {
                let fit = ant.has_arrived();
                stats.on_ant_spawned();
                stats.on_ant_finished(fit, ant.steps() as u64);
                monitor.on_ant_finished(fit);

                if fit {
                    arrived += 1;
                    if ant.backward_pass(&mut self.tables, &mut self.traffic, &rule) > 0 {
                        stats.on_deposit();
                    }
                } else {
                    trace!(start = ant.start().get(), steps = ant.steps(), "net ant dropped");
                }
            }

            stats.on_cycle();
            monitor.on_cycle(&stats);
            debug!(cycle, arrived, dropped = ants.len() - arrived, "cycle completed");
        }

        if stats.ants_spawned > 0 && stats.fit_ants == 0 {
            warn!(
                destination = graph.node_name(destination),
                "no net ant reached the destination during learning"
            );
        }

        let read_out = lazy_route(graph, &self.tables, source, destination, self.config.max_steps());

        stats.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&stats);

        let (path, cost) = read_out.map_err(|_| AntNetError::NoPathFound {
            from: graph.node_name(source).to_owned(),
            to: graph.node_name(destination).to_owned(),
        })?;

        let route = Route::new(path);
        info!(
            route = %graph.format_path(route.nodes()),
            cost,
            cycles = stats.cycles,
            "antnet search finished"
        );
        Ok(RouteOutcome::new(route, cost, reason, stats))
    }
}

impl RouteSolver for AntNet {
    type Error = AntNetError;

    fn name(&self) -> &str {
        "AntNet"
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
