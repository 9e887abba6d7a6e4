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

//! # Stigmergy ACO
//!
//! Ant Colony Optimization for shortest paths in a pheromone graph.
//!
//! Foragers explore the graph with probabilistic transitions biased by
//! pheromone and inverse cost. Fit foragers reinforce their paths, pheromone
//! evaporates every cycle, and a greedy solution ant finally reads out the
//! learned route.
//!
//! ## Modules
//!
//! - `ant`: The `Ant` state machine for foragers and solution ants.
//! - `colony`: `AntColony`, the cycle orchestrator.
//! - `config`: `AcoConfig` and its validating builder.
//! - `ledger`: `DepositLedger`, batched pheromone deposits.
//! - `selection`: Desirability, roulette-wheel and greedy selection.
//! - `spawn`: Random-spawn weights.
//! - `error`: `AntError`, `ConfigError`, `ColonyError`.
//!
//! ## Features
//!
//! - `parallel`: Runs the foragers of a cycle on the rayon thread pool.
//! - `serde`: Serialization for the configuration types.
//!
//! ## Usage
//!
//! ```rust
//! use stigmergy_aco::{colony::AntColony, config::AcoConfig};
//! use stigmergy_model::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 1.0);
//! graph.add_edge("B", "C", 1.0);
//! graph.add_edge("A", "C", 5.0);
//!
//! let config = AcoConfig::builder().with_cycles(30).with_seed(1).build().unwrap();
//! let outcome = AntColony::new(config)
//!     .find_shortest_path_by_name(&mut graph, "A", "C")
//!     .unwrap();
//! assert_eq!(outcome.route().names(&graph), vec!["A", "B", "C"]);
//! ```

pub mod ant;
pub mod colony;
pub mod config;
pub mod error;
pub mod ledger;
pub mod selection;
pub mod spawn;
