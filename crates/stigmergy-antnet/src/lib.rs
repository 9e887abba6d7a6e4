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

//! # Stigmergy AntNet
//!
//! The AntNet routing variant: instead of raw pheromone ratios, every node
//! keeps a routing table over its neighbors, and backward ants reinforce it
//! by how a trip time compares with the recent trip times to the same
//! destination.
//!
//! ## Modules
//!
//! - `antnet`: `AntNet`, the cycle orchestrator and `RouteSolver`.
//! - `ant`: `NetAnt` forward/backward agent and the lazy read-out.
//! - `routing`: `RoutingTable` and `RoutingTables`.
//! - `traffic`: `TrafficStat` sliding-window trip statistics.
//! - `reinforcement`: The confidence-adjusted reinforcement rule.
//! - `config`: `AntNetConfig` and its validating builder.
//! - `error`: `AntNetConfigError`, `AntNetError`.
//!
//! ```rust
//! use stigmergy_antnet::{antnet::AntNet, config::AntNetConfig};
//! use stigmergy_model::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 1.0);
//! graph.add_edge("B", "C", 1.0);
//!
//! let config = AntNetConfig::builder().with_cycles(20).with_seed(3).build().unwrap();
//! let outcome = AntNet::new(config)
//!     .find_shortest_path_by_name(&graph, "A", "C")
//!     .unwrap();
//! assert_eq!(outcome.cost(), 2.0);
//! ```

pub mod ant;
pub mod antnet;
pub mod config;
pub mod error;
pub mod reinforcement;
pub mod routing;
pub mod traffic;
