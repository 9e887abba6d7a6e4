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

//! # Stigmergy Eval
//!
//! Tools for judging the stochastic solvers: an exact `Dijkstra` baseline
//! and a `Simulator` that replays a solver against it over episodes of
//! drifting edge costs.
//!
//! ```rust
//! use stigmergy_eval::baseline::{Baseline, Dijkstra};
//! use stigmergy_model::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 1.0);
//! graph.add_edge("B", "C", 1.0);
//! graph.add_edge("A", "C", 5.0);
//!
//! let a = graph.node_index("A").unwrap();
//! let c = graph.node_index("C").unwrap();
//! let route = Dijkstra::new().find_shortest_path(&graph, a, c);
//! assert_eq!(route.cost, 2.0);
//! ```

pub mod baseline;
pub mod error;
pub mod simulator;
