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

//! The common interface of all route solvers.

use crate::{monitor::search_monitor::SearchMonitor, result::RouteOutcome};
use stigmergy_model::{graph::Graph, index::NodeIndex};

/// A solver that learns a route between two nodes of a graph.
///
/// Solvers may mutate the graph (pheromone) while learning; the returned
/// outcome carries the route read out at the end of the run.
pub trait RouteSolver {
    type Error: std::error::Error + Send + Sync + 'static;

    fn name(&self) -> &str;

    fn solve(
        &mut self,
        graph: &mut Graph,
        source: NodeIndex,
        destination: NodeIndex,
        monitor: &mut dyn SearchMonitor,
    ) -> Result<RouteOutcome, Self::Error>;
}
