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

use crate::{route::Route, stats::SearchStatistics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every configured learning cycle ran.
    Completed,
    /// A monitor stopped the learning phase early. The string carries the
    /// monitor's reason.
    StoppedEarly(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "Completed"),
            TerminationReason::StoppedEarly(reason) => write!(f, "Stopped early: {}", reason),
        }
    }
}

/// The route read out after a solver run, with its cost and run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    route: Route,
    cost: f64,
    reason: TerminationReason,
    statistics: SearchStatistics,
}

impl RouteOutcome {
    #[inline]
    pub fn new(
        route: Route,
        cost: f64,
        reason: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            route,
            cost,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_stopped_early(&self) -> bool {
        matches!(self.reason, TerminationReason::StoppedEarly(_))
    }

    #[inline]
    pub fn into_parts(self) -> (Route, f64) {
        (self.route, self.cost)
    }
}

impl std::fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RouteOutcome(route: {}, cost: {}, reason: {})",
            self.route, self.cost, self.reason
        )
    }
}
