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

use stigmergy_model::{error::GraphError, index::NodeIndex};
use thiserror::Error;

/// Rejected AntNet configuration.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AntNetConfigError {
    #[error("ants need a step budget of at least one move")]
    ZeroSteps,

    #[error("the traffic window must hold at least one observation")]
    ZeroWindow,

    #[error("exploration weight must be finite and non-negative, got {0}")]
    InvalidExploration(f64),

    #[error("reinforcement weights must be non-negative with c1 + c2 <= 1, got c1 = {c1}, c2 = {c2}")]
    InvalidWeights { c1: f64, c2: f64 },

    #[error("confidence level gamma must lie in (0, 1), got {0}")]
    InvalidConfidence(f64),

    #[error("ant count must be positive when set explicitly")]
    ZeroAnts,
}

/// Failure of an AntNet run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AntNetError {
    #[error("node {0} is not part of the graph")]
    UnknownNode(NodeIndex),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("no path found from `{from}` to `{to}`")]
    NoPathFound { from: String, to: String },
}
