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

//! AntNet configuration.
//!
//! Defaults: 300 cycles, a budget of 50 moves per forward ant, one ant per
//! non-destination node each cycle, exploration weight `0.2`, traffic
//! windows of 7 trip times and the reinforcement rule
//! `c1 = 0.6, c2 = 0.3, γ = 0.7`.

use crate::{error::AntNetConfigError, reinforcement::Reinforcement, traffic::DEFAULT_WINDOW_SIZE};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntNetConfig {
    cycles: usize,
    max_steps: usize,
    num_ants: Option<usize>,
    exploration: f64,
    window_size: usize,
    reinforcement: Reinforcement,
    seed: Option<u64>,
}

impl Default for AntNetConfig {
    fn default() -> Self {
        Self {
            cycles: 300,
            max_steps: 50,
            num_ants: None,
            exploration: 0.2,
            window_size: DEFAULT_WINDOW_SIZE,
            reinforcement: Reinforcement::default(),
            seed: None,
        }
    }
}

impl AntNetConfig {
    #[inline]
    pub fn builder() -> AntNetConfigBuilder {
        AntNetConfigBuilder::new()
    }

    #[inline]
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Moves a forward ant may take before it is dropped.
    #[inline]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Ants launched per cycle. `None` launches one ant per non-destination
    /// node.
    #[inline]
    pub fn num_ants(&self) -> Option<usize> {
        self.num_ants
    }

    /// Weight `α` of the local cost heuristic in the transition rule.
    #[inline]
    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[inline]
    pub fn reinforcement(&self) -> Reinforcement {
        self.reinforcement
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AntNetConfigBuilder {
    config: AntNetConfig,
}

impl AntNetConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: AntNetConfig::default(),
        }
    }

    #[inline]
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.config.cycles = cycles;
        self
    }

    #[inline]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = max_steps;
        self
    }

    #[inline]
    pub fn with_num_ants(mut self, num_ants: usize) -> Self {
        self.config.num_ants = Some(num_ants);
        self
    }

    #[inline]
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.config.exploration = exploration;
        self
    }

    #[inline]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.config.window_size = window_size;
        self
    }

    #[inline]
    pub fn with_reinforcement(mut self, c1: f64, c2: f64, gamma: f64) -> Self {
        self.config.reinforcement = Reinforcement::new_unchecked(c1, c2, gamma);
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<AntNetConfig, AntNetConfigError> {
        let config = self.config;
        if config.max_steps == 0 {
            return Err(AntNetConfigError::ZeroSteps);
        }
        if config.window_size == 0 {
            return Err(AntNetConfigError::ZeroWindow);
        }
        if config.num_ants == Some(0) {
            return Err(AntNetConfigError::ZeroAnts);
        }
        if !config.exploration.is_finite() || config.exploration < 0.0 {
            return Err(AntNetConfigError::InvalidExploration(config.exploration));
        }

        let rule = config.reinforcement;
        let (c1, c2) = (rule.c1(), rule.c2());
        let weights_ok = c1.is_finite() && c2.is_finite() && c1 >= 0.0 && c2 >= 0.0;
        if !weights_ok || c1 + c2 > 1.0 {
            return Err(AntNetConfigError::InvalidWeights { c1, c2 });
        }
        let gamma = rule.gamma();
        if !(gamma > 0.0 && gamma < 1.0) {
            return Err(AntNetConfigError::InvalidConfidence(gamma));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AntNetConfig::default();
        assert_eq!(config.cycles(), 300);
        assert_eq!(config.max_steps(), 50);
        assert_eq!(config.num_ants(), None);
        assert_eq!(config.exploration(), 0.2);
        assert_eq!(config.window_size(), 7);
        assert_eq!(config.reinforcement(), Reinforcement::new_unchecked(0.6, 0.3, 0.7));
        assert_eq!(config.seed(), None);
        assert_eq!(AntNetConfig::builder().build(), Ok(config));
    }

    #[test]
    fn test_builder_sets_every_field() {
        let config = AntNetConfig::builder()
            .with_cycles(10)
            .with_max_steps(8)
            .with_num_ants(3)
            .with_exploration(0.0)
            .with_window_size(2)
            .with_reinforcement(0.5, 0.5, 0.9)
            .with_seed(11)
            .build()
            .unwrap();
        assert_eq!(config.cycles(), 10);
        assert_eq!(config.max_steps(), 8);
        assert_eq!(config.num_ants(), Some(3));
        assert_eq!(config.exploration(), 0.0);
        assert_eq!(config.window_size(), 2);
        assert_eq!(config.reinforcement().c2(), 0.5);
        assert_eq!(config.seed(), Some(11));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let b = AntNetConfig::builder;
        assert_eq!(b().with_max_steps(0).build(), Err(AntNetConfigError::ZeroSteps));
        assert_eq!(b().with_window_size(0).build(), Err(AntNetConfigError::ZeroWindow));
        assert_eq!(b().with_num_ants(0).build(), Err(AntNetConfigError::ZeroAnts));
        assert_eq!(
            b().with_exploration(-0.1).build(),
            Err(AntNetConfigError::InvalidExploration(-0.1))
        );
        assert_eq!(
            b().with_reinforcement(0.8, 0.3, 0.7).build(),
            Err(AntNetConfigError::InvalidWeights { c1: 0.8, c2: 0.3 })
        );
        assert_eq!(
            b().with_reinforcement(0.6, 0.3, 1.0).build(),
            Err(AntNetConfigError::InvalidConfidence(1.0))
        );
        assert!(matches!(
            b().with_reinforcement(0.6, 0.3, f64::NAN).build(),
            Err(AntNetConfigError::InvalidConfidence(_))
        ));
    }
}
