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

//! Colony configuration.
//!
//! `AcoConfig` bundles every knob of a colony run. It is created through
//! `AcoConfigBuilder`, which validates the numeric parameters once so the
//! colony loop never has to. The defaults are 20 ants per cycle, a budget of
//! 50 moves per ant, 100 cycles, `α = 0.7` and `β = 0.3`, ants spawned at
//! the source, global evaporation and unfit ants discarded.
//!
//! ```rust
//! use stigmergy_aco::config::{AcoConfig, UnfitPolicy};
//!
//! let config = AcoConfig::builder()
//!     .with_num_ants(30)
//!     .with_cycles(200)
//!     .with_random_spawn(true)
//!     .with_unfit_policy(UnfitPolicy::PenalizeSpawn { factor: 0.5 })
//!     .with_seed(7)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.num_ants(), 30);
//! ```

use crate::error::ConfigError;

/// How pheromone is updated at the end of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PheromoneUpdate {
    /// Evaporate every edge once, then deposit on the paths of fit ants.
    #[default]
    Global,
    /// Only edges on the paths of fit ants are touched: each is evaporated
    /// once and then reinforced.
    LocalEvaporation,
}

/// What happens with ants that did not reach the destination.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnfitPolicy {
    /// Unfit ants are dropped without further effect.
    #[default]
    Discard,
    /// Every unfit ant multiplies the random-spawn weight of its start node
    /// by `factor`, steering later random spawns away from failing regions.
    /// Has no effect unless random spawning is enabled.
    PenalizeSpawn { factor: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    num_ants: usize,
    max_iterations: usize,
    cycles: usize,
    random_spawn: bool,
    alpha: f64,
    beta: f64,
    pheromone_update: PheromoneUpdate,
    unfit_policy: UnfitPolicy,
    seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 20,
            max_iterations: 50,
            cycles: 100,
            random_spawn: false,
            alpha: 0.7,
            beta: 0.3,
            pheromone_update: PheromoneUpdate::Global,
            unfit_policy: UnfitPolicy::Discard,
            seed: None,
        }
    }
}

impl AcoConfig {
    #[inline]
    pub fn builder() -> AcoConfigBuilder {
        AcoConfigBuilder::new()
    }

    /// Ants spawned per cycle.
    #[inline]
    pub fn num_ants(&self) -> usize {
        self.num_ants
    }

    /// Moves an ant may take before it is judged.
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    #[inline]
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    #[inline]
    pub fn random_spawn(&self) -> bool {
        self.random_spawn
    }

    /// Pheromone exponent.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Inverse cost exponent.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[inline]
    pub fn pheromone_update(&self) -> PheromoneUpdate {
        self.pheromone_update
    }

    #[inline]
    pub fn unfit_policy(&self) -> UnfitPolicy {
        self.unfit_policy
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AcoConfigBuilder {
    config: AcoConfig,
}

impl AcoConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: AcoConfig::default(),
        }
    }

    #[inline]
    pub fn with_num_ants(mut self, num_ants: usize) -> Self {
        self.config.num_ants = num_ants;
        self
    }

    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    #[inline]
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.config.cycles = cycles;
        self
    }

    #[inline]
    pub fn with_random_spawn(mut self, random_spawn: bool) -> Self {
        self.config.random_spawn = random_spawn;
        self
    }

    #[inline]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    #[inline]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.config.beta = beta;
        self
    }

    #[inline]
    pub fn with_pheromone_update(mut self, pheromone_update: PheromoneUpdate) -> Self {
        self.config.pheromone_update = pheromone_update;
        self
    }

    #[inline]
    pub fn with_unfit_policy(mut self, unfit_policy: UnfitPolicy) -> Self {
        self.config.unfit_policy = unfit_policy;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<AcoConfig, ConfigError> {
        let config = self.config;
        if config.num_ants == 0 {
            return Err(ConfigError::ZeroAnts);
        }
        if config.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        for (name, value) in [("alpha", config.alpha), ("beta", config.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidExponent { name, value });
            }
        }
        if let UnfitPolicy::PenalizeSpawn { factor } = config.unfit_policy {
            if !(0.0..=1.0).contains(&factor) {
                return Err(ConfigError::InvalidPenalty(factor));
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AcoConfig::default();
        assert_eq!(config.num_ants(), 20);
        assert_eq!(config.max_iterations(), 50);
        assert_eq!(config.cycles(), 100);
        assert!(!config.random_spawn());
        assert_eq!(config.alpha(), 0.7);
        assert_eq!(config.beta(), 0.3);
        assert_eq!(config.pheromone_update(), PheromoneUpdate::Global);
        assert_eq!(config.unfit_policy(), UnfitPolicy::Discard);
        assert_eq!(config.seed(), None);
        assert_eq!(AcoConfig::builder().build(), Ok(config));
    }

    #[test]
    fn test_builder_sets_every_field() {
        let config = AcoConfig::builder()
            .with_num_ants(5)
            .with_max_iterations(12)
            .with_cycles(0)
            .with_random_spawn(true)
            .with_alpha(1.0)
            .with_beta(2.0)
            .with_pheromone_update(PheromoneUpdate::LocalEvaporation)
            .with_unfit_policy(UnfitPolicy::PenalizeSpawn { factor: 0.25 })
            .with_seed(99)
            .build()
            .unwrap();
        assert_eq!(config.num_ants(), 5);
        assert_eq!(config.max_iterations(), 12);
        assert_eq!(config.cycles(), 0);
        assert!(config.random_spawn());
        assert_eq!(config.alpha(), 1.0);
        assert_eq!(config.beta(), 2.0);
        assert_eq!(config.pheromone_update(), PheromoneUpdate::LocalEvaporation);
        assert_eq!(
            config.unfit_policy(),
            UnfitPolicy::PenalizeSpawn { factor: 0.25 }
        );
        assert_eq!(config.seed(), Some(99));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert_eq!(
            AcoConfig::builder().with_num_ants(0).build(),
            Err(ConfigError::ZeroAnts)
        );
        assert_eq!(
            AcoConfig::builder().with_max_iterations(0).build(),
            Err(ConfigError::ZeroIterations)
        );
        assert_eq!(
            AcoConfig::builder().with_alpha(-1.0).build(),
            Err(ConfigError::InvalidExponent {
                name: "alpha",
                value: -1.0
            })
        );
        assert!(matches!(
            AcoConfig::builder().with_beta(f64::NAN).build(),
            Err(ConfigError::InvalidExponent { name: "beta", .. })
        ));
        assert_eq!(
            AcoConfig::builder()
                .with_unfit_policy(UnfitPolicy::PenalizeSpawn { factor: 1.5 })
                .build(),
            Err(ConfigError::InvalidPenalty(1.5))
        );
    }
}
