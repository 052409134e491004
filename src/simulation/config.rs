// src/simulation/config.rs

//! Simulator configuration

/// Configuration for [`Simulator`](super::Simulator) and [`Sampler`](super::Sampler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducibility.
    ///
    /// If None, a seed is drawn from operating system entropy. Parallel
    /// sampling derives the seed of shot `k` as `seed + k` (wrapping).
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Number of independent runs drawn by the sampler.
    ///
    /// Default: 1024
    pub shots: usize,

    /// Check the tableau invariants after every operation.
    ///
    /// Costs O(n³) per operation; meant for debugging.
    ///
    /// Default: false
    pub validate_each_step: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            shots: 1024,
            validate_each_step: false,
        }
    }
}

impl SimulatorConfig {
    /// Same as `SimulatorConfig::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of sampling shots.
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Turns per-operation invariant checking on or off.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_each_step = enabled;
        self
    }
}
