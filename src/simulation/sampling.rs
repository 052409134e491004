// src/simulation/sampling.rs

//! Monte Carlo sampling over independent runs.

use super::config::SimulatorConfig;
use super::executor::CircuitExecutor;
use crate::circuits::Circuit;
use crate::core::Result;
use crate::measurement::seeded;
use rand::Rng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Runs a circuit many times in parallel, one fresh tableau and one seeded
/// generator per shot.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    config: SimulatorConfig,
}

impl Sampler {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Draws `config.shots` outcome records for `circuit`.
    ///
    /// Shot `k` uses a generator seeded with `base + k`, where `base` is the
    /// configured seed or a fresh random value. With a fixed seed the
    /// returned records are identical across calls and thread counts.
    ///
    /// # Errors
    /// The first error of any shot, wrapped in `OperationFailed`.
    pub fn sample(&self, circuit: &Circuit) -> Result<SampleSet> {
        let base = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let shots = self.config.shots;
        let validate = self.config.validate_each_step;
        debug!(shots, base_seed = base, operations = circuit.len(), "sampling circuit");

        let records = (0..shots)
            .into_par_iter()
            .map(|k| {
                let rng = seeded(base.wrapping_add(k as u64));
                let mut exec = CircuitExecutor::new(circuit.num_qubits(), rng)?.with_validation(validate);
                Ok(exec.run(circuit.operations())?.into_outcomes())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SampleSet { measurements: circuit.measurement_count(), records })
    }
}

/// Outcome records of a batch of shots, in shot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    measurements: usize,
    records: Vec<Vec<bool>>,
}

impl SampleSet {
    pub fn shots(&self) -> usize {
        self.records.len()
    }

    /// Outcomes per shot.
    pub fn measurements(&self) -> usize {
        self.measurements
    }

    pub fn records(&self) -> &[Vec<bool>] {
        &self.records
    }

    /// How many shots recorded a 1 for measurement `index`.
    pub fn ones(&self, index: usize) -> usize {
        self.records.iter().filter(|r| r.get(index).copied().unwrap_or(false)).count()
    }

    /// Empirical frequency of outcome 1 for measurement `index`, or `None`
    /// when the index is out of range or no shot was taken.
    pub fn frequency_of_one(&self, index: usize) -> Option<f64> {
        if index >= self.measurements || self.records.is_empty() {
            return None;
        }
        Some(self.ones(index) as f64 / self.records.len() as f64)
    }

    /// Number of shots per distinct bitstring.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            let key: String = record.iter().map(|b| if *b { '1' } else { '0' }).collect();
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;

    #[test]
    fn seeded_sampling_is_reproducible() -> Result<()> {
        let circuit = CircuitBuilder::new(3).h(0).h(1).cnot(1, 2).measure_all().build();
        let sampler = Sampler::new(SimulatorConfig::new().with_seed(42).with_shots(64));
        let a = sampler.sample(&circuit)?;
        let b = sampler.sample(&circuit)?;
        assert_eq!(a, b);
        assert_eq!(a.shots(), 64);
        assert_eq!(a.measurements(), 3);
        Ok(())
    }

    #[test]
    fn ground_state_never_reads_one() -> Result<()> {
        let circuit = CircuitBuilder::new(2).measure_all().build();
        let set = Sampler::new(SimulatorConfig::new().with_shots(16)).sample(&circuit)?;
        assert_eq!(set.frequency_of_one(0), Some(0.0));
        assert_eq!(set.frequency_of_one(1), Some(0.0));
        assert_eq!(set.frequency_of_one(2), None);
        assert_eq!(set.counts().get("00"), Some(&16));
        Ok(())
    }

    #[test]
    fn failing_shot_fails_the_batch() {
        let circuit = CircuitBuilder::new(2).h(0).measure(4).build();
        let sampler = Sampler::new(SimulatorConfig::new().with_seed(3).with_shots(8));
        assert!(sampler.sample(&circuit).is_err());
    }
}
