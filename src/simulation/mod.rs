// src/simulation/mod.rs

//! Runs circuits on a stabilizer tableau.
//!
//! [`CircuitExecutor`] replays one operation record against one tableau.
//! [`Simulator`] wraps it with a configured random source, and [`Sampler`]
//! fans a circuit out over many independent seeded shots.

mod config;
mod executor;
mod results;
mod sampling;

pub use config::SimulatorConfig;
pub use executor::{CircuitExecutor, ExecutorState};
pub use results::ExecutionResult;
pub use sampling::{SampleSet, Sampler};

use crate::circuits::Circuit;
use crate::core::Result;
use crate::measurement::{from_entropy, seeded};
use tracing::debug;

/// The main simulator orchestrating the execution of circuits.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// The generator is seeded from `config.seed` when set, otherwise from
    /// operating system entropy.
    ///
    /// # Returns
    /// * `Ok(ExecutionResult)` with the outcome record and final stabilizers.
    /// * `Err(StabError::InvalidSize)` for a circuit on zero qubits.
    /// * `Err(StabError::OperationFailed)` wrapping the first failing operation.
    pub fn run(&self, circuit: &Circuit) -> Result<ExecutionResult> {
        let rng = match self.config.seed {
            Some(seed) => seeded(seed),
            None => from_entropy(),
        };
        debug!(
            qubits = circuit.num_qubits(),
            operations = circuit.len(),
            seed = ?self.config.seed,
            "running circuit"
        );
        let mut exec = CircuitExecutor::new(circuit.num_qubits(), rng)?.with_validation(self.config.validate_each_step);
        exec.run(circuit.operations())
    }

    /// Samples the circuit `config.shots` times in parallel.
    pub fn sample(&self, circuit: &Circuit) -> Result<SampleSet> {
        Sampler::new(self.config.clone()).sample(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::StabError;

    #[test]
    fn same_seed_same_outcomes() -> Result<()> {
        let circuit = CircuitBuilder::new(4).h(0).h(1).h(2).cnot(2, 3).measure_all().build();
        let sim = Simulator::with_config(SimulatorConfig::new().with_seed(9));
        assert_eq!(sim.run(&circuit)?, sim.run(&circuit)?);
        Ok(())
    }

    #[test]
    fn zero_qubit_circuit_is_rejected() {
        let sim = Simulator::new();
        assert_eq!(sim.run(&Circuit::new(0)), Err(StabError::InvalidSize { num_qubits: 0 }));
    }

    #[test]
    fn empty_circuit_reports_initial_stabilizers() -> Result<()> {
        let result = Simulator::new().run(&Circuit::new(2))?;
        assert!(result.is_empty());
        let stabs: Vec<String> = result.stabilizers().iter().map(|s| s.to_string()).collect();
        assert_eq!(stabs, ["+ZI", "+IZ"]);
        Ok(())
    }
}
