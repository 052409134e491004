// src/lib.rs

//! `stabsim` - A stabilizer tableau simulator for Clifford circuits
//!
//! States reachable from `|0…0⟩` by Hadamard, phase and CNOT gates are
//! tracked as a 2n×(2n+1) binary tableau of destabilizer and stabilizer
//! generators, so gates cost O(n) and measurements O(n²) instead of the
//! exponential cost of a state vector.

pub mod core;
pub mod operations;
pub mod gates;
pub mod measurement;
pub mod circuits;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{Pauli, PauliString, Result, StabError, Tableau};
pub use operations::{Gate, Operation};
pub use measurement::{MeasurementEngine, RandomSource};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{
    CircuitExecutor, ExecutionResult, ExecutorState, SampleSet, Sampler, Simulator, SimulatorConfig,
};
pub use validation::{stabilizer_groups_equal, validate_tableau};

// Example 1: Bell pair
// Measuring both halves of a Bell pair always gives equal bits.
/// ```
/// use stabsim::{CircuitBuilder, Simulator, SimulatorConfig, StabError};
///
/// let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).measure(0).measure(1).build();
/// println!("Circuit:\n{}", circuit);
///
/// let simulator = Simulator::with_config(SimulatorConfig::new().with_seed(7));
/// let result = simulator.run(&circuit)?;
/// println!("Result:\n{}", result);
///
/// let bits = result.outcomes();
/// assert_eq!(bits.len(), 2);
/// assert_eq!(bits[0], bits[1]);
/// # Ok::<(), StabError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Working on the tableau directly
// Gates by name, then reading the stabilizer group back as Pauli strings.
/// ```
/// use stabsim::{MeasurementEngine, StabError, Tableau};
/// use stabsim::measurement::seeded;
///
/// let mut tableau = Tableau::new(3)?;
/// tableau.apply_named("hadamard", &[0])?;
/// tableau.apply_named("cx", &[0, 1])?;
/// tableau.apply_named("phase", &[2])?;
/// println!("{}", tableau);
///
/// let stabilizers: Vec<String> = tableau.stabilizers().iter().map(|p| p.to_string()).collect();
/// assert_eq!(stabilizers, ["+XXI", "+ZZI", "+IIZ"]);
///
/// // Qubit 2 is still |0⟩, qubits 0 and 1 are random but correlated.
/// assert_eq!(MeasurementEngine::peek(&tableau, 2)?, Some(false));
/// assert_eq!(MeasurementEngine::peek(&tableau, 0)?, None);
/// let mut rng = seeded(1);
/// let first = MeasurementEngine::measure(&mut tableau, 0, &mut rng)?;
/// assert_eq!(MeasurementEngine::peek(&tableau, 1)?, Some(first));
/// # Ok::<(), StabError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 3: Sampling
/// ```
/// use stabsim::{CircuitBuilder, Sampler, SimulatorConfig, StabError};
///
/// let circuit = CircuitBuilder::new(1).h(0).measure(0).build();
/// let samples = Sampler::new(SimulatorConfig::new().with_seed(3).with_shots(2000)).sample(&circuit)?;
/// let p = samples.frequency_of_one(0).unwrap_or_default();
/// assert!((p - 0.5).abs() < 0.05);
/// # Ok::<(), StabError>(())
/// ```
#[doc(hidden)]
const _: () = ();
