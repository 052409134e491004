// src/simulation/executor.rs

//! Sequential replay of an operation record against one tableau.

use super::results::ExecutionResult;
use crate::core::{PauliString, Result, StabError, Tableau};
use crate::gates::apply_operation;
use crate::measurement::{MeasurementEngine, RandomSource};
use crate::operations::Operation;
use crate::validation::validate_tableau;
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, warn};

/// Lifecycle of a [`CircuitExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutorState {
    /// Tableau allocated, nothing replayed yet.
    Created,
    /// At least one operation replayed.
    Running,
    /// Outcome record finalized.
    Completed,
    /// An operation raised an error. The tableau is kept for inspection.
    Failed,
}

impl ExecutorState {
    /// Terminal states accept no further operations.
    pub fn is_closed(&self) -> bool {
        matches!(self, ExecutorState::Completed | ExecutorState::Failed)
    }
}

impl fmt::Display for ExecutorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutorState::Created => "Created",
            ExecutorState::Running => "Running",
            ExecutorState::Completed => "Completed",
            ExecutorState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Owns a tableau and replays operations on it, one at a time.
///
/// Gate entries go to the gate rules, `Measure` entries to the
/// [`MeasurementEngine`], and every outcome is appended to the record. The
/// first error moves the executor to [`ExecutorState::Failed`]; the failing
/// call itself leaves the tableau untouched.
///
/// ```
/// use stabsim::{CircuitExecutor, Operation, measurement::BitSequence};
///
/// let mut exec = CircuitExecutor::new(2, BitSequence::new([true]))?;
/// let result = exec.run(&[
///     Operation::H { qubit: 0 },
///     Operation::Cnot { control: 0, target: 1 },
///     Operation::Measure { qubit: 0 },
///     Operation::Measure { qubit: 1 },
/// ])?;
/// assert_eq!(result.outcomes(), &[true, true]);
/// # Ok::<(), stabsim::StabError>(())
/// ```
#[derive(Debug)]
pub struct CircuitExecutor<R: RandomSource = StdRng> {
    tableau: Tableau,
    source: R,
    state: ExecutorState,
    outcomes: Vec<bool>,
    applied: usize,
    validate_each_step: bool,
}

impl<R: RandomSource> CircuitExecutor<R> {
    /// Allocates the `|0…0⟩` tableau on `num_qubits` qubits.
    ///
    /// # Errors
    /// `InvalidSize` if `num_qubits` is zero.
    pub fn new(num_qubits: usize, source: R) -> Result<Self> {
        Ok(Self {
            tableau: Tableau::new(num_qubits)?,
            source,
            state: ExecutorState::Created,
            outcomes: Vec::new(),
            applied: 0,
            validate_each_step: false,
        })
    }

    /// Checks every tableau invariant after each operation.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_each_step = enabled;
        self
    }

    /// Replays a single operation, returning the outcome if it was a measurement.
    ///
    /// # Errors
    /// * `ExecutorClosed` once the executor is `Completed` or `Failed`.
    /// * Any gate or measurement error; the executor becomes `Failed`.
    pub fn step(&mut self, op: &Operation) -> Result<Option<bool>> {
        if self.state.is_closed() {
            return Err(StabError::ExecutorClosed { state: self.state.to_string() });
        }
        if self.state == ExecutorState::Created {
            debug!(qubits = self.tableau.num_qubits(), "executor running");
            self.state = ExecutorState::Running;
        }
        match self.dispatch(op) {
            Ok(outcome) => {
                self.applied += 1;
                if let Some(bit) = outcome {
                    self.outcomes.push(bit);
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!(%op, error = %e, "operation failed, executor stopped");
                self.state = ExecutorState::Failed;
                Err(e)
            }
        }
    }

    fn dispatch(&mut self, op: &Operation) -> Result<Option<bool>> {
        let outcome = match *op {
            Operation::Measure { qubit } => Some(MeasurementEngine::measure(&mut self.tableau, qubit, &mut self.source)?),
            _ => {
                apply_operation(&mut self.tableau, op)?;
                None
            }
        };
        if self.validate_each_step {
            validate_tableau(&self.tableau)?;
        }
        Ok(outcome)
    }

    /// Finalizes the outcome record.
    ///
    /// # Errors
    /// `ExecutorClosed` if the executor already completed or failed.
    pub fn finish(&mut self) -> Result<ExecutionResult> {
        if self.state.is_closed() {
            return Err(StabError::ExecutorClosed { state: self.state.to_string() });
        }
        self.state = ExecutorState::Completed;
        debug!(operations = self.applied, outcomes = self.outcomes.len(), "run completed");
        Ok(ExecutionResult::new(self.outcomes.clone(), self.tableau.stabilizers(), self.applied))
    }

    /// Replays `ops` in order and finalizes.
    ///
    /// # Errors
    /// `OperationFailed` wrapping the first error, with the position of the
    /// failing entry and the outcomes recorded up to that point. A closed
    /// executor returns `ExecutorClosed` directly.
    pub fn run(&mut self, ops: &[Operation]) -> Result<ExecutionResult> {
        if self.state.is_closed() {
            return Err(StabError::ExecutorClosed { state: self.state.to_string() });
        }
        for (index, op) in ops.iter().enumerate() {
            if let Err(source) = self.step(op) {
                return Err(StabError::OperationFailed {
                    index,
                    last_applied: index.checked_sub(1),
                    outcomes: self.outcomes.clone(),
                    source: Box::new(source),
                });
            }
        }
        self.finish()
    }

    /// The tableau in its current state.
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Current stabilizer generators as signed Pauli strings.
    pub fn stabilizers(&self) -> Vec<PauliString> {
        self.tableau.stabilizers()
    }

    /// Outcomes recorded so far.
    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }

    pub fn state(&self) -> ExecutorState {
        self.state
    }

    /// Number of operations applied successfully.
    pub fn operations_applied(&self) -> usize {
        self.applied
    }

    /// Starts a fresh executor from a copy of the current tableau.
    ///
    /// The copy has its own random source and an empty outcome record, so
    /// several branches can continue independently from a shared prefix.
    pub fn fork_with<S: RandomSource>(&self, source: S) -> CircuitExecutor<S> {
        CircuitExecutor {
            tableau: self.tableau.clone(),
            source,
            state: ExecutorState::Created,
            outcomes: Vec::new(),
            applied: 0,
            validate_each_step: self.validate_each_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{BitSequence, seeded};

    fn bell() -> Vec<Operation> {
        vec![
            Operation::H { qubit: 0 },
            Operation::Cnot { control: 0, target: 1 },
            Operation::Measure { qubit: 0 },
            Operation::Measure { qubit: 1 },
        ]
    }

    #[test]
    fn state_machine_progression() -> Result<()> {
        let mut exec = CircuitExecutor::new(2, seeded(1))?;
        assert_eq!(exec.state(), ExecutorState::Created);
        exec.step(&Operation::H { qubit: 0 })?;
        assert_eq!(exec.state(), ExecutorState::Running);
        let result = exec.finish()?;
        assert_eq!(exec.state(), ExecutorState::Completed);
        assert!(result.is_empty());
        assert_eq!(result.operations_applied(), 1);
        assert_eq!(
            exec.step(&Operation::S { qubit: 0 }),
            Err(StabError::ExecutorClosed { state: "Completed".to_string() })
        );
        Ok(())
    }

    #[test]
    fn bell_outcomes_follow_scripted_bit() -> Result<()> {
        for bit in [false, true] {
            let mut exec = CircuitExecutor::new(2, BitSequence::new([bit]))?;
            let result = exec.run(&bell())?;
            assert_eq!(result.outcomes(), &[bit, bit]);
            let expected = if bit { "11" } else { "00" };
            assert_eq!(result.bitstring(), expected);
        }
        Ok(())
    }

    #[test]
    fn failure_reports_progress() -> Result<()> {
        let mut exec = CircuitExecutor::new(2, BitSequence::new([true]))?;
        let ops = [
            Operation::H { qubit: 0 },
            Operation::Measure { qubit: 0 },
            Operation::Cnot { control: 0, target: 2 },
            Operation::H { qubit: 1 },
        ];
        let err = exec.run(&ops).unwrap_err();
        match &err {
            StabError::OperationFailed { index, last_applied, outcomes, .. } => {
                assert_eq!(*index, 2);
                assert_eq!(*last_applied, Some(1));
                assert_eq!(outcomes, &vec![true]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.root_cause(), &StabError::InvalidQubit { qubit: 2, num_qubits: 2 });
        assert_eq!(exec.state(), ExecutorState::Failed);
        assert_eq!(exec.operations_applied(), 2);
        assert!(matches!(exec.finish(), Err(StabError::ExecutorClosed { .. })));
        Ok(())
    }

    #[test]
    fn failure_on_first_operation_has_no_last_applied() -> Result<()> {
        let mut exec = CircuitExecutor::new(1, seeded(0))?;
        match exec.run(&[Operation::Measure { qubit: 3 }]) {
            Err(StabError::OperationFailed { index: 0, last_applied: None, outcomes, .. }) => assert!(outcomes.is_empty()),
            other => panic!("unexpected result {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn validation_mode_accepts_valid_circuits() -> Result<()> {
        let mut exec = CircuitExecutor::new(3, seeded(5))?.with_validation(true);
        let mut ops = bell();
        ops.push(Operation::S { qubit: 2 });
        ops.push(Operation::Cnot { control: 2, target: 0 });
        let result = exec.run(&ops)?;
        assert_eq!(result.len(), 2);
        Ok(())
    }

    #[test]
    fn forked_branches_are_independent() -> Result<()> {
        let mut exec = CircuitExecutor::new(2, seeded(0))?;
        exec.step(&Operation::H { qubit: 0 })?;
        exec.step(&Operation::Cnot { control: 0, target: 1 })?;

        let mut zero = exec.fork_with(BitSequence::new([false]));
        let mut one = exec.fork_with(BitSequence::new([true]));
        assert_eq!(zero.run(&[Operation::Measure { qubit: 1 }])?.outcomes(), &[false]);
        assert_eq!(one.run(&[Operation::Measure { qubit: 1 }])?.outcomes(), &[true]);
        // The parent has not measured anything.
        assert!(exec.outcomes().is_empty());
        assert_eq!(exec.stabilizers().iter().map(|s| s.to_string()).collect::<Vec<_>>(), ["+XX", "+ZZ"]);
        Ok(())
    }
}
