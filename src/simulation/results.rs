// src/simulation/results.rs
use crate::core::PauliString;
use std::fmt;

/// Holds the results of a completed simulation run.
///
/// The outcome record has one bit per `Measure` entry, in request order
/// (`false` = 0 / eigenvalue +1, `true` = 1 / eigenvalue -1). The final
/// stabilizer generators are kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    outcomes: Vec<bool>,
    stabilizers: Vec<PauliString>,
    operations_applied: usize,
}

impl ExecutionResult {
    pub(crate) fn new(outcomes: Vec<bool>, stabilizers: Vec<PauliString>, operations_applied: usize) -> Self {
        Self { outcomes, stabilizers, operations_applied }
    }

    /// The outcome record.
    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }

    /// Outcome of the `index`-th measurement, if there was one.
    pub fn outcome(&self, index: usize) -> Option<bool> {
        self.outcomes.get(index).copied()
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if no measurement was recorded.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Stabilizer generators of the final state.
    pub fn stabilizers(&self) -> &[PauliString] {
        &self.stabilizers
    }

    /// Number of operations replayed.
    pub fn operations_applied(&self) -> usize {
        self.operations_applied
    }

    /// The outcome record as a string of `0`/`1`, first measurement first.
    pub fn bitstring(&self) -> String {
        self.outcomes.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }

    /// Consumes the result, returning the outcome record.
    pub fn into_outcomes(self) -> Vec<bool> {
        self.outcomes
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results ({} operations):", self.operations_applied)?;
        if self.outcomes.is_empty() {
            writeln!(f, "  No measurements were recorded.")?;
        } else {
            writeln!(f, "  Outcomes: {}", self.bitstring())?;
        }
        writeln!(f, "  Stabilizers:")?;
        for s in &self.stabilizers {
            writeln!(f, "    {}", s)?;
        }
        Ok(())
    }
}
