// src/measurement/mod.rs

//! Projective Z-basis measurement on a stabilizer tableau.
//!
//! For a stabilizer state every single-qubit Z measurement either has a
//! fixed outcome or a uniformly random one. The engine decides which case
//! applies by looking for a stabilizer generator that anticommutes with
//! Z_q, collapses the tableau in the random case and reads the outcome off
//! the stabilizer group in the deterministic case.

mod random;

pub use random::{BitSequence, RandomSource, from_entropy, seeded};

use crate::core::tableau::word_bit;
use crate::core::{Result, Tableau};
use tracing::trace;

/// Stateless measurement rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementEngine;

impl MeasurementEngine {
    /// Measures Z on `qubit`, collapsing `tableau` and returning the outcome bit
    /// (`false` for +1, `true` for -1).
    ///
    /// When the outcome is random one bit is drawn from `source` before any row
    /// is modified, so a failing source leaves the tableau untouched. When the
    /// outcome is determined the tableau is not modified and `source` is not used.
    ///
    /// # Errors
    /// * `InvalidQubit` if `qubit` is out of range.
    /// * `RandomSourceExhausted` if the source cannot supply a bit.
    pub fn measure<R>(tableau: &mut Tableau, qubit: usize, source: &mut R) -> Result<bool>
    where
        R: RandomSource + ?Sized,
    {
        tableau.check_qubit(qubit)?;
        match Self::anticommuting_stabilizer(tableau, qubit) {
            Some(p) => {
                let outcome = source.next_bit()?;
                Self::collapse(tableau, qubit, p, outcome)?;
                trace!(qubit, pivot = p, outcome, "random measurement");
                Ok(outcome)
            }
            None => {
                let outcome = Self::deterministic_outcome(tableau, qubit);
                trace!(qubit, outcome, "deterministic measurement");
                Ok(outcome)
            }
        }
    }

    /// Returns the outcome a Z measurement on `qubit` would have if it is
    /// determined, or `None` if it would be random. Never modifies the tableau.
    pub fn peek(tableau: &Tableau, qubit: usize) -> Result<Option<bool>> {
        tableau.check_qubit(qubit)?;
        Ok(match Self::anticommuting_stabilizer(tableau, qubit) {
            Some(_) => None,
            None => Some(Self::deterministic_outcome(tableau, qubit)),
        })
    }

    /// First stabilizer row with x_q = 1, i.e. anticommuting with Z_q.
    fn anticommuting_stabilizer(tableau: &Tableau, qubit: usize) -> Option<usize> {
        let n = tableau.num_qubits();
        (n..2 * n).find(|&row| tableau.x(row, qubit))
    }

    /// Random case. Rows that anticommute with Z_q are multiplied by the pivot
    /// `p`, the pivot moves to its paired destabilizer, and the pivot row
    /// becomes ±Z_q.
    fn collapse(tableau: &mut Tableau, qubit: usize, p: usize, outcome: bool) -> Result<()> {
        let n = tableau.num_qubits();
        for row in 0..2 * n {
            if row != p && tableau.x(row, qubit) {
                tableau.rowsum(row, p)?;
            }
        }
        tableau.copy_row(p - n, p);
        tableau.set_row_to_z(p, qubit, outcome);
        Ok(())
    }

    /// Deterministic case. Z_q is the product of the stabilizers whose paired
    /// destabilizer anticommutes with it; the sign of that product is the outcome.
    fn deterministic_outcome(tableau: &Tableau, qubit: usize) -> bool {
        let n = tableau.num_qubits();
        let mut scratch = vec![0u64; tableau.words_per_row()];
        for i in 0..n {
            if tableau.x(i, qubit) {
                tableau.accumulate_into(&mut scratch, i + n);
            }
        }
        word_bit(&scratch, 2 * n)
    }
}
