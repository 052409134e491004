// src/validation/mod.rs

//! Provides functions to validate a `Tableau` against the stabilizer invariants.
//!
//! These checks are O(n³) at worst and are meant for tests, debugging and the
//! executor's optional per-step validation, not for the hot path.

use crate::core::tableau::{rows_anticommute, word_bit};
use crate::core::{Result, StabError, Tableau};

// --- Helper Functions ---

/// The x/z part of every row with the phase bit cleared.
fn symplectic_rows(tableau: &Tableau) -> Vec<Vec<u64>> {
    let pc = tableau.phase_column();
    (0..tableau.rows())
        .map(|r| {
            let mut row = tableau.row(r).to_vec();
            row[pc / 64] &= !(1u64 << (pc % 64));
            row
        })
        .collect()
}

/// Rank over GF(2) of the given packed rows restricted to `columns` columns.
fn gf2_rank(mut rows: Vec<Vec<u64>>, columns: usize) -> usize {
    let mut rank = 0;
    for col in 0..columns {
        let Some(pivot) = (rank..rows.len()).find(|&r| word_bit(&rows[r], col)) else {
            continue;
        };
        rows.swap(rank, pivot);
        let pivot_row = rows[rank].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r != rank && word_bit(row, col) {
                for (w, p) in row.iter_mut().zip(&pivot_row) {
                    *w ^= *p;
                }
            }
        }
        rank += 1;
    }
    rank
}

// --- Public Validation Functions ---

/// Checks that all 2n rows are linearly independent over GF(2) in the x/z columns.
///
/// # Returns
/// * `Ok(())` if the rows have full rank 2n.
/// * `Err(StabError::InvariantViolation)` otherwise.
pub fn check_independence(tableau: &Tableau) -> Result<()> {
    let expected = tableau.rows();
    let rank = gf2_rank(symplectic_rows(tableau), expected);
    if rank != expected {
        return Err(StabError::InvariantViolation {
            message: format!("tableau rows have rank {} but {} are required", rank, expected),
        });
    }
    Ok(())
}

/// Checks that the stabilizer rows pairwise commute.
pub fn check_stabilizer_commutativity(tableau: &Tableau) -> Result<()> {
    let n = tableau.num_qubits();
    for a in n..2 * n {
        for b in (a + 1)..2 * n {
            if tableau.symplectic_product(a, b)? {
                return Err(StabError::InvariantViolation {
                    message: format!("stabilizers {} and {} anticommute", a - n, b - n),
                });
            }
        }
    }
    Ok(())
}

/// Checks the canonical pairing: destabilizer i anticommutes with stabilizer j
/// exactly when i = j.
pub fn check_canonical_pairing(tableau: &Tableau) -> Result<()> {
    let n = tableau.num_qubits();
    for i in 0..n {
        for j in 0..n {
            let anticommute = tableau.symplectic_product(i, n + j)?;
            if anticommute != (i == j) {
                return Err(StabError::InvariantViolation {
                    message: format!(
                        "destabilizer {} and stabilizer {} have symplectic product {} (expected {})",
                        i,
                        j,
                        anticommute as u8,
                        (i == j) as u8
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Runs every invariant check.
///
/// # Returns
/// * `Ok(())` if independence, stabilizer commutativity and canonical pairing all hold.
/// * `Err(StabError::InvariantViolation)` naming the first violated invariant.
pub fn validate_tableau(tableau: &Tableau) -> Result<()> {
    check_independence(tableau)?;
    check_stabilizer_commutativity(tableau)?;
    check_canonical_pairing(tableau)?;
    Ok(())
}

/// Decides whether two tableaux describe the same stabilizer state.
///
/// The comparison is between stabilizer groups, signs included, so generator
/// order and the choice of generators do not matter. `a` must be a valid
/// tableau (see [`validate_tableau`]); `b` only needs commuting stabilizers.
///
/// Each generator g of `b` is rebuilt inside `a`'s group as the product of the
/// stabilizers whose paired destabilizer anticommutes with g. The groups are
/// equal iff every such product reproduces g exactly.
pub fn stabilizer_groups_equal(a: &Tableau, b: &Tableau) -> Result<bool> {
    let n = a.num_qubits();
    if b.num_qubits() != n {
        return Ok(false);
    }
    for g in n..2 * n {
        let target = b.row(g);
        let mut scratch = vec![0u64; a.words_per_row()];
        for i in 0..n {
            if rows_anticommute(a.row(i), target, n) {
                a.accumulate_into(&mut scratch, n + i);
            }
        }
        if scratch.as_slice() != target {
            return Ok(false);
        }
    }
    Ok(true)
}
