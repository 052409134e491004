// src/core/tableau.rs

use super::error::{Result, StabError};
use super::pauli::{Pauli, PauliString};
use std::fmt;

const WORD_BITS: usize = 64;

/// The stabilizer tableau of an n-qubit stabilizer state.
///
/// A 2n × (2n + 1) matrix over GF(2):
/// - rows `0..n` are destabilizer generators, rows `n..2n` stabilizer generators;
/// - columns `0..n` hold x-bits, columns `n..2n` z-bits, column `2n` the phase bit
///   (`0` = `+`, `1` = `-`).
///
/// Rows are packed into `u64` words and stored contiguously, so a row is a
/// short slice and row XOR is a word loop with no allocation.
///
/// The tableau starts in |0…0⟩: destabilizer i = X_i, stabilizer i = Z_i.
/// Cloning produces an independent copy, which is how a simulation branch is forked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tableau {
    num_qubits: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Tableau {
    /// Creates the canonical |0…0⟩ tableau on `num_qubits` qubits.
    ///
    /// # Errors
    /// `StabError::InvalidSize` if `num_qubits` is zero.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(StabError::InvalidSize { num_qubits });
        }
        let columns = 2 * num_qubits + 1;
        let words_per_row = columns.div_ceil(WORD_BITS);
        let mut tableau = Self {
            num_qubits,
            words_per_row,
            bits: vec![0; 2 * num_qubits * words_per_row],
        };
        for i in 0..num_qubits {
            tableau.put(i, i, true); // destabilizer X_i
            tableau.put(num_qubits + i, num_qubits + i, true); // stabilizer Z_i
        }
        Ok(tableau)
    }

    /// Number of qubits n.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of rows, 2n.
    pub fn rows(&self) -> usize {
        2 * self.num_qubits
    }

    /// Number of columns, 2n + 1.
    pub fn columns(&self) -> usize {
        2 * self.num_qubits + 1
    }

    /// Index of the phase column, 2n.
    pub fn phase_column(&self) -> usize {
        2 * self.num_qubits
    }

    /// Reads the bit at (`row`, `col`).
    pub fn get_bit(&self, row: usize, col: usize) -> Result<bool> {
        self.check_row(row)?;
        self.check_column(col)?;
        Ok(self.bit(row, col))
    }

    /// Writes the bit at (`row`, `col`).
    pub fn set_bit(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        self.check_row(row)?;
        self.check_column(col)?;
        self.put(row, col, value);
        Ok(())
    }

    /// Row `dst` := row `dst` XOR row `src` across all 2n + 1 columns.
    ///
    /// This is a plain bitwise XOR, the phase bit included. Use [`Tableau::rowsum`]
    /// for the phase-correct product of the two Pauli operators.
    pub fn xor_row(&mut self, dst: usize, src: usize) -> Result<()> {
        self.check_row(dst)?;
        self.check_row(src)?;
        let w = self.words_per_row;
        for k in 0..w {
            let v = self.bits[src * w + k];
            self.bits[dst * w + k] ^= v;
        }
        Ok(())
    }

    /// Exchanges rows `i` and `j`.
    pub fn swap_rows(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_row(i)?;
        self.check_row(j)?;
        if i != j {
            let w = self.words_per_row;
            for k in 0..w {
                self.bits.swap(i * w + k, j * w + k);
            }
        }
        Ok(())
    }

    /// Replaces row `h` with the Pauli product row `i` · row `h`, phase included.
    ///
    /// The phase is computed first from the unmodified rows, then the x/z
    /// columns are combined with [`Tableau::xor_row`] and the phase bit is
    /// written on top.
    pub fn rowsum(&mut self, h: usize, i: usize) -> Result<()> {
        self.check_row(h)?;
        self.check_row(i)?;
        let phase = product_phase(self.row(h), self.row(i), self.num_qubits);
        self.xor_row(h, i)?;
        self.put(h, self.phase_column(), phase);
        Ok(())
    }

    /// Symplectic inner product of rows `a` and `b`: `true` iff they anticommute.
    pub fn symplectic_product(&self, a: usize, b: usize) -> Result<bool> {
        self.check_row(a)?;
        self.check_row(b)?;
        Ok(rows_anticommute(self.row(a), self.row(b), self.num_qubits))
    }

    /// Renders row `row` as a signed Pauli string.
    pub fn row_pauli(&self, row: usize) -> Result<PauliString> {
        self.check_row(row)?;
        Ok(self.pauli_unchecked(row))
    }

    /// The n stabilizer generators (rows `n..2n`) as signed Pauli strings.
    pub fn stabilizers(&self) -> Vec<PauliString> {
        (self.num_qubits..self.rows()).map(|r| self.pauli_unchecked(r)).collect()
    }

    /// The n destabilizer generators (rows `0..n`) as signed Pauli strings.
    pub fn destabilizers(&self) -> Vec<PauliString> {
        (0..self.num_qubits).map(|r| self.pauli_unchecked(r)).collect()
    }

    /// Applies a gate given by name, e.g. `"h"`, `"cx"` or `"swap"`.
    /// See [`crate::operations::Gate::from_name`] for the accepted names.
    pub fn apply_named(&mut self, name: &str, qubits: &[usize]) -> Result<()> {
        let gate = crate::operations::Gate::from_name(name, qubits)?;
        crate::gates::apply_gate(self, &gate)
    }

    /// Fails with `InvalidQubit` unless `qubit < n`.
    pub fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            Err(StabError::InvalidQubit { qubit, num_qubits: self.num_qubits })
        } else {
            Ok(())
        }
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows() {
            Err(StabError::InvalidRow { row, rows: self.rows() })
        } else {
            Ok(())
        }
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.columns() {
            Err(StabError::InvalidColumn { column, columns: self.columns() })
        } else {
            Ok(())
        }
    }

    fn pauli_unchecked(&self, row: usize) -> PauliString {
        let n = self.num_qubits;
        let paulis = (0..n).map(|q| Pauli::from_bits(self.bit(row, q), self.bit(row, n + q))).collect();
        PauliString::new(self.bit(row, self.phase_column()), paulis)
    }

    // --- Crate-internal accessors. Callers validate indices first. ---

    pub(crate) fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    pub(crate) fn row(&self, row: usize) -> &[u64] {
        let w = self.words_per_row;
        &self.bits[row * w..(row + 1) * w]
    }

    pub(crate) fn bit(&self, row: usize, col: usize) -> bool {
        word_bit(self.row(row), col)
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, value: bool) {
        let idx = row * self.words_per_row + col / WORD_BITS;
        let mask = 1u64 << (col % WORD_BITS);
        if value {
            self.bits[idx] |= mask;
        } else {
            self.bits[idx] &= !mask;
        }
    }

    pub(crate) fn x(&self, row: usize, qubit: usize) -> bool {
        self.bit(row, qubit)
    }

    pub(crate) fn z(&self, row: usize, qubit: usize) -> bool {
        self.bit(row, self.num_qubits + qubit)
    }

    pub(crate) fn phase(&self, row: usize) -> bool {
        self.bit(row, self.phase_column())
    }

    pub(crate) fn set_x(&mut self, row: usize, qubit: usize, value: bool) {
        self.put(row, qubit, value);
    }

    pub(crate) fn set_z(&mut self, row: usize, qubit: usize, value: bool) {
        self.put(row, self.num_qubits + qubit, value);
    }

    pub(crate) fn set_phase(&mut self, row: usize, value: bool) {
        self.put(row, self.phase_column(), value);
    }

    /// Multiplies row `src` into a detached scratch row of `words_per_row` words.
    pub(crate) fn accumulate_into(&self, scratch: &mut [u64], src: usize) {
        let n = self.num_qubits;
        let phase = product_phase(scratch, self.row(src), n);
        for (dst, v) in scratch.iter_mut().zip(self.row(src)) {
            *dst ^= *v;
        }
        let col = 2 * n;
        let mask = 1u64 << (col % WORD_BITS);
        if phase {
            scratch[col / WORD_BITS] |= mask;
        } else {
            scratch[col / WORD_BITS] &= !mask;
        }
    }

    /// Overwrites row `row` with the single-qubit operator Z_`qubit` and the given phase.
    pub(crate) fn set_row_to_z(&mut self, row: usize, qubit: usize, phase: bool) {
        let w = self.words_per_row;
        self.bits[row * w..(row + 1) * w].fill(0);
        self.set_z(row, qubit, true);
        self.set_phase(row, phase);
    }

    /// Copies row `src` over row `dst`.
    pub(crate) fn copy_row(&mut self, dst: usize, src: usize) {
        let w = self.words_per_row;
        self.bits.copy_within(src * w..(src + 1) * w, dst * w);
    }
}

pub(crate) fn word_bit(words: &[u64], col: usize) -> bool {
    (words[col / WORD_BITS] >> (col % WORD_BITS)) & 1 == 1
}

/// Symplectic inner product of two packed rows over `n` qubits.
pub(crate) fn rows_anticommute(a: &[u64], b: &[u64], n: usize) -> bool {
    let mut acc = false;
    for q in 0..n {
        acc ^= (word_bit(a, q) & word_bit(b, n + q)) ^ (word_bit(a, n + q) & word_bit(b, q));
    }
    acc
}

/// Exponent of i picked up by qubit factor (x1, z1) · (x2, z2), in {-1, 0, 1}.
fn g(x1: bool, z1: bool, x2: bool, z2: bool) -> i32 {
    let (x2, z2) = (x2 as i32, z2 as i32);
    match (x1, z1) {
        (false, false) => 0,
        (true, true) => z2 - x2,
        (true, false) => z2 * (2 * x2 - 1),
        (false, true) => x2 * (1 - 2 * z2),
    }
}

/// Phase bit of the product `factor` · `target` where both are packed rows over `n` qubits.
///
/// Both operators are Hermitian and the callers only multiply commuting
/// operators, so the accumulated exponent is 0 or 2 mod 4.
fn product_phase(target: &[u64], factor: &[u64], n: usize) -> bool {
    let pc = 2 * n;
    let mut sum: i32 = 2 * (word_bit(target, pc) as i32) + 2 * (word_bit(factor, pc) as i32);
    for q in 0..n {
        sum += g(word_bit(factor, q), word_bit(factor, n + q), word_bit(target, q), word_bit(target, n + q));
    }
    sum.rem_euclid(4) == 2
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.num_qubits;
        writeln!(f, "Tableau:")?;
        writeln!(f, "X block | Z block | Phase")?;
        writeln!(f, "{}", "-".repeat(4 * n + 10))?;
        let width = (2 * n).saturating_sub(1).max(7);
        for row in 0..self.rows() {
            let x_block = (0..n).map(|q| if self.x(row, q) { "1" } else { "0" }).collect::<Vec<_>>().join(" ");
            let z_block = (0..n).map(|q| if self.z(row, q) { "1" } else { "0" }).collect::<Vec<_>>().join(" ");
            let phase = if self.phase(row) { "1" } else { "0" };
            let label = if row < n { format!("D{}", row) } else { format!("S{}", row - n) };
            writeln!(f, "{:>3}: {:>width$} | {:>width$} | {:>3}", label, x_block, z_block, phase, width = width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_qubits_is_rejected() {
        assert_eq!(Tableau::new(0), Err(StabError::InvalidSize { num_qubits: 0 }));
    }

    #[test]
    fn canonical_basis_state() -> Result<()> {
        let t = Tableau::new(3)?;
        assert_eq!(t.rows(), 6);
        assert_eq!(t.columns(), 7);
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(t.get_bit(row, col)?, row == col, "row {} col {}", row, col);
            }
        }
        let stabs: Vec<String> = t.stabilizers().iter().map(|p| p.to_string()).collect();
        assert_eq!(stabs, vec!["+ZII", "+IZI", "+IIZ"]);
        let destabs: Vec<String> = t.destabilizers().iter().map(|p| p.to_string()).collect();
        assert_eq!(destabs, vec!["+XII", "+IXI", "+IIX"]);
        Ok(())
    }

    #[test]
    fn bit_access_is_range_checked() -> Result<()> {
        let mut t = Tableau::new(2)?;
        assert!(matches!(t.get_bit(4, 0), Err(StabError::InvalidRow { row: 4, rows: 4 })));
        assert!(matches!(t.set_bit(0, 5, true), Err(StabError::InvalidColumn { column: 5, columns: 5 })));
        t.set_bit(0, 4, true)?;
        assert!(t.get_bit(0, 4)?);
        Ok(())
    }

    #[test]
    fn xor_and_swap_rows() -> Result<()> {
        let mut t = Tableau::new(2)?;
        t.xor_row(0, 1)?; // X0 ^ X1
        assert_eq!(t.row_pauli(0)?.to_string(), "+XX");
        t.swap_rows(0, 2)?;
        assert_eq!(t.row_pauli(0)?.to_string(), "+ZI");
        assert_eq!(t.row_pauli(2)?.to_string(), "+XX");
        assert!(t.swap_rows(0, 9).is_err());
        Ok(())
    }

    #[test]
    fn rowsum_tracks_sign_of_products() -> Result<()> {
        // XX · ZZ = (XZ)(XZ) = (-iY)(-iY) = -YY
        let mut t = Tableau::new(2)?;
        t.set_bit(0, 1, true)?; // row 0 = XX
        t.set_bit(2, 3, true)?; // row 2 = ZZ
        t.rowsum(2, 0)?;
        assert_eq!(t.row_pauli(2)?.to_string(), "-YY");
        Ok(())
    }

    #[test]
    fn wide_tableau_crosses_word_boundaries() -> Result<()> {
        let t = Tableau::new(70)?;
        assert!(t.get_bit(69, 69)?);
        assert!(t.get_bit(139, 139)?);
        assert!(!t.get_bit(139, 140)?);
        Ok(())
    }

    #[test]
    fn display_lists_every_row() -> Result<()> {
        let t = Tableau::new(2)?;
        let text = t.to_string();
        assert!(text.starts_with("Tableau:\nX block | Z block | Phase\n"));
        assert!(text.contains(" D0:"));
        assert!(text.contains(" S1:"));
        assert_eq!(text.lines().count(), 3 + 4);
        Ok(())
    }
}
