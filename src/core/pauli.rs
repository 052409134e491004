// src/core/pauli.rs

use super::error::{Result, StabError};
use std::fmt;
use std::str::FromStr;

/// Single-qubit Pauli operator, encoded by an (x, z) bit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// (0, 0)
    I,
    /// (1, 0)
    X,
    /// (1, 1)
    Y,
    /// (0, 1)
    Z,
}

impl Pauli {
    /// Decodes the (x, z) exponent pair of one qubit.
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Pauli::I,
            (true, false) => Pauli::X,
            (true, true) => Pauli::Y,
            (false, true) => Pauli::Z,
        }
    }

    /// Returns the (x, z) exponent pair.
    pub fn bits(self) -> (bool, bool) {
        match self {
            Pauli::I => (false, false),
            Pauli::X => (true, false),
            Pauli::Y => (true, true),
            Pauli::Z => (false, true),
        }
    }

    fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'I' | 'i' | '_' => Some(Pauli::I),
            'X' | 'x' => Some(Pauli::X),
            'Y' | 'y' => Some(Pauli::Y),
            'Z' | 'z' => Some(Pauli::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A signed n-qubit Pauli operator such as `+XZI` or `-YY`.
///
/// This is the read-only export format of a tableau row. Qubit 0 is the
/// leftmost character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliString {
    negative: bool,
    paulis: Vec<Pauli>,
}

impl PauliString {
    /// Creates a Pauli string from its sign and per-qubit factors.
    pub fn new(negative: bool, paulis: Vec<Pauli>) -> Self {
        Self { negative, paulis }
    }

    /// The positive identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self::new(false, vec![Pauli::I; num_qubits])
    }

    /// `true` for a `-` sign.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Per-qubit factors, qubit 0 first.
    pub fn paulis(&self) -> &[Pauli] {
        &self.paulis
    }

    /// Factor acting on `qubit`, if in range.
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.paulis.get(qubit).copied()
    }

    /// Number of qubits the operator is defined on.
    pub fn len(&self) -> usize {
        self.paulis.len()
    }

    /// Returns `true` for a zero-qubit operator.
    pub fn is_empty(&self) -> bool {
        self.paulis.is_empty()
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.paulis.iter().filter(|p| **p != Pauli::I).count()
    }

    /// Whether the two operators commute, i.e. their symplectic inner product is 0.
    /// Operators of different length never commute by this test.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let anticommuting = self
            .paulis
            .iter()
            .zip(other.paulis.iter())
            .filter(|(a, b)| {
                let (x1, z1) = a.bits();
                let (x2, z2) = b.bits();
                (x1 & z2) ^ (z1 & x2)
            })
            .count();
        anticommuting % 2 == 0
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.negative { '-' } else { '+' })?;
        for p in &self.paulis {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

impl FromStr for PauliString {
    type Err = StabError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (negative, body) = match s.chars().next() {
            Some('-') => (true, &s[1..]),
            Some('+') => (false, &s[1..]),
            _ => (false, s),
        };
        if body.is_empty() {
            return Err(StabError::InvalidPauliString { message: format!("'{}' has no Pauli factors", s) });
        }
        let paulis = body
            .chars()
            .map(|c| {
                Pauli::from_char(c).ok_or_else(|| StabError::InvalidPauliString {
                    message: format!("unexpected character '{}' in '{}'", c, s),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(negative, paulis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() -> Result<()> {
        let p: PauliString = "-XYZI".parse()?;
        assert!(p.is_negative());
        assert_eq!(p.paulis(), &[Pauli::X, Pauli::Y, Pauli::Z, Pauli::I]);
        assert_eq!(p.to_string(), "-XYZI");
        assert_eq!("ZZ".parse::<PauliString>()?.to_string(), "+ZZ");
        Ok(())
    }

    #[test]
    fn rejects_bad_characters() {
        assert!(matches!("+XQ".parse::<PauliString>(), Err(StabError::InvalidPauliString { .. })));
        assert!(matches!("-".parse::<PauliString>(), Err(StabError::InvalidPauliString { .. })));
    }

    #[test]
    fn commutation() -> Result<()> {
        let xx: PauliString = "XX".parse()?;
        let zz: PauliString = "ZZ".parse()?;
        let zi: PauliString = "ZI".parse()?;
        assert!(xx.commutes_with(&zz));
        assert!(!xx.commutes_with(&zi));
        assert_eq!(xx.weight(), 2);
        assert_eq!(PauliString::identity(3).weight(), 0);
        Ok(())
    }
}
