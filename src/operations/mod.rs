// src/operations/mod.rs

//! Defines the operations a stabilizer simulation replays.
//!
//! [`Operation`] is the closed set the core understands: the three Clifford
//! generators H, S and CNOT plus a Z-basis measurement. [`Gate`] adds the
//! usual compound gates (Pauli gates, S†, CZ, SWAP), each of which is only a
//! fixed sequence of generators and expands into `Operation`s before reaching
//! the tableau.

use crate::core::{Result, StabError};
use std::fmt;

/// A single entry of an operation record.
///
/// The generating set is fixed, so dispatch over this enum is exhaustive;
/// there is no open-ended gate registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Hadamard: X ↔ Z.
    H {
        /// Target qubit.
        qubit: usize,
    },

    /// Phase gate: X → Y, Z → Z.
    S {
        /// Target qubit.
        qubit: usize,
    },

    /// Controlled-NOT. `control` and `target` must differ.
    Cnot {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },

    /// Projective measurement of Z on one qubit, producing one outcome bit.
    Measure {
        /// Measured qubit.
        qubit: usize,
    },
}

impl Operation {
    /// Returns the qubit indices mentioned by this operation, in argument order.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match *self {
            Operation::H { qubit } | Operation::S { qubit } | Operation::Measure { qubit } => vec![qubit],
            Operation::Cnot { control, target } => vec![control, target],
        }
    }

    /// `true` for `Measure`.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::H { qubit } => write!(f, "H({})", qubit),
            Operation::S { qubit } => write!(f, "S({})", qubit),
            Operation::Cnot { control, target } => write!(f, "CNOT({}, {})", control, target),
            Operation::Measure { qubit } => write!(f, "Measure({})", qubit),
        }
    }
}

/// A Clifford gate, possibly compound.
///
/// Compound gates carry no semantics of their own beyond the generator
/// sequence returned by [`Gate::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard.
    H(usize),
    /// Phase gate.
    S(usize),
    /// Inverse phase gate, S·S·S.
    Sdg(usize),
    /// Pauli X, H·S·S·H.
    X(usize),
    /// Pauli Y, up to global phase X followed by Z.
    Y(usize),
    /// Pauli Z, S·S.
    Z(usize),
    /// Controlled-NOT (control, target).
    Cnot(usize, usize),
    /// Controlled-Z (control, target), H(t)·CNOT(c, t)·H(t).
    Cz(usize, usize),
    /// Swap of two qubits, three alternating CNOTs.
    Swap(usize, usize),
}

impl Gate {
    /// Builds a gate from a case-insensitive name and its qubit arguments.
    ///
    /// Accepted names: `h`/`hadamard`, `s`/`phase`, `sdg`/`sdag`, `x`, `y`,
    /// `z`, `cnot`/`cx`, `cz`, `swap`.
    ///
    /// # Errors
    /// * `UnsupportedGate` for an unknown name.
    /// * `InvalidGate` if the number of qubits does not match the gate.
    pub fn from_name(name: &str, qubits: &[usize]) -> Result<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let arity = match lowered.as_str() {
            "h" | "hadamard" | "s" | "phase" | "sdg" | "sdag" | "x" | "y" | "z" => 1,
            "cnot" | "cx" | "cz" | "swap" => 2,
            _ => return Err(StabError::UnsupportedGate { name: name.to_string() }),
        };
        if qubits.len() != arity {
            return Err(StabError::InvalidGate {
                message: format!("'{}' takes {} qubit(s), got {}", name, arity, qubits.len()),
            });
        }
        let gate = match lowered.as_str() {
            "h" | "hadamard" => Gate::H(qubits[0]),
            "s" | "phase" => Gate::S(qubits[0]),
            "sdg" | "sdag" => Gate::Sdg(qubits[0]),
            "x" => Gate::X(qubits[0]),
            "y" => Gate::Y(qubits[0]),
            "z" => Gate::Z(qubits[0]),
            "cnot" | "cx" => Gate::Cnot(qubits[0], qubits[1]),
            "cz" => Gate::Cz(qubits[0], qubits[1]),
            _ => Gate::Swap(qubits[0], qubits[1]),
        };
        Ok(gate)
    }

    /// Qubits the gate acts on, in argument order.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::H(q) | Gate::S(q) | Gate::Sdg(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) => vec![q],
            Gate::Cnot(a, b) | Gate::Cz(a, b) | Gate::Swap(a, b) => vec![a, b],
        }
    }

    /// The generator sequence implementing this gate.
    pub fn expand(&self) -> Vec<Operation> {
        use Operation as Op;
        match *self {
            Gate::H(qubit) => vec![Op::H { qubit }],
            Gate::S(qubit) => vec![Op::S { qubit }],
            Gate::Sdg(qubit) => vec![Op::S { qubit }; 3],
            Gate::Z(qubit) => vec![Op::S { qubit }; 2],
            Gate::X(qubit) => vec![Op::H { qubit }, Op::S { qubit }, Op::S { qubit }, Op::H { qubit }],
            Gate::Y(qubit) => vec![
                Op::H { qubit },
                Op::S { qubit },
                Op::S { qubit },
                Op::H { qubit },
                Op::S { qubit },
                Op::S { qubit },
            ],
            Gate::Cnot(control, target) => vec![Op::Cnot { control, target }],
            Gate::Cz(control, target) => vec![
                Op::H { qubit: target },
                Op::Cnot { control, target },
                Op::H { qubit: target },
            ],
            Gate::Swap(a, b) => vec![
                Op::Cnot { control: a, target: b },
                Op::Cnot { control: b, target: a },
                Op::Cnot { control: a, target: b },
            ],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::H(q) => write!(f, "H({})", q),
            Gate::S(q) => write!(f, "S({})", q),
            Gate::Sdg(q) => write!(f, "Sdg({})", q),
            Gate::X(q) => write!(f, "X({})", q),
            Gate::Y(q) => write!(f, "Y({})", q),
            Gate::Z(q) => write!(f, "Z({})", q),
            Gate::Cnot(c, t) => write!(f, "CNOT({}, {})", c, t),
            Gate::Cz(c, t) => write!(f, "CZ({}, {})", c, t),
            Gate::Swap(a, b) => write!(f, "SWAP({}, {})", a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_aliases() -> Result<()> {
        assert_eq!(Gate::from_name("H", &[0])?, Gate::H(0));
        assert_eq!(Gate::from_name("hadamard", &[2])?, Gate::H(2));
        assert_eq!(Gate::from_name("Phase", &[1])?, Gate::S(1));
        assert_eq!(Gate::from_name("cx", &[0, 1])?, Gate::Cnot(0, 1));
        assert_eq!(Gate::from_name("CNOT", &[1, 0])?, Gate::Cnot(1, 0));
        assert_eq!(Gate::from_name("swap", &[0, 3])?, Gate::Swap(0, 3));
        Ok(())
    }

    #[test]
    fn unknown_name_and_wrong_arity() {
        assert_eq!(
            Gate::from_name("toffoli", &[0, 1, 2]),
            Err(StabError::UnsupportedGate { name: "toffoli".to_string() })
        );
        assert!(matches!(Gate::from_name("h", &[0, 1]), Err(StabError::InvalidGate { .. })));
        assert!(matches!(Gate::from_name("cz", &[0]), Err(StabError::InvalidGate { .. })));
    }

    #[test]
    fn compound_expansions_use_generators_only() {
        assert_eq!(Gate::X(1).expand().len(), 4);
        assert_eq!(Gate::Z(0).expand(), vec![Operation::S { qubit: 0 }; 2]);
        assert_eq!(
            Gate::Cz(0, 1).expand(),
            vec![
                Operation::H { qubit: 1 },
                Operation::Cnot { control: 0, target: 1 },
                Operation::H { qubit: 1 }
            ]
        );
        assert!(Gate::Swap(2, 0).expand().iter().all(|op| matches!(op, Operation::Cnot { .. })));
    }

    #[test]
    fn involved_qubits_follow_argument_order() {
        assert_eq!(Operation::Cnot { control: 3, target: 1 }.involved_qubits(), vec![3, 1]);
        assert!(Operation::Measure { qubit: 0 }.is_measurement());
        assert!(!Operation::H { qubit: 0 }.is_measurement());
    }
}
