// src/gates/mod.rs

//! Conjugation rules for the Clifford generators.
//!
//! Each rule rewrites every row of a [`Tableau`] in place so that the row's
//! Pauli operator P becomes U P U† for the applied gate U. All arguments are
//! validated before the first row is touched, so a failing call leaves the
//! tableau exactly as it was.

use crate::core::{Result, StabError, Tableau};
use crate::operations::{Gate, Operation};
use tracing::trace;

/// Hadamard on `qubit`: X ↔ Z, and Y → -Y.
pub fn apply_h(tableau: &mut Tableau, qubit: usize) -> Result<()> {
    tableau.check_qubit(qubit)?;
    for row in 0..tableau.rows() {
        let x = tableau.x(row, qubit);
        let z = tableau.z(row, qubit);
        if x && z {
            let phase = tableau.phase(row);
            tableau.set_phase(row, !phase);
        }
        tableau.set_x(row, qubit, z);
        tableau.set_z(row, qubit, x);
    }
    Ok(())
}

/// Phase gate on `qubit`: X → Y, Y → -X, Z → Z.
pub fn apply_s(tableau: &mut Tableau, qubit: usize) -> Result<()> {
    tableau.check_qubit(qubit)?;
    for row in 0..tableau.rows() {
        let x = tableau.x(row, qubit);
        let z = tableau.z(row, qubit);
        if x && z {
            let phase = tableau.phase(row);
            tableau.set_phase(row, !phase);
        }
        tableau.set_z(row, qubit, z ^ x);
    }
    Ok(())
}

/// Controlled-NOT from `control` to `target`.
///
/// # Errors
/// * `InvalidQubit` if either index is out of range.
/// * `InvalidGate` if `control == target`.
pub fn apply_cnot(tableau: &mut Tableau, control: usize, target: usize) -> Result<()> {
    tableau.check_qubit(control)?;
    tableau.check_qubit(target)?;
    if control == target {
        return Err(StabError::InvalidGate {
            message: format!("CNOT control and target must differ, both are {}", control),
        });
    }
    for row in 0..tableau.rows() {
        let xc = tableau.x(row, control);
        let zc = tableau.z(row, control);
        let xt = tableau.x(row, target);
        let zt = tableau.z(row, target);
        if xc && zt && !(xt ^ zc) {
            let phase = tableau.phase(row);
            tableau.set_phase(row, !phase);
        }
        tableau.set_x(row, target, xt ^ xc);
        tableau.set_z(row, control, zc ^ zt);
    }
    Ok(())
}

/// Dispatches a gate entry of an operation record.
///
/// `Measure` is not a gate and is rejected here; it belongs to
/// [`crate::measurement::MeasurementEngine`].
pub fn apply_operation(tableau: &mut Tableau, op: &Operation) -> Result<()> {
    trace!(%op, "applying gate");
    match *op {
        Operation::H { qubit } => apply_h(tableau, qubit),
        Operation::S { qubit } => apply_s(tableau, qubit),
        Operation::Cnot { control, target } => apply_cnot(tableau, control, target),
        Operation::Measure { .. } => Err(StabError::InvalidGate {
            message: "Measure is not a gate and must be routed to the measurement engine".to_string(),
        }),
    }
}

/// Applies a possibly compound gate by replaying its generator expansion.
///
/// All qubits are validated, and two-qubit gates checked for distinct
/// arguments, before the first generator runs.
pub fn apply_gate(tableau: &mut Tableau, gate: &Gate) -> Result<()> {
    validate_gate(tableau, gate)?;
    for op in gate.expand() {
        apply_operation(tableau, &op)?;
    }
    Ok(())
}

/// Checks a gate's arguments against a tableau without mutating it.
pub fn validate_gate(tableau: &Tableau, gate: &Gate) -> Result<()> {
    let qubits = gate.qubits();
    for q in &qubits {
        tableau.check_qubit(*q)?;
    }
    if let [a, b] = qubits[..] {
        if a == b {
            return Err(StabError::InvalidGate { message: format!("{} needs two distinct qubits", gate) });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stabs(t: &Tableau) -> Vec<String> {
        t.stabilizers().iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn hadamard_maps_z_to_x() -> Result<()> {
        let mut t = Tableau::new(1)?;
        apply_h(&mut t, 0)?;
        assert_eq!(stabs(&t), vec!["+X"]);
        assert_eq!(t.destabilizers()[0].to_string(), "+Z");
        Ok(())
    }

    #[test]
    fn phase_maps_x_to_y_to_minus_x() -> Result<()> {
        let mut t = Tableau::new(1)?;
        apply_h(&mut t, 0)?;
        apply_s(&mut t, 0)?;
        assert_eq!(stabs(&t), vec!["+Y"]);
        apply_s(&mut t, 0)?;
        assert_eq!(stabs(&t), vec!["-X"]);
        Ok(())
    }

    #[test]
    fn hadamard_negates_y() -> Result<()> {
        let mut t = Tableau::new(1)?;
        apply_h(&mut t, 0)?;
        apply_s(&mut t, 0)?; // +Y
        apply_h(&mut t, 0)?;
        assert_eq!(stabs(&t), vec!["-Y"]);
        Ok(())
    }

    #[test]
    fn double_hadamard_and_four_phases_are_identity() -> Result<()> {
        let mut t = Tableau::new(3)?;
        apply_h(&mut t, 0)?;
        apply_cnot(&mut t, 0, 2)?;
        apply_s(&mut t, 2)?;
        let before = t.clone();
        apply_h(&mut t, 2)?;
        apply_h(&mut t, 2)?;
        assert_eq!(t, before);
        for _ in 0..4 {
            apply_s(&mut t, 0)?;
        }
        assert_eq!(t, before);
        Ok(())
    }

    #[test]
    fn cnot_builds_bell_stabilizers() -> Result<()> {
        let mut t = Tableau::new(2)?;
        apply_h(&mut t, 0)?;
        apply_cnot(&mut t, 0, 1)?;
        assert_eq!(stabs(&t), vec!["+XX", "+ZZ"]);
        Ok(())
    }

    #[test]
    fn cnot_sign_on_y_inputs() -> Result<()> {
        let mut t = Tableau::new(2)?;
        apply_h(&mut t, 0)?; // +X on q0
        apply_h(&mut t, 1)?;
        apply_s(&mut t, 1)?; // +Y on q1
        apply_cnot(&mut t, 0, 1)?;
        // X0 → X0 X1, Y1 → Z0 Y1
        assert_eq!(stabs(&t), vec!["+XX", "+ZY"]);
        apply_cnot(&mut t, 0, 1)?;
        assert_eq!(stabs(&t), vec!["+XI", "+IY"]);
        Ok(())
    }

    #[test]
    fn cnot_flips_sign_of_x_control_z_target() -> Result<()> {
        // X⊗Z → (X⊗X)(Z⊗Z) = -Y⊗Y
        let mut t = Tableau::new(2)?;
        t.set_bit(2, 0, true)?;
        t.set_bit(2, 2, false)?;
        t.set_bit(2, 3, true)?;
        assert_eq!(t.row_pauli(2)?.to_string(), "+XZ");
        apply_cnot(&mut t, 0, 1)?;
        assert_eq!(t.row_pauli(2)?.to_string(), "-YY");
        Ok(())
    }

    #[test]
    fn invalid_arguments_leave_tableau_untouched() -> Result<()> {
        let mut t = Tableau::new(2)?;
        apply_h(&mut t, 0)?;
        let before = t.clone();
        assert_eq!(apply_cnot(&mut t, 0, 2), Err(StabError::InvalidQubit { qubit: 2, num_qubits: 2 }));
        assert!(matches!(apply_cnot(&mut t, 1, 1), Err(StabError::InvalidGate { .. })));
        assert!(matches!(apply_gate(&mut t, &Gate::Cz(1, 5)), Err(StabError::InvalidQubit { qubit: 5, .. })));
        assert!(matches!(apply_gate(&mut t, &Gate::Swap(0, 0)), Err(StabError::InvalidGate { .. })));
        assert!(matches!(apply_operation(&mut t, &Operation::Measure { qubit: 0 }), Err(StabError::InvalidGate { .. })));
        assert_eq!(t, before);
        Ok(())
    }

    #[test]
    fn compound_gates() -> Result<()> {
        let mut t = Tableau::new(2)?;
        apply_gate(&mut t, &Gate::X(0))?;
        assert_eq!(stabs(&t), vec!["-ZI", "+IZ"]);
        apply_gate(&mut t, &Gate::Swap(0, 1))?;
        assert_eq!(stabs(&t), vec!["-IZ", "+ZI"]);
        Ok(())
    }

    #[test]
    fn named_gates_on_tableau() -> Result<()> {
        let mut t = Tableau::new(2)?;
        t.apply_named("hadamard", &[0])?;
        t.apply_named("cx", &[0, 1])?;
        assert_eq!(stabs(&t), vec!["+XX", "+ZZ"]);
        t.apply_named("cz", &[0, 1])?;
        assert_eq!(stabs(&t), vec!["+YY", "+ZZ"]);
        assert!(matches!(t.apply_named("t", &[0]), Err(StabError::UnsupportedGate { .. })));
        Ok(())
    }
}
