// src/circuits/mod.rs

//! Defines structures for representing and building operation records.
//!
//! A [`Circuit`] is the ordered, immutable input of a simulation run: a
//! declared qubit count plus a sequence of [`Operation`]s. Compound gates
//! are expanded into generators as they are added, so a circuit only ever
//! holds H, S, CNOT and Measure entries.

use crate::operations::{Gate, Operation};
use std::fmt;

/// An ordered sequence of operations on a fixed number of qubits.
///
/// Qubit indices are not checked on insertion; out-of-range entries are
/// reported by the executor together with their position in the record.
#[derive(Clone, PartialEq, Eq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// Declared qubit count; the executor sizes its tableau from this.
    num_qubits: usize,

    /// The ordered sequence of operations. Order is significant.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits, operations: Vec::new() }
    }

    /// Adds a single operation to the end of the sequence.
    pub fn add_operation(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the sequence.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
    }

    /// Appends the generator expansion of `gate`.
    pub fn add_gate(&mut self, gate: Gate) {
        self.operations.extend(gate.expand());
    }

    /// Declared qubit count.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of `Measure` entries, which is the length of any outcome record
    /// produced by a successful run.
    pub fn measurement_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_measurement()).count()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for constructing `Circuit` instances using method chaining.
///
/// ```
/// use stabsim::CircuitBuilder;
///
/// let bell = CircuitBuilder::new(2).h(0).cnot(0, 1).measure(0).measure(1).build();
/// assert_eq!(bell.len(), 4);
/// assert_eq!(bell.measurement_count(), 2);
/// ```
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a builder for a circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self { circuit: Circuit::new(num_qubits) }
    }

    /// Adds a single operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Adds a possibly compound gate, expanded into generators.
    pub fn gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    /// Hadamard on `qubit`.
    pub fn h(self, qubit: usize) -> Self {
        self.add_op(Operation::H { qubit })
    }

    /// Phase gate on `qubit`.
    pub fn s(self, qubit: usize) -> Self {
        self.add_op(Operation::S { qubit })
    }

    /// CNOT from `control` to `target`.
    pub fn cnot(self, control: usize, target: usize) -> Self {
        self.add_op(Operation::Cnot { control, target })
    }

    /// Z measurement of `qubit`.
    pub fn measure(self, qubit: usize) -> Self {
        self.add_op(Operation::Measure { qubit })
    }

    /// Measures every declared qubit in index order.
    pub fn measure_all(self) -> Self {
        let n = self.circuit.num_qubits;
        self.add_ops((0..n).map(|qubit| Operation::Measure { qubit }))
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_ops = self.operations.len();
        let num_qubits = self.num_qubits;
        writeln!(f, "stabsim::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        if num_ops == 0 || num_qubits == 0 {
            return Ok(());
        }

        let labels: Vec<String> = (0..num_qubits).map(|q| format!("q{}: ", q)).collect();
        let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);

        const GATE_WIDTH: usize = 7; // e.g. "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] is the wire segment, v_connect[row][time] the
        // connector drawn below that row.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let total_dashes = GATE_WIDTH.saturating_sub(symbol.chars().count());
            let pre_dashes = total_dashes / 2;
            let post_dashes = total_dashes - pre_dashes;
            format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
        }

        for (t, op) in self.operations.iter().enumerate() {
            match *op {
                Operation::H { qubit } if qubit < num_qubits => op_grid[qubit][t] = format_gate("H"),
                Operation::S { qubit } if qubit < num_qubits => op_grid[qubit][t] = format_gate("S"),
                Operation::Measure { qubit } if qubit < num_qubits => op_grid[qubit][t] = format_gate("M"),
                Operation::Cnot { control, target } if control < num_qubits && target < num_qubits => {
                    op_grid[control][t] = format_gate("@");
                    op_grid[target][t] = format_gate("X");
                    let r_min = control.min(target);
                    let r_max = control.max(target);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
                _ => {} // out-of-range entries are left as bare wire
            }
        }

        for r in 0..num_qubits {
            write!(f, "{:<width$}", labels[r], width = label_width)?;
            writeln!(f, "{}", op_grid[r].join(""))?;
            if r < num_qubits - 1 {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_ops {
                    let pad = GATE_WIDTH - 1;
                    write!(f, "{}{}{}", " ".repeat(pad / 2), v_connect[r][t], " ".repeat(pad - pad / 2))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
