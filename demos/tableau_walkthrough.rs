// demos/tableau_walkthrough.rs
//
// Prints the tableau of a 3-qubit register after each gate.
// Run with `RUST_LOG=stabsim=trace` to see the per-gate trace events.

use stabsim::measurement::seeded;
use stabsim::{MeasurementEngine, StabError, Tableau};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StabError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut tableau = Tableau::new(3)?;
    println!("Initial state |000⟩\n{}", tableau);

    for (name, qubits) in [("h", &[0][..]), ("cnot", &[0, 1][..]), ("s", &[2][..])] {
        tableau.apply_named(name, qubits)?;
        println!("After {} {:?}\n{}", name, qubits, tableau);
    }

    println!("Stabilizers:");
    for generator in tableau.stabilizers() {
        println!("  {}", generator);
    }

    let mut rng = seeded(2);
    for q in 0..3 {
        let kind = match MeasurementEngine::peek(&tableau, q)? {
            Some(_) => "deterministic",
            None => "random",
        };
        let outcome = MeasurementEngine::measure(&mut tableau, q, &mut rng)?;
        println!("Measure q{}: {} ({})", q, outcome as u8, kind);
    }
    println!("\n{}", tableau);
    Ok(())
}
