// demos/bell_sampling.rs
//
// Samples a Bell pair and a GHZ state in parallel and prints the histograms.

use stabsim::{CircuitBuilder, Gate, Sampler, SimulatorConfig, StabError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StabError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let sampler = Sampler::new(SimulatorConfig::new().with_seed(17).with_shots(10_000));

    let bell = CircuitBuilder::new(2).h(0).cnot(0, 1).measure_all().build();
    let ghz = CircuitBuilder::new(4)
        .h(0)
        .cnot(0, 1)
        .cnot(1, 2)
        .cnot(2, 3)
        .gate(Gate::Z(3))
        .measure_all()
        .build();

    for (label, circuit) in [("Bell", &bell), ("GHZ", &ghz)] {
        println!("{}", circuit);
        let samples = sampler.sample(circuit)?;
        println!("{} counts over {} shots:", label, samples.shots());
        for (bits, count) in samples.counts() {
            println!("  {}: {}", bits, count);
        }
        for m in 0..samples.measurements() {
            println!("  P(m{} = 1) = {:.3}", m, samples.frequency_of_one(m).unwrap_or_default());
        }
        println!();
    }
    Ok(())
}
