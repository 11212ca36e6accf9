use std::error::Error;

use fastrand::Rng;
use flocking::{factories::UniformFactory, prelude::*, test_functions::Bowl};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Set RUST_LOG=flocking=debug to see every improvement of the global best
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Minimize (x - 5)^2 starting from particles spread over [-50, 50]
    let problem = Bowl::new(vec![5.0]);
    let mut rng = Rng::new();
    rng.seed(0);

    let mut swarm = Swarm::with_defaults(UniformFactory::new(vec![(-50.0, 50.0)]), rng)?;
    let status = swarm.run(&problem, &mut ())?;

    println!("{}", status);
    Ok(())
}
