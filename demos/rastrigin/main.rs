use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use fastrand::Rng;
use flocking::core::{CtrlCAbortSignal, TrackingObserver};
use flocking::factories::UniformFactory;
use flocking::prelude::*;
use flocking::test_functions::Rastrigin;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let problem = Rastrigin { n: 2 };

    // Create and seed a random number generator
    let mut rng = Rng::new();
    rng.seed(0);

    // Create a tracker to record swarm history
    let tracker = TrackingObserver::build();

    let config = SwarmConfig::default()
        .with_particle_count(50)
        .with_generation_maximum(200)
        .with_velocity_maximum(2.0)
        .with_inertia(0.8)
        .with_local_attraction(1.5)
        .with_global_attraction(1.5);
    let factory = UniformFactory::new(vec![(-20.0, 20.0), (-20.0, 20.0)]);
    let mut swarm = Swarm::new(config, factory, rng)?
        .with_observer(tracker.clone())
        .with_abort_signal(CtrlCAbortSignal::new());

    // Run the particle swarm optimizer
    let status = swarm.run(&problem, &mut ())?;
    println!("{}", status);

    // Export the results to a Python .pkl file to visualize via matplotlib
    let mut writer = BufWriter::new(File::create(Path::new("data.pkl"))?);
    serde_pickle::to_writer(&mut writer, &*tracker.read(), Default::default())?;
    Ok(())
}
