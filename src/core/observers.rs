use std::{ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    core::Point,
    swarm::Swarm,
    traits::{Observer, Particle},
};

/// A debugging observer which logs the generation and swarm status through [`tracing`] at the
/// `DEBUG` level.
///
/// # Usage:
///
/// ```rust
/// use fastrand::Rng;
/// use flocking::prelude::*;
/// use flocking::core::{DebugObserver, NopAbortSignal};
/// use flocking::factories::UniformFactory;
/// use flocking::test_functions::Sphere;
///
/// let config = SwarmConfig::default().with_generation_maximum(10);
/// let mut swarm = Swarm::new(config, UniformFactory::new(vec![(-1.0, 1.0); 2]), Rng::with_seed(0))
///     .unwrap()
///     .with_observer(DebugObserver)
///     .with_abort_signal(NopAbortSignal);
/// swarm.run(&Sphere { n: 2 }, &mut ()).unwrap();
/// // ^ This will log a debug message for each generation
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugObserver;
impl<P: Particle> Observer<P> for DebugObserver {
    fn observe(&mut self, generation: usize, swarm: &Swarm<P>) -> ControlFlow<()> {
        tracing::debug!(
            generation,
            gbest = %swarm.global_best(),
            status = %swarm.status().message,
            "swarm status"
        );
        ControlFlow::Continue(())
    }
}

/// An [`Observer`] which stores the positions of the swarm's particles as well as the history of
/// global best positions, one entry per generation.
///
/// The history can be serialized (e.g. to a Python pickle) to visualize the run.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct TrackingObserver {
    /// The positions of every particle after each generation
    pub history: Vec<Vec<Point>>,
    /// The global best position after each generation
    pub best_history: Vec<Point>,
}

impl TrackingObserver {
    /// Finalize the [`TrackingObserver`] by wrapping it in an [`Arc`] and [`RwLock`] so it can be
    /// read after the run.
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl<P: Particle> Observer<P> for TrackingObserver {
    fn observe(&mut self, _generation: usize, swarm: &Swarm<P>) -> ControlFlow<()> {
        self.history.push(
            swarm
                .particles()
                .iter()
                .map(|particle| particle.position().clone())
                .collect(),
        );
        self.best_history.push(swarm.global_best().clone());
        ControlFlow::Continue(())
    }
}
