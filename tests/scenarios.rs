use std::{ops::ControlFlow, sync::Arc};

use approx::assert_abs_diff_eq;
use fastrand::Rng;
use flocking::{
    core::TrackingObserver,
    factories::{UniformFactory, VelocityInitializer},
    particles::{BoundaryMethod, BoundedParticle},
    prelude::*,
    test_functions::{Bowl, Rastrigin},
};
use parking_lot::RwLock;

/// Checks the velocity limit and the monotonicity of every best after each generation.
#[derive(Default)]
struct InvariantObserver {
    v_max: Float,
    personal_bests: Vec<Float>,
    global_bests: Vec<Float>,
    violations: Vec<String>,
}

impl<P: Particle> Observer<P> for InvariantObserver {
    fn observe(&mut self, generation: usize, swarm: &Swarm<P>) -> ControlFlow<()> {
        for (i, particle) in swarm.particles().iter().enumerate() {
            if particle.velocity().iter().any(|v| v.abs() > self.v_max) {
                self.violations
                    .push(format!("velocity of particle {i} exceeded in generation {generation}"));
            }
            let fx = particle.best().fx_or_inf();
            if let Some(previous) = self.personal_bests.get(i) {
                if fx > *previous {
                    self.violations
                        .push(format!("personal best of particle {i} regressed"));
                }
            }
            if i < self.personal_bests.len() {
                self.personal_bests[i] = fx;
            } else {
                self.personal_bests.push(fx);
            }
            if swarm.global_best().fx_or_inf() > fx {
                self.violations
                    .push(format!("global best is worse than particle {i}"));
            }
        }
        let gbest = swarm.global_best().fx_or_inf();
        if let Some(previous) = self.global_bests.last() {
            if gbest > *previous {
                self.violations.push("global best regressed".to_string());
            }
        }
        self.global_bests.push(gbest);
        ControlFlow::Continue(())
    }
}

fn bowl_swarm(seed: u64) -> Swarm<SwarmParticle> {
    let mut rng = Rng::new();
    rng.seed(seed);
    Swarm::new(
        SwarmConfig::new(20, 1000, 20.0, 2.0, 2.0),
        UniformFactory::new(vec![(-50.0, 50.0)]),
        rng,
    )
    .unwrap()
}

#[test]
fn test_one_dimensional_bowl() {
    let mut swarm = bowl_swarm(0);
    let status = swarm.run(&Bowl::new(vec![5.0]), &mut ()).unwrap();
    assert_eq!(status.generation, 1000);
    assert_abs_diff_eq!(swarm.global_best().x[0], 5.0, epsilon = 1e-2);
}

#[test]
fn test_invariants_hold_every_generation() {
    let observer = Arc::new(RwLock::new(InvariantObserver {
        v_max: 3.0,
        ..Default::default()
    }));
    let config = SwarmConfig::default()
        .with_generation_maximum(300)
        .with_velocity_maximum(3.0);
    let factory = UniformFactory::new(vec![(-5.12, 5.12); 3]).with_velocity_initializer(
        VelocityInitializer::RandomInLimits(vec![(-1.0, 1.0); 3]),
    );
    let mut swarm = Swarm::new(config, factory, Rng::with_seed(7))
        .unwrap()
        .with_observer(observer.clone());
    swarm.run(&Rastrigin { n: 3 }, &mut ()).unwrap();
    let observer = observer.read();
    assert_eq!(observer.global_bests.len(), 300);
    assert!(observer.violations.is_empty(), "{:?}", observer.violations);
}

#[test]
fn test_seeded_runs_are_identical() {
    let tracker_a = TrackingObserver::build();
    let tracker_b = TrackingObserver::build();
    let mut a = bowl_swarm(42).with_observer(tracker_a.clone());
    let mut b = bowl_swarm(42).with_observer(tracker_b.clone());
    let status_a = a.run(&Bowl::new(vec![5.0]), &mut ()).unwrap();
    let status_b = b.run(&Bowl::new(vec![5.0]), &mut ()).unwrap();
    assert_eq!(status_a, status_b);
    assert_eq!(tracker_a.read().history, tracker_b.read().history);
    assert_eq!(tracker_a.read().best_history, tracker_b.read().best_history);
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa, pb);
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut a = bowl_swarm(1);
    let mut b = bowl_swarm(2);
    a.run(&Bowl::new(vec![5.0]), &mut ()).unwrap();
    b.run(&Bowl::new(vec![5.0]), &mut ()).unwrap();
    assert_ne!(a.particles()[0].position, b.particles()[0].position);
}

#[test]
fn test_shrinking_boundary_keeps_particles_inside() {
    let bounds = vec![(-2.0, 2.0), (-2.0, 2.0)];
    let config = SwarmConfig::default().with_generation_maximum(200);
    let factory = UniformFactory::new(bounds).bounded(BoundaryMethod::Shr);
    // the minimum at (5, 5) lies outside the box, so the swarm piles up on the corner
    let mut swarm: Swarm<BoundedParticle> =
        Swarm::new(config, factory, Rng::with_seed(5)).unwrap();
    swarm.run(&Bowl::new(vec![5.0, 5.0]), &mut ()).unwrap();
    for particle in swarm.particles() {
        assert!(particle.contains(&particle.position().x));
    }
    assert_abs_diff_eq!(swarm.global_best().x[0], 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(swarm.global_best().x[1], 2.0, epsilon = 1e-6);
}

#[test]
fn test_infinite_boundary_never_reports_infeasible_best() {
    let bounds = vec![(-1.0, 1.0)];
    let config = SwarmConfig::default().with_generation_maximum(100);
    let factory = UniformFactory::new(bounds).bounded(BoundaryMethod::Inf);
    let mut swarm = Swarm::new(config, factory, Rng::with_seed(9)).unwrap();
    swarm.run(&Bowl::new(vec![3.0]), &mut ()).unwrap();
    let gbest = swarm.global_best();
    assert!((-1.0..=1.0).contains(&gbest.x[0]));
    assert!(gbest.fx_or_inf().is_finite());
}
