//! `flocking` provides a small, trait-based particle swarm optimizer (PSO). The user implements
//! the [`CostFunction`](traits::CostFunction) trait on some struct which will take a vector of
//! parameters and return a single-valued [`Result`] ($`f(\mathbb{R}^n) \to \mathbb{R}`$), and a
//! [`ParticleFactory`](traits::ParticleFactory) which places the particles of the swarm in the
//! search space. The [`Swarm`](swarm::Swarm) then drives the generation loop.
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [The Update Rule](#the-update-rule)
//!
//! # Key Features
//! * Dependency-injected particles: problems provide a factory instead of subclassing the swarm.
//! * Every run is reproducible from a seeded [`fastrand::Rng`] owned by the swarm.
//! * Divergence is reported as an error instead of being clamped away.
//! * Pressing `Ctrl-C` during a run (with a [`CtrlCAbortSignal`](core::CtrlCAbortSignal)) stops the
//!   swarm between generations and still returns a [`SwarmStatus`](swarm::SwarmStatus).
//!
//! # Quick Start
//!
//! ```rust
//! use fastrand::Rng;
//! use flocking::prelude::*;
//! use flocking::factories::UniformFactory;
//! use flocking::test_functions::Bowl;
//!
//! let mut rng = Rng::new();
//! rng.seed(0);
//! let config = SwarmConfig::default().with_generation_maximum(200);
//! let factory = UniformFactory::new(vec![(-50.0, 50.0)]);
//! let mut swarm = Swarm::new(config, factory, rng).unwrap();
//! let status = swarm.run(&Bowl::new(vec![5.0]), &mut ()).unwrap();
//! println!("{}", status);
//! assert!((swarm.global_best().x[0] - 5.0).abs() < 1e-1);
//! ```
//!
//! # The Update Rule
//!
//! Every generation, each particle's velocity is updated as
//! ```math
//! v_i^{t+1} = \omega v_i^t + c_l u_1 \circ (p_i^t - x_i^t) + c_g u_2 \circ (g^t - x_i^t)
//! ```
//! where $`u_1, u_2 \sim U[0, 1)^n`$ are drawn independently for every particle, generation and
//! dimension, and each component is clamped to $`[-v_\text{max}, v_\text{max}]`$. The particle
//! then moves by $`x_i^{t+1} = x_i^t + v_i^{t+1}`$, is re-evaluated, and its personal best
//! $`p_i`$ and the global best $`g`$ are refreshed whenever the new cost is no larger.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the error types returned by the swarm.
pub mod error;

/// Module containing core types like [`Point`](core::Point), [`SwarmConfig`](core::SwarmConfig),
/// abort signals and observers.
pub mod core;

/// Module containing the traits that form the extension points of the crate.
pub mod traits;

/// Module containing particle implementations.
pub mod particles;

/// Module containing [`ParticleFactory`](traits::ParticleFactory) implementations.
pub mod factories;

/// Module containing the [`Swarm`](swarm::Swarm) and its generation loop.
pub mod swarm;

/// Module containing standard functions for testing the optimizer.
pub mod test_functions;

pub use nalgebra::DVector;

/// A floating-point number type (defaults to [`f64`], see `features = ["f32"]`)
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// A floating-point number type (defaults to [`f64`], see `features = ["f32"]`)
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;

/// The mathematical constant $`\pi`$.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        core::{Point, SwarmConfig, Topology, UpdateMethod},
        error::{ConfigError, SwarmError},
        particles::SwarmParticle,
        swarm::{Swarm, SwarmState, SwarmStatus},
        traits::{AbortSignal, CostFunction, Observer, Particle, ParticleFactory},
        DVector, Float,
    };
}
