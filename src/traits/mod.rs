/// Module containing the [`AbortSignal`] trait.
pub mod abort_signal;
/// Module containing the [`CostFunction`] trait.
pub mod cost_function;
/// Module containing the [`Observer`] trait.
pub mod observer;
/// Module containing the [`Particle`] and [`ParticleFactory`] traits.
pub mod particle;

pub use abort_signal::AbortSignal;
pub use cost_function::CostFunction;
pub use observer::Observer;
pub use particle::{Particle, ParticleFactory};
