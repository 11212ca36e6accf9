use std::convert::Infallible;

use thiserror::Error;

use crate::Float;

/// An invalid [`SwarmConfig`](crate::core::SwarmConfig).
///
/// These are detected by [`SwarmConfig::validate`](crate::core::SwarmConfig::validate) before any
/// particle is created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The swarm must contain at least one particle.
    #[error("particle count must be positive")]
    NoParticles,
    /// The swarm must run for at least one generation.
    #[error("generation maximum must be positive")]
    NoGenerations,
    /// The velocity limit must be a positive, finite number.
    #[error("velocity maximum must be positive and finite (got {0})")]
    VelocityMaximum(Float),
    /// A weight of the update rule is negative or not finite.
    #[error("{name} must be non-negative and finite (got {value})")]
    NegativeCoefficient {
        /// The name of the offending coefficient
        name: &'static str,
        /// The rejected value
        value: Float,
    },
}

/// Errors which can end a [`Swarm::run`](crate::swarm::Swarm::run).
///
/// `E` is the error type of the user's [`CostFunction`](crate::traits::CostFunction).
#[derive(Debug, Error)]
pub enum SwarmError<E = Infallible> {
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A particle handed out by the factory is in a state the update rule cannot use.
    #[error("particle {index} is invalid: {reason}")]
    InvalidParticle {
        /// Index of the particle in the swarm
        index: usize,
        /// What was wrong with it
        reason: String,
    },
    /// The update rule produced a non-finite velocity.
    #[error("velocity of particle {index} diverged in generation {generation}")]
    Divergence {
        /// Index of the particle in the swarm
        index: usize,
        /// The generation in which the divergence happened
        generation: usize,
    },
    /// [`Swarm::run`](crate::swarm::Swarm::run) was called on a swarm which already completed.
    #[error("swarm has already been run")]
    AlreadyRun,
    /// The cost function returned an error.
    #[error("cost evaluation failed: {0}")]
    Cost(E),
}

impl<E> SwarmError<E> {
    /// Returns `true` if the error came from the cost function rather than the swarm itself.
    pub const fn is_cost_error(&self) -> bool {
        matches!(self, Self::Cost(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ConfigError::NoParticles.to_string(),
            "particle count must be positive"
        );
        let err: SwarmError = ConfigError::VelocityMaximum(-1.0).into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: velocity maximum must be positive and finite (got -1)"
        );
        let err: SwarmError<String> = SwarmError::Cost("boom".to_string());
        assert!(err.is_cost_error());
        assert_eq!(err.to_string(), "cost evaluation failed: boom");
    }
}
