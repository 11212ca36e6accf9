use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, Float};

/// Swarm topologies which determine the flow of information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Each particle is attracted to the best position found by the whole swarm
    #[default]
    Global,
    /// Each particle is attracted to the best personal best among itself and its two neighbors in
    /// a chain with joined endpoints
    Ring,
}

/// The order in which positions and best positions are refreshed within a generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMethod {
    /// Refresh the bests right after each particle moves, so later particles in the same
    /// generation see the improvement
    #[default]
    Asynchronous,
    /// Move every particle first and refresh the bests after the sweep, so the whole generation
    /// is attracted to the bests from the start of the generation
    Synchronous,
}

/// The run parameters of a [`Swarm`](crate::swarm::Swarm).
///
/// Setters never panic; the values are checked by [`SwarmConfig::validate`] when the swarm is
/// constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// The number of particles in the swarm (default = `20`)
    pub particle_count: usize,
    /// The number of generations run by [`Swarm::run`](crate::swarm::Swarm::run) (default = `1000`)
    pub generation_maximum: usize,
    /// The limit on each component of a particle's velocity (default = `20.0`)
    pub velocity_maximum: Float,
    /// The weight $`c_l`$ of the attraction towards a particle's personal best (default = `2.0`)
    pub local_attraction: Float,
    /// The weight $`c_g`$ of the attraction towards the swarm's best (default = `2.0`)
    pub global_attraction: Float,
    /// The inertial weight $`\omega`$ applied to the previous velocity (default = `1.0`)
    pub inertia: Float,
    /// The topology used by the swarm (default = [`Topology::Global`])
    pub topology: Topology,
    /// The update method used by the swarm (default = [`UpdateMethod::Asynchronous`])
    pub update_method: UpdateMethod,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            particle_count: 20,
            generation_maximum: 1000,
            velocity_maximum: 20.0,
            local_attraction: 2.0,
            global_attraction: 2.0,
            inertia: 1.0,
            topology: Topology::default(),
            update_method: UpdateMethod::default(),
        }
    }
}

impl SwarmConfig {
    /// Create a configuration from the five classic parameters, leaving the rest at their defaults.
    pub fn new(
        particle_count: usize,
        generation_maximum: usize,
        velocity_maximum: Float,
        local_attraction: Float,
        global_attraction: Float,
    ) -> Self {
        Self {
            particle_count,
            generation_maximum,
            velocity_maximum,
            local_attraction,
            global_attraction,
            ..Default::default()
        }
    }
    /// Sets the number of particles in the swarm.
    pub const fn with_particle_count(mut self, value: usize) -> Self {
        self.particle_count = value;
        self
    }
    /// Sets the number of generations to run.
    pub const fn with_generation_maximum(mut self, value: usize) -> Self {
        self.generation_maximum = value;
        self
    }
    /// Sets the limit on each velocity component.
    pub const fn with_velocity_maximum(mut self, value: Float) -> Self {
        self.velocity_maximum = value;
        self
    }
    /// Sets the local (cognitive) weight which controls the particle's tendency to move towards its
    /// personal best.
    pub const fn with_local_attraction(mut self, value: Float) -> Self {
        self.local_attraction = value;
        self
    }
    /// Sets the global (social) weight which controls the particle's tendency to move towards the
    /// global (or neighborhood) best depending on the swarm [`Topology`].
    pub const fn with_global_attraction(mut self, value: Float) -> Self {
        self.global_attraction = value;
        self
    }
    /// Sets the inertial weight $`\omega`$.
    pub const fn with_inertia(mut self, value: Float) -> Self {
        self.inertia = value;
        self
    }
    /// Sets the topology used by the swarm.
    pub const fn with_topology(mut self, value: Topology) -> Self {
        self.topology = value;
        self
    }
    /// Sets the update method used by the swarm.
    pub const fn with_update_method(mut self, value: UpdateMethod) -> Self {
        self.update_method = value;
        self
    }
    /// Check that the configuration describes a usable swarm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if there are no particles or generations, if the velocity limit
    /// is not positive and finite, or if any weight is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.generation_maximum == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if !(self.velocity_maximum.is_finite() && self.velocity_maximum > 0.0) {
            return Err(ConfigError::VelocityMaximum(self.velocity_maximum));
        }
        for (name, value) in [
            ("local attraction", self.local_attraction),
            ("global attraction", self.global_attraction),
            ("inertia", self.inertia),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeCoefficient { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SwarmConfig::default();
        assert_eq!(config, SwarmConfig::new(20, 1000, 20.0, 2.0, 2.0));
        assert_eq!(config.inertia, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let config = SwarmConfig::default();
        assert_eq!(
            config.clone().with_particle_count(0).validate(),
            Err(ConfigError::NoParticles)
        );
        assert_eq!(
            config.clone().with_generation_maximum(0).validate(),
            Err(ConfigError::NoGenerations)
        );
        assert!(matches!(
            config.clone().with_velocity_maximum(0.0).validate(),
            Err(ConfigError::VelocityMaximum(_))
        ));
        assert!(matches!(
            config.clone().with_velocity_maximum(Float::NAN).validate(),
            Err(ConfigError::VelocityMaximum(_))
        ));
        assert_eq!(
            config.clone().with_global_attraction(-0.5).validate(),
            Err(ConfigError::NegativeCoefficient {
                name: "global attraction",
                value: -0.5
            })
        );
        assert!(config
            .with_local_attraction(0.0)
            .with_global_attraction(0.0)
            .validate()
            .is_ok());
    }
}
