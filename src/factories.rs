use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{generate_random_vector_in_limits, SampleFloat},
    particles::{BoundaryMethod, BoundedParticle, SwarmParticle},
    traits::ParticleFactory,
    DVector, Float,
};

/// Methods for setting the initial velocity of particles in a swarm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum VelocityInitializer {
    /// Initialize all velocities to zero
    #[default]
    Zero,
    /// Initialize velocities randomly within the given limits for each dimension
    RandomInLimits(Vec<(Float, Float)>),
}

impl VelocityInitializer {
    /// Draw an initial velocity of the given dimension.
    pub fn init_velocity(&self, rng: &mut Rng, dimension: usize) -> DVector<Float> {
        match self {
            Self::Zero => DVector::zeros(dimension),
            Self::RandomInLimits(limits) => generate_random_vector_in_limits(limits, rng),
        }
    }
}

/// Places each [`SwarmParticle`] uniformly at random within the given limits for each dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformFactory {
    limits: Vec<(Float, Float)>,
    velocity_initializer: VelocityInitializer,
}

impl UniformFactory {
    /// Create a factory which samples positions within `limits` and starts particles at rest.
    pub const fn new(limits: Vec<(Float, Float)>) -> Self {
        Self {
            limits,
            velocity_initializer: VelocityInitializer::Zero,
        }
    }
    /// Sets the method used to initialize the velocity of the particles (default = [`VelocityInitializer::Zero`]).
    pub fn with_velocity_initializer(mut self, value: VelocityInitializer) -> Self {
        self.velocity_initializer = value;
        self
    }
    /// Confine the particles produced by this factory to its limits.
    pub const fn bounded(self, boundary_method: BoundaryMethod) -> BoundedFactory {
        BoundedFactory {
            inner: self,
            boundary_method,
        }
    }
    /// The number of dimensions of the particles produced by this factory.
    pub fn dimension(&self) -> usize {
        self.limits.len()
    }
}

impl ParticleFactory<SwarmParticle> for UniformFactory {
    fn create_particle(&mut self, rng: &mut Rng) -> SwarmParticle {
        let position = generate_random_vector_in_limits(&self.limits, rng);
        let velocity = self.velocity_initializer.init_velocity(rng, self.dimension());
        SwarmParticle::new(position, velocity)
    }
}

/// Places each [`BoundedParticle`] uniformly at random within the limits of its box.
///
/// Created with [`UniformFactory::bounded`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedFactory {
    inner: UniformFactory,
    boundary_method: BoundaryMethod,
}

impl ParticleFactory<BoundedParticle> for BoundedFactory {
    fn create_particle(&mut self, rng: &mut Rng) -> BoundedParticle {
        BoundedParticle::new(
            self.inner.create_particle(rng),
            self.inner.limits.clone(),
            self.boundary_method,
        )
    }
}

/// Places each [`SwarmParticle`] by Latin hypercube sampling within the given limits.
///
/// Every run of `samples` consecutive particles is stratified: each dimension is cut into
/// `samples` equal bins and every bin holds exactly one of those particles. Set `samples` to
/// [`SwarmConfig::particle_count`](crate::core::SwarmConfig::particle_count) to stratify the whole
/// swarm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatinHypercubeFactory {
    limits: Vec<(Float, Float)>,
    samples: usize,
    velocity_initializer: VelocityInitializer,
    pending: Vec<DVector<Float>>,
}

impl LatinHypercubeFactory {
    /// Create a factory which stratifies batches of `samples` positions within `limits` and starts
    /// particles at rest. A `samples` of zero is treated as one.
    pub fn new(limits: Vec<(Float, Float)>, samples: usize) -> Self {
        Self {
            limits,
            samples: samples.max(1),
            velocity_initializer: VelocityInitializer::Zero,
            pending: Vec::new(),
        }
    }
    /// Sets the method used to initialize the velocity of the particles (default = [`VelocityInitializer::Zero`]).
    pub fn with_velocity_initializer(mut self, value: VelocityInitializer) -> Self {
        self.velocity_initializer = value;
        self
    }
    /// The number of dimensions of the particles produced by this factory.
    pub fn dimension(&self) -> usize {
        self.limits.len()
    }

    fn sample_batch(&mut self, rng: &mut Rng) {
        let n = self.samples;
        let mut batch = vec![DVector::zeros(self.dimension()); n];
        for (d, &(min, max)) in self.limits.iter().enumerate() {
            let mut bins: Vec<usize> = (0..n).collect();
            rng.shuffle(&mut bins);
            let bin_size = (max - min) / n as Float;
            for (point, &bin) in batch.iter_mut().zip(&bins) {
                let lower = min + bin as Float * bin_size;
                point[d] = rng.range(lower, lower + bin_size);
            }
        }
        // handed out from the back
        batch.reverse();
        self.pending = batch;
    }
}

impl ParticleFactory<SwarmParticle> for LatinHypercubeFactory {
    fn create_particle(&mut self, rng: &mut Rng) -> SwarmParticle {
        if self.pending.is_empty() {
            self.sample_batch(rng);
        }
        let position = self
            .pending
            .pop()
            .unwrap_or_else(|| DVector::zeros(self.dimension()));
        let velocity = self.velocity_initializer.init_velocity(rng, self.dimension());
        SwarmParticle::new(position, velocity)
    }
}

/// Starts particles at rest at the given positions, in order. If the swarm asks for more
/// particles than there are positions, the positions are reused from the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFactory {
    positions: Vec<DVector<Float>>,
    next: usize,
}

impl CustomFactory {
    /// Create a factory which hands out `positions` in order.
    pub const fn new(positions: Vec<DVector<Float>>) -> Self {
        Self { positions, next: 0 }
    }
}

impl ParticleFactory<SwarmParticle> for CustomFactory {
    fn create_particle(&mut self, _rng: &mut Rng) -> SwarmParticle {
        // An empty list produces zero-dimensional particles which the swarm rejects on its first
        // update.
        let position = if self.positions.is_empty() {
            DVector::zeros(0)
        } else {
            self.positions[self.next % self.positions.len()].clone()
        };
        self.next += 1;
        SwarmParticle::at_rest(position)
    }
}
