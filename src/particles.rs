use serde::{Deserialize, Serialize};

use crate::{
    core::Point,
    traits::{CostFunction, Particle},
    DVector, Float,
};

/// A particle with a position, velocity, and best known position which moves freely through an
/// unbounded space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwarmParticle {
    /// The position of the particle
    pub position: Point,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point,
}

impl SwarmParticle {
    /// Create a new particle at `position` moving with `velocity`. The personal best is seeded with
    /// the initial position.
    pub fn new(position: DVector<Float>, velocity: DVector<Float>) -> Self {
        let position = Point::from(position);
        Self {
            best: position.clone(),
            position,
            velocity,
        }
    }
    /// Create a new particle at rest at `position`.
    pub fn at_rest(position: DVector<Float>) -> Self {
        let dimension = position.len();
        Self::new(position, DVector::zeros(dimension))
    }
}

impl Particle for SwarmParticle {
    fn position(&self) -> &Point {
        &self.position
    }
    fn position_mut(&mut self) -> &mut Point {
        &mut self.position
    }
    fn velocity(&self) -> &DVector<Float> {
        &self.velocity
    }
    fn set_velocity(&mut self, velocity: DVector<Float>) {
        self.velocity = velocity;
    }
    fn best(&self) -> &Point {
        &self.best
    }
    fn set_best(&mut self, best: Point) {
        self.best = best;
    }
}

/// Methods for handling boundaries in swarm optimizations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryMethod {
    /// Let particles leave the box, but give infeasible positions a cost of `+inf` without
    /// evaluating the cost function there
    #[default]
    Inf,
    /// Shrink the velocity vector to place the particle on the boundary where it would cross
    Shr,
}

/// A [`SwarmParticle`] confined to a box `[lower_i, upper_i]` in every dimension.
///
/// See [^1] for a discussion of the boundary methods.
///
/// [^1]: [Chu, W., Gao, X., & Sorooshian, S. (2011). Handling boundary constraints for particle swarm optimization in high-dimensional search space. In Information Sciences (Vol. 181, Issue 20, pp. 4569–4581). Elsevier BV.](https://doi.org/10.1016/j.ins.2010.11.030)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundedParticle {
    /// The underlying free particle
    pub particle: SwarmParticle,
    /// The `(lower, upper)` limits of each dimension
    pub bounds: Vec<(Float, Float)>,
    /// How the particle reacts to leaving the box
    pub boundary_method: BoundaryMethod,
}

impl BoundedParticle {
    /// Wrap `particle` in the box described by `bounds`.
    pub const fn new(
        particle: SwarmParticle,
        bounds: Vec<(Float, Float)>,
        boundary_method: BoundaryMethod,
    ) -> Self {
        Self {
            particle,
            bounds,
            boundary_method,
        }
    }
    /// Returns `true` if `x` lies inside the box.
    pub fn contains(&self, x: &DVector<Float>) -> bool {
        x.iter()
            .zip(&self.bounds)
            .all(|(&xi, &(lower, upper))| lower <= xi && xi <= upper)
    }
    fn clamp_to_bounds(&self, x: &DVector<Float>) -> DVector<Float> {
        DVector::from_iterator(
            x.len(),
            x.iter()
                .zip(&self.bounds)
                .map(|(&xi, &(lower, upper))| xi.max(lower).min(upper)),
        )
    }
}

impl Particle for BoundedParticle {
    fn position(&self) -> &Point {
        &self.particle.position
    }
    fn position_mut(&mut self) -> &mut Point {
        &mut self.particle.position
    }
    fn velocity(&self) -> &DVector<Float> {
        &self.particle.velocity
    }
    fn set_velocity(&mut self, velocity: DVector<Float>) {
        self.particle.velocity = velocity;
    }
    fn best(&self) -> &Point {
        &self.particle.best
    }
    fn set_best(&mut self, best: Point) {
        self.particle.best = best;
    }
    fn advance(&mut self) {
        let next = &self.particle.position.x + &self.particle.velocity;
        match self.boundary_method {
            BoundaryMethod::Inf => self.particle.position.set_position(next),
            BoundaryMethod::Shr => {
                let clamped = self.clamp_to_bounds(&next);
                self.particle.velocity = &clamped - &self.particle.position.x;
                self.particle.position.set_position(clamped);
            }
        }
    }
    fn evaluate<U, E>(&mut self, func: &dyn CostFunction<U, E>, user_data: &mut U) -> Result<(), E> {
        if self.particle.position.fx.is_none() && !self.contains(&self.particle.position.x) {
            self.particle.position.fx = Some(Float::INFINITY);
            return Ok(());
        }
        self.particle.position.evaluate(func, user_data)
    }
}
