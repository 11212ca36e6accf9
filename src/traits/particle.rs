use fastrand::Rng;

use crate::{core::Point, traits::CostFunction, DVector, Float};

/// The state of a single candidate solution in a [`Swarm`](crate::swarm::Swarm).
///
/// A particle exposes its current position, its velocity and the best position it has visited.
/// The swarm reads these to compute a new velocity, writes the velocity back, and then asks the
/// particle to [`advance`](Particle::advance) and [`evaluate`](Particle::evaluate) itself. Problems
/// which need special movement rules (bounded domains, wrapped coordinates, ...) override those
/// two methods; everything else can use [`SwarmParticle`](crate::particles::SwarmParticle).
///
/// Comparing costs and refreshing [`best`](Particle::best) is done by the swarm, never by the
/// particle.
pub trait Particle {
    /// The current position of the particle.
    fn position(&self) -> &Point;
    /// Mutable access to the current position of the particle.
    fn position_mut(&mut self) -> &mut Point;
    /// The current velocity of the particle.
    fn velocity(&self) -> &DVector<Float>;
    /// Replace the velocity of the particle.
    fn set_velocity(&mut self, velocity: DVector<Float>);
    /// The best position this particle has visited.
    fn best(&self) -> &Point;
    /// Replace the personal best of the particle.
    fn set_best(&mut self, best: Point);
    /// Move the particle by one step of its current velocity. The moved position is left
    /// unevaluated.
    fn advance(&mut self) {
        let next = &self.position().x + self.velocity();
        self.position_mut().set_position(next);
    }
    /// Evaluate the cost of the current position if it has not been evaluated yet.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    fn evaluate<U, E>(&mut self, func: &dyn CostFunction<U, E>, user_data: &mut U) -> Result<(), E> {
        self.position_mut().evaluate(func, user_data)
    }
}

/// Creates the particles of a [`Swarm`](crate::swarm::Swarm).
///
/// The swarm calls [`create_particle`](ParticleFactory::create_particle) exactly once per particle,
/// in index order, while it is being constructed. The swarm's own random number generator is passed
/// in so that a seeded swarm is reproducible from start to finish.
///
/// Any `FnMut(&mut Rng) -> P` closure is a factory.
pub trait ParticleFactory<P: Particle> {
    /// Return a fully initialized particle (valid position, velocity and personal best).
    fn create_particle(&mut self, rng: &mut Rng) -> P;
}

impl<P, F> ParticleFactory<P> for F
where
    P: Particle,
    F: FnMut(&mut Rng) -> P,
{
    fn create_particle(&mut self, rng: &mut Rng) -> P {
        self(rng)
    }
}
