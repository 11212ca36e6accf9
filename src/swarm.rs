use std::fmt::Display;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    core::{utils::generate_unit_vector, NopAbortSignal, Point, SwarmConfig, Topology, UpdateMethod},
    error::{ConfigError, SwarmError},
    traits::{AbortSignal, CostFunction, Observer, Particle, ParticleFactory},
    DVector, Float,
};

/// The lifecycle of a [`Swarm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmState {
    /// The swarm has been constructed but not run
    Initialized,
    /// [`Swarm::run`] has been called; the swarm cannot be run again
    Completed,
}

/// A summary of the progress of a [`Swarm`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwarmStatus {
    /// The global best position found by all particles
    pub gbest: Point,
    /// The number of generations which have been completed
    pub generation: usize,
    /// The number of cost function evaluations (approximately, particles which reject a position
    /// without evaluating it are still counted)
    pub n_f_evals: usize,
    /// A message containing information about the condition of the swarm
    pub message: String,
}

impl SwarmStatus {
    /// Updates the [`SwarmStatus::message`] field.
    pub fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

impl Display for SwarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "╒══════════════════════════════════════════════════════════╕"
        )?;
        writeln!(f, "│{:^58}│", "SWARM STATUS")?;
        writeln!(
            f,
            "╞═══════════════════════════════╤══════════════════════════╡"
        )?;
        writeln!(
            f,
            "│ Generations: {:<16} │ fval: {:>+18.6E} │",
            self.generation,
            self.gbest.fx_or_inf()
        )?;
        writeln!(f, "│ Evaluations: {:<16} │{:26}│", self.n_f_evals, "")?;
        writeln!(
            f,
            "├───────────────────────────────┴──────────────────────────┤"
        )?;
        writeln!(f, "│ Message: {:<47} │", self.message)?;
        writeln!(
            f,
            "├───────╥──────────────────────────────────────────────────┤"
        )?;
        writeln!(f, "│ Par # ║ Value{:44}│", "")?;
        writeln!(
            f,
            "├───────╫──────────────────────────────────────────────────┤"
        )?;
        for (i, xi) in self.gbest.x.iter().enumerate() {
            writeln!(f, "│ {:>5} ║ {:<+48.8E} │", i, xi)?;
        }
        write!(
            f,
            "└───────╨──────────────────────────────────────────────────┘"
        )
    }
}

/// A swarm of particles searching for the minimum of a [`CostFunction`].
///
/// The swarm owns a fixed set of particles created by a [`ParticleFactory`], the global best
/// position, and the random number generator used by the update rule. Each of the
/// [`SwarmConfig::generation_maximum`] generations visits every particle once, in the order they
/// were created, and
/// 1. computes its new velocity
///    ```math
///    v \gets \omega v + c_l u_1 \circ (p - x) + c_g u_2 \circ (g - x)
///    ```
///    with fresh $`u_1, u_2 \sim U[0,1)^n`$, clamping each component to
///    $`[-v_\text{max}, v_\text{max}]`$,
/// 2. advances its position (see [`Particle::advance`]),
/// 3. evaluates the new position and replaces the particle's personal best $`p`$ and the global
///    best $`g`$ when the new cost is no larger.
///
/// With [`UpdateMethod::Synchronous`], step 3 happens for all particles after the sweep instead.
/// A swarm runs exactly once.
pub struct Swarm<P: Particle> {
    config: SwarmConfig,
    particles: Vec<P>,
    status: SwarmStatus,
    state: SwarmState,
    rng: Rng,
    observers: Vec<Box<dyn Observer<P>>>,
    abort_signal: Box<dyn AbortSignal>,
}

impl<P: Particle> Swarm<P> {
    /// Construct a swarm of [`SwarmConfig::particle_count`] particles, each created by `factory`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid, in which case the factory is
    /// never called. See [`SwarmConfig::validate`].
    pub fn new<F>(config: SwarmConfig, mut factory: F, mut rng: Rng) -> Result<Self, ConfigError>
    where
        F: ParticleFactory<P>,
    {
        config.validate()?;
        let particles: Vec<P> = (0..config.particle_count)
            .map(|_| factory.create_particle(&mut rng))
            .collect();
        let gbest = particles
            .first()
            .map(|particle| particle.best().clone())
            .unwrap_or_default();
        tracing::debug!(
            particles = particles.len(),
            dimension = gbest.dimension(),
            "swarm initialized"
        );
        Ok(Self {
            config,
            particles,
            status: SwarmStatus {
                gbest,
                message: "Initialized".to_string(),
                ..Default::default()
            },
            state: SwarmState::Initialized,
            rng,
            observers: Vec::new(),
            abort_signal: Box::new(NopAbortSignal),
        })
    }
    /// Construct a swarm with the default [`SwarmConfig`].
    ///
    /// # Errors
    ///
    /// This never fails in practice, but shares the signature of [`Swarm::new`].
    pub fn with_defaults<F>(factory: F, rng: Rng) -> Result<Self, ConfigError>
    where
        F: ParticleFactory<P>,
    {
        Self::new(SwarmConfig::default(), factory, rng)
    }
    /// Add an [`Observer`] which is called after each generation.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<P> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }
    /// Set the [`AbortSignal`] checked before each generation (default = [`NopAbortSignal`]).
    pub fn with_abort_signal<S>(mut self, abort_signal: S) -> Self
    where
        S: AbortSignal + 'static,
    {
        self.abort_signal = Box::new(abort_signal);
        self
    }
    /// The configuration of the swarm.
    pub const fn config(&self) -> &SwarmConfig {
        &self.config
    }
    /// The particles of the swarm, in the order they were created.
    pub fn particles(&self) -> &[P] {
        &self.particles
    }
    /// Consume the swarm and return its particles.
    pub fn into_particles(self) -> Vec<P> {
        self.particles
    }
    /// The best position found by the swarm so far. Before [`Swarm::run`] this is the first
    /// particle's (unevaluated) personal best.
    pub const fn global_best(&self) -> &Point {
        &self.status.gbest
    }
    /// The current [`SwarmStatus`].
    pub const fn status(&self) -> &SwarmStatus {
        &self.status
    }
    /// Whether the swarm has been run.
    pub const fn state(&self) -> SwarmState {
        self.state
    }
    /// The number of dimensions of the search space, taken from the first particle.
    pub fn dimension(&self) -> usize {
        self.particles
            .first()
            .map_or(0, |particle| particle.position().dimension())
    }

    /// Run the swarm for [`SwarmConfig::generation_maximum`] generations and return the final
    /// [`SwarmStatus`]. The run stops early only if the abort signal fires or an observer breaks.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::AlreadyRun`] on a second call, [`SwarmError::InvalidParticle`] if a
    /// particle has non-finite or mismatched coordinates, [`SwarmError::Divergence`] if a velocity
    /// becomes non-finite, and [`SwarmError::Cost`] if the cost function fails. A swarm which
    /// failed cannot be run again.
    pub fn run<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<SwarmStatus, SwarmError<E>> {
        if self.state == SwarmState::Completed {
            return Err(SwarmError::AlreadyRun);
        }
        self.state = SwarmState::Completed;
        let span = tracing::info_span!(
            "swarm_run",
            particles = self.particles.len(),
            generations = self.config.generation_maximum
        );
        let _guard = span.enter();
        tracing::info!("starting particle swarm run");
        self.initialize(func, user_data)?;
        let mut observers = std::mem::take(&mut self.observers);
        let result = self.generations(func, user_data, &mut observers);
        self.observers = observers;
        result?;
        tracing::info!(
            generations = self.status.generation,
            evaluations = self.status.n_f_evals,
            fx = self.status.gbest.fx_or_inf(),
            "particle swarm run finished"
        );
        Ok(self.status.clone())
    }

    fn initialize<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), SwarmError<E>> {
        for index in 0..self.particles.len() {
            self.check_particle::<E>(index)?;
            self.evaluate_particle(index, func, user_data)?;
            let particle = &mut self.particles[index];
            let mut best = particle.best().clone();
            if best.fx.is_none() {
                if best.x == particle.position().x {
                    best.fx = particle.position().fx;
                } else {
                    best.evaluate(func, user_data).map_err(SwarmError::Cost)?;
                    self.status.n_f_evals += 1;
                }
            }
            if particle.position().le_cost(&best) {
                best = particle.position().clone();
            }
            particle.set_best(best);
        }
        let mut gbest = self.status.gbest.clone();
        gbest.fx = None;
        for particle in &self.particles {
            if particle.best().le_cost(&gbest) {
                gbest = particle.best().clone();
            }
        }
        self.status.gbest = gbest;
        self.status.update_message("Running");
        tracing::debug!(fx = self.status.gbest.fx_or_inf(), "initial global best");
        Ok(())
    }

    fn generations<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        observers: &mut [Box<dyn Observer<P>>],
    ) -> Result<(), SwarmError<E>> {
        for generation in 0..self.config.generation_maximum {
            if self.abort_signal.is_aborted() {
                tracing::warn!(generation, "swarm run aborted");
                self.status.update_message("Aborted by signal");
                return Ok(());
            }
            match self.config.update_method {
                UpdateMethod::Asynchronous => self.step_async(generation, func, user_data)?,
                UpdateMethod::Synchronous => self.step_sync(generation, func, user_data)?,
            }
            self.status.generation = generation + 1;
            tracing::trace!(
                generation,
                fx = self.status.gbest.fx_or_inf(),
                "generation complete"
            );
            let mut stop = false;
            for observer in observers.iter_mut() {
                stop |= observer.observe(generation, self).is_break();
            }
            if stop {
                tracing::info!(generation, "swarm run stopped by observer");
                self.status.update_message("Stopped by observer");
                return Ok(());
            }
        }
        self.status.update_message(&format!(
            "Maximum number of generations reached ({})",
            self.config.generation_maximum
        ));
        Ok(())
    }

    fn step_async<U, E>(
        &mut self,
        generation: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), SwarmError<E>> {
        for index in 0..self.particles.len() {
            let attractor = self.attractor(index);
            self.update_velocity::<E>(index, generation, &attractor)?;
            self.move_particle(index, func, user_data)?;
            self.update_bests(index, generation);
        }
        Ok(())
    }

    fn step_sync<U, E>(
        &mut self,
        generation: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), SwarmError<E>> {
        let attractors: Vec<DVector<Float>> = (0..self.particles.len())
            .map(|index| self.attractor(index))
            .collect();
        for (index, attractor) in attractors.iter().enumerate() {
            self.update_velocity::<E>(index, generation, attractor)?;
            self.move_particle(index, func, user_data)?;
        }
        for index in 0..self.particles.len() {
            self.update_bests(index, generation);
        }
        Ok(())
    }

    /// The position particle `index` is socially attracted to.
    fn attractor(&self, index: usize) -> DVector<Float> {
        match self.config.topology {
            Topology::Global => self.status.gbest.x.clone(),
            Topology::Ring => {
                let len = self.particles.len();
                [(index + len - 1) % len, index, (index + 1) % len]
                    .into_iter()
                    .map(|i| self.particles[i].best())
                    .min_by(|a, b| a.total_cmp(b))
                    .map_or_else(|| self.status.gbest.x.clone(), |best| best.x.clone())
            }
        }
    }

    fn update_velocity<E>(
        &mut self,
        index: usize,
        generation: usize,
        attractor: &DVector<Float>,
    ) -> Result<(), SwarmError<E>> {
        self.check_particle::<E>(index)?;
        let particle = &self.particles[index];
        let x = &particle.position().x;
        let dimension = x.len();
        let u1 = generate_unit_vector(dimension, &mut self.rng);
        let u2 = generate_unit_vector(dimension, &mut self.rng);
        let velocity = particle.velocity().scale(self.config.inertia)
            + u1.component_mul(&(&particle.best().x - x))
                .scale(self.config.local_attraction)
            + u2.component_mul(&(attractor - x))
                .scale(self.config.global_attraction);
        if velocity.iter().any(|v| !v.is_finite()) {
            return Err(SwarmError::Divergence { index, generation });
        }
        let v_max = self.config.velocity_maximum;
        self.particles[index].set_velocity(velocity.map(|v| v.clamp(-v_max, v_max)));
        Ok(())
    }

    fn move_particle<U, E>(
        &mut self,
        index: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), SwarmError<E>> {
        self.particles[index].advance();
        self.evaluate_particle(index, func, user_data)
    }

    fn evaluate_particle<U, E>(
        &mut self,
        index: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), SwarmError<E>> {
        let particle = &mut self.particles[index];
        if particle.position().fx.is_none() {
            self.status.n_f_evals += 1;
        }
        particle.evaluate(func, user_data).map_err(SwarmError::Cost)
    }

    fn update_bests(&mut self, index: usize, generation: usize) {
        let particle = &mut self.particles[index];
        if particle.position().le_cost(particle.best()) {
            let position = particle.position().clone();
            particle.set_best(position);
        }
        if particle.position().le_cost(&self.status.gbest) {
            if particle.position().total_cmp(&self.status.gbest).is_lt() {
                tracing::debug!(
                    generation,
                    particle = index,
                    fx = particle.position().fx_or_inf(),
                    "new global best"
                );
            }
            self.status.gbest = particle.position().clone();
        }
    }

    fn check_particle<E>(&self, index: usize) -> Result<(), SwarmError<E>> {
        let dimension = self.dimension();
        let particle = &self.particles[index];
        let reason = if dimension == 0 {
            Some("particles must have at least one dimension".to_string())
        } else if particle.position().dimension() != dimension {
            Some(format!(
                "position has dimension {} but the swarm has dimension {dimension}",
                particle.position().dimension()
            ))
        } else if particle.velocity().len() != dimension {
            Some(format!(
                "velocity has dimension {} but the swarm has dimension {dimension}",
                particle.velocity().len()
            ))
        } else if particle.best().dimension() != dimension {
            Some(format!(
                "personal best has dimension {} but the swarm has dimension {dimension}",
                particle.best().dimension()
            ))
        } else if !particle.position().is_finite() {
            Some("position is not finite".to_string())
        } else if !particle.velocity().iter().all(|v| v.is_finite()) {
            Some("velocity is not finite".to_string())
        } else if !particle.best().is_finite() {
            Some("personal best is not finite".to_string())
        } else {
            None
        };
        reason.map_or(Ok(()), |reason| {
            tracing::error!(index, %reason, "invalid particle");
            Err(SwarmError::InvalidParticle { index, reason })
        })
    }
}
