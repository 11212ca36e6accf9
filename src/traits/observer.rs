use std::{cell::RefCell, ops::ControlFlow, rc::Rc, sync::Arc};

use parking_lot::{Mutex, RwLock};

use crate::{swarm::Swarm, traits::Particle};

/// A trait for observers which are called after every generation of a [`Swarm`].
///
/// Observers may inspect the whole swarm (particles, global best and status) but cannot modify it.
/// Returning [`ControlFlow::Break`] stops the run after the current generation.
pub trait Observer<P: Particle> {
    /// An observation method which is called after each generation of a [`Swarm`].
    fn observe(&mut self, generation: usize, swarm: &Swarm<P>) -> ControlFlow<()>;
}

impl<O, P> Observer<P> for Rc<RefCell<O>>
where
    O: Observer<P>,
    P: Particle,
{
    fn observe(&mut self, generation: usize, swarm: &Swarm<P>) -> ControlFlow<()> {
        self.borrow_mut().observe(generation, swarm)
    }
}
impl<O, P> Observer<P> for Arc<RwLock<O>>
where
    O: Observer<P>,
    P: Particle,
{
    fn observe(&mut self, generation: usize, swarm: &Swarm<P>) -> ControlFlow<()> {
        self.write().observe(generation, swarm)
    }
}
impl<O, P> Observer<P> for Arc<Mutex<O>>
where
    O: Observer<P>,
    P: Particle,
{
    fn observe(&mut self, generation: usize, swarm: &Swarm<P>) -> ControlFlow<()> {
        self.lock().observe(generation, swarm)
    }
}
