/// Module containing [`AbortSignal`](crate::traits::AbortSignal) implementations.
pub mod abort_signals;
/// Module containing the [`SwarmConfig`] struct.
pub mod config;
/// Module containing [`Observer`](crate::traits::Observer) implementations.
pub mod observers;
/// Module containing the [`Point`] struct.
pub mod point;
/// Module containing random sampling helpers.
pub mod utils;

pub use abort_signals::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use config::{SwarmConfig, Topology, UpdateMethod};
pub use observers::{DebugObserver, TrackingObserver};
pub use point::Point;
