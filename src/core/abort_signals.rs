use parking_lot::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::traits::AbortSignal;

static INIT: Once = Once::new();
static CTRL_C_PRESSED: AtomicBool = AtomicBool::new(false);

/// A signal that is triggered when the user presses `Ctrl-C`.
/// <div class="warning">This signal takes over the `Ctrl-C` handler for the whole process and can interfere with
/// other libraries that use `Ctrl-C` (e.g. `tokio`).</div>
#[derive(Debug, Default, Clone, Copy)]
pub struct CtrlCAbortSignal;

impl CtrlCAbortSignal {
    /// Create a new `CtrlCAbortSignal` and register a ctrl-c handler.
    ///
    /// If the handler cannot be registered, a warning is logged and the signal will only fire
    /// through [`AbortSignal::abort`].
    pub fn new() -> Self {
        if let Err(err) = Self::try_new() {
            tracing::warn!(%err, "could not install Ctrl-C handler");
        }
        Self
    }

    /// Create a new `CtrlCAbortSignal`, reporting a failure to register the ctrl-c handler.
    ///
    /// The handler is installed at most once per process; later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns the [`ctrlc::Error`] raised while installing the handler.
    pub fn try_new() -> Result<Self, ctrlc::Error> {
        let mut result = Ok(());
        INIT.call_once(|| {
            result = ctrlc::set_handler(move || {
                tracing::info!("Ctrl-C pressed, stopping after the current generation");
                CTRL_C_PRESSED.store(true, Ordering::SeqCst);
            });
        });
        result.map(|_| Self)
    }
}

impl AbortSignal for CtrlCAbortSignal {
    fn is_aborted(&self) -> bool {
        CTRL_C_PRESSED.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        CTRL_C_PRESSED.store(true, Ordering::SeqCst)
    }

    fn reset(&self) {
        CTRL_C_PRESSED.store(false, Ordering::SeqCst);
    }
}

/// A signal that is never triggered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopAbortSignal;

impl NopAbortSignal {
    /// Create a new `NopAbortSignal`.
    pub const fn new() -> Self {
        Self
    }
}

impl AbortSignal for NopAbortSignal {
    fn is_aborted(&self) -> bool {
        false
    }

    fn abort(&self) {}

    fn reset(&self) {}
}

/// A signal that is triggered by setting an atomic boolean.
///
/// Wrap it in an [`Arc`](std::sync::Arc) to abort a swarm running on another thread.
#[derive(Debug, Default)]
pub struct AtomicAbortSignal {
    abort: AtomicBool,
}

impl AtomicAbortSignal {
    /// Create a new `AtomicAbortSignal`.
    pub const fn new() -> Self {
        Self {
            abort: AtomicBool::new(false),
        }
    }
}

impl AbortSignal for AtomicAbortSignal {
    fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.abort.store(false, Ordering::SeqCst);
    }
}
