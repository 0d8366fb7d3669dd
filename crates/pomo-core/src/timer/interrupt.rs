//! One-shot interruption flag shared between the signal listener and the
//! phase loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Anything the engine can poll to learn whether it should stop.
pub trait CancellationSource {
    fn is_cancelled(&self) -> bool;
}

/// Shared, idempotent stop request.
///
/// Clones observe the same flag. Raising it more than once is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    raised: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Returns `true` only for the call that raised the flag.
    pub fn raise(&self) -> bool {
        !self.raised.swap(true, Ordering::AcqRel)
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl CancellationSource for Interrupt {
    fn is_cancelled(&self) -> bool {
        self.is_raised()
    }
}

impl<T: CancellationSource + ?Sized> CancellationSource for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
