//! Cooperative cancellation for long-running table operations
//!
//! A [`CancellationToken`] is a cheap, clonable flag. Whoever owns a clone
//! can request cancellation; the engine polls the flag between units of
//! work and unwinds with [`ColbindError::Interrupted`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ColbindError, ColbindResult};

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; visible to every clone
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with `Interrupted` if cancellation was requested
    pub fn check(&self) -> ColbindResult<()> {
        if self.is_cancelled() {
            Err(ColbindError::Interrupted)
        } else {
            Ok(())
        }
    }
}
