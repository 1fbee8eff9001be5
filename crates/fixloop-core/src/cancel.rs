//! Cooperative cancellation signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::error::{CoreError, Result};

/// Shared cancellation flag.
///
/// Cloning shares the underlying flag. The convergence engine observes the
/// token between loop iterations only; an active fix application is run to
/// completion or not at all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Surface a requested cancellation as [`CoreError::Aborted`].
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CoreError::Aborted)
        } else {
            Ok(())
        }
    }
}
