use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ContourError, Result};

/// Shared flag that stops outstanding parallel work
///
/// Clones observe the same flag, so one token can be handed to every worker
/// of a request and tripped from any of them (or from the caller).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Return `Err(Cancelled)` once the token has been tripped
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ContourError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Pass a result through, tripping the token if it is an error
    pub fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.cancel();
        }
        result
    }
}
