//! Cooperative cancellation between pipeline stages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::PipelineError;

/// Something a long-running batch can poll to learn it should stop.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);

    /// `Err(Cancelled)` once cancellation was requested, tagged with the stage
    /// that was about to start.
    fn checkpoint(&self, next_stage: &str) -> Result<(), PipelineError> {
        if self.is_cancelled() {
            Err(PipelineError::Cancelled {
                stage: next_stage.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Shared flag; clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }
}
