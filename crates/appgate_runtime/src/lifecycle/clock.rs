use std::time::Instant;

/// Monotonic time source used to open and close suppression windows.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads tokio's clock, so a paused test runtime controls suppression expiry.
///
/// Outside a tokio runtime this is plain `Instant::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}
