use std::sync::atomic::{AtomicBool, Ordering};

/// Shared locked/unlocked flag.
///
/// Intended use (runtime layer):
/// - `lock()` when a lock-triggering transition happens
/// - `unlock()` once authentication succeeds
/// - sensitive resources check `is_unlocked()` before doing work
///
/// Starts locked.
#[derive(Debug)]
pub struct LockGate {
    locked: AtomicBool,
}

impl LockGate {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(true),
        }
    }

    pub fn lock(&self) {
        self.locked.store(true, Ordering::Release);
    }

    pub fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    pub fn is_unlocked(&self) -> bool {
        !self.is_locked()
    }

    /// Execute `f` only while unlocked. Returns `None` if suppressed.
    pub fn run_if_unlocked<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        self.is_unlocked().then(f)
    }
}

impl Default for LockGate {
    fn default() -> Self {
        Self::new()
    }
}
