use std::time::{Duration, Instant};

/// Notification suppression window.
///
/// Open while at least one suppressing scope is running, and until the latest
/// deadline armed when a scope exits. Re-arming never shortens the window, so
/// overlapping scopes extend it instead of an earlier expiry cutting a later
/// one short.
#[derive(Debug, Clone, Default)]
pub struct SuppressionWindow {
    depth: u32,
    until: Option<Instant>,
}

impl SuppressionWindow {
    pub const fn new() -> Self {
        Self {
            depth: 0,
            until: None,
        }
    }

    /// A suppressing scope starts.
    pub fn enter(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    /// A suppressing scope ended at `now`; keep suppressing for `linger`.
    pub fn exit(&mut self, now: Instant, linger: Duration) {
        self.depth = self.depth.saturating_sub(1);
        let deadline = now + linger;
        self.until = Some(match self.until {
            Some(until) => until.max(deadline),
            None => deadline,
        });
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.depth > 0 || self.until.is_some_and(|until| now < until)
    }

    /// Time left before the window closes, if no scope is running.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.depth > 0 {
            return None;
        }
        self.until
            .and_then(|until| until.checked_duration_since(now))
            .filter(|left| !left.is_zero())
    }
}
