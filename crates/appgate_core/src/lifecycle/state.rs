/// Logical application states emitted to observers.
///
/// App-cycle states (driven by the host):
/// - Launching, LosingFocus, Backgrounding, Resuming
///
/// Gate/UI events (driven by this crate or its callers):
/// - Locking, Unlocking, ThemeChangeBegin, ThemeChangeEnd
///
/// Each value is a point-in-time event, not a duration.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LogicalState {
    // App cycle
    Launching,
    LosingFocus,
    Backgrounding,
    Resuming,

    // Gate / UI
    Locking,
    Unlocking,
    ThemeChangeBegin,
    ThemeChangeEnd,
}

/// Internal, compact IDs used for error payloads.
impl LogicalState {
    pub const fn id(self) -> u8 {
        match self {
            LogicalState::Launching => 0,
            LogicalState::LosingFocus => 1,
            LogicalState::Backgrounding => 2,
            LogicalState::Resuming => 3,

            LogicalState::Locking => 10,
            LogicalState::Unlocking => 11,
            LogicalState::ThemeChangeBegin => 12,
            LogicalState::ThemeChangeEnd => 13,
        }
    }

    /// True for natural host events; false for lock/unlock and theme events.
    pub const fn is_app_cycle(self) -> bool {
        matches!(
            self,
            LogicalState::Launching
                | LogicalState::LosingFocus
                | LogicalState::Backgrounding
                | LogicalState::Resuming
        )
    }

    /// True for states that may trigger a lock when the policy says so.
    pub const fn may_lock(self) -> bool {
        matches!(self, LogicalState::LosingFocus | LogicalState::Backgrounding)
    }

    /// Stable, human-readable label for logs and host adapters.
    pub const fn label(self) -> &'static str {
        match self {
            LogicalState::Launching => "Launching",
            LogicalState::LosingFocus => "LosingFocus",
            LogicalState::Backgrounding => "Backgrounding",
            LogicalState::Resuming => "Resuming",
            LogicalState::Locking => "Locking",
            LogicalState::Unlocking => "Unlocking",
            LogicalState::ThemeChangeBegin => "ThemeChangeBegin",
            LogicalState::ThemeChangeEnd => "ThemeChangeEnd",
        }
    }
}

impl std::fmt::Display for LogicalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical list of all logical states.
pub const ALL_STATES: [LogicalState; 8] = [
    LogicalState::Launching,
    LogicalState::LosingFocus,
    LogicalState::Backgrounding,
    LogicalState::Resuming,
    LogicalState::Locking,
    LogicalState::Unlocking,
    LogicalState::ThemeChangeBegin,
    LogicalState::ThemeChangeEnd,
];
