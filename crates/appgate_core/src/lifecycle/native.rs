use super::LogicalState;

/// Host-native lifecycle values, as reported by the platform runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NativeState {
    Active,
    Background,
    Inactive,
}

impl NativeState {
    /// Parse the host's label (`active`, `background`, `inactive`).
    ///
    /// Any other value (e.g. `unknown`, `extension`) yields `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "active" => Some(NativeState::Active),
            "background" => Some(NativeState::Background),
            "inactive" => Some(NativeState::Inactive),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            NativeState::Active => "active",
            NativeState::Background => "background",
            NativeState::Inactive => "inactive",
        }
    }

    /// The logical state this native value maps to.
    pub const fn logical_state(self) -> LogicalState {
        match self {
            NativeState::Active => LogicalState::Resuming,
            NativeState::Background => LogicalState::Backgrounding,
            NativeState::Inactive => LogicalState::LosingFocus,
        }
    }
}

/// Translate a raw host label straight to its logical state.
pub fn translate_native_signal(label: &str) -> Option<LogicalState> {
    NativeState::parse(label).map(NativeState::logical_state)
}
