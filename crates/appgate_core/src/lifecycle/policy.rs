use super::LogicalState;

/// When a configured factor should be demanded again.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LockTiming {
    /// On every focus loss / backgrounding.
    #[default]
    Immediately,
    /// Only when the app is cold-launched.
    OnQuit,
}

/// Read-only view of the credential/key manager.
///
/// Implementors own passcode and biometric configuration; the lifecycle
/// gate never mutates it.
pub trait CredentialStore: Send + Sync {
    fn has_passcode(&self) -> bool;
    fn has_biometric(&self) -> bool;
    fn passcode_timing(&self) -> LockTiming;
    fn biometric_timing(&self) -> LockTiming;
}

/// What the unlock prompt must ask for in a given state.
///
/// `title` is `None` when nothing is required. The descriptor carries no
/// completion hook: once the prompt succeeds the caller unlocks the gate
/// itself (`LifecycleGate::unlock`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct AuthenticationRequirements {
    pub passcode: bool,
    pub biometric: bool,
    pub title: Option<&'static str>,
}

impl AuthenticationRequirements {
    pub const NONE: Self = Self {
        passcode: false,
        biometric: false,
        title: None,
    };

    fn new(passcode: bool, biometric: bool) -> Self {
        let title = match (passcode, biometric) {
            (true, true) => Some("Authentication Required"),
            (true, false) => Some("Passcode Required"),
            (false, true) => Some("Fingerprint Required"),
            (false, false) => None,
        };
        Self {
            passcode,
            biometric,
            title,
        }
    }

    pub const fn requires_prompt(&self) -> bool {
        self.passcode || self.biometric
    }
}

/// True if a focus loss / backgrounding must lock the app.
pub fn should_lock(store: &dyn CredentialStore) -> bool {
    let passcode = store.has_passcode() && store.passcode_timing() == LockTiming::Immediately;
    let biometric = store.has_biometric() && store.biometric_timing() == LockTiming::Immediately;
    passcode || biometric
}

/// Compute the prompt needed for `state`.
///
/// - Locking/Unlocking never prompt.
/// - Focus changes only prompt for factors timed `Immediately`.
/// - Everything else (launch, theme events) prompts for every configured factor.
pub fn authentication_requirements(
    store: &dyn CredentialStore,
    state: LogicalState,
) -> AuthenticationRequirements {
    use LogicalState::*;

    match state {
        Locking | Unlocking => AuthenticationRequirements::NONE,
        Backgrounding | Resuming | LosingFocus => AuthenticationRequirements::new(
            store.has_passcode() && store.passcode_timing() == LockTiming::Immediately,
            store.has_biometric() && store.biometric_timing() == LockTiming::Immediately,
        ),
        Launching | ThemeChangeBegin | ThemeChangeEnd => {
            AuthenticationRequirements::new(store.has_passcode(), store.has_biometric())
        }
    }
}
