//! appgate_runtime::lifecycle
//!
//! Runtime-side lifecycle notifier.
//!
//! Exposes the application-facing gate while keeping state mapping, lock
//! policy and the suppression window model in appgate_core.

/// Re-export core lifecycle types
pub use appgate_core::lifecycle::{
    translate_native_signal, AuthenticationRequirements, CredentialStore, LockGate, LockTiming,
    LogicalState, NativeState,
};

// Time source for the suppression window.
mod clock;
pub use clock::{Clock, TokioClock};

// Observer trait + registry.
mod observer;
pub use observer::{BoxError, LifecycleObserver, ObserverHandle};

// Scoped guards for theme changes and suppressed actions.
mod guards;
pub use guards::ThemeChangeGuard;

// Host signal wiring.
mod source;
pub use source::{attach, NativeLifecycleSource, NativeListener};

// The notifier itself.
mod gate;
pub use gate::LifecycleGate;
