//! appgate_runtime
//!
//! Application-facing lifecycle notifier built on top of `appgate_core`.
//! Owns the observer registry, notification suppression, lock bookkeeping and
//! host wiring, while keeping transition semantics in `appgate_core`.

pub mod config;
pub mod error;
pub mod lifecycle;

// Re-export core types that runtime users will commonly need
pub use appgate_core::error::{CoreError, Result};
pub use appgate_core::lifecycle::{
    AuthenticationRequirements, CredentialStore, LockGate, LockTiming, LogicalState, NativeState,
};
pub use config::{GateConfig, ObserverPolicy};
pub use lifecycle::LifecycleGate;
