//! appgate_core::lifecycle
//!
//! Pure lifecycle and lock semantics for a foregrounded/backgrounded app.
//! This module intentionally contains **no** runtime or notification code.
//!
//! Key ideas:
//! - Native host signals translate into a small set of logical states
//! - Backgrounding and focus loss may trigger a lock, resuming never does
//! - The credential store owns passcode/biometric config; we only read it
//! - Notification suppression is a scope plus a resettable deadline

mod gate;
mod native;
mod policy;
mod state;
mod suppression;

pub use gate::LockGate;
pub use native::{translate_native_signal, NativeState};
pub use policy::{
    authentication_requirements, should_lock, AuthenticationRequirements, CredentialStore,
    LockTiming,
};
pub use state::{LogicalState, ALL_STATES};
pub use suppression::SuppressionWindow;
