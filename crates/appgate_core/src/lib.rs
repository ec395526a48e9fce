//! appgate_core: runtime-free semantics for app lifecycle + lock state.
//!
//! Design goals:
//! - Pure, testable logic (no async runtime, no logging side effects).
//! - Explicit types; the credential store is a trait, not a global.
//! - Small, stable public API surface.

pub mod error;

/// Lifecycle states, native signal mapping, lock policy and suppression window.
pub mod lifecycle;
