use std::sync::Arc;

use tracing::trace;

use super::{LifecycleGate, NativeState};
use crate::error::log_core_error;

/// Callback a host source invokes for every native lifecycle change.
pub type NativeListener = Box<dyn Fn(NativeState) + Send + Sync>;

/// Host-provided lifecycle signal source (platform event bridge).
pub trait NativeLifecycleSource {
    /// Replace the listener receiving native changes.
    fn set_listener(&mut self, listener: NativeListener);
}

/// Register `gate` as the listener of `source`.
///
/// The source only holds a weak reference; once the gate is dropped signals
/// are discarded. Observer failures are logged since the host has no caller
/// to return them to.
pub fn attach<S>(gate: &Arc<LifecycleGate>, source: &mut S)
where
    S: NativeLifecycleSource + ?Sized,
{
    let weak = Arc::downgrade(gate);
    source.set_listener(Box::new(move |native| {
        let Some(gate) = weak.upgrade() else {
            trace!(native = native.label(), "gate dropped; native signal discarded");
            return;
        };
        if let Err(err) = gate.on_native_signal(native) {
            log_core_error(&err);
        }
    }));
}
