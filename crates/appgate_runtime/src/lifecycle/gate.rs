use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use appgate_core::error::{CoreError, Result, Severity};
use appgate_core::lifecycle::{
    authentication_requirements, should_lock, AuthenticationRequirements, CredentialStore,
    LockGate, LogicalState, NativeState, SuppressionWindow,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, trace, warn};

use super::guards::SuppressionScope;
use super::observer::ObserverRegistry;
use super::{BoxError, Clock, LifecycleObserver, ObserverHandle, ThemeChangeGuard, TokioClock};
use crate::config::{GateConfig, ObserverPolicy, MAX_EVENT_CAPACITY, MIN_EVENT_CAPACITY};
use crate::error::log_core_error;

struct GateState {
    most_recent: LogicalState,
    authentication_in_progress: bool,
    theme_changes: u32,
    suppression: SuppressionWindow,
}

/// App lifecycle notifier and security lock.
///
/// Responsibilities:
/// - Translate host lifecycle signals into logical states
/// - Lock when focus loss / backgrounding meets the credential store's policy
/// - Notify observers (in registration order) and async subscribers
/// - Withhold notifications during theme changes and suppressed actions
///
/// Constructed once by the application bootstrap and shared (usually in an
/// `Arc`) with whatever needs it. Starts locked.
pub struct LifecycleGate {
    store: Arc<dyn CredentialStore>,
    config: GateConfig,
    clock: Arc<dyn Clock>,
    lock: Arc<LockGate>,
    state: Mutex<GateState>,
    observers: Mutex<ObserverRegistry>,

    // Async mirror of observer notifications.
    //
    // broadcast is used so:
    // - notifications never block on a slow consumer
    // - lagging receivers drop old states rather than stalling the gate
    events: broadcast::Sender<LogicalState>,
}

impl LifecycleGate {
    /// Create a gate reading tokio's clock.
    pub fn new(store: Arc<dyn CredentialStore>, config: GateConfig) -> Self {
        Self::with_clock(store, config, Arc::new(TokioClock))
    }

    pub fn with_clock(
        store: Arc<dyn CredentialStore>,
        config: GateConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let capacity = config
            .event_capacity
            .clamp(MIN_EVENT_CAPACITY, MAX_EVENT_CAPACITY);
        if capacity != config.event_capacity {
            warn!(
                requested = config.event_capacity,
                capacity, "event capacity out of range; clamped"
            );
        }
        let (events, _rx) = broadcast::channel(capacity);

        let gate = Self {
            store,
            config,
            clock,
            lock: Arc::new(LockGate::new()),
            state: Mutex::new(GateState {
                most_recent: LogicalState::Launching,
                authentication_in_progress: false,
                theme_changes: 0,
                suppression: SuppressionWindow::new(),
            }),
            observers: Mutex::new(ObserverRegistry::default()),
            events,
        };

        // Nobody can be registered yet; this only reaches logs.
        if let Err(err) = gate.notify(LogicalState::Launching) {
            log_core_error(&err);
        }

        gate
    }

    // ---------------- Host signals ----------------

    /// Handle a raw host label. Unknown labels are ignored.
    pub fn on_native_label(&self, label: &str) -> Result<Option<LogicalState>> {
        match NativeState::parse(label) {
            Some(native) => self.on_native_signal(native),
            None => {
                trace!(label, "ignoring unknown native lifecycle label");
                Ok(None)
            }
        }
    }

    /// Handle a host lifecycle signal.
    ///
    /// Returns the logical state emitted, or `None` if the signal was ignored
    /// because a theme change or suppression window is in progress.
    ///
    /// Most-recent state and the lock flag are updated even if an observer
    /// fails; the first observer error is returned afterwards.
    pub fn on_native_signal(&self, native: NativeState) -> Result<Option<LogicalState>> {
        if self.is_theme_change_in_progress() {
            trace!(native = native.label(), "ignoring native signal during theme change");
            return Ok(None);
        }
        let now = self.clock.now();
        let remaining = {
            let state = self.state();
            let withheld = state.suppression.is_active(now);
            let left = state.suppression.remaining(now);
            withheld.then_some(left)
        };
        if let Some(remaining) = remaining {
            trace!(
                native = native.label(),
                ?remaining,
                "ignoring native signal while suppressed"
            );
            return Ok(None);
        }

        let state = native.logical_state();
        let delivered = self.notify(state);
        self.state().most_recent = state;

        let locked = if state.may_lock() && self.should_lock() {
            self.lock()
        } else {
            Ok(())
        };

        delivered.and(locked)?;
        Ok(Some(state))
    }

    /// Process host signals from any thread, in order, on the awaiting task.
    ///
    /// Returns when every sender is dropped. Observer failures are logged.
    pub async fn drive_native_signals(&self, mut signals: mpsc::Receiver<NativeState>) {
        while let Some(native) = signals.recv().await {
            if let Err(err) = self.on_native_signal(native) {
                log_core_error(&err);
            }
        }
        debug!("native signal channel closed");
    }

    /// Called once by the application entry point after launch.
    ///
    /// Unlocks straight away when no credential needs to be checked.
    pub fn receive_application_start_event(&self) -> Result<()> {
        let requirements = self.authentication_requirements(LogicalState::Launching);
        if requirements.requires_prompt() {
            info!(title = ?requirements.title, "launch requires authentication");
            return Ok(());
        }

        info!("no credentials configured; unlocking at launch");
        self.unlock()
    }

    // ---------------- Locking ----------------

    /// True if a focus loss / backgrounding must lock right now.
    pub fn should_lock(&self) -> bool {
        should_lock(self.store.as_ref())
    }

    pub fn authentication_requirements(&self, state: LogicalState) -> AuthenticationRequirements {
        authentication_requirements(self.store.as_ref(), state)
    }

    /// Emit `Locking`, then lock.
    pub fn lock(&self) -> Result<()> {
        let delivered = self.notify(LogicalState::Locking);
        self.lock.lock();
        info!("application locked");
        delivered
    }

    /// Emit `Unlocking`, clear the authentication flag, then unlock.
    pub fn unlock(&self) -> Result<()> {
        let delivered = self.notify(LogicalState::Unlocking);
        self.state().authentication_in_progress = false;
        self.lock.unlock();
        info!("application unlocked");
        delivered
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn is_unlocked(&self) -> bool {
        self.lock.is_unlocked()
    }

    /// Shared lock flag for resources that only need to check it.
    pub fn lock_gate(&self) -> Arc<LockGate> {
        Arc::clone(&self.lock)
    }

    pub fn set_authentication_in_progress(&self, in_progress: bool) {
        self.state().authentication_in_progress = in_progress;
    }

    pub fn is_authentication_in_progress(&self) -> bool {
        self.state().authentication_in_progress
    }

    /// Last app-cycle state (lock/unlock and theme events are not recorded).
    pub fn most_recent_state(&self) -> LogicalState {
        self.state().most_recent
    }

    // ---------------- Suppression ----------------

    /// Run `action` without its side effects being treated as lifecycle changes.
    ///
    /// Signals and notifications are withheld while `action` runs (also if it
    /// panics) and for the configured window after it returns. Overlapping
    /// calls extend the window to the latest deadline.
    pub fn suppress_notifications<F, R>(&self, action: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _scope = SuppressionScope::enter(self);
        action()
    }

    pub fn is_suppressing(&self) -> bool {
        let now = self.clock.now();
        self.state().suppression.is_active(now)
    }

    /// Start a theme change; native signals are ignored until the guard ends.
    ///
    /// Emits `ThemeChangeBegin` now and `ThemeChangeEnd` when the guard is
    /// dropped or ended. If `ThemeChangeBegin` delivery fails the change is
    /// closed again, with `ThemeChangeEnd` for observers that saw the begin.
    pub fn begin_theme_change(&self) -> Result<ThemeChangeGuard<'_>> {
        ThemeChangeGuard::begin(self)
    }

    /// Run `action` inside a theme change.
    pub fn with_theme_change<F, R>(&self, action: F) -> Result<R>
    where
        F: FnOnce() -> R,
    {
        let guard = self.begin_theme_change()?;
        let out = action();
        guard.end()?;
        Ok(out)
    }

    pub fn is_theme_change_in_progress(&self) -> bool {
        self.state().theme_changes > 0
    }

    // ---------------- Observers ----------------

    pub fn register_observer<O>(&self, observer: O) -> ObserverHandle
    where
        O: LifecycleObserver + 'static,
    {
        let handle = self.observers().insert(Arc::new(observer));
        debug!(handle = handle.id(), "observer registered");
        handle
    }

    /// Register an observer that cannot fail.
    pub fn register_listener<F>(&self, listener: F) -> ObserverHandle
    where
        F: Fn(LogicalState) + Send + Sync + 'static,
    {
        self.register_observer(move |state: LogicalState| -> std::result::Result<(), BoxError> {
            listener(state);
            Ok(())
        })
    }

    /// Returns false if `handle` was not registered.
    pub fn unregister_observer(&self, handle: ObserverHandle) -> bool {
        let removed = self.observers().remove(handle);
        debug!(handle = handle.id(), removed, "observer unregistered");
        removed
    }

    pub fn observer_count(&self) -> usize {
        self.observers().len()
    }

    /// Async view of the notifications observers receive.
    pub fn subscribe(&self) -> broadcast::Receiver<LogicalState> {
        self.events.subscribe()
    }

    // ---------------- Internals ----------------

    pub(crate) fn enter_suppression(&self) {
        self.state().suppression.enter();
    }

    pub(crate) fn exit_suppression(&self) {
        let now = self.clock.now();
        self.state()
            .suppression
            .exit(now, self.config.suppression_window);
        trace!(window = ?self.config.suppression_window, "suppression window armed");
    }

    pub(crate) fn enter_theme_change(&self) -> Result<()> {
        self.state().theme_changes += 1;

        let delivered = self.notify(LogicalState::ThemeChangeBegin);
        if delivered.is_err() {
            // Observers ahead of the failing one already saw the begin; close it for them.
            if let Err(err) = self.exit_theme_change() {
                log_core_error(&err);
            }
        }
        delivered
    }

    pub(crate) fn exit_theme_change(&self) -> Result<()> {
        {
            let mut state = self.state();
            state.theme_changes = state.theme_changes.saturating_sub(1);
        }
        self.notify(LogicalState::ThemeChangeEnd)
    }

    /// Deliver `state` to subscribers and observers unless suppressed.
    fn notify(&self, state: LogicalState) -> Result<()> {
        if self.is_suppressing() {
            trace!(state = state.label(), "notification withheld");
            return Ok(());
        }

        debug!(state = state.label(), "notifying observers");

        // No receivers is not an error.
        let _ = self.events.send(state);

        // Callbacks run without the registry locked so they may call back into the gate.
        let observers = self.observers().snapshot();
        for (handle, observer) in observers {
            // Skip anything unregistered earlier in this dispatch.
            if !self.observers().contains(handle) {
                continue;
            }

            if let Err(source) = observer.on_state(state) {
                let err = CoreError::observer_failed(handle.id(), state.id(), source);
                match self.config.observer_policy {
                    ObserverPolicy::FailFast => return Err(err),
                    ObserverPolicy::Isolate => log_core_error(&CoreError {
                        severity: Severity::Warn,
                        ..err
                    }),
                }
            }
        }

        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn observers(&self) -> MutexGuard<'_, ObserverRegistry> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
