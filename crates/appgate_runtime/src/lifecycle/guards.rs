use appgate_core::error::Result;

use super::LifecycleGate;
use crate::error::log_core_error;

/// Keeps the suppression window open for as long as it lives.
///
/// Dropping it (normally or while unwinding) arms the linger deadline.
pub(crate) struct SuppressionScope<'a> {
    gate: &'a LifecycleGate,
}

impl<'a> SuppressionScope<'a> {
    pub(crate) fn enter(gate: &'a LifecycleGate) -> Self {
        gate.enter_suppression();
        Self { gate }
    }
}

impl Drop for SuppressionScope<'_> {
    fn drop(&mut self) {
        self.gate.exit_suppression();
    }
}

/// An in-progress theme change.
///
/// While any guard is alive, native lifecycle signals are ignored. Ending the
/// guard emits `ThemeChangeEnd`; use [`ThemeChangeGuard::end`] to see delivery
/// errors, since a plain drop can only log them.
#[must_use = "dropping the guard ends the theme change immediately"]
pub struct ThemeChangeGuard<'a> {
    gate: Option<&'a LifecycleGate>,
}

impl<'a> ThemeChangeGuard<'a> {
    pub(crate) fn begin(gate: &'a LifecycleGate) -> Result<Self> {
        gate.enter_theme_change()?;
        Ok(Self { gate: Some(gate) })
    }

    /// End the theme change and report `ThemeChangeEnd` delivery.
    pub fn end(mut self) -> Result<()> {
        match self.gate.take() {
            Some(gate) => gate.exit_theme_change(),
            None => Ok(()),
        }
    }
}

impl Drop for ThemeChangeGuard<'_> {
    fn drop(&mut self) {
        if let Some(gate) = self.gate.take() {
            if let Err(err) = gate.exit_theme_change() {
                log_core_error(&err);
            }
        }
    }
}
