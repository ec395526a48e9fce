use appgate_core::error::{CoreError, Severity};

/// Emit `err` at the `tracing` level matching its severity.
pub fn log_core_error(err: &CoreError) {
    match err.severity {
        Severity::Warn => tracing::warn!(domain = ?err.domain, kind = ?err.kind, "{err}"),
        Severity::Error => tracing::error!(domain = ?err.domain, kind = ?err.kind, "{err}"),
    }
}
