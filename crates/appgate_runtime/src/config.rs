use std::env;
use std::time::Duration;

use appgate_core::error::{CoreError, Result};

pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_millis(350);
pub const DEFAULT_EVENT_CAPACITY: usize = 32;
/// Accepted range for `event_capacity`.
pub const MIN_EVENT_CAPACITY: usize = 1;
pub const MAX_EVENT_CAPACITY: usize = 4096;

pub const ENV_SUPPRESSION_MS: &str = "APPGATE_SUPPRESSION_MS";
pub const ENV_OBSERVER_POLICY: &str = "APPGATE_OBSERVER_POLICY";
pub const ENV_EVENT_CAPACITY: &str = "APPGATE_EVENT_CAPACITY";

/// What happens when an observer fails during a notification.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ObserverPolicy {
    /// Stop delivering and return the error to the caller.
    #[default]
    FailFast,
    /// Log the failure and keep delivering to later observers.
    Isolate,
}

impl ObserverPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Some(ObserverPolicy::FailFast),
            "isolate" => Some(ObserverPolicy::Isolate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GateConfig {
    /// How long notifications stay withheld after a suppressed action returns.
    pub suppression_window: Duration,
    pub observer_policy: ObserverPolicy,
    /// Buffer size of the async state-event channel, within
    /// `MIN_EVENT_CAPACITY..=MAX_EVENT_CAPACITY`. The gate clamps values
    /// outside that range.
    pub event_capacity: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            suppression_window: DEFAULT_SUPPRESSION_WINDOW,
            observer_policy: ObserverPolicy::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl GateConfig {
    /// Defaults overridden by `APPGATE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `APPGATE_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_SUPPRESSION_MS) {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|_| CoreError::invalid_config(ENV_SUPPRESSION_MS, value.clone()))?;
            config.suppression_window = Duration::from_millis(millis);
        }

        if let Some(value) = lookup(ENV_OBSERVER_POLICY) {
            config.observer_policy = ObserverPolicy::parse(&value)
                .ok_or_else(|| CoreError::invalid_config(ENV_OBSERVER_POLICY, value.clone()))?;
        }

        if let Some(value) = lookup(ENV_EVENT_CAPACITY) {
            config.event_capacity = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| (MIN_EVENT_CAPACITY..=MAX_EVENT_CAPACITY).contains(capacity))
                .ok_or_else(|| CoreError::invalid_config(ENV_EVENT_CAPACITY, value.clone()))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parsing_is_case_insensitive() {
        assert_eq!(ObserverPolicy::parse(" Isolate "), Some(ObserverPolicy::Isolate));
        assert_eq!(ObserverPolicy::parse("FAIL-FAST"), Some(ObserverPolicy::FailFast));
        assert_eq!(ObserverPolicy::parse("ignore"), None);
    }
}
