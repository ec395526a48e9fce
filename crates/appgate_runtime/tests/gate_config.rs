use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use appgate_core::error::{Domain, ErrorKind, Payload};
use appgate_runtime::config::{
    DEFAULT_EVENT_CAPACITY, DEFAULT_SUPPRESSION_WINDOW, ENV_EVENT_CAPACITY, ENV_OBSERVER_POLICY,
    ENV_SUPPRESSION_MS, MAX_EVENT_CAPACITY,
};
use appgate_runtime::{CredentialStore, GateConfig, LifecycleGate, LockTiming, ObserverPolicy};

struct NoCredentials;

impl CredentialStore for NoCredentials {
    fn has_passcode(&self) -> bool {
        false
    }
    fn has_biometric(&self) -> bool {
        false
    }
    fn passcode_timing(&self) -> LockTiming {
        LockTiming::Immediately
    }
    fn biometric_timing(&self) -> LockTiming {
        LockTiming::Immediately
    }
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn missing_keys_use_defaults() {
    let config = GateConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, GateConfig::default());
    assert_eq!(config.suppression_window, DEFAULT_SUPPRESSION_WINDOW);
    assert_eq!(config.suppression_window, Duration::from_millis(350));
    assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    assert_eq!(config.observer_policy, ObserverPolicy::FailFast);
}

#[test]
fn overrides_are_applied() {
    let config = GateConfig::from_lookup(lookup(&[
        (ENV_SUPPRESSION_MS, "500"),
        (ENV_OBSERVER_POLICY, "isolate"),
        (ENV_EVENT_CAPACITY, "4"),
    ]))
    .unwrap();

    assert_eq!(config.suppression_window, Duration::from_millis(500));
    assert_eq!(config.observer_policy, ObserverPolicy::Isolate);
    assert_eq!(config.event_capacity, 4);
}

#[test]
fn largest_event_capacity_is_accepted() {
    let max = MAX_EVENT_CAPACITY.to_string();
    let config = GateConfig::from_lookup(lookup(&[(ENV_EVENT_CAPACITY, max.as_str())])).unwrap();
    assert_eq!(config.event_capacity, MAX_EVENT_CAPACITY);

    // A loaded config must always construct.
    let gate = LifecycleGate::new(Arc::new(NoCredentials), config);
    assert!(gate.is_locked());
}

#[test]
fn malformed_values_are_config_errors() {
    let cases = [
        (ENV_SUPPRESSION_MS, "soon"),
        (ENV_OBSERVER_POLICY, "swallow"),
        (ENV_EVENT_CAPACITY, "0"),
        (ENV_EVENT_CAPACITY, "4097"),
        (ENV_EVENT_CAPACITY, "18446744073709551615"),
    ];

    for (key, value) in cases {
        let err = GateConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
        assert_eq!(err.domain, Domain::Config);
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        match err.payload {
            Payload::Context { key: k, value: v } => {
                assert_eq!(k, key);
                assert_eq!(v, value);
            }
            other => panic!("expected context payload, got {other:?}"),
        }
    }
}
