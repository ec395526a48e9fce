use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for appgate_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Maps onto `tracing` levels in the runtime crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    /// Recovered; processing went on.
    Warn,
    Error,
}

/// Where an error came from (helps triage and routing).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Observer,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    ObserverFailed,
    Other,
}

/// Optional structured payload for rich context without forcing allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context (usually no heap alloc if using &str).
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// An observer failed while being notified of `state` (a `LogicalState::id`).
    Observer { handle: u64, state: u8 },
}

/// The one error type that crosses crate boundaries in appgate.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }

    /// An observer rejected a notification. `reason` is the observer's own error text.
    pub fn observer_failed(handle: u64, state: u8, reason: impl fmt::Display) -> Self {
        CoreError::error()
            .domain(Domain::Observer)
            .kind(ErrorKind::ObserverFailed)
            .msgf(format_args!("observer {handle} failed: {reason}"))
            .payload(Payload::Observer { handle, state })
            .build()
    }

    /// A configuration value could not be used.
    pub fn invalid_config(key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        CoreError::error()
            .domain(Domain::Config)
            .kind(ErrorKind::InvalidArgument)
            .msgf(format_args!("invalid value for {key}"))
            .payload(Payload::Context {
                key,
                value: value.into(),
            })
            .build()
    }
}

/// Fluent builder that behaves like iterator chains (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    /// Set/override the domain (defaults to Domain::Other).
    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    /// Set/override the kind (defaults to ErrorKind::Other).
    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    /// Formatting-friendly message setter. Allocates once.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Only one payload: this replaces any previous payload.
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}
