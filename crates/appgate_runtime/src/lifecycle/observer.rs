use std::sync::Arc;

use super::LogicalState;

/// Error type observers may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Receives logical state notifications, in registration order.
///
/// Any `Fn(LogicalState) -> Result<(), BoxError>` closure is an observer.
pub trait LifecycleObserver: Send + Sync {
    fn on_state(&self, state: LogicalState) -> Result<(), BoxError>;
}

impl<F> LifecycleObserver for F
where
    F: Fn(LogicalState) -> Result<(), BoxError> + Send + Sync,
{
    fn on_state(&self, state: LogicalState) -> Result<(), BoxError> {
        self(state)
    }
}

/// Opaque token identifying one registration.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObserverHandle(u64);

impl ObserverHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Insertion-ordered observer list. Handles are never reused.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(ObserverHandle, Arc<dyn LifecycleObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn insert(&mut self, observer: Arc<dyn LifecycleObserver>) -> ObserverHandle {
        self.next_id += 1;
        let handle = ObserverHandle(self.next_id);
        self.entries.push((handle, observer));
        handle
    }

    pub(crate) fn remove(&mut self, handle: ObserverHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, handle: ObserverHandle) -> bool {
        self.entries.iter().any(|(h, _)| *h == handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clone of the current list, so callbacks can run without the registry borrowed.
    pub(crate) fn snapshot(&self) -> Vec<(ObserverHandle, Arc<dyn LifecycleObserver>)> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: LogicalState) -> Result<(), BoxError> {
        Ok(())
    }

    #[test]
    fn handles_are_unique_and_removal_is_exact() {
        let mut registry = ObserverRegistry::default();
        let a = registry.insert(Arc::new(noop));
        let b = registry.insert(Arc::new(noop));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(a));
        assert!(!registry.remove(a));
        assert!(!registry.contains(a));
        assert!(registry.contains(b));

        let c = registry.insert(Arc::new(noop));
        assert_ne!(c, a);
        let order: Vec<_> = registry.snapshot().into_iter().map(|(h, _)| h).collect();
        assert_eq!(order, [b, c]);
    }
}
