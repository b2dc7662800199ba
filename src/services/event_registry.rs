use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::interfaces::Receipt;

pub type ReceiptCallback = Box<dyn FnOnce(Receipt) + Send + 'static>;

/// One-shot listener table keyed by transaction hash.
///
/// Every registered callback fires at most once: `emit` removes all listeners
/// for the key before invoking them.
#[derive(Default)]
pub struct EventRegistry {
    listeners: Mutex<HashMap<String, Vec<ReceiptCallback>>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<ReceiptCallback>>> {
        // A panicking callback never runs under the lock, so the map is intact.
        self.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns `true` if this is the first outstanding listener for `key`.
    pub fn register(&self, key: &str, callback: ReceiptCallback) -> bool {
        let mut listeners = self.lock();
        let entry = listeners.entry(key.to_string()).or_default();
        entry.push(callback);
        entry.len() == 1
    }

    /// Fires and removes every listener for exactly `key`. Returns how many fired.
    pub fn emit(&self, key: &str, receipt: &Receipt) -> usize {
        let fired = self.lock().remove(key).unwrap_or_default();
        let count = fired.len();
        for callback in fired {
            callback(receipt.clone());
        }
        count
    }

    pub fn listener_count(&self, key: &str) -> usize {
        self.lock().get(key).map_or(0, Vec::len)
    }

    pub fn pending_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("pending_keys", &self.pending_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(counter: &Arc<AtomicUsize>) -> ReceiptCallback {
        let counter = Arc::clone(counter);
        Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn first_registration_is_reported() {
        let registry = EventRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        assert!(registry.register("0xabc", counting(&hits)));
        assert!(!registry.register("0xabc", counting(&hits)));
        assert!(registry.register("0xdef", counting(&hits)));
        assert_eq!(registry.listener_count("0xabc"), 2);
        assert_eq!(registry.pending_keys(), vec!["0xabc", "0xdef"]);
    }

    #[test]
    fn emit_fires_only_matching_key_once() {
        let registry = EventRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        registry.register("0xabc", counting(&hits));
        registry.register("0xabc", counting(&hits));
        registry.register("0xdef", counting(&hits));

        assert_eq!(registry.emit("0xabc", &Receipt::confirmed("0xabc", 1)), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        // Already consumed.
        assert_eq!(registry.emit("0xabc", &Receipt::confirmed("0xabc", 2)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(registry.listener_count("0xdef"), 1);
    }

    #[test]
    fn callbacks_may_reenter_the_registry() {
        let registry = Arc::new(EventRegistry::new());
        let inner = Arc::clone(&registry);
        registry.register(
            "0xabc",
            Box::new(move |_| {
                inner.register("0xdef", Box::new(|_| {}));
            }),
        );
        registry.emit("0xabc", &Receipt::confirmed("0xabc", 1));
        assert_eq!(registry.pending_keys(), vec!["0xdef"]);
    }
}
