//! Status bus for publishing plugin events to observers.
//!
//! Push-based: subscribers register callbacks that are invoked when events
//! are dispatched. The bus holds strong references to subscribers, so they
//! persist until the bus is dropped. Dispatch is synchronous on the
//! publisher's thread; subscribers that touch UI state must marshal to their
//! own context inside the callback.

use std::sync::{Arc, Mutex};

use crate::events::PluginEvent;

type Subscriber = Box<dyn FnMut(PluginEvent) + Send + 'static>;

/// In-process event bus for plugin status notifications.
///
/// Cloning is cheap and clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct StatusBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl StatusBus {
    /// Create a new bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all events.
    ///
    /// The callback is invoked for every event dispatched after
    /// registration, in registration order.
    pub fn subscribe(&self, callback: impl FnMut(PluginEvent) + Send + 'static) {
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(Box::new(callback)),
            Err(e) => tracing::error!("Failed to acquire subscriber lock: {}", e),
        }
    }

    /// Dispatch an event to all subscribers.
    ///
    /// Each subscriber receives a clone of the event.
    pub fn dispatch(&self, event: PluginEvent) {
        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                for subscriber in subscribers.iter_mut() {
                    subscriber(event.clone());
                }
            }
            Err(e) => tracing::error!("Failed to acquire subscriber lock: {}", e),
        }
    }

    /// Get the number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        match self.subscribers.lock() {
            Ok(subscribers) => subscribers.len(),
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_subscribe_and_dispatch() {
        let bus = StatusBus::new();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = Arc::clone(&count);
        bus.subscribe(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.subscriber_count(), 1);

        bus.dispatch(PluginEvent::CapturePlayerNotFound);
        bus.dispatch(PluginEvent::CapturePlayerNotFound);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_multiple_subscribers_all_receive() {
        let bus = StatusBus::new();
        let count1 = Arc::new(AtomicU32::new(0));
        let count2 = Arc::new(AtomicU32::new(0));

        let count1_clone = Arc::clone(&count1);
        bus.subscribe(move |_event| {
            count1_clone.fetch_add(1, Ordering::SeqCst);
        });

        let count2_clone = Arc::clone(&count2);
        bus.subscribe(move |_event| {
            count2_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.dispatch(PluginEvent::KeyCleared);

        assert_eq!(count1.load(Ordering::SeqCst), 1);
        assert_eq!(count2.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let bus = StatusBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        bus.subscribe(move |event| {
            if let Ok(mut seen) = seen_clone.lock() {
                seen.push(event);
            }
        });

        let publisher = bus.clone();
        publisher.dispatch(PluginEvent::KeySet { key: "abc123".into() });

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.as_slice(), &[PluginEvent::KeySet { key: "abc123".into() }]);
    }
}
