use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
/// Event bus for pub/sub messaging
///
/// Lets the poller, playback controller and UI controller notify the
/// terminal view without knowing about it.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::events::Event;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<Event>,
}

/// Event bus for broadcasting events to subscribers
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    next_id: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<Event>, SubscriberId) {
        let (tx, rx) = unbounded();
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.subscribers.write().push(Subscriber { id, sender: tx });

        (rx, id)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: Event) {
        tracing::trace!("event: {}", event.description());

        let mut closed = Vec::new();
        {
            let subscribers = self.subscribers.read();
            for subscriber in subscribers.iter() {
                if subscriber.sender.try_send(event.clone()).is_err() {
                    closed.push(subscriber.id);
                }
            }
        }

        // Receivers that were dropped without unsubscribing
        if !closed.is_empty() {
            self.subscribers.write().retain(|s| !closed.contains(&s.id));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}
