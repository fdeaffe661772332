
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::core::services::batch::{BatchEvent, BatchEventKind};


pub type EventHandler = Arc<dyn Fn(&BatchEvent) + Send + Sync>;


struct Subscription {
    /// `None` receives every kind.
    kind: Option<BatchEventKind>,
    handler: EventHandler,
}


/// Delivers batch events to subscribers inline, in registration order.
///
/// `publish` returns only after every matching handler has run, so
/// subscribers see events in the order the processor produced them.
pub struct EventBus {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl EventBus {

    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
        }
    }


    pub fn subscribe(&self, kind: BatchEventKind, handler: EventHandler) {
        self.subscriptions.write().push(Subscription {
            kind: Some(kind),
            handler,
        });
        debug!("Registered handler for event type: {}", kind.as_str());
    }


    pub fn subscribe_all(&self, handler: EventHandler) {
        self.subscriptions.write().push(Subscription {
            kind: None,
            handler,
        });
        debug!("Registered handler for all event types");
    }

    /// Returns how many handlers ran.
    pub fn publish(&self, event: &BatchEvent) -> usize {
        let kind = event.kind();

        // Handlers may subscribe while being called, so the lock is not held during dispatch.
        let handlers: Vec<EventHandler> = self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.kind.is_none_or(|k| k == kind))
            .map(|s| Arc::clone(&s.handler))
            .collect();

        if handlers.is_empty() {
            debug!("No handlers for event type: {}", kind.as_str());
        }

        for handler in &handlers {
            handler(event);
        }

        handlers.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::batch::{BatchStartedEvent, FailureRecord, ItemFailedEvent};
    use parking_lot::Mutex;
    use uuid::Uuid;

    fn failed(run_id: Uuid, position: usize, id: i64) -> BatchEvent {
        BatchEvent::ItemFailed(ItemFailedEvent {
            run_id,
            position,
            failure: FailureRecord::new(id, "not found"),
        })
    }

    #[test]
    fn test_publish_filters_by_kind() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        bus.subscribe(
            BatchEventKind::ItemFailed,
            Arc::new(move |event: &BatchEvent| seen_clone.lock().push(event.kind())),
        );

        let run_id = Uuid::new_v4();
        let started = BatchEvent::Started(BatchStartedEvent {
            run_id,
            total_items: 1,
        });

        assert_eq!(bus.publish(&started), 0);
        assert_eq!(bus.publish(&failed(run_id, 0, 3)), 1);
        assert_eq!(*seen.lock(), vec![BatchEventKind::ItemFailed]);
    }

    #[test]
    fn test_delivery_is_ordered_and_immediate() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        bus.subscribe(
            BatchEventKind::ItemFailed,
            Arc::new(move |event: &BatchEvent| {
                if let BatchEvent::ItemFailed(e) = event {
                    first.lock().push(format!("failed:{}", e.position));
                }
            }),
        );
        let second = Arc::clone(&log);
        bus.subscribe_all(Arc::new(move |event: &BatchEvent| {
            second.lock().push(format!("all:{}", event.kind().as_str()));
        }));

        let run_id = Uuid::new_v4();
        for position in 0..3 {
            bus.publish(&failed(run_id, position, position as i64));
        }

        assert_eq!(
            *log.lock(),
            vec![
                "failed:0",
                "all:item.failed",
                "failed:1",
                "all:item.failed",
                "failed:2",
                "all:item.failed",
            ]
        );
    }
}
