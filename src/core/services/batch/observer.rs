use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::events::{BatchEvent, BatchEventKind};
use crate::core::events::EventBus;


/// Receives progress from a batch run. Observers never influence the summary.
#[async_trait]
pub trait BatchObserver: Send + Sync {
    async fn notify(&self, event: &BatchEvent);
}


pub struct NoopObserver;

#[async_trait]
impl BatchObserver for NoopObserver {
    async fn notify(&self, _event: &BatchEvent) {}
}


/// Narrates each item's stats through `tracing`.
/// Run start, completion and failures are already logged by the processor.
pub struct TracingObserver;

#[async_trait]
impl BatchObserver for TracingObserver {
    async fn notify(&self, event: &BatchEvent) {
        if let BatchEvent::ItemSucceeded(e) = event {
            info!("Item {} stats: {}", e.item_id, e.stats);
        }
    }
}


pub struct ChannelObserver {
    tx: mpsc::Sender<BatchEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<BatchEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl BatchObserver for ChannelObserver {
    async fn notify(&self, event: &BatchEvent) {
        if let Err(e) = self.tx.send(event.clone()).await {
            warn!("Failed to emit batch event: {}", e);
        }
    }
}


pub struct EventBusObserver {
    bus: Arc<EventBus>,
}

impl EventBusObserver {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl BatchObserver for EventBusObserver {
    async fn notify(&self, event: &BatchEvent) {
        self.bus.publish(event);
    }
}


#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<BatchEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }


    pub fn events(&self) -> Vec<BatchEvent> {
        self.events.lock().clone()
    }


    pub fn kinds(&self) -> Vec<BatchEventKind> {
        self.events.lock().iter().map(BatchEvent::kind).collect()
    }
}

#[async_trait]
impl BatchObserver for CollectingObserver {
    async fn notify(&self, event: &BatchEvent) {
        self.events.lock().push(event.clone());
    }
}


/// Forwards every event to each inner observer in registration order.
#[derive(Default)]
pub struct FanoutObserver {
    observers: Vec<Arc<dyn BatchObserver>>,
}

impl FanoutObserver {
    pub fn new() -> Self {
        Self::default()
    }


    pub fn with(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

#[async_trait]
impl BatchObserver for FanoutObserver {
    async fn notify(&self, event: &BatchEvent) {
        for observer in &self.observers {
            observer.notify(event).await;
        }
    }
}
