

mod error;
pub mod events;
mod models;
pub mod observer;
mod processor;

pub use error::ItemComputationFailure;
pub use events::{
    BatchCompletedEvent, BatchEvent, BatchEventKind, BatchStartedEvent, ItemFailedEvent,
    ItemSucceededEvent,
};
pub use models::{BatchSummary, FailureRecord, ItemId};
pub use observer::{
    BatchObserver, ChannelObserver, CollectingObserver, EventBusObserver, FanoutObserver,
    NoopObserver, TracingObserver,
};
pub use processor::BatchProcessor;
