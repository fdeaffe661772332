

pub mod config;
pub mod error;
pub mod events;

pub mod services;

pub use self::config::BatchConfig;
pub use error::{BatchStatsError, Result};
pub use events::{EventBus, EventHandler};


pub use services::{BatchProcessor, BatchSummary, FailureRecord, ItemComputationFailure, ItemId};
