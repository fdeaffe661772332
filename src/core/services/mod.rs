

pub mod batch;

pub use batch::{BatchProcessor, BatchSummary, FailureRecord, ItemComputationFailure, ItemId};
