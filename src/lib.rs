

pub mod core;
pub mod toolkit;
pub mod utils;

pub use utils::safe_truncate_ellipsis;


pub use crate::core::config::BatchConfig;
pub use crate::core::error::{BatchStatsError, Result};
pub use crate::core::services::batch::{
    BatchObserver, BatchProcessor, BatchSummary, FailureRecord, ItemComputationFailure, ItemId,
};
pub use toolkit::stats::{FnCalculator, SimulatedStatsCalculator, StatsCalculator, StatsResult};


pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;


pub const DEFAULT_MAX_CAUSE_CHARS: usize = 500;


pub const DEFAULT_LOG_FILTER: &str = "batchstats=info";


pub const DEFAULT_ITEM_IDS: [i64; 5] = [1, 2, 3, 4, 5];
