use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::models::StatsResult;
use crate::core::services::batch::{ItemComputationFailure, ItemId};


pub const SIMULATED_TOTAL_POSTS: u64 = 15;


pub const SIMULATED_TOTAL_COMMENTS: u64 = 42;


/// Produces stats for a single item or fails with a descriptive cause.
#[async_trait]
pub trait StatsCalculator: Send + Sync {
    async fn calculate(&self, item_id: &ItemId) -> Result<StatsResult, ItemComputationFailure>;
}


/// Adapts a synchronous closure into a [`StatsCalculator`].
pub struct FnCalculator<F> {
    compute: F,
}

impl<F> FnCalculator<F>
where
    F: Fn(&ItemId) -> Result<StatsResult, ItemComputationFailure> + Send + Sync,
{
    pub fn new(compute: F) -> Self {
        Self { compute }
    }
}

#[async_trait]
impl<F> StatsCalculator for FnCalculator<F>
where
    F: Fn(&ItemId) -> Result<StatsResult, ItemComputationFailure> + Send + Sync,
{
    async fn calculate(&self, item_id: &ItemId) -> Result<StatsResult, ItemComputationFailure> {
        (self.compute)(item_id)
    }
}


/// Returns fixed stats for every item, except ids registered to fail.
/// When a known-id set is configured, anything outside it fails with "not found".
#[derive(Default)]
pub struct SimulatedStatsCalculator {
    known_ids: Option<HashSet<ItemId>>,
    failures: HashMap<ItemId, String>,
    calls: AtomicUsize,
}

impl SimulatedStatsCalculator {
    pub fn new() -> Self {
        Self::default()
    }


    pub fn with_known_ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        self.known_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }


    pub fn with_failure(mut self, item_id: impl Into<ItemId>, cause: impl Into<String>) -> Self {
        self.failures.insert(item_id.into(), cause.into());
        self
    }


    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsCalculator for SimulatedStatsCalculator {
    async fn calculate(&self, item_id: &ItemId) -> Result<StatsResult, ItemComputationFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(cause) = self.failures.get(item_id) {
            debug!("Simulated failure for item {}: {}", item_id, cause);
            return Err(ItemComputationFailure::new(item_id.clone(), cause.clone()));
        }

        if let Some(ref known) = self.known_ids {
            if !known.contains(item_id) {
                return Err(ItemComputationFailure::not_found(item_id.clone()));
            }
        }

        Ok(StatsResult::new(
            SIMULATED_TOTAL_POSTS,
            SIMULATED_TOTAL_COMMENTS,
            None,
        ))
    }
}
