use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::ItemComputationFailure;
use super::events::{
    BatchCompletedEvent, BatchEvent, BatchStartedEvent, ItemFailedEvent, ItemSucceededEvent,
};
use super::models::{BatchSummary, FailureRecord, ItemId};
use super::observer::{BatchObserver, NoopObserver};
use crate::core::config::BatchConfig;
use crate::toolkit::stats::{FnCalculator, StatsCalculator, StatsResult};
use crate::utils::panic_message;


/// Runs a calculator over a sequence of items, one at a time, in input order.
///
/// Each item is evaluated inside its own failure boundary: an `Err` or a panic
/// from the calculator becomes a [`FailureRecord`] and the run moves on to the
/// next item. Nothing is retried and nothing is carried between runs.
pub struct BatchProcessor {

    config: BatchConfig,

    observer: Arc<dyn BatchObserver>,
}

impl BatchProcessor {

    pub fn new(config: BatchConfig) -> Self {
        debug!(
            "BatchProcessor initialized: progress_interval={}, max_cause_chars={}",
            config.progress_interval, config.max_cause_chars
        );

        Self {
            config,
            observer: Arc::new(NoopObserver),
        }
    }


    pub fn with_observer(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observer = observer;
        self
    }


    pub fn config(&self) -> &BatchConfig {
        &self.config
    }


    pub async fn run<I, C>(&self, items: I, calculator: &C) -> BatchSummary
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
        C: StatsCalculator + ?Sized,
    {
        let items: Vec<ItemId> = items.into_iter().map(Into::into).collect();
        let total = items.len();
        let run_id = Uuid::new_v4();
        let start_time = Instant::now();

        info!("Batch run started: {} items (run_id={})", total, run_id);
        self.observer
            .notify(&BatchEvent::Started(BatchStartedEvent {
                run_id,
                total_items: total,
            }))
            .await;

        let mut summary = BatchSummary::new();

        for (position, item_id) in items.into_iter().enumerate() {
            debug!("Processing item {} ({}/{})", item_id, position + 1, total);

            match self.process_item(calculator, &item_id).await {
                Ok(stats) => {
                    summary.record_success();
                    self.observer
                        .notify(&BatchEvent::ItemSucceeded(ItemSucceededEvent {
                            run_id,
                            position,
                            item_id,
                            stats,
                        }))
                        .await;
                }
                Err(failure) => {
                    let cause = self.config.render_cause(&failure.to_string());
                    let record = FailureRecord::new(item_id, cause);
                    warn!("{} (position {})", record, position);

                    summary.record_failure(record.clone());
                    self.observer
                        .notify(&BatchEvent::ItemFailed(ItemFailedEvent {
                            run_id,
                            position,
                            failure: record,
                        }))
                        .await;
                }
            }

            let processed = position + 1;
            if self.config.should_log_progress(processed) {
                info!(
                    "Batch progress: {}/{} items ({} failed)",
                    processed,
                    total,
                    summary.failure_count()
                );
            }
        }

        let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        info!(
            "Batch run complete: {}/{} succeeded, {} failed in {:.1}ms (run_id={})",
            summary.success_count(),
            total,
            summary.failure_count(),
            duration_ms,
            run_id
        );

        self.observer
            .notify(&BatchEvent::Completed(BatchCompletedEvent {
                run_id,
                summary: summary.clone(),
                duration_ms,
            }))
            .await;

        summary
    }


    pub async fn run_fn<I, F>(&self, items: I, compute: F) -> BatchSummary
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
        F: Fn(&ItemId) -> Result<StatsResult, ItemComputationFailure> + Send + Sync,
    {
        self.run(items, &FnCalculator::new(compute)).await
    }

    /// The per-item failure boundary.
    async fn process_item<C>(
        &self,
        calculator: &C,
        item_id: &ItemId,
    ) -> Result<StatsResult, ItemComputationFailure>
    where
        C: StatsCalculator + ?Sized,
    {
        match AssertUnwindSafe(calculator.calculate(item_id))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => Err(ItemComputationFailure::panicked(
                item_id,
                panic_message(payload.as_ref()),
            )),
        }
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}
