
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use uuid::Uuid;

use super::models::{BatchSummary, FailureRecord, ItemId};
use crate::core::error::Result;
use crate::toolkit::stats::StatsResult;


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
pub enum BatchEventKind {
    #[serde(rename = "batch.started")]
    #[strum(serialize = "batch.started")]
    BatchStarted,
    #[serde(rename = "item.succeeded")]
    #[strum(serialize = "item.succeeded")]
    ItemSucceeded,
    #[serde(rename = "item.failed")]
    #[strum(serialize = "item.failed")]
    ItemFailed,
    #[serde(rename = "batch.completed")]
    #[strum(serialize = "batch.completed")]
    BatchCompleted,
}

impl BatchEventKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStartedEvent {

    pub run_id: Uuid,

    pub total_items: usize,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSucceededEvent {

    pub run_id: Uuid,
    /// Zero-based index into the input sequence.
    pub position: usize,

    pub item_id: ItemId,

    pub stats: StatsResult,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFailedEvent {

    pub run_id: Uuid,

    pub position: usize,

    pub failure: FailureRecord,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCompletedEvent {

    pub run_id: Uuid,

    pub summary: BatchSummary,

    pub duration_ms: f64,
}


/// Serializes as `{"event": "<kind>", "payload": {...}}`, using the same names as [`BatchEventKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum BatchEvent {
    #[serde(rename = "batch.started")]
    Started(BatchStartedEvent),
    #[serde(rename = "item.succeeded")]
    ItemSucceeded(ItemSucceededEvent),
    #[serde(rename = "item.failed")]
    ItemFailed(ItemFailedEvent),
    #[serde(rename = "batch.completed")]
    Completed(BatchCompletedEvent),
}

impl BatchEvent {
    pub fn kind(&self) -> BatchEventKind {
        match self {
            BatchEvent::Started(_) => BatchEventKind::BatchStarted,
            BatchEvent::ItemSucceeded(_) => BatchEventKind::ItemSucceeded,
            BatchEvent::ItemFailed(_) => BatchEventKind::ItemFailed,
            BatchEvent::Completed(_) => BatchEventKind::BatchCompleted,
        }
    }


    pub fn run_id(&self) -> Uuid {
        match self {
            BatchEvent::Started(e) => e.run_id,
            BatchEvent::ItemSucceeded(e) => e.run_id,
            BatchEvent::ItemFailed(e) => e.run_id,
            BatchEvent::Completed(e) => e.run_id,
        }
    }


    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
