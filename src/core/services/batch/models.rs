use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::BatchStatsError;


#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Name(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{}", id),
            ItemId::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Int(id)
    }
}

impl From<i32> for ItemId {
    fn from(id: i32) -> Self {
        ItemId::Int(i64::from(id))
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId::Int(i64::from(id))
    }
}

/// Values above `i64::MAX` keep their digits as a `Name`.
impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        match i64::try_from(id) {
            Ok(id) => ItemId::Int(id),
            Err(_) => ItemId::Name(id.to_string()),
        }
    }
}

impl From<&str> for ItemId {
    fn from(name: &str) -> Self {
        ItemId::Name(name.to_string())
    }
}

impl From<String> for ItemId {
    fn from(name: String) -> Self {
        ItemId::Name(name)
    }
}

impl From<&ItemId> for ItemId {
    fn from(id: &ItemId) -> Self {
        id.clone()
    }
}

/// Integers parse as `Int`, anything else non-blank as `Name`.
impl FromStr for ItemId {
    type Err = BatchStatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BatchStatsError::InvalidItemId(s.to_string()));
        }

        Ok(match trimmed.parse::<i64>() {
            Ok(id) => ItemId::Int(id),
            Err(_) => ItemId::Name(trimmed.to_string()),
        })
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    item_id: ItemId,
    cause: String,
}

impl FailureRecord {

    pub fn new(item_id: impl Into<ItemId>, cause: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            cause: cause.into(),
        }
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }


    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to process item {}: {}", self.item_id, self.cause)
    }
}


/// Outcome of one run. Only the processor appends to it; callers get a finished snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    success_count: usize,
    failures: Vec<FailureRecord>,
}

impl BatchSummary {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: FailureRecord) {
        self.failures.push(failure);
    }


    pub fn success_count(&self) -> usize {
        self.success_count
    }


    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }


    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Items attempted; always equals the input length.
    pub fn total(&self) -> usize {
        self.success_count + self.failures.len()
    }


    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }


    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.success_count as f64 / self.total() as f64
        }
    }


    pub fn failed_ids(&self) -> Vec<&ItemId> {
        self.failures.iter().map(FailureRecord::item_id).collect()
    }


    pub fn error_messages(&self) -> Vec<String> {
        self.failures.iter().map(FailureRecord::message).collect()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} items with {} errors",
            self.success_count,
            self.failures.len()
        )
    }
}
