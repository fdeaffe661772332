use thiserror::Error;

use super::models::ItemId;


/// A single item's computation failed. Display renders only the cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{cause}")]
pub struct ItemComputationFailure {
    pub item_id: ItemId,
    pub cause: String,
}

impl ItemComputationFailure {
    pub fn new(item_id: impl Into<ItemId>, cause: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            cause: cause.into(),
        }
    }


    pub fn not_found(item_id: impl Into<ItemId>) -> Self {
        Self::new(item_id, "not found")
    }


    pub fn invalid(item_id: impl Into<ItemId>, reason: impl AsRef<str>) -> Self {
        Self::new(item_id, format!("invalid item: {}", reason.as_ref()))
    }


    pub fn panicked(item_id: impl Into<ItemId>, message: impl AsRef<str>) -> Self {
        Self::new(item_id, format!("panicked: {}", message.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_cause() {
        let failure = ItemComputationFailure::not_found(3_i64);
        assert_eq!(failure.item_id, ItemId::Int(3));
        assert_eq!(failure.to_string(), "not found");
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            ItemComputationFailure::invalid("x", "negative id").cause,
            "invalid item: negative id"
        );
        assert_eq!(
            ItemComputationFailure::panicked(1_i64, "index out of bounds").to_string(),
            "panicked: index out of bounds"
        );
    }
}
