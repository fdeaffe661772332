

use thiserror::Error;


#[derive(Error, Debug)]
pub enum BatchStatsError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid item id: {0}")]
    InvalidItemId(String),
}


pub type Result<T> = std::result::Result<T, BatchStatsError>;
