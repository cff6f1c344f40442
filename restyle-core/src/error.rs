use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestyleError {
    #[error("text service rate limited: {0}")]
    RateLimited(String),
    #[error("text service failed: {0}")]
    Provider(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("max retries ({max}) exceeded")]
    RetriesExhausted { max: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl RestyleError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RestyleError::RateLimited(_))
    }
}
