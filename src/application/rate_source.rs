// Source trait for raw charting-rate payloads
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpstreamError {
    /// The provider answered with a non-success status
    #[error("upstream responded with status {status}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },

    /// No response was received at all
    #[error("upstream request failed: {0}")]
    Unreachable(String),
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the raw charting-rate body, unmodified
    async fn fetch_charting_rates(&self) -> Result<Bytes, UpstreamError>;
}
