// Errors raised by the rate pipeline
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The payload lacks the expected batch structure or daily batch
    #[error("invalid data format: {0}")]
    Format(String),

    /// An unrecognised range token was supplied
    #[error("unknown range token: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}
