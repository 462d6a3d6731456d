//! Top-level error type for the TUI binary.

use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use demtrack_client::ApiClientError;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("API error: {0}")]
    Api(#[from] ApiClientError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("Event channel closed")]
    ChannelClosed,
}
