//! Error types for Demtrack core transforms.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid hex color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },
}
