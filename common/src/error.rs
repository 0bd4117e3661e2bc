use config::ConfigError;
use thiserror::Error;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures talking to the third-party image search API.
///
/// No distinction is made between transient and permanent failures; none of
/// these are retried.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("image search responded with status {0}")]
    Status(u16),
    #[error("image search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image search response did not match the expected schema: {0}")]
    Schema(String),
}

/// Constraint violations on the submitted search form.
///
/// The `Display` output is shown to the user next to the input field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required.")]
    Missing,
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
