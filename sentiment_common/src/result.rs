//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `SentimentError`, so functions can simply return `Result<T>`.
use crate::error::SentimentError;

/// Workspace-wide `Result` alias with `SentimentError` as the default error.
pub type Result<T, E = SentimentError> = std::result::Result<T, E>;
