//! Error types shared by the feed and the client.
//!
//! The `SentimentError` enum unifies the failure cases that can occur at the edges
//! of the workspace: I/O, symbol file parsing, JSON encoding, channel and lock
//! failures in the feed, and validation of snapshot fields. The scorer and the
//! ranker themselves never return it.
use std::io;
use std::string::FromUtf8Error;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared across the workspace.
#[derive(Error, Debug)]
pub enum SentimentError {
    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// UTF-8 conversion error when handling text content.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Error while parsing a symbols file into symbol strings.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// A poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// A requested symbol is not known to the data source.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// A snapshot or quote field violates its domain constraint.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SentimentError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SentimentError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl<T> From<PoisonError<T>> for SentimentError {
    fn from(err: PoisonError<T>) -> Self {
        SentimentError::MutexLock(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn poisoned_lock_maps_to_mutex_variant() {
        let lock = Arc::new(Mutex::new(0_u8));
        let poisoner = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().expect("first lock");
            panic!("poison the lock");
        })
        .join();

        let err: SentimentError = lock.lock().expect_err("lock must be poisoned").into();
        assert!(matches!(err, SentimentError::MutexLock(_)));
    }

    #[test]
    fn invalid_field_message_names_the_field() {
        let err = SentimentError::invalid("price", "must be non-negative");
        assert_eq!(err.to_string(), "Invalid field 'price': must be non-negative");
    }
}
