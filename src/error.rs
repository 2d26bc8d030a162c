// src/error.rs

//! Unified error handling for the ingestion pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// The variants mirror the pipeline's fault scopes: `Connection` aborts
/// a run, `ChannelResolution` aborts one channel, and
/// `RecordWrite`/`MediaFetch` abort one item.
#[derive(Error, Debug)]
pub enum AppError {
    /// Connecting to or authorizing with the remote source failed.
    /// Fatal for the whole run.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A channel reference could not be resolved to an entity.
    /// Fatal for that channel only.
    #[error("Failed to resolve channel '{channel}': {message}")]
    ChannelResolution { channel: String, message: String },

    /// Writing one message record to the lake failed.
    /// Fatal for that message only.
    #[error("Failed to write record {message_id} from '{channel}': {message}")]
    RecordWrite {
        channel: String,
        message_id: i64,
        message: String,
    },

    /// Downloading one message's media failed.
    /// Fatal for that message's media only.
    #[error("Failed to fetch media for message {message_id} from '{channel}': {message}")]
    MediaFetch {
        channel: String,
        message_id: i64,
        message: String,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a channel resolution error.
    pub fn resolution(channel: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::ChannelResolution {
            channel: channel.into(),
            message: message.to_string(),
        }
    }

    /// Create a record write error scoped to one message.
    pub fn record_write(
        channel: impl Into<String>,
        message_id: i64,
        message: impl fmt::Display,
    ) -> Self {
        Self::RecordWrite {
            channel: channel.into(),
            message_id,
            message: message.to_string(),
        }
    }

    /// Create a media fetch error scoped to one message.
    pub fn media_fetch(
        channel: impl Into<String>,
        message_id: i64,
        message: impl fmt::Display,
    ) -> Self {
        Self::MediaFetch {
            channel: channel.into(),
            message_id,
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
