// src/models/mod.rs

//! Domain models for the ingestion pipeline.
//!
//! Pure data structures only; no client or I/O types leak in here.

mod channel;
mod config;
mod media;
mod message;
mod stats;

// Re-export all public types
pub use channel::{ChannelEntity, ChannelRef};
pub use config::{ChannelsConfig, Config, CrawlerConfig, LakeConfig};
pub use media::{MediaDecision, MediaDescriptor};
pub use message::{FieldValue, MessageRecord};
pub use stats::{ChannelReport, ChannelStatus, RunSummary};
