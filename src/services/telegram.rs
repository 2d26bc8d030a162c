// src/services/telegram.rs

//! Remote message-source capability.
//!
//! The pipeline consumes the Telegram client through this trait only.
//! Session management, rate-limit backoff and retry behavior belong to
//! the implementation, never to the pipeline: any fetch outcome arrives
//! here as a plain `Result`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::models::{ChannelEntity, ChannelRef, MessageRecord};

/// A lazy, possibly unbounded message sequence for one channel.
///
/// The underlying cursor is stateful: the sequence is restartable only
/// via a fresh `stream_messages` call, not resumable mid-stream. An
/// `Err` item reports a single message that could not be produced; the
/// stream remains consumable afterwards.
pub type MessageStream<'a> = BoxStream<'a, Result<MessageRecord>>;

/// Capability surface of the remote message source.
#[async_trait]
pub trait TelegramClient: Send + Sync {
    /// Establish the session. A failure here is fatal for the run.
    async fn connect(&self) -> Result<()>;

    /// Whether the established session is authorized.
    async fn is_authorized(&self) -> Result<bool>;

    /// Tear down the session. Called on every exit path.
    async fn disconnect(&self);

    /// Resolve a configured channel locator to its entity.
    async fn resolve_channel(&self, channel: &ChannelRef) -> Result<ChannelEntity>;

    /// Stream the channel's full message history, newest first.
    fn stream_messages(&self, entity: &ChannelEntity) -> MessageStream<'_>;

    /// Download the media attached to `record` to `target`.
    ///
    /// Returns the path actually written; the implementation may correct
    /// the file extension on disk.
    async fn download_media(
        &self,
        entity: &ChannelEntity,
        record: &MessageRecord,
        target: &Path,
    ) -> Result<PathBuf>;
}
