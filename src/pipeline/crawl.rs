// src/pipeline/crawl.rs

//! Per-channel crawl.

use chrono::NaiveDate;
use futures::StreamExt;

use crate::models::{ChannelRef, ChannelReport, ChannelStatus};
use crate::pipeline::{ShutdownFlag, classify};
use crate::services::TelegramClient;
use crate::storage::LakeWriter;

/// Drives one channel's full message history into the lake.
///
/// Failures are isolated per item: a record write or media fetch error
/// is logged and counted, and the stream advances to the next message.
/// Only a resolution failure marks the channel as failed.
pub struct ChannelCrawler<'a> {
    client: &'a dyn TelegramClient,
    writer: &'a LakeWriter,
}

impl<'a> ChannelCrawler<'a> {
    pub fn new(client: &'a dyn TelegramClient, writer: &'a LakeWriter) -> Self {
        Self { client, writer }
    }

    /// Resolve the channel, then stream its history to exhaustion.
    pub async fn crawl(
        &self,
        channel: &ChannelRef,
        collect_media: bool,
        run_date: NaiveDate,
        shutdown: &ShutdownFlag,
    ) -> ChannelReport {
        let entity = match self.client.resolve_channel(channel).await {
            Ok(entity) => entity,
            Err(error) => {
                log::error!("Failed to resolve channel {channel}: {error}");
                return ChannelReport::failed(channel.clone(), error.to_string());
            }
        };

        log::info!(
            "Starting crawl for channel '{}' (id {})",
            entity.title,
            entity.id
        );

        let mut report = ChannelReport::new(channel.clone(), entity.title.clone());
        let mut stream = self.client.stream_messages(&entity);

        while let Some(item) = stream.next().await {
            if shutdown.is_triggered() {
                log::warn!("Shutdown requested, leaving channel '{}'", entity.title);
                report.status = ChannelStatus::Failed {
                    reason: "interrupted by shutdown".to_string(),
                };
                break;
            }

            let record = match item {
                Ok(record) => record,
                Err(error) => {
                    report.messages_failed += 1;
                    log::warn!("Skipping message from '{}': {error}", entity.title);
                    continue;
                }
            };

            match self.writer.write_record(&record, &entity, run_date).await {
                Ok(_) => report.messages_written += 1,
                Err(error) => {
                    report.messages_failed += 1;
                    log::warn!("{error}");
                }
            }

            if collect_media && record.media.is_present() {
                let decision = classify(&record.media);
                match self
                    .writer
                    .fetch_media(self.client, &record, &decision, &entity, run_date)
                    .await
                {
                    Ok(Some(path)) => {
                        report.media_downloaded += 1;
                        log::debug!("Downloaded media to {}", path.display());
                    }
                    Ok(None) => {}
                    Err(error) => {
                        report.media_failed += 1;
                        log::warn!("{error}");
                    }
                }
            }
        }

        log::info!(
            "Finished '{}': {} messages written ({} failed), {} media downloaded ({} failed)",
            entity.title,
            report.messages_written,
            report.messages_failed,
            report.media_downloaded,
            report.media_failed
        );
        report
    }
}
