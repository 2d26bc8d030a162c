// src/pipeline/run.rs

//! Run orchestration.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{ChannelReport, Config, RunSummary};
use crate::pipeline::{ChannelCrawler, ShutdownFlag};
use crate::services::TelegramClient;
use crate::storage::{LakeWriter, PartitionKind, PathScheme};

/// Owns one crawl run: connect, crawl every configured channel with
/// bounded concurrency, and always disconnect.
pub struct CrawlOrchestrator {
    config: Arc<Config>,
    client: Arc<dyn TelegramClient>,
    shutdown: ShutdownFlag,
}

impl CrawlOrchestrator {
    pub fn new(config: Arc<Config>, client: Arc<dyn TelegramClient>) -> Self {
        Self {
            config,
            client,
            shutdown: ShutdownFlag::new(),
        }
    }

    /// Handle for requesting a graceful stop; checked at channel and
    /// message boundaries.
    pub fn shutdown_flag(&self) -> ShutdownFlag {
        self.shutdown.clone()
    }

    /// Execute the full crawl.
    ///
    /// A connection or authorization failure is fatal and reported as an
    /// error; any per-channel failure is recorded in the summary and the
    /// run carries on. The client is disconnected on every exit path
    /// past a successful connect.
    pub async fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let run_date = self
            .config
            .crawler
            .run_date
            .unwrap_or_else(|| Local::now().date_naive());

        self.client.connect().await?;

        let result = self.crawl_channels(run_date).await;
        self.client.disconnect().await;
        let channels = result?;

        let summary = RunSummary {
            run_date,
            started_at,
            finished_at: Utc::now(),
            channels,
        };

        log::info!(
            "Run complete: {} messages and {} media across {} channels",
            summary.total_messages(),
            summary.total_media(),
            summary.channels.len()
        );
        for failed in summary.failed_channels() {
            log::warn!("Channel {} did not complete: {:?}", failed.channel, failed.status);
        }

        Ok(summary)
    }

    async fn crawl_channels(&self, run_date: NaiveDate) -> Result<Vec<ChannelReport>> {
        if !self.client.is_authorized().await? {
            return Err(AppError::connection(
                "session is not authorized; complete authentication first",
            ));
        }

        let paths = PathScheme::new(&self.config.lake.base_path);
        self.ensure_partition_roots(&paths).await?;
        let writer = LakeWriter::new(paths);

        let media_channels: HashSet<_> = self.config.channels.media.iter().collect();
        let concurrency = self.config.crawler.max_concurrent_channels.max(1);

        // One bounded worker per channel; messages within a channel stay
        // strictly sequential because the remote cursor is stateful.
        let reports = stream::iter(self.config.channels.messages.iter())
            .map(|channel| {
                let writer = &writer;
                let media_channels = &media_channels;
                async move {
                    if self.shutdown.is_triggered() {
                        return ChannelReport::failed(channel.clone(), "interrupted by shutdown");
                    }
                    let crawler = ChannelCrawler::new(self.client.as_ref(), writer);
                    crawler
                        .crawl(
                            channel,
                            media_channels.contains(channel),
                            run_date,
                            &self.shutdown,
                        )
                        .await
                }
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(reports)
    }

    /// Create the top-level partition directories at run start.
    async fn ensure_partition_roots(&self, paths: &PathScheme) -> Result<()> {
        for kind in PartitionKind::ALL {
            tokio::fs::create_dir_all(paths.partition_root(kind)).await?;
        }
        Ok(())
    }
}
