//! Per-channel and per-run crawl reporting.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::ChannelRef;

/// Terminal state of one channel's crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelStatus {
    /// The message stream was consumed to exhaustion.
    Completed,

    /// The channel never reached streaming, or streaming was cut short.
    Failed { reason: String },
}

/// Counters and outcome for one channel's crawl.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelReport {
    /// The configured channel locator
    pub channel: ChannelRef,

    /// Resolved display title, if resolution succeeded
    pub title: Option<String>,

    /// Terminal state of the crawl
    pub status: ChannelStatus,

    /// Message records written to the lake
    pub messages_written: usize,

    /// Messages whose record write (or stream yield) failed
    pub messages_failed: usize,

    /// Media assets downloaded to the lake
    pub media_downloaded: usize,

    /// Media downloads that failed
    pub media_failed: usize,
}

impl ChannelReport {
    /// A fresh report for a resolved channel; counters start at zero.
    pub fn new(channel: ChannelRef, title: impl Into<String>) -> Self {
        Self {
            channel,
            title: Some(title.into()),
            status: ChannelStatus::Completed,
            messages_written: 0,
            messages_failed: 0,
            media_downloaded: 0,
            media_failed: 0,
        }
    }

    /// A report for a channel that failed before streaming anything.
    pub fn failed(channel: ChannelRef, reason: impl Into<String>) -> Self {
        Self {
            channel,
            title: None,
            status: ChannelStatus::Failed {
                reason: reason.into(),
            },
            messages_written: 0,
            messages_failed: 0,
            media_downloaded: 0,
            media_failed: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ChannelStatus::Completed
    }
}

/// Outcome of a full crawl run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Date governing partition placement for this run
    pub run_date: NaiveDate,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// One report per configured channel
    pub channels: Vec<ChannelReport>,
}

impl RunSummary {
    /// Total message records written across all channels.
    pub fn total_messages(&self) -> usize {
        self.channels.iter().map(|c| c.messages_written).sum()
    }

    /// Total media assets downloaded across all channels.
    pub fn total_media(&self) -> usize {
        self.channels.iter().map(|c| c.media_downloaded).sum()
    }

    /// Channels that did not complete.
    pub fn failed_channels(&self) -> impl Iterator<Item = &ChannelReport> {
        self.channels.iter().filter(|c| !c.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_totals_span_channels() {
        let mut first = ChannelReport::new(ChannelRef::new("https://t.me/a"), "A");
        first.messages_written = 3;
        first.media_downloaded = 1;

        let mut second = ChannelReport::new(ChannelRef::new("https://t.me/b"), "B");
        second.messages_written = 2;

        let failed = ChannelReport::failed(ChannelRef::new("https://t.me/c"), "unresolvable");

        let summary = RunSummary {
            run_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            channels: vec![first, second, failed],
        };

        assert_eq!(summary.total_messages(), 5);
        assert_eq!(summary.total_media(), 1);
        assert_eq!(summary.failed_channels().count(), 1);
    }
}
