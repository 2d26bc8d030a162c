//! Pure path construction for the lake.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::models::ChannelEntity;

/// Top-level partition kinds in the lake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionKind {
    Messages,
    Images,
}

impl PartitionKind {
    /// Directory name of this partition under the lake base.
    pub fn dir_name(self) -> &'static str {
        match self {
            PartitionKind::Messages => "telegram_messages",
            PartitionKind::Images => "telegram_images",
        }
    }

    pub const ALL: [PartitionKind; 2] = [PartitionKind::Messages, PartitionKind::Images];
}

/// Sanitize a channel title for use as a directory name.
///
/// Keeps alphanumerics, spaces, underscores and hyphens; spaces become
/// underscores; the result is lowercased. Deterministic and free of
/// path separators or traversal sequences by construction.
pub fn sanitize_channel_name(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .replace(' ', "_")
        .to_lowercase()
}

/// Maps (partition kind, run date, channel, item ids) to lake paths.
///
/// Path computation only; directory creation lives in [`LakeWriter`].
///
/// [`LakeWriter`]: crate::storage::LakeWriter
#[derive(Debug, Clone)]
pub struct PathScheme {
    base: PathBuf,
}

impl PathScheme {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Root directory of one partition kind.
    pub fn partition_root(&self, kind: PartitionKind) -> PathBuf {
        self.base.join(kind.dir_name())
    }

    /// Directory holding one channel's items for one run.
    ///
    /// A title that sanitizes to the empty string falls back to the
    /// numeric channel id, so every channel gets a valid, non-colliding
    /// directory.
    pub fn channel_dir(
        &self,
        kind: PartitionKind,
        run_date: NaiveDate,
        channel: &ChannelEntity,
    ) -> PathBuf {
        let mut name = sanitize_channel_name(&channel.title);
        if name.is_empty() {
            name = channel.id.to_string();
        }
        self.partition_root(kind)
            .join(run_date.format("%Y-%m-%d").to_string())
            .join(name)
    }

    /// Target path for one message's JSON record.
    pub fn message_path(
        &self,
        run_date: NaiveDate,
        channel: &ChannelEntity,
        message_id: i64,
    ) -> PathBuf {
        self.channel_dir(PartitionKind::Messages, run_date, channel)
            .join(format!("{message_id}.json"))
    }

    /// Target path for one message's media asset.
    pub fn media_path(
        &self,
        run_date: NaiveDate,
        channel: &ChannelEntity,
        message_id: i64,
        media_id: i64,
        ext: &str,
    ) -> PathBuf {
        self.channel_dir(PartitionKind::Images, run_date, channel)
            .join(format!("{message_id}_{media_id}.{ext}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(id: i64, title: &str) -> ChannelEntity {
        ChannelEntity {
            id,
            title: title.to_string(),
        }
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn sanitize_keeps_allowed_characters_only() {
        assert_eq!(sanitize_channel_name("PharmaNews"), "pharmanews");
        assert_eq!(sanitize_channel_name("Che Med-123!"), "che_med-123");
        assert_eq!(sanitize_channel_name("A/B\\C"), "abc");
    }

    #[test]
    fn sanitize_strips_traversal_sequences() {
        assert_eq!(sanitize_channel_name("../../etc"), "etc");
        assert_eq!(sanitize_channel_name(".."), "");
        assert!(!sanitize_channel_name("a/../b").contains('/'));
    }

    #[test]
    fn sanitize_is_deterministic() {
        let title = "Ünïcode Channel — 42";
        assert_eq!(sanitize_channel_name(title), sanitize_channel_name(title));
    }

    #[test]
    fn message_path_matches_lake_layout() {
        let scheme = PathScheme::new("/lake");
        let path = scheme.message_path(run_date(), &channel(42, "PharmaNews"), 100);
        assert_eq!(
            path,
            PathBuf::from("/lake/telegram_messages/2024-03-01/pharmanews/100.json")
        );
    }

    #[test]
    fn media_path_matches_lake_layout() {
        let scheme = PathScheme::new("/lake");
        let path = scheme.media_path(run_date(), &channel(42, "PharmaNews"), 101, 77, "jpg");
        assert_eq!(
            path,
            PathBuf::from("/lake/telegram_images/2024-03-01/pharmanews/101_77.jpg")
        );
    }

    #[test]
    fn empty_sanitized_title_falls_back_to_channel_id() {
        let scheme = PathScheme::new("/lake");
        let path = scheme.message_path(run_date(), &channel(987, "!!!"), 5);
        assert_eq!(
            path,
            PathBuf::from("/lake/telegram_messages/2024-03-01/987/5.json")
        );
    }
}
