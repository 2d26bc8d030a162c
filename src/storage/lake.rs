//! Lake persistence: message records and media assets.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{ChannelEntity, MediaDecision, MessageRecord};
use crate::services::TelegramClient;
use crate::storage::paths::PathScheme;

/// Writes records and media assets into the lake.
///
/// All writes are full-file overwrites, so re-running a crawl replaces
/// prior output for the same item.
#[derive(Debug, Clone)]
pub struct LakeWriter {
    paths: PathScheme,
}

impl LakeWriter {
    pub fn new(paths: PathScheme) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PathScheme {
        &self.paths
    }

    /// Ensure the parent directory chain exists. A pre-existing
    /// directory is not an error.
    async fn ensure_dir(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename), so a
    /// partially written record never lands at its final path.
    async fn write_bytes(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        Ok(())
    }

    /// Serialize one message's enriched record to its lake path.
    ///
    /// Errors are scoped to this message: the caller logs and moves on.
    pub async fn write_record(
        &self,
        record: &MessageRecord,
        channel: &ChannelEntity,
        run_date: NaiveDate,
    ) -> Result<PathBuf> {
        let path = self.paths.message_path(run_date, channel, record.id);
        let document = record.to_document(channel);
        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| AppError::record_write(&channel.title, record.id, e))?;

        Self::ensure_dir(&path)
            .await
            .map_err(|e| AppError::record_write(&channel.title, record.id, e))?;
        Self::write_bytes(&path, &bytes)
            .await
            .map_err(|e| AppError::record_write(&channel.title, record.id, e))?;

        log::debug!(
            "Saved message {} from '{}' to {}",
            record.id,
            channel.title,
            path.display()
        );
        Ok(path)
    }

    /// Download one message's media per the classifier's decision.
    ///
    /// `Absent` and `SkipNonImage` return `Ok(None)` without contacting
    /// the client. On a failed download no partial file survives at the
    /// requested path. The returned path is the one requested; the
    /// client may have corrected the extension on disk.
    pub async fn fetch_media(
        &self,
        client: &dyn TelegramClient,
        record: &MessageRecord,
        decision: &MediaDecision,
        channel: &ChannelEntity,
        run_date: NaiveDate,
    ) -> Result<Option<PathBuf>> {
        let Some((media_id, ext)) = decision.download_target() else {
            if let MediaDecision::SkipNonImage { reason } = decision {
                log::info!(
                    "Skipping media for message {} in '{}': {}",
                    record.id,
                    channel.title,
                    reason
                );
            }
            return Ok(None);
        };

        let path = self
            .paths
            .media_path(run_date, channel, record.id, media_id, ext);
        Self::ensure_dir(&path)
            .await
            .map_err(|e| AppError::media_fetch(&channel.title, record.id, e))?;

        match client.download_media(channel, record, &path).await {
            Ok(written) => {
                if written != path {
                    log::debug!(
                        "Client corrected media path {} to {}",
                        path.display(),
                        written.display()
                    );
                }
                Ok(Some(path))
            }
            Err(e) => {
                // A failed download must not leave a partial file behind.
                if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        log::warn!(
                            "Could not remove partial media file {}: {}",
                            path.display(),
                            cleanup
                        );
                    }
                }
                Err(AppError::media_fetch(&channel.title, record.id, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, MediaDescriptor};
    use tempfile::TempDir;

    fn channel() -> ChannelEntity {
        ChannelEntity {
            id: 42,
            title: "PharmaNews".to_string(),
        }
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn record(id: i64, text: &str) -> MessageRecord {
        MessageRecord::new(
            id,
            MediaDescriptor::None,
            vec![
                ("id".to_string(), FieldValue::Int(id)),
                ("message".to_string(), FieldValue::Text(text.to_string())),
            ],
        )
    }

    #[tokio::test]
    async fn write_record_creates_partitioned_file() {
        let tmp = TempDir::new().unwrap();
        let writer = LakeWriter::new(PathScheme::new(tmp.path()));

        let path = writer
            .write_record(&record(100, "hello"), &channel(), run_date())
            .await
            .unwrap();

        assert_eq!(
            path,
            tmp.path()
                .join("telegram_messages/2024-03-01/pharmanews/100.json")
        );
        assert!(path.exists());
    }

    #[tokio::test]
    async fn written_record_round_trips_with_enrichment() {
        let tmp = TempDir::new().unwrap();
        let writer = LakeWriter::new(PathScheme::new(tmp.path()));
        let record = record(100, "round trip");

        let path = writer
            .write_record(&record, &channel(), run_date())
            .await
            .unwrap();

        let bytes = tokio::fs::read(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, record.to_document(&channel()));
        assert_eq!(value["channel_id"], serde_json::Value::from(42));
        assert_eq!(value["channel_title"], "PharmaNews");
    }

    #[tokio::test]
    async fn rewriting_a_record_overwrites_prior_content() {
        let tmp = TempDir::new().unwrap();
        let writer = LakeWriter::new(PathScheme::new(tmp.path()));

        writer
            .write_record(&record(100, "first"), &channel(), run_date())
            .await
            .unwrap();
        let path = writer
            .write_record(&record(100, "second"), &channel(), run_date())
            .await
            .unwrap();

        let bytes = tokio::fs::read(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message"], "second");
    }

    #[tokio::test]
    async fn write_record_tolerates_existing_directories() {
        let tmp = TempDir::new().unwrap();
        let writer = LakeWriter::new(PathScheme::new(tmp.path()));

        tokio::fs::create_dir_all(tmp.path().join("telegram_messages/2024-03-01/pharmanews"))
            .await
            .unwrap();

        assert!(
            writer
                .write_record(&record(1, "pre-created dirs"), &channel(), run_date())
                .await
                .is_ok()
        );
    }
}
