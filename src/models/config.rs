//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ChannelRef;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data lake location settings
    #[serde(default)]
    pub lake: LakeConfig,

    /// Crawl behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Channel lists
    #[serde(default)]
    pub channels: ChannelsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.lake.base_path.as_os_str().is_empty() {
            return Err(AppError::validation("lake.base_path is empty"));
        }
        if self.crawler.max_concurrent_channels == 0 {
            return Err(AppError::validation(
                "crawler.max_concurrent_channels must be > 0",
            ));
        }
        if self.channels.messages.is_empty() {
            return Err(AppError::validation("No message channels defined"));
        }
        for channel in &self.channels.media {
            if !self.channels.messages.contains(channel) {
                return Err(AppError::validation(format!(
                    "Media channel '{channel}' is not in the message channel list"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lake: LakeConfig::default(),
            crawler: CrawlerConfig::default(),
            channels: ChannelsConfig::default(),
        }
    }
}

/// Data lake location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakeConfig {
    /// Root directory of the raw data lake
    #[serde(default = "defaults::base_path")]
    pub base_path: PathBuf,
}

impl Default for LakeConfig {
    fn default() -> Self {
        Self {
            base_path: defaults::base_path(),
        }
    }
}

/// Crawl behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum channels crawled concurrently (1 = strictly sequential)
    #[serde(default = "defaults::max_concurrent_channels")]
    pub max_concurrent_channels: usize,

    /// Run date override (`YYYY-MM-DD`); defaults to the current date
    #[serde(default)]
    pub run_date: Option<NaiveDate>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_channels: defaults::max_concurrent_channels(),
            run_date: None,
        }
    }
}

/// Channel lists for the crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsConfig {
    /// Channels whose full message history is persisted
    #[serde(default = "defaults::message_channels")]
    pub messages: Vec<ChannelRef>,

    /// Subset of `messages` whose image media is also downloaded
    #[serde(default = "defaults::media_channels")]
    pub media: Vec<ChannelRef>,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            messages: defaults::message_channels(),
            media: defaults::media_channels(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::ChannelRef;

    pub fn base_path() -> PathBuf {
        PathBuf::from("data/raw")
    }

    pub fn max_concurrent_channels() -> usize {
        1
    }

    pub fn message_channels() -> Vec<ChannelRef> {
        vec![
            ChannelRef::new("https://t.me/lobelia4cosmetics"),
            ChannelRef::new("https://t.me/tikvahpharma"),
            ChannelRef::new("https://t.me/CheMed123"),
        ]
    }

    pub fn media_channels() -> Vec<ChannelRef> {
        vec![
            ChannelRef::new("https://t.me/lobelia4cosmetics"),
            ChannelRef::new("https://t.me/CheMed123"),
        ]
    }
}
