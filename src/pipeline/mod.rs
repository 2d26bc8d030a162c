// src/pipeline/mod.rs

//! Ingestion pipeline: media classification, per-channel crawling and
//! run orchestration.

mod classify;
mod crawl;
mod run;

pub use classify::classify;
pub use crawl::ChannelCrawler;
pub use run::CrawlOrchestrator;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative shutdown flag.
///
/// Checked at channel and message boundaries only, never mid-write, so
/// no record file is left partially written on shutdown.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_flag_is_shared_across_clones() {
        let flag = ShutdownFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_triggered());
        flag.trigger();
        assert!(clone.is_triggered());
    }
}
