// src/lib.rs

//! tglake — Telegram channel ingestion into a partitioned data lake.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
