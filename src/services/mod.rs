// src/services/mod.rs

//! External service capabilities consumed by the pipeline.

mod telegram;

pub use telegram::{MessageStream, TelegramClient};
