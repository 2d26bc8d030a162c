//! Lake storage: partition layout and persistence.
//!
//! ## Lake Layout
//!
//! ```text
//! {base}/
//! ├── telegram_messages/
//! │   └── YYYY-MM-DD/              # crawl run date, not message date
//! │       └── {channel}/
//! │           └── {messageId}.json
//! └── telegram_images/
//!     └── YYYY-MM-DD/
//!         └── {channel}/
//!             └── {messageId}_{mediaId}.{ext}
//! ```
//!
//! Distinct items never share a destination path, so writes need no
//! locking; re-runs overwrite whole files.

pub mod lake;
pub mod paths;

pub use lake::LakeWriter;
pub use paths::{PartitionKind, PathScheme, sanitize_channel_name};
