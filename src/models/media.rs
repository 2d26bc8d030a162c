//! Media descriptor and classification outcome types.

use serde::{Deserialize, Serialize};

/// Description of a message's attached binary payload.
///
/// A tagged variant rather than a runtime shape check: every media kind
/// the source can report maps to exactly one arm here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaDescriptor {
    /// The message carries no media.
    None,

    /// A native photo attachment.
    Photo { photo_id: i64 },

    /// A generic document attachment with a MIME type.
    Document { document_id: i64, mime_type: String },
}

impl MediaDescriptor {
    /// Whether the message carries any media at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, MediaDescriptor::None)
    }
}

/// The classifier's verdict for one media descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaDecision {
    /// No media on the message; nothing to do.
    Absent,

    /// Media present but not an image; skipped without any remote I/O.
    SkipNonImage { reason: String },

    /// Native photo, stored with the fixed `jpg` extension.
    DownloadPhoto { media_id: i64 },

    /// Image document, stored with the MIME subtype as extension.
    DownloadImageDocument { media_id: i64, ext: String },
}

impl MediaDecision {
    /// The (media id, extension) pair to download, if this decision
    /// calls for a download.
    pub fn download_target(&self) -> Option<(i64, &str)> {
        match self {
            MediaDecision::Absent | MediaDecision::SkipNonImage { .. } => None,
            MediaDecision::DownloadPhoto { media_id } => Some((*media_id, "jpg")),
            MediaDecision::DownloadImageDocument { media_id, ext } => Some((*media_id, ext)),
        }
    }
}
