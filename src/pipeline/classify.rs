// src/pipeline/classify.rs

//! Media classification.

use crate::models::{MediaDecision, MediaDescriptor};

/// Decide what to do with a message's media.
///
/// Pure and total: every descriptor maps to exactly one outcome, with
/// no I/O. Photos download with a fixed `jpg` extension; documents
/// download only when their MIME type is `image/<subtype>`, using the
/// subtype as the extension; everything else is skipped.
pub fn classify(media: &MediaDescriptor) -> MediaDecision {
    match media {
        MediaDescriptor::None => MediaDecision::Absent,
        MediaDescriptor::Photo { photo_id } => MediaDecision::DownloadPhoto {
            media_id: *photo_id,
        },
        MediaDescriptor::Document {
            document_id,
            mime_type,
        } => match mime_type.strip_prefix("image/") {
            Some(subtype) if !subtype.is_empty() => MediaDecision::DownloadImageDocument {
                media_id: *document_id,
                ext: subtype.to_string(),
            },
            _ => MediaDecision::SkipNonImage {
                reason: format!("non-image MIME type '{mime_type}'"),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_media_is_absent() {
        assert_eq!(classify(&MediaDescriptor::None), MediaDecision::Absent);
    }

    #[test]
    fn photo_downloads_as_jpg() {
        let decision = classify(&MediaDescriptor::Photo { photo_id: 77 });
        assert_eq!(decision, MediaDecision::DownloadPhoto { media_id: 77 });
        assert_eq!(decision.download_target(), Some((77, "jpg")));
    }

    #[test]
    fn image_document_downloads_with_mime_subtype() {
        let decision = classify(&MediaDescriptor::Document {
            document_id: 9,
            mime_type: "image/png".to_string(),
        });
        assert_eq!(
            decision,
            MediaDecision::DownloadImageDocument {
                media_id: 9,
                ext: "png".to_string(),
            }
        );
    }

    #[test]
    fn non_image_document_is_skipped() {
        let decision = classify(&MediaDescriptor::Document {
            document_id: 9,
            mime_type: "application/pdf".to_string(),
        });
        assert!(matches!(decision, MediaDecision::SkipNonImage { .. }));
    }

    #[test]
    fn bare_image_prefix_is_skipped() {
        let decision = classify(&MediaDescriptor::Document {
            document_id: 9,
            mime_type: "image/".to_string(),
        });
        assert!(matches!(decision, MediaDecision::SkipNonImage { .. }));
    }
}
