//! JSON codec for the photo manifest kept in the key-value store.
//!
//! The manifest is an array of `{"filepath": ..., "displayPath": ...}` objects,
//! newest photo first.

use crate::models::Photo;
use crate::service::PhotoGalleryError;

/// Decodes a stored manifest. A missing key or an empty string is an empty gallery.
pub fn decode_manifest(stored: Option<&str>) -> Result<Vec<Photo>, PhotoGalleryError> {
    match stored {
        None => Ok(Vec::new()),
        Some("") => Ok(Vec::new()),
        Some(value) => {
            serde_json::from_str(value).map_err(PhotoGalleryError::PersistedStateCorrupt)
        }
    }
}

pub fn encode_manifest(photos: &[Photo]) -> Result<String, PhotoGalleryError> {
    serde_json::to_string(photos).map_err(|e| PhotoGalleryError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_round_trip() {
        let photos = vec![
            Photo::new("a.jpeg"),
            Photo::new("b.jpeg").with_display_path("data:image/jpeg;base64,AAAA"),
        ];
        let encoded = encode_manifest(&photos).unwrap();
        assert_eq!(
            encoded,
            r#"[{"filepath":"a.jpeg"},{"filepath":"b.jpeg","displayPath":"data:image/jpeg;base64,AAAA"}]"#
        );
        assert_eq!(decode_manifest(Some(&encoded)).unwrap(), photos);
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        assert!(decode_manifest(None).unwrap().is_empty());
        assert!(decode_manifest(Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_manifest_is_corrupt() {
        let result = decode_manifest(Some("   "));
        assert!(matches!(
            result,
            Err(PhotoGalleryError::PersistedStateCorrupt(_))
        ));
    }

    #[test]
    fn test_corrupt_manifest() {
        let result = decode_manifest(Some("{not json"));
        assert!(matches!(
            result,
            Err(PhotoGalleryError::PersistedStateCorrupt(_))
        ));

        // valid JSON but wrong shape
        let result = decode_manifest(Some(r#"{"filepath":"a.jpeg"}"#));
        assert!(matches!(
            result,
            Err(PhotoGalleryError::PersistedStateCorrupt(_))
        ));
    }
}
