//! Photo capture payloads
//!
//! A check-in selfie arrives as an encoded image payload - either a data URL
//! (`data:image/png;base64,...`) from the camera capture UI, or a bare
//! base64 string from a file upload. Validation stops at "is an image";
//! no decoding beyond the base64 layer is attempted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CkError, Result};

/// An encoded still image suitable for embedding in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoPayload(String);

impl PhotoPayload {
    /// Validate and wrap a raw payload string
    ///
    /// An empty payload means the user cancelled the picker and is reported
    /// as `NoImageSelected`, not as a malformed image.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CkError::NoImageSelected);
        }

        if let Some(rest) = trimmed.strip_prefix("data:") {
            let (header, body) = rest
                .split_once(',')
                .ok_or_else(|| CkError::InvalidPhoto("data URL has no payload".into()))?;

            if !header.starts_with("image/") {
                return Err(CkError::InvalidPhoto(format!(
                    "not an image media type: {}",
                    header
                )));
            }
            if !header.ends_with(";base64") {
                return Err(CkError::InvalidPhoto("data URL is not base64-encoded".into()));
            }
            if body.is_empty() {
                return Err(CkError::NoImageSelected);
            }
            BASE64
                .decode(body)
                .map_err(|e| CkError::InvalidPhoto(format!("bad base64 payload: {}", e)))?;
        } else {
            // Bare base64 from a file upload
            BASE64
                .decode(trimmed)
                .map_err(|e| CkError::InvalidPhoto(format!("bad base64 payload: {}", e)))?;
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Media type from the data URL header, if the payload carries one
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let header = rest.split_once(',')?.0;
        Some(header.split(';').next().unwrap_or(header))
    }

    /// The encoded payload as stored on a record
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the payload, yielding the encoded string
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_url() {
        let photo = PhotoPayload::parse("data:image/png;base64,AAAA").unwrap();
        assert_eq!(photo.media_type(), Some("image/png"));
        assert_eq!(photo.as_str(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_parse_bare_base64() {
        let photo = PhotoPayload::parse("aGVsbG8=").unwrap();
        assert_eq!(photo.media_type(), None);
    }

    #[test]
    fn test_empty_payload_is_no_image_selected() {
        assert!(matches!(PhotoPayload::parse(""), Err(CkError::NoImageSelected)));
        assert!(matches!(PhotoPayload::parse("   "), Err(CkError::NoImageSelected)));
    }

    #[test]
    fn test_non_image_media_type_rejected() {
        let result = PhotoPayload::parse("data:text/plain;base64,AAAA");
        assert!(matches!(result, Err(CkError::InvalidPhoto(_))));
    }

    #[test]
    fn test_malformed_base64_rejected() {
        let result = PhotoPayload::parse("data:image/jpeg;base64,@@@@");
        assert!(matches!(result, Err(CkError::InvalidPhoto(_))));
    }

    #[test]
    fn test_empty_data_url_body_is_no_image_selected() {
        let result = PhotoPayload::parse("data:image/png;base64,");
        assert!(matches!(result, Err(CkError::NoImageSelected)));
    }
}
