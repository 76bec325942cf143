//! Screenshot payload value object
//!
//! Wraps the raw screenshot bytes together with the format detected from
//! the file's magic bytes. Construction fails for empty, oversized or
//! unrecognized images.
//!
//! # Examples
//!
//! ```
//! use domain::{ImageFormat, ImagePayload};
//!
//! let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
//! let image = ImagePayload::new(png, 1024).unwrap();
//! assert_eq!(image.format(), ImageFormat::Png);
//!
//! assert!(ImagePayload::new(Vec::new(), 1024).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Supported screenshot formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
}

impl ImageFormat {
    /// Detect the format from the leading bytes of an image
    #[must_use]
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(PNG_MAGIC) {
            Some(Self::Png)
        } else if data.starts_with(JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    /// Get the MIME type for this format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
        }
    }
}

/// A validated in-game screenshot
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data: Vec<u8>,
    format: ImageFormat,
}

impl ImagePayload {
    /// Validate raw bytes as a screenshot
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are empty, larger than `max_bytes`, or
    /// neither PNG nor JPEG.
    pub fn new(data: Vec<u8>, max_bytes: usize) -> Result<Self, DomainError> {
        if data.is_empty() {
            return Err(DomainError::EmptyPayload("image"));
        }

        if data.len() > max_bytes {
            return Err(DomainError::PayloadTooLarge {
                what: "image",
                size_bytes: data.len(),
                max_bytes,
            });
        }

        let format = ImageFormat::detect(&data).ok_or_else(|| {
            DomainError::InvalidImage("file does not match PNG or JPEG format".to_string())
        })?;

        Ok(Self { data, format })
    }

    /// Raw image bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Detected format
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// MIME type of the detected format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("format", &self.format)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}
