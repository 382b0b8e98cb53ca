//! In-memory image payload preparation.
//!
//! Bitmaps are re-serialized to PNG regardless of their source format and
//! base64-encoded for inline embedding in chat content parts. Nothing is
//! ever written to disk.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageOutputFormat};

use crate::error::EncodeError;

/// Base64-encoded PNG payload ready for inline embedding.
///
/// Encoding is deterministic: the same pixel buffer always produces the same
/// payload string (modulo the PNG encoder version).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Png(String);

impl Base64Png {
    /// Re-encode `image` as PNG into a memory buffer and base64 it.
    ///
    /// The bitmap is only read; encoder failures propagate unmodified.
    pub fn encode(image: &DynamicImage) -> Result<Self, EncodeError> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageOutputFormat::Png)?;
        Ok(Self(STANDARD.encode(buffer.into_inner())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render as a `data:` URL, the form multimodal chat APIs accept inline.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.0)
    }
}
