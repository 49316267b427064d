use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbaImage};

use crate::error::{AnalysisError, AnalysisResult};

pub const PNG_MIME_TYPE: &str = "image/png";

/// Base64 PNG data, without the `data:` URL prefix, ready to be sent inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime_type: &'static str,
    data: String,
}

impl ImagePayload {
    /// Strips the `data:<mime>;base64,` prefix from a data URL.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidImageFormat` if the URL is empty, has no
    /// comma separator, or carries nothing after it.
    pub fn from_data_url(data_url: &str) -> AnalysisResult<Self> {
        if data_url.is_empty() {
            return Err(AnalysisError::InvalidImageFormat);
        }
        match data_url.split(',').nth(1) {
            Some(data) if !data.is_empty() => Ok(Self {
                mime_type: PNG_MIME_TYPE,
                data: data.to_owned(),
            }),
            _ => Err(AnalysisError::InvalidImageFormat),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn into_data(self) -> String {
        self.data
    }
}

/// Encodes a bitmap as a `data:image/png;base64,...` URL.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidImageFormat` if PNG encoding fails.
pub fn encode_png_data_url(bitmap: &RgbaImage) -> AnalysisResult<String> {
    let mut png = Vec::new();
    bitmap
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|err| {
            log::error!("Failed to encode canvas as PNG: {}", err);
            AnalysisError::InvalidImageFormat
        })?;
    log::debug!(
        "Encoded {}x{} canvas into {} PNG bytes",
        bitmap.width(),
        bitmap.height(),
        png.len()
    );
    Ok(format!("data:{};base64,{}", PNG_MIME_TYPE, STANDARD.encode(&png)))
}

/// Bitmap to transmittable payload: PNG, base64, prefix stripped.
pub fn prepare_payload(bitmap: &RgbaImage) -> AnalysisResult<ImagePayload> {
    let data_url = encode_png_data_url(bitmap)?;
    ImagePayload::from_data_url(&data_url)
}
