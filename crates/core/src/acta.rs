//! Tally-sheet ("acta") photo pipeline.
//!
//! Uploads are checked before anything leaves the process, downscaled and
//! re-encoded as JPEG under a byte budget, and stored under a path that
//! groups photos by uploader and table.

use std::io::Cursor;

use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::RgbImage;

use crate::error::CoreError;
use crate::types::DbId;

/// Largest raw upload accepted (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Byte budget for the stored JPEG (1 MiB).
pub const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Longest side of the stored image in pixels.
pub const MAX_DIMENSION: u32 = 1920;

/// First JPEG quality tried.
pub const START_QUALITY: u8 = 85;

/// Lowest JPEG quality tried before giving up on the budget.
pub const MIN_QUALITY: u8 = 40;

const QUALITY_STEP: u8 = 5;

/// Content type of every stored acta.
pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";

/// `origen` recorded for photos uploaded from the upload page.
pub const ORIGIN_VOLUNTEER: &str = "voluntario";

/// A compressed photo ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedActa {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

/// Reject uploads that are empty, too large or not an image.
///
/// `content_type` is the type declared by the client, if any. The bytes are
/// sniffed regardless so a mislabelled file is still caught.
pub fn validate_upload(bytes: &[u8], content_type: Option<&str>) -> Result<(), CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Debe seleccionar una imagen".into()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(
            "La imagen no puede superar 5MB".into(),
        ));
    }
    if let Some(ct) = content_type {
        if !ct.is_empty() && !ct.starts_with("image/") && ct != "application/octet-stream" {
            return Err(CoreError::Validation(format!(
                "Tipo de archivo no permitido: {ct}"
            )));
        }
    }
    image::guess_format(bytes)
        .map_err(|_| CoreError::Validation("El archivo no es una imagen válida".into()))?;
    Ok(())
}

/// Dimensions that fit `width`×`height` inside [`MAX_DIMENSION`], keeping
/// the aspect ratio. Smaller images are left alone.
pub fn target_dimensions(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= MAX_DIMENSION {
        return (width, height);
    }
    let scale = f64::from(MAX_DIMENSION) / f64::from(longest);
    let w = (f64::from(width) * scale).round().max(1.0) as u32;
    let h = (f64::from(height) * scale).round().max(1.0) as u32;
    (w.min(MAX_DIMENSION), h.min(MAX_DIMENSION))
}

/// Decode, downscale and re-encode `bytes` as JPEG.
///
/// Quality steps down from [`START_QUALITY`] to [`MIN_QUALITY`] until the
/// output fits [`MAX_OUTPUT_BYTES`]; if even the lowest quality is over
/// budget that encoding is returned. CPU bound, so callers on the async
/// runtime should run it on the blocking pool.
pub fn compress_acta(bytes: &[u8]) -> Result<CompressedActa, CoreError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Validation(format!("No se pudo leer la imagen: {e}")))?;

    let (w, h) = target_dimensions(decoded.width(), decoded.height());
    let resized = if (w, h) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(w, h, FilterType::Triangle)
    };
    let rgb = resized.to_rgb8();

    let mut quality = START_QUALITY;
    loop {
        let encoded = encode_jpeg(&rgb, quality)?;
        if encoded.len() <= MAX_OUTPUT_BYTES || quality <= MIN_QUALITY {
            return Ok(CompressedActa {
                bytes: encoded,
                width: w,
                height: h,
                quality,
            });
        }
        quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
    }
}

fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, CoreError> {
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(img)
        .map_err(|e| CoreError::Internal(format!("JPEG encoding failed: {e}")))?;
    Ok(out.into_inner())
}

/// Storage path for an acta: `{user_id}/mesa-{mesa_id}/{mesa_id}-{unix_millis}.jpg`.
pub fn acta_storage_path(user_id: DbId, mesa_id: DbId, now: DateTime<Utc>) -> String {
    format!(
        "{user_id}/mesa-{mesa_id}/{mesa_id}-{}.jpg",
        now.timestamp_millis()
    )
}
