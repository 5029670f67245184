//! Validation shared by avatar and cover uploads.

use crate::server::error::AppError;

/// Largest accepted image body.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Returns the file extension for an accepted image content type.
///
/// # Returns
/// - `Ok(ext)` - `png`, `jpg` or `webp`
/// - `Err(AppError::BadRequest)` - Empty or oversized body, or unsupported content type
pub fn image_extension(content_type: Option<&str>, len: usize) -> Result<&'static str, AppError> {
    if len == 0 {
        return Err(AppError::BadRequest("Image body is empty".to_string()));
    }
    if len > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(
            "Image must be at most 5 MiB".to_string(),
        ));
    }

    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase());

    match mime.as_deref() {
        Some("image/png") => Ok("png"),
        Some("image/jpeg") => Ok("jpg"),
        Some("image/webp") => Ok("webp"),
        _ => Err(AppError::BadRequest(
            "Image must be image/png, image/jpeg or image/webp".to_string(),
        )),
    }
}
