//! Image reference normalization.
//!
//! Vision requests accept either a fetchable URL or an inline `data:` URI.
//! Local files get read and inlined so the model provider never needs
//! filesystem access.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};

/// Turns the CLI's image argument into something a vision model can consume.
/// URLs and `data:` URIs pass through untouched; local paths are inlined.
pub fn to_image_reference(input: &str) -> Result<String, String> {
    if input.starts_with("http://")
        || input.starts_with("https://")
        || input.starts_with("data:")
    {
        return Ok(input.to_string());
    }

    let path = Path::new(input);
    if !path.exists() {
        return Err(format!("Image file not found: {}", input));
    }

    let bytes =
        std::fs::read(path).map_err(|e| format!("Failed to read image '{}': {}", input, e))?;
    let encoded = general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", mime_for(path), encoded))
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
