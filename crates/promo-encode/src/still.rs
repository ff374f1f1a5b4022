use std::path::Path;

use image::{ImageFormat, RgbImage, RgbaImage};

use promo_core::frame::{FrameBuffer, PixelFormat};
use promo_core::{PromoError, PromoResult};

/// Write a single frame as a PNG file.
pub fn write_png(frame: &FrameBuffer, path: &Path) -> PromoResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let data = frame.data.clone();
    let result = match frame.format {
        PixelFormat::Rgba8 => RgbaImage::from_raw(frame.width, frame.height, data)
            .ok_or_else(size_mismatch)?
            .save_with_format(path, ImageFormat::Png),
        PixelFormat::Rgb8 => RgbImage::from_raw(frame.width, frame.height, data)
            .ok_or_else(size_mismatch)?
            .save_with_format(path, ImageFormat::Png),
    };
    result.map_err(|e| PromoError::Encode(format!("failed to write {}: {}", path.display(), e)))?;
    tracing::info!(
        "Wrote {}x{} still to {}",
        frame.width,
        frame.height,
        path.display()
    );
    Ok(())
}

fn size_mismatch() -> PromoError {
    PromoError::Encode("frame data does not match its dimensions".into())
}
