//! Startup-time asset loading: image decoding and shader source files.
//!
//! Everything here runs once before the frame loop starts. Failures are
//! fatal for the caller (a missing texture or shader cannot be recovered
//! mid-session), so there is no retry machinery: errors propagate up and
//! abort initialization. GPU upload is deliberately not this crate's job;
//! the renderer consumes the decoded bytes.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },
}

pub type AssetResult<T> = Result<T, AssetError>;

/// A decoded image, tightly packed RGBA8.
#[derive(Debug)]
pub struct ImageRgba8 {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Loads and decodes an image file to RGBA8.
pub fn load_rgba8(path: impl AsRef<Path>) -> AssetResult<ImageRgba8> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_owned(),
        source,
    })?;
    decode_rgba8(&bytes, path)
}

/// Decodes in-memory image bytes to RGBA8. `path` is only used for error
/// reporting.
pub fn decode_rgba8(bytes: &[u8], path: impl AsRef<Path>) -> AssetResult<ImageRgba8> {
    let path = path.as_ref();
    let decoded = image::load_from_memory(bytes).map_err(|source| AssetError::ImageDecode {
        path: path.to_owned(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("decoded `{}` ({width}x{height})", path.display());

    Ok(ImageRgba8 {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Reads a text asset (shader source) into a `String`.
pub fn load_string(path: impl AsRef<Path>) -> AssetResult<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_png_2x2() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .expect("in-memory png encode");
        bytes.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let img = decode_rgba8(&red_png_2x2(), "red.png").expect("valid png");
        assert_eq!((img.width, img.height), (2, 2));
        assert_eq!(img.pixels.len(), 16);
        assert_eq!(&img.pixels[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_rgba8(&[0, 1, 2, 3], "junk.bin").unwrap_err();
        assert!(matches!(err, AssetError::ImageDecode { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_string("/definitely/not/here.wgsl").unwrap_err();
        assert!(err.to_string().contains("not/here.wgsl"));
    }
}
