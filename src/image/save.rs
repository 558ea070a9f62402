//! Image saving utilities.

use std::borrow::Cow;
use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::error::{Error, Result};

use super::{ColorMode, PixelArray};

/// Save an image as a JPEG file.
///
/// JPEG carries neither alpha nor more than 8 bits per sample, so such
/// images are reduced to `Luma8` or `Rgb8` before encoding.
///
/// # Arguments
///
/// * `img` - Image to encode
/// * `path` - Output file path, written as-is
/// * `quality` - JPEG quality (1-100)
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written. The
/// image is encoded in memory first, so a failed encode leaves no file.
pub fn save_jpeg<P: AsRef<Path>>(img: &DynamicImage, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();

    let encodable = jpeg_compatible(img);

    let mut output = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
    encodable
        .write_with_encoder(encoder)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    std::fs::write(path, output)?;

    Ok(())
}

fn jpeg_compatible(img: &DynamicImage) -> Cow<'_, DynamicImage> {
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(img),
        other if other.color().has_color() => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
        other => Cow::Owned(DynamicImage::ImageLuma8(other.to_luma8())),
    }
}

/// Convert an 8-bit HWC pixel array back into a `DynamicImage`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the channel axis does not match the
/// array's color mode or the dimensions do not fit in `u32`.
pub fn array_to_image(pixels: &PixelArray) -> Result<DynamicImage> {
    let (height, width, channels) = pixels.data.dim();

    if channels != pixels.mode.channels() {
        return Err(Error::ShapeMismatch {
            expected: format!("{} channels for {:?}", pixels.mode.channels(), pixels.mode),
            actual: format!("{channels} channels"),
        });
    }

    let dims_error = || Error::ShapeMismatch {
        expected: "dimensions within u32".to_string(),
        actual: format!("{width}x{height}"),
    };
    let width = u32::try_from(width).map_err(|_| dims_error())?;
    let height = u32::try_from(height).map_err(|_| dims_error())?;

    // Logical iteration order is row-major HWC regardless of memory layout.
    let raw: Vec<u8> = pixels.data.iter().copied().collect();

    let img = match pixels.mode {
        ColorMode::Luma => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        ColorMode::LumaAlpha => {
            GrayAlphaImage::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8)
        }
        ColorMode::Rgb => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        ColorMode::Rgba => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
    };

    img.ok_or_else(|| Error::ShapeMismatch {
        expected: format!("{width}x{height}x{channels} buffer"),
        actual: "short buffer".to_string(),
    })
}
