//! Image loading utilities.

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use ndarray::Array3;

use crate::error::{Error, Result};

use super::{ColorMode, PixelArray};

/// Decode an image from disk.
///
/// The file is opened, decoded, and closed before this returns; the caller
/// owns the decoded raster.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the file is missing, unreadable, or not a
/// supported image.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

/// Convert a `DynamicImage` to an 8-bit HWC pixel array.
///
/// The channel layout is preserved; 16-bit and float samples are reduced to
/// 8 bits.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the raw buffer does not match the
/// image dimensions.
pub fn image_to_array(img: &DynamicImage) -> Result<PixelArray> {
    let mode = ColorMode::of(img);
    let (width, height) = img.dimensions();

    let raw = match (mode, img) {
        (ColorMode::Luma, DynamicImage::ImageLuma8(buf)) => buf.as_raw().clone(),
        (ColorMode::Rgb, DynamicImage::ImageRgb8(buf)) => buf.as_raw().clone(),
        (ColorMode::Rgba, DynamicImage::ImageRgba8(buf)) => buf.as_raw().clone(),
        (ColorMode::Luma, _) => img.to_luma8().into_raw(),
        (ColorMode::LumaAlpha, _) => img.to_luma_alpha8().into_raw(),
        (ColorMode::Rgb, _) => img.to_rgb8().into_raw(),
        (ColorMode::Rgba, _) => img.to_rgba8().into_raw(),
    };

    let shape = (height as usize, width as usize, mode.channels());
    let data = Array3::from_shape_vec(shape, raw).map_err(|err| Error::ShapeMismatch {
        expected: format!("{shape:?}"),
        actual: err.to_string(),
    })?;

    Ok(PixelArray { mode, data })
}
