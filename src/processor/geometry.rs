//! Size arithmetic, crop placement, and rotation.

use image::{DynamicImage, Luma, LumaA, Rgb, Rgba};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::Rng;

use crate::error::{Error, Result};

/// Largest buffer a resize may allocate, in bytes.
pub const MAX_RESIZE_BYTES: u64 = 1 << 31;

/// Bytes per pixel of the resampler's intermediate `Rgba<f32>` buffer, the
/// widest pixel type a resize produces.
const RESAMPLE_BYTES_PER_PIXEL: u64 = 16;

/// Output size for resizing by a raw multiplier.
///
/// Each side is `round(side * multiplier)`, at least 1 pixel.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if the multiplier is not a positive
/// finite number, a side does not fit in `u32`, or the resize would need
/// more than [`MAX_RESIZE_BYTES`].
pub fn scaled_size(width: u32, height: u32, multiplier: f64) -> Result<(u32, u32)> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "multiplier".to_string(),
            reason: format!("must be a positive finite number, got {multiplier}"),
        });
    }

    let new_width = scaled_side(width, multiplier, "multiplier")?;
    let new_height = scaled_side(height, multiplier, "multiplier")?;

    // Vertical pass is source width by new height; horizontal pass is new size.
    let bytes = u64::from(width.max(new_width))
        .checked_mul(u64::from(new_height))
        .and_then(|pixels| pixels.checked_mul(RESAMPLE_BYTES_PER_PIXEL));
    match bytes {
        Some(bytes) if bytes <= MAX_RESIZE_BYTES => Ok((new_width, new_height)),
        _ => Err(Error::InvalidParameter {
            name: "multiplier".to_string(),
            reason: format!(
                "{width}x{height} * {multiplier} = {new_width}x{new_height} exceeds the \
                 {MAX_RESIZE_BYTES} byte resize limit"
            ),
        }),
    }
}

/// Crop box size for the given fractions of the source size.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if either fraction lies outside
/// `[0, 1]`, since the box would not fit inside the source.
pub fn crop_size(
    width: u32,
    height: u32,
    width_fraction: f64,
    height_fraction: f64,
) -> Result<(u32, u32)> {
    for (name, fraction) in [
        ("width_fraction", width_fraction),
        ("height_fraction", height_fraction),
    ] {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidParameter {
                name: name.to_string(),
                reason: format!("must be between 0.0 and 1.0, got {fraction}"),
            });
        }
    }

    Ok((
        scaled_side(width, width_fraction, "width_fraction")?.min(width.max(1)),
        scaled_side(height, height_fraction, "height_fraction")?.min(height.max(1)),
    ))
}

/// Pick the top-left corner of a crop box uniformly at random.
///
/// Offsets are drawn from `[0, side - crop_side)`. A box spanning the whole
/// axis leaves that range empty, and the offset is clamped to 0.
pub fn crop_origin<R: Rng + ?Sized>(
    (width, height): (u32, u32),
    (crop_width, crop_height): (u32, u32),
    rng: &mut R,
) -> (u32, u32) {
    (
        random_offset(width.saturating_sub(crop_width), rng),
        random_offset(height.saturating_sub(crop_height), rng),
    )
}

fn random_offset<R: Rng + ?Sized>(slack: u32, rng: &mut R) -> u32 {
    if slack == 0 {
        0
    } else {
        rng.random_range(0..slack)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_side(side: u32, factor: f64, name: &str) -> Result<u32> {
    let scaled = (f64::from(side) * factor).round();

    if scaled > f64::from(u32::MAX) {
        return Err(Error::InvalidParameter {
            name: name.to_string(),
            reason: format!("{side} * {factor} exceeds the maximum image side"),
        });
    }

    // Safe: 0 <= scaled <= u32::MAX
    Ok((scaled as u32).max(1))
}

/// Rotate counter-clockwise by `degrees` about the image center.
///
/// The canvas keeps its size; corners that leave it are clipped and
/// uncovered areas are filled with zero (black, transparent) pixels.
/// Sampling is nearest-neighbour. Sources deeper than 8 bits are reduced to
/// 8 bits.
#[must_use]
pub fn rotate(img: &DynamicImage, degrees: f32) -> DynamicImage {
    // imageproc turns clockwise for positive angles.
    let theta = -degrees.to_radians();
    let nearest = Interpolation::Nearest;

    match img {
        DynamicImage::ImageLuma8(buf) => {
            DynamicImage::ImageLuma8(rotate_about_center(buf, theta, nearest, Luma([0])))
        }
        DynamicImage::ImageLumaA8(buf) => {
            DynamicImage::ImageLumaA8(rotate_about_center(buf, theta, nearest, LumaA([0, 0])))
        }
        DynamicImage::ImageRgb8(buf) => {
            DynamicImage::ImageRgb8(rotate_about_center(buf, theta, nearest, Rgb([0, 0, 0])))
        }
        DynamicImage::ImageRgba8(buf) => {
            DynamicImage::ImageRgba8(rotate_about_center(buf, theta, nearest, Rgba([0, 0, 0, 0])))
        }
        other => {
            let color = other.color();
            let reduced = match (color.has_color(), color.has_alpha()) {
                (false, false) => DynamicImage::ImageLuma8(other.to_luma8()),
                (false, true) => DynamicImage::ImageLumaA8(other.to_luma_alpha8()),
                (true, false) => DynamicImage::ImageRgb8(other.to_rgb8()),
                (true, true) => DynamicImage::ImageRgba8(other.to_rgba8()),
            };
            rotate(&reduced, degrees)
        }
    }
}
