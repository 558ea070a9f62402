//! Single-image transformations bound to a source file.

mod geometry;
mod operation;
mod tone;
mod transform;

pub use operation::Operation;
pub use transform::{Config, ImageProcessor};

/// Default multiplier for [`ImageProcessor::brighten`].
pub const DEFAULT_BRIGHTEN_FACTOR: f64 = 1.5;

/// Default multiplier for [`ImageProcessor::darken`].
pub const DEFAULT_DARKEN_FACTOR: f64 = 0.5;

/// Default resize multiplier. This is a raw factor, not a percentage:
/// 10.0 makes each side ten times larger.
pub const DEFAULT_RESIZE_MULTIPLIER: f64 = 10.0;

/// Default counter-clockwise rotation in degrees.
pub const DEFAULT_ROTATION_DEGREES: f32 = 30.0;

/// Default Gaussian noise mean.
pub const DEFAULT_NOISE_MEAN: f64 = 0.0;

/// Default Gaussian noise scale (standard deviation).
pub const DEFAULT_NOISE_SCALE: f64 = 0.1;

/// Default crop size as (width, height) fractions of the source.
pub const DEFAULT_CROP_FRACTION: (f64, f64) = (0.3, 0.3);

/// Default directory for [`ImageProcessor::save_processed_image`].
pub const DEFAULT_OUTPUT_DIR: &str = "processed_images";
