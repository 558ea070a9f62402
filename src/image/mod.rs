//! Image decoding, pixel-array conversion, and saving utilities.

mod load;
mod save;

pub use load::{image_to_array, load_image};
pub use save::{array_to_image, save_jpeg};

use image::{ColorType, DynamicImage};
use ndarray::Array3;

/// Channel layout of an 8-bit raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Single-channel luminance.
    Luma,
    /// Luminance with alpha.
    LumaAlpha,
    /// Three-channel color.
    Rgb,
    /// Three-channel color with alpha.
    Rgba,
}

impl ColorMode {
    /// Channel layout of a decoded image. Sample depth is ignored.
    #[must_use]
    pub fn of(image: &DynamicImage) -> Self {
        Self::from_color_type(image.color())
    }

    /// Channel layout matching a `ColorType`.
    #[must_use]
    pub fn from_color_type(color: ColorType) -> Self {
        match (color.has_color(), color.has_alpha()) {
            (false, false) => Self::Luma,
            (false, true) => Self::LumaAlpha,
            (true, false) => Self::Rgb,
            (true, true) => Self::Rgba,
        }
    }

    /// Number of samples per pixel.
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::LumaAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Dense 8-bit pixel array in HWC layout (height, width, channels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelArray {
    /// Channel layout of `data`'s last axis.
    pub mode: ColorMode,
    /// Samples indexed as `[y, x, channel]`.
    pub data: Array3<u8>,
}

impl PixelArray {
    /// Replace the samples while keeping the color mode.
    #[must_use]
    pub fn with_data(self, data: Array3<u8>) -> Self {
        Self {
            mode: self.mode,
            data,
        }
    }
}
