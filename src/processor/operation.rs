//! Parameterised transformation kinds.

use std::fmt;

use super::{
    DEFAULT_BRIGHTEN_FACTOR, DEFAULT_CROP_FRACTION, DEFAULT_DARKEN_FACTOR, DEFAULT_NOISE_MEAN,
    DEFAULT_NOISE_SCALE, DEFAULT_RESIZE_MULTIPLIER, DEFAULT_ROTATION_DEGREES,
};

/// One transformation together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Convert to single-channel luminance.
    Grayscale,
    /// Stretch samples to the full `[0, 255]` range.
    Normalize,
    /// Multiply samples by `factor` (usually above 1).
    Brighten { factor: f64 },
    /// Multiply samples by `factor` (usually below 1).
    Darken { factor: f64 },
    /// Apply the fixed 3x3 sharpening kernel.
    Sharpen,
    /// Scale both sides by a raw multiplier.
    Resize { multiplier: f64 },
    /// Mirror left-right.
    Flip,
    /// Rotate counter-clockwise about the center.
    Rotate { degrees: f32 },
    /// Add per-sample Gaussian noise.
    GaussianNoise { mean: f64, scale: f64 },
    /// Cut a randomly placed box sized as fractions of the source.
    RandomCrop {
        width_fraction: f64,
        height_fraction: f64,
    },
}

impl Operation {
    /// `Brighten` with the default factor.
    #[must_use]
    pub const fn brighten() -> Self {
        Self::Brighten {
            factor: DEFAULT_BRIGHTEN_FACTOR,
        }
    }

    /// `Darken` with the default factor.
    #[must_use]
    pub const fn darken() -> Self {
        Self::Darken {
            factor: DEFAULT_DARKEN_FACTOR,
        }
    }

    /// `Resize` with the default multiplier.
    #[must_use]
    pub const fn resize() -> Self {
        Self::Resize {
            multiplier: DEFAULT_RESIZE_MULTIPLIER,
        }
    }

    /// `Rotate` with the default angle.
    #[must_use]
    pub const fn rotate() -> Self {
        Self::Rotate {
            degrees: DEFAULT_ROTATION_DEGREES,
        }
    }

    /// `GaussianNoise` with the default mean and scale.
    #[must_use]
    pub const fn gaussian_noise() -> Self {
        Self::GaussianNoise {
            mean: DEFAULT_NOISE_MEAN,
            scale: DEFAULT_NOISE_SCALE,
        }
    }

    /// `RandomCrop` with the default fractions.
    #[must_use]
    pub const fn random_crop() -> Self {
        Self::RandomCrop {
            width_fraction: DEFAULT_CROP_FRACTION.0,
            height_fraction: DEFAULT_CROP_FRACTION.1,
        }
    }

    /// Snake-case name, used to label output files.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Normalize => "normalize",
            Self::Brighten { .. } => "brighten",
            Self::Darken { .. } => "darken",
            Self::Sharpen => "sharpen",
            Self::Resize { .. } => "resize",
            Self::Flip => "flip",
            Self::Rotate { .. } => "rotate",
            Self::GaussianNoise { .. } => "gaussian_noise",
            Self::RandomCrop { .. } => "random_crop",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Operation::Grayscale.label(), "grayscale");
        assert_eq!(Operation::gaussian_noise().to_string(), "gaussian_noise");
        assert_eq!(Operation::random_crop().label(), "random_crop");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Operation::brighten(), Operation::Brighten { factor: 1.5 });
        assert_eq!(Operation::darken(), Operation::Darken { factor: 0.5 });
        assert_eq!(Operation::rotate(), Operation::Rotate { degrees: 30.0 });
        assert_eq!(
            Operation::random_crop(),
            Operation::RandomCrop {
                width_fraction: 0.3,
                height_fraction: 0.3
            }
        );
    }
}
