//! Element-wise tone operations over 8-bit pixel arrays.
//!
//! Arithmetic runs in `f64`; results are clipped to `[0, 255]` and truncated
//! back to `u8`.

use ndarray::Array3;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Stretch samples so the global minimum maps to 0 and the maximum to 255.
///
/// Min and max are taken over every channel at once, alpha included.
/// Returns `None` for a constant (or empty) array, where the stretch is
/// undefined.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize(data: &Array3<u8>) -> Option<Array3<u8>> {
    let min = data.iter().copied().min()?;
    let max = data.iter().copied().max()?;

    if min == max {
        return None;
    }

    let min = f64::from(min);
    let range = f64::from(max) - min;

    Some(data.mapv(|p| ((f64::from(p) - min) / range * 255.0) as u8))
}

/// Multiply every sample by `factor`, clipping to the valid range.
#[must_use]
pub fn scale(data: &Array3<u8>, factor: f64) -> Array3<u8> {
    data.mapv(|p| clip_to_u8(f64::from(p) * factor))
}

/// Add one independent Gaussian sample to every element.
#[must_use]
pub fn add_noise<R: Rng + ?Sized>(
    data: &Array3<u8>,
    noise: &Normal<f64>,
    rng: &mut R,
) -> Array3<u8> {
    data.mapv(|p| clip_to_u8(f64::from(p) + noise.sample(&mut *rng)))
}

/// Clip to `[0, 255]` and truncate.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clip_to_u8(value: f64) -> u8 {
    // NaN saturates to 0 in the cast.
    value.clamp(0.0, 255.0) as u8
}
