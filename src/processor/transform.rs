//! The image transform facade.

use std::fs;
use std::path::{Path, PathBuf};

use ::image::{DynamicImage, GenericImageView};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Normal;

use crate::error::{Error, Result};
use crate::image::{self, PixelArray};

use super::geometry;
use super::operation::Operation;
use super::tone;

/// Fixed sharpening kernel; the 3x3 filter divides by its sum (16).
const SHARPEN_KERNEL: [f32; 9] = [-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0];

/// Configuration shared by every operation of an [`ImageProcessor`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Output JPEG quality (1-100).
    pub jpeg_quality: u8,

    /// Random seed for noise and crop placement. None for random.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            seed: None,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidParameter {
                name: "jpeg_quality".to_string(),
                reason: format!("must be between 1 and 100, got {}", self.jpeg_quality),
            });
        }

        Ok(())
    }
}

/// Applies single transformations to one source image.
///
/// Every operation decodes the source file afresh and returns a new image;
/// nothing decoded is kept between calls, so one processor can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    path: PathBuf,
    directory: PathBuf,
    file_name: String,
    config: Config,
}

impl ImageProcessor {
    /// Bind a processor to `path` with the default configuration.
    ///
    /// The file is not touched until an operation runs.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            directory,
            file_name,
            config: Config::default(),
        }
    }

    /// Bind a processor to `path` with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config<P: Into<PathBuf>>(path: P, config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::new(path)
        })
    }

    /// Source image path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the source image.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name of the source image, extension included.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Configuration used by every operation.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `operation` against the source image.
    ///
    /// # Errors
    ///
    /// Returns whatever the dispatched operation returns.
    pub fn apply(&self, operation: &Operation) -> Result<DynamicImage> {
        match *operation {
            Operation::Grayscale => self.grayscale(),
            Operation::Normalize => self.normalize(),
            Operation::Brighten { factor } => self.brighten(factor),
            Operation::Darken { factor } => self.darken(factor),
            Operation::Sharpen => self.sharpen(),
            Operation::Resize { multiplier } => self.resize(multiplier),
            Operation::Flip => self.flip(),
            Operation::Rotate { degrees } => self.rotate(degrees),
            Operation::GaussianNoise { mean, scale } => self.add_gaussian_noise(mean, scale),
            Operation::RandomCrop {
                width_fraction,
                height_fraction,
            } => self.random_crop(width_fraction, height_fraction),
        }
    }

    /// Convert to single-channel 8-bit luminance. Alpha is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the source cannot be decoded.
    pub fn grayscale(&self) -> Result<DynamicImage> {
        let img = self.open()?;
        tracing::debug!("Converting {} to grayscale", self.path.display());
        Ok(DynamicImage::ImageLuma8(img.to_luma8()))
    }

    /// Stretch samples so the global minimum becomes 0 and the maximum 255.
    ///
    /// Minimum and maximum are taken across all channels together. A
    /// constant image has no range to stretch and is returned unchanged
    /// (reduced to 8 bits per sample).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the source cannot be decoded.
    pub fn normalize(&self) -> Result<DynamicImage> {
        let pixels = self.open_array()?;

        let Some(data) = tone::normalize(&pixels.data) else {
            tracing::warn!(
                "{} has a constant value; returning it unnormalized",
                self.path.display()
            );
            return image::array_to_image(&pixels);
        };

        image::array_to_image(&pixels.with_data(data))
    }

    /// Multiply every sample by `factor`, clipping to `[0, 255]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `factor` is negative or not
    /// finite, or [`Error::Decode`] if the source cannot be decoded.
    pub fn scale(&self, factor: f64) -> Result<DynamicImage> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(Error::InvalidParameter {
                name: "factor".to_string(),
                reason: format!("must be a non-negative finite number, got {factor}"),
            });
        }

        let pixels = self.open_array()?;
        tracing::debug!("Scaling {} by {factor}", self.path.display());
        let data = tone::scale(&pixels.data, factor);
        image::array_to_image(&pixels.with_data(data))
    }

    /// Brighten by `factor`; see [`DEFAULT_BRIGHTEN_FACTOR`](super::DEFAULT_BRIGHTEN_FACTOR).
    ///
    /// # Errors
    ///
    /// See [`ImageProcessor::scale`].
    pub fn brighten(&self, factor: f64) -> Result<DynamicImage> {
        self.scale(factor)
    }

    /// Darken by `factor`; see [`DEFAULT_DARKEN_FACTOR`](super::DEFAULT_DARKEN_FACTOR).
    ///
    /// # Errors
    ///
    /// See [`ImageProcessor::scale`].
    pub fn darken(&self, factor: f64) -> Result<DynamicImage> {
        self.scale(factor)
    }

    /// Apply a fixed 3x3 sharpening kernel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the source cannot be decoded.
    pub fn sharpen(&self) -> Result<DynamicImage> {
        let img = self.open()?;
        tracing::debug!("Sharpening {}", self.path.display());
        Ok(img.filter3x3(&SHARPEN_KERNEL))
    }

    /// Resize both sides by a raw multiplier (0.5 halves, 2.0 doubles).
    ///
    /// New sides are rounded and at least 1 pixel. Resampling is bicubic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a non-positive or non-finite
    /// multiplier, or [`Error::Decode`] if the source cannot be decoded.
    pub fn resize(&self, multiplier: f64) -> Result<DynamicImage> {
        let img = self.open()?;
        let (width, height) = img.dimensions();
        let (new_width, new_height) = geometry::scaled_size(width, height, multiplier)?;

        tracing::debug!("Resizing {width}x{height} -> {new_width}x{new_height}");
        Ok(img.resize_exact(
            new_width,
            new_height,
            ::image::imageops::FilterType::CatmullRom,
        ))
    }

    /// Mirror left-right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the source cannot be decoded.
    pub fn flip(&self) -> Result<DynamicImage> {
        let img = self.open()?;
        tracing::debug!("Flipping {} left-right", self.path.display());
        Ok(img.fliph())
    }

    /// Rotate counter-clockwise by `degrees`, keeping the canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `degrees` is not finite, or
    /// [`Error::Decode`] if the source cannot be decoded.
    pub fn rotate(&self, degrees: f32) -> Result<DynamicImage> {
        if !degrees.is_finite() {
            return Err(Error::InvalidParameter {
                name: "degrees".to_string(),
                reason: format!("must be finite, got {degrees}"),
            });
        }

        let img = self.open()?;
        tracing::debug!("Rotating {} by {degrees} degrees", self.path.display());
        Ok(geometry::rotate(&img, degrees))
    }

    /// Add independent Gaussian noise to every sample.
    ///
    /// `scale` is the standard deviation of the distribution, used as
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `mean` is not finite or
    /// `scale` is negative or not finite, or [`Error::Decode`] if the source
    /// cannot be decoded.
    pub fn add_gaussian_noise(&self, mean: f64, scale: f64) -> Result<DynamicImage> {
        if !mean.is_finite() {
            return Err(Error::InvalidParameter {
                name: "mean".to_string(),
                reason: format!("must be finite, got {mean}"),
            });
        }
        if !scale.is_finite() || scale < 0.0 {
            return Err(Error::InvalidParameter {
                name: "scale".to_string(),
                reason: format!("must be a non-negative finite number, got {scale}"),
            });
        }
        let noise = Normal::new(mean, scale).map_err(|err| Error::InvalidParameter {
            name: "scale".to_string(),
            reason: format!("{err}, got {scale}"),
        })?;

        let pixels = self.open_array()?;
        tracing::debug!("Adding N({mean}, {scale}) noise to {}", self.path.display());
        let data = tone::add_noise(&pixels.data, &noise, &mut self.rng());
        image::array_to_image(&pixels.with_data(data))
    }

    /// Cut a randomly placed box of `round(W * width_fraction)` by
    /// `round(H * height_fraction)` pixels.
    ///
    /// The box always lies inside the source. On an axis the box fully
    /// spans, its offset is 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a fraction lies outside
    /// `[0, 1]`, or [`Error::Decode`] if the source cannot be decoded.
    pub fn random_crop(&self, width_fraction: f64, height_fraction: f64) -> Result<DynamicImage> {
        let img = self.open()?;
        let (width, height) = img.dimensions();
        let (crop_width, crop_height) =
            geometry::crop_size(width, height, width_fraction, height_fraction)?;
        let (left, top) =
            geometry::crop_origin((width, height), (crop_width, crop_height), &mut self.rng());

        tracing::debug!(
            "Cropping {crop_width}x{crop_height} at ({left}, {top}) from {width}x{height}"
        );
        Ok(img.crop_imm(left, top, crop_width, crop_height))
    }

    /// Save `img` as `{directory}/{name}.jpg`, creating `directory` if needed.
    ///
    /// Returns `{directory}/{name}`, without the extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `name` is empty or contains a
    /// path separator, [`Error::CreateDir`] if the directory cannot be
    /// created, or an I/O or encoding error if writing fails.
    pub fn save_processed_image<P: AsRef<Path>>(
        &self,
        img: &DynamicImage,
        directory: P,
        name: &str,
    ) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(Error::InvalidParameter {
                name: "name".to_string(),
                reason: format!("must be a plain file name, got {name:?}"),
            });
        }

        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|source| Error::CreateDir {
            path: directory.to_path_buf(),
            source,
        })?;

        let processed_path = directory.join(name);
        let mut file = processed_path.clone().into_os_string();
        file.push(".jpg");
        let file = PathBuf::from(file);

        image::save_jpeg(img, &file, self.config.jpeg_quality)?;
        tracing::info!("Saved processed image to {}", file.display());

        Ok(processed_path)
    }

    /// Output name `{operation}_{source stem}`, e.g. `grayscale_photo`.
    #[must_use]
    pub fn default_output_name(&self, operation: &Operation) -> String {
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "image".into(), |stem| stem.to_string_lossy());
        format!("{}_{stem}", operation.label())
    }

    fn open(&self) -> Result<DynamicImage> {
        image::load_image(&self.path)
    }

    fn open_array(&self) -> Result<PixelArray> {
        image::image_to_array(&self.open()?)
    }

    fn rng(&self) -> StdRng {
        self.config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ColorType, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use crate::processor::{DEFAULT_NOISE_MEAN, DEFAULT_NOISE_SCALE};
    use tempfile::TempDir;

    fn fixture(img: &DynamicImage) -> (TempDir, ImageProcessor) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        img.save(&path).unwrap();
        (dir, ImageProcessor::new(path))
    }

    fn seeded_fixture(img: &DynamicImage, seed: u64) -> (TempDir, ImageProcessor) {
        let (dir, processor) = fixture(img);
        let config = Config {
            seed: Some(seed),
            ..Config::default()
        };
        let processor = ImageProcessor::with_config(processor.path(), config).unwrap();
        (dir, processor)
    }

    fn solid_red() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([255, 0, 0])))
    }

    fn gradient() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(64, 48, |x, y| {
            Rgb([(x * 4) as u8, (y * 5) as u8, ((x + y) * 2) as u8])
        }))
    }

    #[test]
    fn test_path_is_decomposed() {
        let processor = ImageProcessor::new("photos/cat.jpg");

        assert_eq!(processor.directory(), Path::new("photos"));
        assert_eq!(processor.file_name(), "cat.jpg");
        assert_eq!(processor.path(), Path::new("photos/cat.jpg"));
    }

    #[test]
    fn test_invalid_config() {
        let config = Config {
            jpeg_quality: 0,
            ..Config::default()
        };
        assert!(matches!(
            ImageProcessor::with_config("a.png", config),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let processor = ImageProcessor::new(dir.path().join("nope.png"));

        assert!(matches!(processor.grayscale(), Err(Error::Decode { .. })));
        assert!(matches!(processor.normalize(), Err(Error::Decode { .. })));
        assert!(matches!(processor.resize(0.5), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_undecodable_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        fs::write(&path, b"not an image").unwrap();

        assert!(matches!(
            ImageProcessor::new(path).flip(),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_grayscale_of_solid_red() {
        let (_dir, processor) = fixture(&solid_red());
        let gray = processor.grayscale().unwrap();

        assert_eq!(gray.color(), ColorType::L8);
        assert_eq!(gray.dimensions(), (100, 100));

        let gray = gray.to_luma8();
        let first = gray.get_pixel(0, 0)[0];
        assert!(first > 0);
        assert!(gray.pixels().all(|p| p[0] == first));
    }

    #[test]
    fn test_grayscale_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 6, Rgba([10, 20, 30, 40])));
        let (_dir, processor) = fixture(&img);

        let gray = processor.grayscale().unwrap();
        assert_eq!(gray.color(), ColorType::L8);
        assert_eq!(gray.dimensions(), (10, 6));
    }

    #[test]
    fn test_normalize_stretches() {
        let img =
            DynamicImage::ImageLuma8(GrayImage::from_fn(3, 1, |x, _| Luma([50 + 50 * x as u8])));
        let (_dir, processor) = fixture(&img);

        let out = processor.normalize().unwrap().to_luma8();
        assert_eq!(out.as_raw(), &vec![0, 127, 255]);
    }

    #[test]
    fn test_normalize_constant_image() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 20, Rgb([128, 128, 128])));
        let (_dir, processor) = fixture(&img);

        let out = processor.normalize().unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_normalize_red_is_already_full_range() {
        let (_dir, processor) = fixture(&solid_red());
        assert_eq!(processor.normalize().unwrap(), solid_red());
    }

    #[test]
    fn test_brighten_and_darken() {
        let levels = [0, 100, 200];
        let img =
            DynamicImage::ImageLuma8(GrayImage::from_fn(3, 1, |x, _| Luma([levels[x as usize]])));
        let (_dir, processor) = fixture(&img);

        let bright = processor.brighten(crate::processor::DEFAULT_BRIGHTEN_FACTOR).unwrap();
        assert_eq!(bright.to_luma8().as_raw(), &vec![0, 150, 255]);

        let dark = processor.darken(crate::processor::DEFAULT_DARKEN_FACTOR).unwrap();
        assert_eq!(dark.to_luma8().as_raw(), &vec![0, 50, 100]);
    }

    #[test]
    fn test_scale_keeps_mode_and_clips() {
        let (_dir, processor) = fixture(&gradient());

        for factor in [0.0, 0.3, 1.0, 2.5, 1e9] {
            let out = processor.scale(factor).unwrap();
            assert_eq!(out.color(), ColorType::Rgb8);
            assert_eq!(out.dimensions(), (64, 48));
        }
        let zeroed = processor.scale(0.0).unwrap().to_rgb8();
        assert!(zeroed.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_scale_rejects_bad_factor() {
        let (_dir, processor) = fixture(&gradient());

        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                processor.scale(bad),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_sharpen_keeps_shape() {
        let (_dir, processor) = fixture(&gradient());
        let out = processor.sharpen().unwrap();

        assert_eq!(out.dimensions(), (64, 48));
        assert_eq!(out.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_resize() {
        let (_dir, processor) = fixture(&solid_red());

        assert_eq!(processor.resize(0.5).unwrap().dimensions(), (50, 50));
        assert_eq!(processor.resize(0.004).unwrap().dimensions(), (1, 1));
        assert_eq!(processor.resize(1.5).unwrap().dimensions(), (150, 150));
        assert!(matches!(
            processor.resize(0.0),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_resize_too_large_is_rejected() {
        let (_dir, processor) = fixture(&solid_red());

        assert!(matches!(
            processor.resize(1.0e6),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_flip_is_involution() {
        let (dir, processor) = fixture(&gradient());

        let once = processor.flip().unwrap();
        assert_ne!(once, gradient());
        assert_eq!(once.get_pixel(0, 0), gradient().get_pixel(63, 0));

        let flipped_path = dir.path().join("flipped.png");
        once.save(&flipped_path).unwrap();
        let twice = ImageProcessor::new(flipped_path).flip().unwrap();
        assert_eq!(twice, gradient());
    }

    #[test]
    fn test_rotate_keeps_canvas() {
        let (_dir, processor) = fixture(&solid_red());

        assert_eq!(processor.rotate(90.0).unwrap().dimensions(), (100, 100));
        assert_eq!(processor.rotate(-30.0).unwrap().dimensions(), (100, 100));
        assert!(matches!(
            processor.rotate(f32::NAN),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_noise_is_reproducible_with_seed() {
        let (_dir_a, a) = seeded_fixture(&gradient(), 11);
        let (_dir_b, b) = seeded_fixture(&gradient(), 11);

        let noisy_a = a.add_gaussian_noise(0.0, 25.0).unwrap();
        let noisy_b = b.add_gaussian_noise(0.0, 25.0).unwrap();

        assert_eq!(noisy_a, noisy_b);
        assert_ne!(noisy_a, gradient());
        assert_eq!(noisy_a.dimensions(), (64, 48));
    }

    #[test]
    fn test_default_noise_barely_changes() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 16, Luma([100])));
        let (_dir, processor) = fixture(&img);

        let out = processor
            .add_gaussian_noise(DEFAULT_NOISE_MEAN, DEFAULT_NOISE_SCALE)
            .unwrap()
            .to_luma8();
        assert!(out.pixels().all(|p| (99..=100).contains(&p[0])));
    }

    #[test]
    fn test_noise_rejects_bad_parameters() {
        let (_dir, processor) = fixture(&gradient());

        assert!(matches!(
            processor.add_gaussian_noise(0.0, -1.0),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            processor.add_gaussian_noise(f64::NAN, 1.0),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_random_crop_size_and_bounds() {
        let (_dir, processor) = fixture(&gradient());

        for _ in 0..100 {
            let crop = processor.random_crop(0.3, 0.5).unwrap();
            assert_eq!(crop.dimensions(), (19, 24));
        }
    }

    #[test]
    fn test_random_crop_matches_source_pixels() {
        let (_dir, processor) = seeded_fixture(&gradient(), 5);
        let crop = processor.random_crop(0.25, 0.25).unwrap().to_rgb8();
        let source = gradient().to_rgb8();

        // Gradient red encodes x*4 and green y*5, so the origin is recoverable.
        let origin = crop.get_pixel(0, 0);
        let (left, top) = (u32::from(origin[0]) / 4, u32::from(origin[1]) / 5);
        assert!(left + 16 <= 64);
        assert!(top + 12 <= 48);
        for (x, y, pixel) in crop.enumerate_pixels() {
            assert_eq!(pixel, source.get_pixel(left + x, top + y));
        }
    }

    #[test]
    fn test_random_crop_is_reproducible_with_seed() {
        let (_dir_a, a) = seeded_fixture(&gradient(), 5);
        let (_dir_b, b) = seeded_fixture(&gradient(), 5);

        for (fx, fy) in [(0.25, 0.25), (0.5, 0.1)] {
            assert_eq!(a.random_crop(fx, fy).unwrap(), b.random_crop(fx, fy).unwrap());
        }
    }

    #[test]
    fn test_random_crop_spanning_one_axis() {
        let (_dir, processor) = fixture(&gradient());
        let source = gradient().to_rgb8();

        for _ in 0..20 {
            let crop = processor.random_crop(1.0, 0.3).unwrap().to_rgb8();
            assert_eq!(crop.dimensions(), (64, 14));

            // Full width pins the left edge to 0; green encodes y*5.
            let top = u32::from(crop.get_pixel(0, 0)[1]) / 5;
            assert!(top < 48 - 14);
            for (x, y, pixel) in crop.enumerate_pixels() {
                assert_eq!(pixel, source.get_pixel(x, top + y));
            }
        }
    }

    #[test]
    fn test_random_crop_full_size() {
        let (_dir, processor) = fixture(&gradient());
        assert_eq!(processor.random_crop(1.0, 1.0).unwrap(), gradient());
    }

    #[test]
    fn test_random_crop_rejects_oversized_box() {
        let (_dir, processor) = fixture(&gradient());
        assert!(matches!(
            processor.random_crop(1.2, 0.3),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_apply_dispatches() {
        let (_dir, processor) = fixture(&solid_red());

        let resized = processor.apply(&Operation::Resize { multiplier: 0.5 }).unwrap();
        assert_eq!(resized.dimensions(), (50, 50));

        let gray = processor.apply(&Operation::Grayscale).unwrap();
        assert_eq!(gray.color(), ColorType::L8);
    }

    #[test]
    fn test_save_and_reload() {
        let (dir, processor) = fixture(&solid_red());
        let out_dir = dir.path().join("nested").join("processed_images");

        let gray = processor.grayscale().unwrap();
        let saved = processor
            .save_processed_image(&gray, &out_dir, "grayscale_source")
            .unwrap();

        assert_eq!(saved, out_dir.join("grayscale_source"));
        let reloaded = ::image::open(out_dir.join("grayscale_source.jpg")).unwrap();
        assert_eq!(reloaded.dimensions(), (100, 100));

        let rgb_path = processor
            .save_processed_image(&solid_red(), &out_dir, "red.v2")
            .unwrap();
        assert_eq!(rgb_path, out_dir.join("red.v2"));
        let reloaded = ::image::open(out_dir.join("red.v2.jpg")).unwrap();
        assert_eq!(reloaded.dimensions(), (100, 100));
    }

    #[test]
    fn test_save_rejects_bad_names() {
        let (dir, processor) = fixture(&solid_red());

        for bad in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(
                processor.save_processed_image(&solid_red(), dir.path(), bad),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_save_directory_blocked_by_file() {
        let (dir, processor) = fixture(&solid_red());
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        assert!(matches!(
            processor.save_processed_image(&solid_red(), blocker.join("out"), "x"),
            Err(Error::CreateDir { .. })
        ));
    }

    #[test]
    fn test_default_output_name() {
        let processor = ImageProcessor::new("dir/photo.jpg");

        assert_eq!(processor.default_output_name(&Operation::Grayscale), "grayscale_photo");
        assert_eq!(
            processor.default_output_name(&Operation::random_crop()),
            "random_crop_photo"
        );
    }

    #[test]
    fn test_processor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImageProcessor>();
    }
}
