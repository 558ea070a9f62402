//! # `imgtransform`
//!
//! Single-image transformations over the `image` crate: grayscale,
//! normalization, brightness scaling, sharpening, resizing, flipping,
//! rotation, Gaussian noise, and random cropping.
//!
//! An [`ImageProcessor`] is bound to one source file. Each operation decodes
//! that file afresh and returns a new [`DynamicImage`](::image::DynamicImage);
//! nothing is written unless the caller asks for it.
//!
//! ## Example
//!
//! ```no_run
//! use imgtransform::{ImageProcessor, Operation};
//!
//! # fn main() -> imgtransform::Result<()> {
//! let processor = ImageProcessor::new("photo.jpg");
//!
//! let half = processor.resize(0.5)?;
//! let name = processor.default_output_name(&Operation::Resize { multiplier: 0.5 });
//! processor.save_processed_image(&half, "processed_images", &name)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod processor;

pub use error::{Error, Result};
pub use processor::{Config, ImageProcessor, Operation};
