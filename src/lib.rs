//! # alpha-box-blur
//!
//! Gaussian-like blurring of 8-bit alpha masks, the kind used for box
//! shadows and text shadows.
//!
//! An [`AlphaBoxBlur`] owns a single-channel raster. Callers draw coverage
//! into it, call [`AlphaBoxBlur::blur`], and read the result back as a mask.
//! The blur is:
//!
//! - an optional **spread**, a square max filter that grows the shape;
//! - a **triple box blur**, three moving averages per axis whose
//!   composition approximates a Gaussian at constant cost per pixel.
//!
//! Pixels outside the raster are treated as fully transparent. A dirty
//! rectangle limits work to the area that matters, and a skip rectangle
//! marks uniform content that does not need processing.
//!
//! ```
//! use alpha_box_blur::{AlphaBoxBlur, RectI, SizeI};
//!
//! let mut blur = AlphaBoxBlur::new(
//!     RectI::new(0, 0, 32, 32),
//!     SizeI::new(0, 0),
//!     SizeI::new(6, 6),
//!     None,
//!     None,
//! )?;
//! for y in 8..24 {
//!     blur.row_mut(y)[8..24].fill(255);
//! }
//! blur.blur()?;
//! assert!(blur.row(16)[4] > 0);
//! # Ok::<(), alpha_box_blur::BlurError>(())
//! ```

// Foundation
pub mod basics;
pub mod error;

// Storage
pub mod alpha_buffer;

// Passes
pub mod box_blur;
pub mod spread;

// Engine
pub mod alpha_box_blur;

pub use crate::alpha_box_blur::{AlphaBoxBlur, BlurOptions};
pub use crate::basics::{PointD, RectD, RectI, SizeI};
pub use crate::box_blur::calculate_blur_radius;
pub use crate::error::{BlurError, Result};
