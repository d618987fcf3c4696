//! Alpha box blur: an owned alpha raster that blurs itself.
//!
//! The usual sequence is:
//!
//! 1. construct an [`AlphaBoxBlur`] for a device-space rectangle;
//! 2. draw alpha content into [`data_mut`](AlphaBoxBlur::data_mut), using
//!    [`stride`](AlphaBoxBlur::stride) and [`size`](AlphaBoxBlur::size);
//! 3. call [`blur`](AlphaBoxBlur::blur);
//! 4. read the mask back through [`data`](AlphaBoxBlur::data).
//!
//! Blurring first spreads (dilates) the content by the spread radius and
//! then applies a triple box blur of the blur radius. A dirty rectangle
//! restricts the work to the pixels that can influence it; a skip
//! rectangle marks uniform content where blurring changes nothing.

use crate::alpha_buffer::AlphaBuffer;
use crate::basics::{PointD, RectD, RectI, SizeI};
use crate::box_blur::{box_blur, calculate_blur_radius};
use crate::error::{BlurError, Result};
use crate::spread::spread;

// ============================================================================
// BlurOptions
// ============================================================================

/// Parameters of a blur other than the raster rectangle.
///
/// The default is no spread, no blur, and neither dirty nor skip rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlurOptions {
    /// Per-axis dilation applied before blurring.
    pub spread_radius: SizeI,
    /// Per-axis total radius of the triple box blur.
    pub blur_radius: SizeI,
    /// Device-space area whose result matters, or all of the raster.
    pub dirty_rect: Option<RectD>,
    /// Device-space area of uniform alpha that may be left unprocessed.
    pub skip_rect: Option<RectD>,
}

impl BlurOptions {
    /// Options that leave the raster unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spread radius.
    pub fn spread_radius(mut self, radius: SizeI) -> Self {
        self.spread_radius = radius;
        self
    }

    /// Set the blur radius directly.
    pub fn blur_radius(mut self, radius: SizeI) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Set the blur radius from a Gaussian standard deviation per axis.
    pub fn sigma(mut self, sigma_x: f64, sigma_y: f64) -> Self {
        self.blur_radius = calculate_blur_radius(PointD::new(sigma_x, sigma_y));
        self
    }

    /// Restrict the work to what can affect `rect`.
    pub fn dirty_rect(mut self, rect: RectD) -> Self {
        self.dirty_rect = Some(rect);
        self
    }

    /// Mark `rect` as holding uniform alpha.
    pub fn skip_rect(mut self, rect: RectD) -> Self {
        self.skip_rect = Some(rect);
        self
    }
}

// ============================================================================
// AlphaBoxBlur
// ============================================================================

/// Validate both radii and return how far a pixel's influence extends.
fn combined_reach(spread_radius: SizeI, blur_radius: SizeI) -> Result<SizeI> {
    for radius in [spread_radius, blur_radius] {
        if radius.is_negative() {
            return Err(BlurError::NegativeRadius {
                width: radius.width,
                height: radius.height,
            });
        }
    }
    spread_radius
        .checked_add(blur_radius)
        .ok_or(BlurError::GeometryOverflow)
}

/// An 8-bit alpha raster together with the blur to apply to it.
///
/// The raster is zero-initialized and owned exclusively; it is freed when
/// the blur is dropped. [`blur`](Self::blur) is meant to run once: later
/// calls leave the buffer as it is.
#[derive(Debug)]
pub struct AlphaBoxBlur {
    rect: RectI,
    spread_radius: SizeI,
    blur_radius: SizeI,
    dirty_rect: Option<RectD>,
    // Device space, already shrunk so that skipping it is exact.
    skip_rect: Option<RectI>,
    // Raster space. `None` when the dirty rect misses the raster.
    region: Option<RectI>,
    buffer: AlphaBuffer,
    blurred: bool,
}

impl AlphaBoxBlur {
    /// Create a blur over the raster `rect`.
    ///
    /// `dirty_rect` limits the area whose result matters; `None` means all
    /// of `rect`. `skip_rect` is an area of uniform alpha inside `rect`;
    /// it is shrunk by the combined radii, and pixels left inside it are
    /// not processed.
    pub fn new(
        rect: RectI,
        spread_radius: SizeI,
        blur_radius: SizeI,
        dirty_rect: Option<RectD>,
        skip_rect: Option<RectD>,
    ) -> Result<Self> {
        let size = rect.checked_size().ok_or(BlurError::GeometryOverflow)?;
        if size.width <= 0 || size.height <= 0 {
            return Err(BlurError::InvalidRect {
                width: size.width,
                height: size.height,
            });
        }
        let reach = combined_reach(spread_radius, blur_radius)?;
        let (dx, dy) = (reach.width as f64, reach.height as f64);
        let bounds = RectD::from(rect);

        // Grown in f64 so that rectangles near the i32 limits saturate
        // when rounded instead of wrapping.
        let region = match dirty_rect {
            None => Some(rect),
            Some(dirty) => dirty
                .intersect(&bounds)
                .map(|d| d.inflate(dx, dy).round_out())
                .and_then(|d| d.intersect(&rect)),
        };
        let skip_rect = skip_rect
            .and_then(|s| s.intersect(&bounds))
            .map(|s| s.deflate(dx, dy).round_in())
            .filter(|s| !s.is_empty());

        let buffer = AlphaBuffer::try_new(size.width, size.height)?;
        log::trace!(
            "AlphaBoxBlur {rect:?}: stride {}, spread {spread_radius:?}, blur {blur_radius:?}, \
             region {region:?}, skip {skip_rect:?}",
            buffer.stride()
        );

        let origin = rect.top_left();
        Ok(Self {
            rect,
            spread_radius,
            blur_radius,
            dirty_rect,
            skip_rect,
            region: region.map(|r| r.relative_to(origin)),
            buffer,
            blurred: false,
        })
    }

    /// Create a blur over `rect` with the parameters in `options`.
    pub fn with_options(rect: RectI, options: &BlurOptions) -> Result<Self> {
        Self::new(
            rect,
            options.spread_radius,
            options.blur_radius,
            options.dirty_rect,
            options.skip_rect,
        )
    }

    /// Create a blur over `rect` approximating a Gaussian of standard
    /// deviations `sigma_x` and `sigma_y`, with no spread.
    pub fn from_sigma(rect: RectI, sigma_x: f64, sigma_y: f64) -> Result<Self> {
        let blur_radius = calculate_blur_radius(PointD::new(sigma_x, sigma_y));
        Self::new(rect, SizeI::default(), blur_radius, None, None)
    }

    /// Create a blur whose raster is large enough for the blurred image of
    /// content drawn inside `shape`.
    ///
    /// The raster is `shape` grown by the spread and blur radii and rounded
    /// out to whole pixels. With a dirty rectangle, the raster is cut down
    /// to the dirty area grown by the same amount, since nothing farther
    /// away can reach it.
    pub fn for_shape(
        shape: RectD,
        spread_radius: SizeI,
        blur_radius: SizeI,
        dirty_rect: Option<RectD>,
        skip_rect: Option<RectD>,
    ) -> Result<Self> {
        let reach = combined_reach(spread_radius, blur_radius)?;
        let (dx, dy) = (reach.width as f64, reach.height as f64);
        let mut rect = shape.inflate(dx, dy).round_out();
        if let Some(dirty) = dirty_rect {
            rect = dirty
                .intersect(&RectD::from(rect))
                .and_then(|d| d.inflate(dx, dy).round_out().intersect(&rect))
                .unwrap_or(RectI::new(0, 0, 0, 0));
        }
        Self::new(rect, spread_radius, blur_radius, dirty_rect, skip_rect)
    }

    /// The raster, `stride() * size().height` bytes, row by row.
    pub fn data(&self) -> &[u8] {
        self.buffer.data()
    }

    /// Mutable access to the raster for drawing.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.buffer.data_mut()
    }

    /// The pixels of raster row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        self.buffer.row_slice(y)
    }

    /// The pixels of raster row `y`, for drawing.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        self.buffer.row_slice_mut(y)
    }

    /// Raster dimensions, equal to the rectangle's.
    pub fn size(&self) -> SizeI {
        SizeI::new(self.rect.width(), self.rect.height())
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> i32 {
        self.buffer.stride() as i32
    }

    /// The device-space rectangle covered by the raster.
    pub fn rect(&self) -> RectI {
        self.rect
    }

    /// The dirty rectangle given at construction.
    pub fn dirty_rect(&self) -> Option<RectD> {
        self.dirty_rect
    }

    /// The part of the skip rectangle that is actually left unprocessed,
    /// in device space.
    pub fn skip_rect(&self) -> Option<RectI> {
        self.skip_rect
    }

    pub fn spread_radius(&self) -> SizeI {
        self.spread_radius
    }

    pub fn blur_radius(&self) -> SizeI {
        self.blur_radius
    }

    /// Bytes owned by the raster.
    pub fn surface_allocation_size(&self) -> usize {
        self.buffer.len()
    }

    /// Whether [`blur`](Self::blur) has completed.
    pub fn is_blurred(&self) -> bool {
        self.blurred
    }

    /// Skip rectangle in raster space, or an empty rectangle.
    fn local_skip_rect(&self) -> RectI {
        self.skip_rect
            .map(|s| s.relative_to(self.rect.top_left()))
            .unwrap_or(RectI::new(0, 0, 0, 0))
    }

    /// Spread and blur the raster in place.
    ///
    /// Pixels outside the dirty rectangle's reach and inside the skip
    /// rectangle keep the drawn content. The only failure is running out
    /// of memory for the scratch raster, in which case the buffer is left
    /// untouched. Calling this again after it succeeded does nothing.
    pub fn blur(&mut self) -> Result<()> {
        if self.blurred {
            log::debug!("AlphaBoxBlur {:?} already blurred; ignoring", self.rect);
            return Ok(());
        }
        if self.spread_radius.is_zero() && self.blur_radius.is_zero() {
            self.blurred = true;
            return Ok(());
        }
        let skip = self.local_skip_rect();
        let region = match self.region {
            Some(region) if !skip.contains_rect(&region) => region,
            _ => {
                log::debug!("AlphaBoxBlur {:?} has nothing to process", self.rect);
                self.blurred = true;
                return Ok(());
            }
        };

        let mut scratch = self.buffer.try_new_like()?;
        scratch.copy_from(&self.buffer);

        spread(
            &mut self.buffer,
            &mut scratch,
            self.spread_radius,
            &region,
            &skip,
        );
        box_blur(
            &mut self.buffer,
            &mut scratch,
            self.blur_radius,
            &region,
            &skip,
        );

        self.blurred = true;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
