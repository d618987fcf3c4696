//! Triple box blur: a Gaussian approximation built from three moving averages.
//!
//! A blur of total radius `r` along one axis is split into three boxes
//! ([`compute_lobes`]) whose reaches add up to `r` on each side. Each box is
//! applied with a running sum, so the cost per pixel is constant whatever
//! the radius. Pixels outside the raster count as alpha 0.
//!
//! All passes share two rules that the orchestrator relies on:
//!
//! - a pass writes exactly the pixels of `region` that are not in `skip`;
//! - a pass reads only `src` and writes only `dst`.

use core::ops::Range;

use crate::alpha_buffer::AlphaBuffer;
use crate::basics::{uround, PointD, RectI, SizeI};

// ============================================================================
// Radius calculation
// ============================================================================

/// Total triple-box radius approximating a Gaussian of standard deviation
/// `sigma` along one axis.
///
/// Three equal boxes of width `d` have a combined variance of
/// `3 * (d² - 1) / 12`; solving for `σ²` gives `d = sqrt(4σ² + 1)`, rounded
/// half up. A deviation of zero (or a negative or non-finite one) means no
/// blur at all.
fn blur_radius_for_sigma(sigma: f64) -> i32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    let d = (4.0 * sigma * sigma + 1.0).sqrt();
    uround(d).min(i32::MAX as u32) as i32
}

/// Compute the blur radius, per axis, for a Gaussian with the given
/// standard deviations (`x` horizontal, `y` vertical) in device pixels.
pub fn calculate_blur_radius(std_dev: PointD) -> SizeI {
    SizeI::new(
        blur_radius_for_sigma(std_dev.x),
        blur_radius_for_sigma(std_dev.y),
    )
}

// ============================================================================
// Lobes
// ============================================================================

/// One box of the triple blur: the pixel itself, `left` pixels before it
/// and `right` pixels after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lobe {
    pub left: usize,
    pub right: usize,
}

impl Lobe {
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Number of pixels averaged.
    pub fn width(&self) -> usize {
        self.left + self.right + 1
    }
}

/// Split a total radius into three boxes.
///
/// With `z = radius / 3` the remainder decides the layout:
///
/// | `radius % 3` | box 1      | box 2      | box 3          |
/// |--------------|------------|------------|----------------|
/// | 0            | `(z, z)`   | `(z, z)`   | `(z, z)`       |
/// | 1            | `(z+1, z)` | `(z, z+1)` | `(z, z)`       |
/// | 2            | `(z+1, z)` | `(z, z+1)` | `(z+1, z+1)`   |
///
/// The left reaches and the right reaches each sum to `radius`, so the
/// composed kernel is symmetric.
pub fn compute_lobes(radius: usize) -> [Lobe; 3] {
    let z = radius / 3;
    let (major, minor, last) = match radius % 3 {
        0 => (z, z, z),
        1 => (z + 1, z, z),
        _ => (z + 1, z, z + 1),
    };
    [
        Lobe::new(major, minor),
        Lobe::new(minor, major),
        Lobe::new(last, last),
    ]
}

// ============================================================================
// 1-D kernel
// ============================================================================

/// A line of pixels inside a raster: `len` samples starting at byte
/// `start`, `step` bytes apart.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line {
    pub start: usize,
    pub step: usize,
    pub len: usize,
}

impl Line {
    pub fn row(buf: &AlphaBuffer, y: usize) -> Self {
        Self {
            start: y * buf.stride(),
            step: 1,
            len: buf.width(),
        }
    }

    pub fn column(buf: &AlphaBuffer, x: usize) -> Self {
        Self {
            start: x,
            step: buf.stride(),
            len: buf.height(),
        }
    }

    #[inline]
    pub fn offset(&self, i: usize) -> usize {
        self.start + i * self.step
    }

    /// Sample `i`, or 0 outside the line.
    #[inline]
    pub fn sample(&self, data: &[u8], i: isize) -> u32 {
        if i < 0 || i as usize >= self.len {
            0
        } else {
            data[self.offset(i as usize)] as u32
        }
    }
}

/// Moving average of one line over positions `span`, leaving the positions
/// in `skip` alone.
fn blur_line(
    src: &[u8],
    dst: &mut [u8],
    line: Line,
    lobe: Lobe,
    span: Range<usize>,
    skip: Range<usize>,
) {
    let left = lobe.left as isize;
    let right = lobe.right as isize;
    let box_size = lobe.width() as u64;
    let last = line.len as isize - 1;
    // Samples past either end are zero, so only the clipped part of the
    // window is summed.
    let window_sum = |i: usize| -> u32 {
        let i = i as isize;
        let first = i.saturating_sub(left).max(0);
        let end = i.saturating_add(right).min(last);
        (first..=end).map(|j| line.sample(src, j)).sum()
    };

    let mut i = span.start;
    let mut sum = window_sum(i);
    while i < span.end {
        if skip.contains(&i) {
            i = skip.end;
            if i >= span.end {
                break;
            }
            sum = window_sum(i);
        }
        // Truncating: a constant line maps to itself, and any weight lost
        // past the ends keeps the result below the maximum.
        dst[line.offset(i)] = (sum as u64 / box_size) as u8;

        let pos = i as isize;
        sum += line.sample(src, pos.saturating_add(right).saturating_add(1));
        sum -= line.sample(src, pos.saturating_sub(left));
        i += 1;
    }
}

/// Horizontal skip span for row `y`, and whether it swallows the whole
/// processed width.
pub(crate) fn row_skip(skip: &RectI, region: &RectI, y: i32) -> (Range<usize>, bool) {
    if !skip.contains_y(y) || skip.is_empty() {
        return (0..0, false);
    }
    let covers = skip.x1 <= region.x1 && skip.x2 >= region.x2;
    (skip.x1 as usize..skip.x2 as usize, covers)
}

/// Vertical skip span for column `x`, and whether it swallows the whole
/// processed height.
pub(crate) fn column_skip(skip: &RectI, region: &RectI, x: i32) -> (Range<usize>, bool) {
    if !skip.contains_x(x) || skip.is_empty() {
        return (0..0, false);
    }
    let covers = skip.y1 <= region.y1 && skip.y2 >= region.y2;
    (skip.y1 as usize..skip.y2 as usize, covers)
}

// ============================================================================
// Passes
// ============================================================================

/// One horizontal box pass from `src` into `dst` over `region`.
///
/// `region` and `skip` are in raster coordinates; `region` must lie inside
/// the raster.
pub fn box_blur_horizontal(
    src: &AlphaBuffer,
    dst: &mut AlphaBuffer,
    lobe: Lobe,
    region: &RectI,
    skip: &RectI,
) {
    let mut y = region.y1;
    while y < region.y2 {
        let (skip_span, covers) = row_skip(skip, region, y);
        if covers {
            y = skip.y2;
            continue;
        }
        let line = Line::row(src, y as usize);
        blur_line(
            src.data(),
            dst.data_mut(),
            line,
            lobe,
            region.x1 as usize..region.x2 as usize,
            skip_span,
        );
        y += 1;
    }
}

/// One vertical box pass from `src` into `dst` over `region`.
pub fn box_blur_vertical(
    src: &AlphaBuffer,
    dst: &mut AlphaBuffer,
    lobe: Lobe,
    region: &RectI,
    skip: &RectI,
) {
    let mut x = region.x1;
    while x < region.x2 {
        let (skip_span, covers) = column_skip(skip, region, x);
        if covers {
            x = skip.x2;
            continue;
        }
        let line = Line::column(src, x as usize);
        blur_line(
            src.data(),
            dst.data_mut(),
            line,
            lobe,
            region.y1 as usize..region.y2 as usize,
            skip_span,
        );
        x += 1;
    }
}

/// Run the full triple box blur on `buffer`.
///
/// `scratch` must have the same geometry and hold a copy of `buffer` at
/// least outside `region` minus `skip`. The result ends up in `buffer`.
pub fn box_blur(
    buffer: &mut AlphaBuffer,
    scratch: &mut AlphaBuffer,
    radius: SizeI,
    region: &RectI,
    skip: &RectI,
) {
    let mut src = buffer;
    let mut dst = scratch;
    let mut passes = 0;

    if radius.width > 0 {
        for lobe in compute_lobes(radius.width as usize) {
            box_blur_horizontal(src, dst, lobe, region, skip);
            core::mem::swap(&mut src, &mut dst);
            passes += 1;
        }
    }
    if radius.height > 0 {
        for lobe in compute_lobes(radius.height as usize) {
            box_blur_vertical(src, dst, lobe, region, skip);
            core::mem::swap(&mut src, &mut dst);
            passes += 1;
        }
    }

    // After an odd number of swaps the latest output sits in the scratch
    // buffer and `dst` is the caller's buffer again.
    if passes % 2 == 1 {
        dst.copy_from(src);
    }
}

// ============================================================================
// Tests
// ============================================================================
