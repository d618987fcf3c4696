//! Spread: grayscale dilation of the alpha raster.
//!
//! Each pixel becomes the maximum of the square window of half-size
//! `radius` around it, clipped to the raster. Alpha is never negative, so
//! clipping gives the same result as treating outside pixels as 0.
//! The square max is separable: a horizontal pass followed by a vertical
//! pass gives the full 2-D result.

use core::ops::Range;

use crate::alpha_buffer::AlphaBuffer;
use crate::basics::{RectI, SizeI};
use crate::box_blur::{column_skip, row_skip, Line};

/// Max filter of one line over positions `span`, leaving `skip` alone.
fn spread_line(
    src: &[u8],
    dst: &mut [u8],
    line: Line,
    radius: usize,
    span: Range<usize>,
    skip: Range<usize>,
) {
    for i in span {
        if skip.contains(&i) {
            continue;
        }
        let first = i.saturating_sub(radius);
        let last = i.saturating_add(radius).min(line.len - 1);
        let mut max = 0u8;
        for j in first..=last {
            max = max.max(src[line.offset(j)]);
            if max == u8::MAX {
                break;
            }
        }
        dst[line.offset(i)] = max;
    }
}

/// Horizontal max filter from `src` into `dst` over `region`.
pub fn spread_horizontal(
    src: &AlphaBuffer,
    dst: &mut AlphaBuffer,
    radius: usize,
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
        spread_line(
            src.data(),
            dst.data_mut(),
            Line::row(src, y as usize),
            radius,
            region.x1 as usize..region.x2 as usize,
            skip_span,
        );
        y += 1;
    }
}

/// Vertical max filter from `src` into `dst` over `region`.
pub fn spread_vertical(
    src: &AlphaBuffer,
    dst: &mut AlphaBuffer,
    radius: usize,
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
        spread_line(
            src.data(),
            dst.data_mut(),
            Line::column(src, x as usize),
            radius,
            region.y1 as usize..region.y2 as usize,
            skip_span,
        );
        x += 1;
    }
}

/// Dilate `buffer` in place by `radius`, using `scratch` for the
/// intermediate result.
///
/// `scratch` must have the same geometry and hold a copy of `buffer` at
/// least outside `region` minus `skip`. A zero radius leaves the buffer
/// unchanged.
pub fn spread(
    buffer: &mut AlphaBuffer,
    scratch: &mut AlphaBuffer,
    radius: SizeI,
    region: &RectI,
    skip: &RectI,
) {
    if radius.is_zero() {
        return;
    }
    spread_horizontal(buffer, scratch, radius.width as usize, region, skip);
    spread_vertical(scratch, buffer, radius.height as usize, region, skip);
}

// ============================================================================
// Tests
// ============================================================================
