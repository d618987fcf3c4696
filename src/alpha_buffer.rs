//! Alpha buffer: owned, row-oriented storage for an 8-bit alpha raster.
//!
//! [`AlphaBuffer`] owns its bytes in a `Vec<u8>`, so the memory is released
//! when the buffer is dropped. Rows are `stride` bytes apart; only the first
//! `width` bytes of each row are pixels, the rest is padding that the blur
//! passes never read.
//!
//! Allocation goes through [`try_alloc_zeroed`], which reports failure as
//! [`BlurError::AllocationFailed`] instead of aborting the process.

use crate::error::{BlurError, Result};

/// Row pitch alignment in bytes.
pub const STRIDE_ALIGN: usize = 4;

/// Allocate `bytes` zeroed bytes, reporting allocator failure as an error.
pub fn try_alloc_zeroed(bytes: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if data.try_reserve_exact(bytes).is_err() {
        log::warn!("Alpha raster allocation of {bytes} bytes failed");
        return Err(BlurError::AllocationFailed { bytes });
    }
    data.resize(bytes, 0);
    Ok(data)
}

/// Round `width` up to the next multiple of [`STRIDE_ALIGN`].
pub fn aligned_stride(width: usize) -> Option<usize> {
    width
        .checked_add(STRIDE_ALIGN - 1)
        .map(|w| w & !(STRIDE_ALIGN - 1))
}

// ============================================================================
// AlphaBuffer
// ============================================================================

/// An owned single-channel raster.
#[derive(Debug)]
pub struct AlphaBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
}

impl AlphaBuffer {
    /// Allocate a zeroed raster of `width` x `height` pixels.
    ///
    /// Both dimensions must be positive.
    pub fn try_new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(BlurError::InvalidRect { width, height });
        }
        let too_large = BlurError::BufferTooLarge { width, height };
        let stride = aligned_stride(width as usize).ok_or(too_large.clone())?;
        let bytes = stride.checked_mul(height as usize).ok_or(too_large)?;
        let data = try_alloc_zeroed(bytes)?;
        Ok(Self {
            data,
            width: width as usize,
            height: height as usize,
            stride,
        })
    }

    /// Allocate a zeroed raster with the same geometry as `self`.
    pub fn try_new_like(&self) -> Result<Self> {
        Ok(Self {
            data: try_alloc_zeroed(self.data.len())?,
            width: self.width,
            height: self.height,
            stride: self.stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Total number of bytes owned, `stride * height`. Never zero.
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// The whole raster, padding included.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The `width` pixels of row `y`.
    pub fn row_slice(&self, y: usize) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    /// The `width` pixels of row `y`, mutably.
    pub fn row_slice_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Copy every byte from a buffer of identical geometry.
    pub fn copy_from(&mut self, src: &AlphaBuffer) {
        debug_assert_eq!(self.data.len(), src.data.len());
        self.data.copy_from_slice(&src.data);
    }

    /// Fill every pixel with `value`. Padding is left untouched.
    pub fn clear(&mut self, value: u8) {
        for y in 0..self.height {
            self.row_slice_mut(y).fill(value);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_stride() {
        assert_eq!(aligned_stride(1), Some(4));
        assert_eq!(aligned_stride(4), Some(4));
        assert_eq!(aligned_stride(5), Some(8));
        assert_eq!(aligned_stride(usize::MAX), None);
    }

    #[test]
    fn test_alpha_buffer_basic() {
        let buf = AlphaBuffer::try_new(10, 3).unwrap();
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.stride(), 12);
        assert_eq!(buf.len(), 36);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_alpha_buffer_rejects_empty() {
        assert_eq!(
            AlphaBuffer::try_new(0, 5).unwrap_err(),
            BlurError::InvalidRect {
                width: 0,
                height: 5
            }
        );
        assert!(AlphaBuffer::try_new(5, -1).is_err());
    }

    #[test]
    fn test_alpha_buffer_write_read() {
        let mut buf = AlphaBuffer::try_new(5, 4).unwrap();
        buf.row_slice_mut(2)[3] = 200;
        assert_eq!(buf.row_slice(2)[3], 200);
        assert_eq!(buf.data()[2 * 8 + 3], 200);
        assert_eq!(buf.row_slice(2).len(), 5);
    }

    #[test]
    fn test_alpha_buffer_clear_skips_padding() {
        let mut buf = AlphaBuffer::try_new(5, 2).unwrap();
        buf.clear(7);
        for y in 0..2 {
            assert!(buf.row_slice(y).iter().all(|&b| b == 7));
            assert!(buf.data()[y * 8 + 5..y * 8 + 8].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_alpha_buffer_copy_from() {
        let mut a = AlphaBuffer::try_new(6, 6).unwrap();
        a.row_slice_mut(1)[1] = 42;
        let mut b = a.try_new_like().unwrap();
        assert_eq!(b.row_slice(1)[1], 0);
        b.copy_from(&a);
        assert_eq!(b.row_slice(1)[1], 42);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_alpha_buffer_row_out_of_bounds() {
        let buf = AlphaBuffer::try_new(4, 4).unwrap();
        let _ = buf.row_slice(4);
    }
}
