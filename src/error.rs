//! Errors reported by the blur engine.

use thiserror::Error;

/// Errors that can occur while constructing or running a blur.
///
/// Every error is terminal for the instance involved: construction
/// returns no object, and a failed [`blur`](crate::AlphaBoxBlur::blur)
/// leaves the buffer as it was drawn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlurError {
    /// The raster rectangle has a zero or negative dimension.
    #[error("raster rectangle must be non-empty, got {width}x{height}")]
    InvalidRect { width: i32, height: i32 },

    /// A spread or blur radius has a negative component.
    #[error("radius must be non-negative, got ({width}, {height})")]
    NegativeRadius { width: i32, height: i32 },

    /// `stride * height` does not fit in the address space.
    #[error("raster of {width}x{height} pixels is too large to address")]
    BufferTooLarge { width: i32, height: i32 },

    /// Rectangle extents or combined radii do not fit in `i32`.
    #[error("raster geometry overflows the i32 coordinate range")]
    GeometryOverflow,

    /// The allocator refused a raster or scratch buffer.
    #[error("failed to allocate {bytes} bytes for the alpha raster")]
    AllocationFailed { bytes: usize },
}

pub type Result<T, E = BlurError> = std::result::Result<T, E>;
