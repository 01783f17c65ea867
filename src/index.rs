//! Mapping between flat storage offsets and per-dimension subscripts.
//!
//! Tables are stored in C order: the last dimension is contiguous, and
//! `z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...` are adjacent in memory.

use crate::error::{Result, TableError};
use crate::MAX_DIMS;

/// Extents and row-major strides of a table with up to [`MAX_DIMS`] dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    ndims: usize,
    dims: [usize; MAX_DIMS],
    strides: [usize; MAX_DIMS],
    numel: usize,
}

impl Default for Shape {
    /// The shape of a freshly allocated table: no dimensions, no elements.
    fn default() -> Self {
        Self {
            ndims: 0,
            dims: [0; MAX_DIMS],
            strides: [0; MAX_DIMS],
            numel: 0,
        }
    }
}

impl Shape {
    /// Build a shape from the extent of each dimension.
    ///
    /// # Errors
    /// * If there are no dimensions, or more than [`MAX_DIMS`]
    /// * If any extent is zero
    /// * If the total number of elements is not representable
    pub fn new(dims: &[usize]) -> Result<Self> {
        let ndims = dims.len();
        if ndims == 0 {
            return Err(TableError::EmptyShape);
        }
        if ndims > MAX_DIMS {
            return Err(TableError::TooManyDims { ndims });
        }
        if let Some(dim) = dims.iter().position(|&n| n == 0) {
            return Err(TableError::ZeroExtent { dim });
        }

        let mut shape = Self {
            ndims,
            ..Self::default()
        };
        shape.dims[..ndims].copy_from_slice(dims);

        // Each stride is the cumulative product of the extents of the
        // dimensions after this one.
        let mut acc: usize = 1;
        for i in (0..ndims).rev() {
            shape.strides[i] = acc;
            acc = acc
                .checked_mul(dims[i])
                .ok_or(TableError::ShapeOverflow)?;
        }
        shape.numel = acc;

        Ok(shape)
    }

    #[inline]
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims[..self.ndims]
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides[..self.ndims]
    }

    /// Total number of elements; zero for the empty shape.
    #[inline]
    pub fn numel(&self) -> usize {
        self.numel
    }

    /// Flat offset of a subscript tuple.
    ///
    /// # Errors
    /// * If the number of subscripts does not match the number of dimensions
    /// * If any subscript is outside its dimension's extent
    #[inline]
    pub fn subscripts_to_flat(&self, subs: &[usize]) -> Result<usize> {
        if subs.len() != self.ndims {
            return Err(TableError::DimMismatch {
                expected: self.ndims,
                actual: subs.len(),
            });
        }

        let mut i = 0;
        for j in 0..self.ndims {
            if subs[j] >= self.dims[j] {
                return Err(TableError::SubscriptOutOfRange {
                    dim: j,
                    subscript: subs[j],
                    extent: self.dims[j],
                });
            }
            i += subs[j] * self.strides[j];
        }

        Ok(i)
    }

    /// Decompose a flat offset into subscripts, written to the first
    /// `ndims` entries of `out`.
    ///
    /// # Errors
    /// * If `flat` is not less than the number of elements
    /// * If `out` has fewer entries than there are dimensions
    pub fn flat_to_subscripts(&self, flat: usize, out: &mut [usize]) -> Result<()> {
        if flat >= self.numel {
            return Err(TableError::IndexOutOfRange {
                index: flat,
                numel: self.numel,
            });
        }
        if out.len() < self.ndims {
            return Err(TableError::DimMismatch {
                expected: self.ndims,
                actual: out.len(),
            });
        }

        // Largest stride first
        let mut rem = flat;
        for j in 0..self.ndims {
            out[j] = rem / self.strides[j];
            rem %= self.strides[j];
        }

        Ok(())
    }
}
