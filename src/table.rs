//! The table: extents, one coordinate scale per dimension, and sample values.
//!
//! A table starts out empty and has its buffers attached by whatever loads it:
//!
//! ```rust
//! use ndtable::Table;
//!
//! let mut table = Table::<f64>::new();
//! table.set_shape(&[2, 3]).unwrap();
//! table.set_scale(0, vec![0.0, 1.0]).unwrap();
//! table.set_scale(1, vec![-1.0, 0.0, 1.0]).unwrap();
//! table.set_data(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert!(table.validate().is_ok());
//!
//! // Values are stored in C order
//! assert_eq!(table.get(&[1, 0]).unwrap(), 3.0);
//! ```
//!
//! Buffers are owned by the table and released when it is dropped
//! or when [`Table::release`] is called.
use num_traits::Float;
use tracing::debug;

use crate::error::{Result, TableError};
use crate::index::Shape;
use crate::MAX_DIMS;

/// An N-dimensional lookup table on a rectilinear grid.
///
/// Scales must be strictly increasing. The scale of a dimension with a single
/// point may be left unattached; no interpolation happens along it.
#[derive(Clone, Debug)]
pub struct Table<T> {
    shape: Shape,
    scales: [Option<Vec<T>>; MAX_DIMS],
    data: Option<Vec<T>>,
}

impl<T: Float> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Table<T> {
    /// An empty table with no dimensions and nothing attached.
    pub fn new() -> Self {
        Self {
            shape: Shape::default(),
            scales: core::array::from_fn(|_| None),
            data: None,
        }
    }

    /// Build a complete table, taking the extent of each dimension from its scale.
    ///
    /// Assumes C-style ordering of data (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
    ///
    /// # Errors
    /// * If there are no scales, or more than [`MAX_DIMS`]
    /// * If any scale is empty, not strictly increasing, or not finite
    /// * If the number of values does not match the product of the scale lengths
    pub fn from_parts(scales: Vec<Vec<T>>, data: Vec<T>) -> Result<Self> {
        let ndims = scales.len();
        if ndims > MAX_DIMS {
            return Err(TableError::TooManyDims { ndims });
        }
        let mut dims = [0_usize; MAX_DIMS];
        (0..ndims).for_each(|i| dims[i] = scales[i].len());

        let mut table = Self::new();
        table.set_shape(&dims[..ndims])?;
        for (dim, scale) in scales.into_iter().enumerate() {
            table.set_scale(dim, scale)?;
        }
        table.set_data(data)?;

        Ok(table)
    }

    /// Set the extent of each dimension, releasing any attached buffers.
    pub fn set_shape(&mut self, dims: &[usize]) -> Result<()> {
        let shape = Shape::new(dims)?;
        self.release();
        self.shape = shape;
        debug!(ndims = dims.len(), numel = shape.numel(), "table shape set");
        Ok(())
    }

    /// Attach the coordinate scale of one dimension, replacing any previous one.
    ///
    /// # Errors
    /// * If `dim` is not a dimension of the table
    /// * If the length does not match the extent of the dimension
    /// * If the values are not finite and strictly increasing
    pub fn set_scale(&mut self, dim: usize, scale: Vec<T>) -> Result<()> {
        let ndims = self.shape.ndims();
        if dim >= ndims {
            return Err(TableError::NoSuchDim { dim, ndims });
        }
        let extent = self.shape.dims()[dim];
        if scale.len() != extent {
            return Err(TableError::ScaleLength {
                dim,
                expected: extent,
                actual: scale.len(),
            });
        }
        if let Some(index) = scale.iter().position(|x| !x.is_finite()) {
            return Err(TableError::NonFiniteScale { dim, index });
        }
        if let Some(index) = scale.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TableError::NotIncreasing {
                dim,
                index: index + 1,
            });
        }

        self.scales[dim] = Some(scale);
        Ok(())
    }

    /// Attach the sample values, replacing any previous ones.
    ///
    /// Non-finite values are accepted; evaluations that touch them produce NaN.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<()> {
        if self.shape.ndims() == 0 {
            return Err(TableError::EmptyShape);
        }
        if data.len() != self.shape.numel() {
            return Err(TableError::DataLength {
                expected: self.shape.numel(),
                actual: data.len(),
            });
        }

        debug!(numel = data.len(), "table data attached");
        self.data = Some(data);
        Ok(())
    }

    /// Drop the data and every attached scale, returning the table to its
    /// freshly allocated state. Safe to call on a table with nothing attached.
    pub fn release(&mut self) {
        self.data = None;
        self.scales.iter_mut().for_each(|s| *s = None);
        self.shape = Shape::default();
    }

    /// Check that everything needed for evaluation is attached.
    ///
    /// # Errors
    /// * If the table has no dimensions or no data
    /// * If a dimension with more than one point has no scale
    pub fn validate(&self) -> Result<()> {
        if self.shape.ndims() == 0 {
            return Err(TableError::EmptyShape);
        }
        if self.data.is_none() {
            return Err(TableError::MissingData);
        }
        for (dim, &n) in self.shape.dims().iter().enumerate() {
            if n > 1 && self.scales[dim].is_none() {
                return Err(TableError::MissingScale { dim });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn ndims(&self) -> usize {
        self.shape.ndims()
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Coordinate scale of a dimension, if attached
    #[inline]
    pub fn scale(&self, dim: usize) -> Option<&[T]> {
        self.scales.get(dim)?.as_deref()
    }

    #[inline]
    pub fn data(&self) -> Option<&[T]> {
        self.data.as_deref()
    }

    /// Sample value at a subscript tuple
    pub fn get(&self, subs: &[usize]) -> Result<T> {
        let i = self.shape.subscripts_to_flat(subs)?;
        let data = self.data.as_deref().ok_or(TableError::MissingData)?;
        Ok(data[i])
    }

    /// Flat offset of a subscript tuple; see [`Shape::subscripts_to_flat`].
    #[inline]
    pub fn subscripts_to_flat(&self, subs: &[usize]) -> Result<usize> {
        self.shape.subscripts_to_flat(subs)
    }

    /// Subscripts of a flat offset; see [`Shape::flat_to_subscripts`].
    #[inline]
    pub fn flat_to_subscripts(&self, flat: usize, out: &mut [usize]) -> Result<()> {
        self.shape.flat_to_subscripts(flat, out)
    }

    /// Check whether a point is inside the table within some absolute tolerance.
    ///
    /// Output slice entry `i` is set to `false` if the point is in bounds on that
    /// dimension, and set to `true` if there is a bounds violation on that axis.
    /// Dimensions with a single point are never out of bounds.
    ///
    /// # Errors
    /// * If the dimensionality of the point or the output does not match the table
    pub fn check_bounds(&self, point: &[T], atol: T, out: &mut [bool]) -> Result<()> {
        let ndims = self.shape.ndims();
        if point.len() != ndims || out.len() != ndims {
            return Err(TableError::DimMismatch {
                expected: ndims,
                actual: point.len().min(out.len()),
            });
        }
        for i in 0..ndims {
            out[i] = match self.scale(i) {
                Some(&[lo, .., hi]) => {
                    let x = point[i];
                    (x - lo) <= -atol || (x - hi) >= atol
                }
                _ => false,
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Table;
    use crate::error::TableError;
    use crate::MAX_DIMS;

    #[test]
    fn test_allocate_and_free() {
        // Nothing to release
        let absent: Option<Table<f64>> = None;
        drop(absent);

        let table = Table::<f64>::new();
        assert_eq!(table.ndims(), 0);
        assert_eq!(table.numel(), 0);
        assert!(table.data().is_none());
        drop(table);

        // Everything attached
        let mut table = Table::<f64>::new();
        table.set_shape(&[1; MAX_DIMS]).unwrap();
        for dim in 0..MAX_DIMS {
            table.set_scale(dim, vec![0.0]).unwrap();
        }
        table.set_data(vec![1.0]).unwrap();
        assert!(table.validate().is_ok());

        table.release();
        assert_eq!(table.ndims(), 0);
        assert!(table.data().is_none());
        assert!((0..MAX_DIMS).all(|dim| table.scale(dim).is_none()));

        // Releasing twice is fine
        table.release();
    }

    #[test]
    fn test_from_parts() {
        let scales = vec![vec![0.0, 1.0], vec![0.0, 1.0, 2.0]];
        let table = Table::from_parts(scales, (0..6).map(f64::from).collect()).unwrap();
        assert_eq!(table.dims(), &[2, 3]);
        assert_eq!(table.get(&[1, 2]).unwrap(), 5.0);
        assert_eq!(table.subscripts_to_flat(&[1, 1]).unwrap(), 4);

        let mut subs = [0; 2];
        table.flat_to_subscripts(4, &mut subs).unwrap();
        assert_eq!(subs, [1, 1]);
    }

    #[test]
    fn test_attach_errors() {
        let mut table = Table::<f64>::new();
        assert_eq!(table.set_data(vec![1.0]), Err(TableError::EmptyShape));
        assert_eq!(table.validate(), Err(TableError::EmptyShape));

        table.set_shape(&[3, 2]).unwrap();
        assert_eq!(
            table.set_data(vec![0.0; 5]),
            Err(TableError::DataLength {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(
            table.set_scale(0, vec![0.0, 1.0]),
            Err(TableError::ScaleLength {
                dim: 0,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            table.set_scale(0, vec![0.0, 1.0, 1.0]),
            Err(TableError::NotIncreasing { dim: 0, index: 2 })
        );
        assert_eq!(
            table.set_scale(1, vec![f64::NAN, 1.0]),
            Err(TableError::NonFiniteScale { dim: 1, index: 0 })
        );
        assert_eq!(
            table.set_scale(2, vec![0.0]),
            Err(TableError::NoSuchDim { dim: 2, ndims: 2 })
        );

        table.set_data(vec![0.0; 6]).unwrap();
        assert_eq!(table.validate(), Err(TableError::MissingScale { dim: 0 }));

        // Changing the shape drops what was attached
        table.set_scale(0, vec![0.0, 1.0, 2.0]).unwrap();
        table.set_shape(&[2]).unwrap();
        assert!(table.data().is_none());
        assert!(table.scale(0).is_none());
    }

    #[test]
    fn test_degenerate_scale_optional() {
        let mut table = Table::<f64>::new();
        table.set_shape(&[2, 1]).unwrap();
        table.set_scale(0, vec![0.0, 1.0]).unwrap();
        table.set_data(vec![1.0, 2.0]).unwrap();
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_too_many_dims() {
        let scales = vec![vec![0.0, 1.0]; MAX_DIMS + 1];
        assert_eq!(
            Table::from_parts(scales, vec![0.0; 1 << (MAX_DIMS + 1)]).unwrap_err(),
            TableError::TooManyDims {
                ndims: MAX_DIMS + 1
            }
        );
    }

    #[test]
    fn test_check_bounds() {
        let table = Table::from_parts(
            vec![vec![0.0, 1.0], vec![-1.0, 0.0, 1.0]],
            vec![0.0; 6],
        )
        .unwrap();
        let mut out = [false; 2];

        table.check_bounds(&[0.5, 1.0], 1e-12, &mut out).unwrap();
        assert_eq!(out, [false, false]);

        table.check_bounds(&[1.5, -1.0 - 1e-6], 1e-12, &mut out).unwrap();
        assert_eq!(out, [true, true]);

        table.check_bounds(&[1.0 + 1e-9, 0.0], 1e-6, &mut out).unwrap();
        assert_eq!(out, [false, false]);

        assert!(table.check_bounds(&[0.5], 1e-12, &mut out).is_err());
    }
}
