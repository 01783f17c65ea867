//! Evaluation of a table at one point.
//!
//! The N-dimensional evaluation is collapsed into a tree of one-dimensional
//! fits: starting from the first (outermost) dimension, each level gathers the
//! samples its kernel needs by recursing into the next dimension once per
//! stencil point, and the leaves index into the data. Every level returns the
//! value along with the partial derivatives for its own and all inner
//! dimensions, combined by the chain rule.
//!
//! The recursion depth is the number of dimensions, and all intermediate
//! storage is fixed-size and on the stack, so evaluation does not allocate.
//! The subscript tuple of each branch is passed down by value rather than
//! shared, so a table can be evaluated from many threads at once.
//!
//! ```rust
//! use ndtable::{ExtrapMethod, InterpMethod, Options, Table};
//!
//! let table = Table::from_parts(vec![vec![0.0, 1.0]], vec![2.0, 3.0]).unwrap();
//!
//! let opts = Options::new(InterpMethod::Linear, ExtrapMethod::Linear);
//! let e = table.evaluate(&[2.0], opts).unwrap();
//! assert_eq!(e.value, 4.0);
//! assert_eq!(e.derivatives(), &[1.0]);
//!
//! let opts = Options::new(InterpMethod::Linear, ExtrapMethod::None);
//! let err = table.evaluate(&[2.0], opts).unwrap_err();
//! assert_eq!(err.status(), -1);
//! ```
use num_traits::Float;
use tracing::{debug, trace};

use crate::error::{Result, TableError};
use crate::one_dim::{locate, Akima, Bracket, Hold, Kernel, Linear, Nearest, Region, STENCIL};
use crate::options::{ExtrapMethod, InterpMethod, Options};
use crate::table::Table;
use crate::MAX_DIMS;

/// Value and partial derivatives of a table at one point.
///
/// If any sample that contributed was NaN or infinite, the value and every
/// derivative are NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation<T> {
    pub value: T,
    derivatives: [T; MAX_DIMS],
    ndims: usize,
}

impl<T: Float> Evaluation<T> {
    fn poisoned(ndims: usize) -> Self {
        Self {
            value: T::nan(),
            derivatives: [T::nan(); MAX_DIMS],
            ndims,
        }
    }

    /// Partial derivative with respect to the coordinate of each dimension
    #[inline]
    pub fn derivatives(&self) -> &[T] {
        &self.derivatives[..self.ndims]
    }

    /// Whether a non-finite sample or a NaN coordinate was touched
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.value.is_nan()
    }

    /// Rate of change of the value along the direction `delta`.
    ///
    /// # Errors
    /// * If `delta` does not have one entry per dimension
    pub fn directional(&self, delta: &[T]) -> Result<T> {
        if delta.len() != self.ndims {
            return Err(TableError::DimMismatch {
                expected: self.ndims,
                actual: delta.len(),
            });
        }
        Ok(self
            .derivatives()
            .iter()
            .zip(delta)
            .fold(T::zero(), |acc, (&d, &dx)| acc + d * dx))
    }
}

/// Subscripts of the current branch of the recursion
type Subscripts = [usize; MAX_DIMS];

/// Partial result of one branch. Derivatives of dimensions
/// outside the branch are zero.
#[derive(Clone, Copy)]
struct Node<T> {
    value: T,
    derivatives: [T; MAX_DIMS],
}

impl<T: Float> Node<T> {
    #[inline]
    fn new(value: T) -> Self {
        Self {
            value,
            derivatives: [T::zero(); MAX_DIMS],
        }
    }

    #[inline]
    fn poisoned() -> Self {
        Self {
            value: T::nan(),
            derivatives: [T::nan(); MAX_DIMS],
        }
    }

    #[inline]
    fn is_poisoned(&self) -> bool {
        !self.value.is_finite()
    }
}

impl<T: Float> Table<T> {
    /// Interpolate or extrapolate the value at a point, along with its partial
    /// derivative with respect to each coordinate.
    ///
    /// # Errors
    /// * If the table is not fully attached
    /// * If the point does not have one coordinate per dimension
    /// * If the point is outside the table range under [`ExtrapMethod::None`]
    pub fn evaluate(&self, point: &[T], options: Options) -> Result<Evaluation<T>> {
        self.validate()?;
        let ndims = self.ndims();
        if point.len() != ndims {
            return Err(TableError::DimMismatch {
                expected: ndims,
                actual: point.len(),
            });
        }

        let mut brackets = [Bracket::new(0, T::zero()); MAX_DIMS];
        for dim in 0..ndims {
            // Degenerate dimensions keep the default bracket and are never read
            if let Some(grid) = self.scale(dim).filter(|g| g.len() > 1) {
                brackets[dim] = locate(grid, point[dim], options.extrap);
            }
        }

        self.evaluate_brackets(&brackets[..ndims], options)
    }

    /// Evaluate with precomputed brackets, one per dimension, as returned by
    /// [`locate`] or built with [`Bracket::new`]. Brackets of dimensions with a
    /// single point are ignored.
    ///
    /// # Errors
    /// * If the table is not fully attached
    /// * If there is not one bracket per dimension
    /// * If a bracket index does not leave room for its upper point
    /// * If a bracket is outside the table range under [`ExtrapMethod::None`]
    pub fn evaluate_brackets(
        &self,
        brackets: &[Bracket<T>],
        options: Options,
    ) -> Result<Evaluation<T>> {
        self.validate()?;
        let ndims = self.ndims();
        if brackets.len() != ndims {
            return Err(TableError::DimMismatch {
                expected: ndims,
                actual: brackets.len(),
            });
        }

        // Domain checks come first so that nothing is read before a failure
        let mut poisoned = false;
        for (dim, b) in brackets.iter().enumerate() {
            let n = self.dims()[dim];
            if n < 2 {
                continue;
            }
            poisoned |= b.t.is_nan();
            if b.index > n - 2 {
                return Err(TableError::BracketOutOfRange {
                    dim,
                    index: b.index,
                    extent: n,
                });
            }
            if b.region != Region::Inside && options.extrap == ExtrapMethod::None {
                return Err(self.out_of_domain(dim, b));
            }
        }
        if poisoned {
            return Ok(Evaluation::poisoned(ndims));
        }

        let node = self.populate(0, [0; MAX_DIMS], brackets, options)?;
        if node.is_poisoned() {
            return Ok(Evaluation::poisoned(ndims));
        }

        Ok(Evaluation {
            value: node.value,
            derivatives: node.derivatives,
            ndims,
        })
    }

    /// Evaluate at a point, writing the partial derivatives to `derivatives`
    /// and returning the value.
    ///
    /// # Errors
    /// * As [`Table::evaluate`]
    /// * If `derivatives` does not have one entry per dimension
    pub fn evaluate_into(&self, point: &[T], options: Options, derivatives: &mut [T]) -> Result<T> {
        if derivatives.len() != self.ndims() {
            return Err(TableError::DimMismatch {
                expected: self.ndims(),
                actual: derivatives.len(),
            });
        }
        let e = self.evaluate(point, options)?;
        derivatives.copy_from_slice(e.derivatives());
        Ok(e.value)
    }

    /// Rate of change of the table value at `point` along the direction `delta`,
    /// i.e. the sum of each partial derivative times the matching entry of `delta`.
    ///
    /// # Errors
    /// * As [`Table::evaluate`]
    /// * If `delta` does not have one entry per dimension
    pub fn evaluate_derivative(&self, point: &[T], delta: &[T], options: Options) -> Result<T> {
        self.evaluate(point, options)?.directional(delta)
    }

    /// Recursive evaluation of the branch fixed by `subs` on the dimensions before `dim`
    fn populate(
        &self,
        dim: usize,
        subs: Subscripts,
        brackets: &[Bracket<T>],
        options: Options,
    ) -> Result<Node<T>> {
        let ndims = self.ndims();

        // If we have arrived at a leaf, index into data
        if dim == ndims {
            let i = self.subscripts_to_flat(&subs[..ndims])?;
            let data = self.data().ok_or(TableError::MissingData)?;
            let v = data[i];
            return Ok(match v.is_finite() {
                true => Node::new(v),
                false => Node::poisoned(),
            });
        }

        // No interpolation along a single point; the derivative stays zero
        if self.dims()[dim] < 2 {
            return self.populate(dim + 1, subs, brackets, options);
        }

        match (brackets[dim].region, options.interp, options.extrap) {
            (Region::Inside, InterpMethod::Nearest, _) => {
                self.interp_dim(&Nearest, dim, subs, brackets, options)
            }
            (Region::Inside, InterpMethod::Linear, _) => {
                self.interp_dim(&Linear, dim, subs, brackets, options)
            }
            (Region::Inside, InterpMethod::Akima, _) if self.dims()[dim] > 2 => {
                self.interp_dim(&Akima, dim, subs, brackets, options)
            }
            (Region::Inside, InterpMethod::Akima, _) => {
                trace!(dim, "two points are too few for akima, using linear");
                self.interp_dim(&Linear, dim, subs, brackets, options)
            }
            (_, _, ExtrapMethod::Hold) => self.interp_dim(&Hold, dim, subs, brackets, options),
            // Out-of-range queries under ExtrapMethod::None were rejected before the recursion
            _ => self.interp_dim(&Linear, dim, subs, brackets, options),
        }
    }

    /// Gather the kernel's stencil along `dim` from the inner dimensions and fit it
    fn interp_dim<K: Kernel<T>>(
        &self,
        kernel: &K,
        dim: usize,
        subs: Subscripts,
        brackets: &[Bracket<T>],
        options: Options,
    ) -> Result<Node<T>> {
        let ndims = self.ndims();
        let bracket = &brackets[dim];
        let range = kernel.stencil(bracket, self.dims()[dim]);
        let len = range.len();

        let mut samples = [T::zero(); STENCIL];
        let mut children = [Node::new(T::zero()); STENCIL];
        let mut loc = subs;
        for (k, i) in range.clone().enumerate() {
            loc[dim] = i;
            let child = self.populate(dim + 1, loc, brackets, options)?;
            if child.is_poisoned() {
                return Ok(Node::poisoned());
            }
            samples[k] = child.value;
            children[k] = child;
        }

        let grid = self.scale(dim).ok_or(TableError::MissingScale { dim })?;
        // The hold stencil may start above the bracket's lower point
        let lower = bracket.index.saturating_sub(range.start);
        let fit = kernel.fit(bracket, &grid[range], &samples[..len], lower);

        let mut node = Node::new(fit.value);
        node.derivatives[dim] = fit.slope;
        for j in dim + 1..ndims {
            node.derivatives[j] = (0..len).fold(T::zero(), |acc, k| {
                acc + fit.weights[k] * children[k].derivatives[j]
            });
        }

        if node.is_poisoned() {
            return Ok(Node::poisoned());
        }
        Ok(node)
    }

    fn out_of_domain(&self, dim: usize, b: &Bracket<T>) -> TableError {
        let grid = self.scale(dim).unwrap_or(&[]);
        let f = |x: T| x.to_f64().unwrap_or(f64::NAN);
        let (value, min, max) = match grid {
            [lo, .., hi] => {
                let (x0, x1) = (grid[b.index], grid[b.index + 1]);
                (f(x0 + b.t * (x1 - x0)), f(*lo), f(*hi))
            }
            _ => (f64::NAN, f64::NAN, f64::NAN),
        };
        debug!(dim, value, min, max, "query outside table range");
        TableError::OutOfDomain {
            dim,
            value,
            min,
            max,
        }
    }
}
