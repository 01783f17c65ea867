//! One-dimensional building blocks of the table evaluation: locating the grid
//! interval that brackets a query value, and the kernels that combine the
//! samples around that interval into a value and a slope.

pub mod akima;
pub mod hold;
pub mod linear;
pub mod nearest;

pub use akima::Akima;
pub use hold::Hold;
pub use linear::Linear;
pub use nearest::Nearest;

use core::ops::Range;

use num_traits::Float;

use crate::options::ExtrapMethod;

/// Maximum number of samples a kernel consumes along one axis.
pub const STENCIL: usize = 6;

/// Location of a query value relative to the range of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// The grid interval `[index, index + 1]` associated with a query value,
/// and the normalized position `t` of the value within it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket<T> {
    pub index: usize,
    pub t: T,
    pub region: Region,
}

impl<T: Float> Bracket<T> {
    /// Bracket from a precomputed normalized position; `t` below zero or above
    /// one marks the query as outside the grid.
    pub fn new(index: usize, t: T) -> Self {
        let region = match t {
            t if t < T::zero() => Region::OutsideLow,
            t if t > T::one() => Region::OutsideHigh,
            _ => Region::Inside,
        };
        Self { index, t, region }
    }
}

/// Find the interval of a strictly increasing `grid` containing `v`.
///
/// A value exactly on an interior grid point resolves to the interval starting
/// at that point; the last grid point resolves to the last interval with `t = 1`.
///
/// Outside the grid, the first or last interval is used. `t` is the unclamped
/// normalized position, except under [`ExtrapMethod::Hold`] where it saturates to
/// 0 or 1. Rejecting out-of-range values under [`ExtrapMethod::None`] is left to the
/// caller, which knows which dimension is being located.
///
/// The grid must have at least two entries; degenerate axes are never located.
#[inline]
pub fn locate<T: Float>(grid: &[T], v: T, extrap: ExtrapMethod) -> Bracket<T> {
    let n = grid.len();
    if n < 2 {
        return Bracket {
            index: 0,
            t: T::zero(),
            region: Region::Inside,
        };
    }

    // Bisection search; returns 0 below the grid and n above it
    let iloc = grid.partition_point(|x| *x <= v) as isize - 1;
    let index = iloc.max(0).min(n as isize - 2) as usize;

    let region = match v {
        x if x < grid[0] => Region::OutsideLow,
        x if x > grid[n - 1] => Region::OutsideHigh,
        _ => Region::Inside,
    };

    let t = match (region, extrap) {
        (Region::OutsideLow, ExtrapMethod::Hold) => T::zero(),
        (Region::OutsideHigh, ExtrapMethod::Hold) => T::one(),
        _ => {
            let (x0, x1) = (grid[index], grid[index + 1]);
            (v - x0) / (x1 - x0)
        }
    };

    Bracket { index, t, region }
}

/// Result of fitting a kernel to the samples around a bracket.
#[derive(Clone, Copy, Debug)]
pub struct Fit<T> {
    /// Interpolated value
    pub value: T,
    /// Derivative of the value with respect to the axis coordinate
    pub slope: T,
    /// Sensitivity of the value to each stencil sample
    pub weights: [T; STENCIL],
}

/// A one-dimensional interpolation kernel.
pub trait Kernel<T: Float> {
    /// Grid indices of the samples needed to evaluate at `bracket`
    /// on an axis with `extent` points.
    fn stencil(&self, bracket: &Bracket<T>, extent: usize) -> Range<usize>;

    /// Fit the stencil samples. `grid` and `samples` cover exactly the stencil,
    /// and `lower` is the position of the bracket's lower point within it.
    fn fit(&self, bracket: &Bracket<T>, grid: &[T], samples: &[T], lower: usize) -> Fit<T>;
}
