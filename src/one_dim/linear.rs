//! Linear kernel, also used for linear extrapolation.

use core::ops::Range;

use num_traits::Float;

use super::{Bracket, Fit, Kernel, STENCIL};

/// Linear interpolation between the two samples of the bracket.
///
/// The formula is affine in `t`, so it extrapolates unchanged with the
/// boundary interval's secant as the slope.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

impl<T: Float> Kernel<T> for Linear {
    #[inline]
    fn stencil(&self, bracket: &Bracket<T>, _extent: usize) -> Range<usize> {
        bracket.index..bracket.index + 2
    }

    #[inline]
    fn fit(&self, bracket: &Bracket<T>, grid: &[T], samples: &[T], lower: usize) -> Fit<T> {
        let t = bracket.t;
        let y0 = samples[lower];
        let dy = samples[lower + 1] - y0;
        let step = grid[lower + 1] - grid[lower];

        let mut weights = [T::zero(); STENCIL];
        weights[lower] = T::one() - t;
        weights[lower + 1] = t;

        Fit {
            value: y0 + t * dy,
            slope: dy / step,
            weights,
        }
    }
}
