//! Nearest-sample piecewise-constant kernel.

use core::ops::Range;

use num_traits::Float;

use super::{Bracket, Fit, Kernel, STENCIL};

/// Nearest-value piecewise-constant interpolation.
/// In the event of a tie, the left value is taken.
///
/// Both samples of the bracket belong to the stencil, so a non-finite
/// value on either side poisons the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nearest;

impl<T: Float> Kernel<T> for Nearest {
    #[inline]
    fn stencil(&self, bracket: &Bracket<T>, _extent: usize) -> Range<usize> {
        bracket.index..bracket.index + 2
    }

    #[inline]
    fn fit(&self, bracket: &Bracket<T>, _grid: &[T], samples: &[T], lower: usize) -> Fit<T> {
        let half = T::one() / (T::one() + T::one());
        let pick = match bracket.t <= half {
            true => lower,
            false => lower + 1,
        };

        let mut weights = [T::zero(); STENCIL];
        weights[pick] = T::one();

        Fit {
            value: samples[pick],
            slope: T::zero(),
            weights,
        }
    }
}
