//! Boundary-hold kernel used for extrapolation.

use core::ops::Range;

use num_traits::Float;

use super::{Bracket, Fit, Kernel, Region, STENCIL};

/// Holds the leftmost sample when extrapolating low and the rightmost
/// sample when extrapolating high. The stencil is that single sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hold;

impl<T: Float> Kernel<T> for Hold {
    #[inline]
    fn stencil(&self, bracket: &Bracket<T>, _extent: usize) -> Range<usize> {
        match bracket.region {
            Region::OutsideHigh => bracket.index + 1..bracket.index + 2,
            _ => bracket.index..bracket.index + 1,
        }
    }

    #[inline]
    fn fit(&self, _bracket: &Bracket<T>, _grid: &[T], samples: &[T], _lower: usize) -> Fit<T> {
        let mut weights = [T::zero(); STENCIL];
        weights[0] = T::one();

        Fit {
            value: samples[0],
            slope: T::zero(),
            weights,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hold() {
        let low = Bracket::new(0, -0.1);
        let high = Bracket::new(3, 1.1);
        assert_eq!(Kernel::<f64>::stencil(&Hold, &low, 5), 0..1);
        assert_eq!(Kernel::<f64>::stencil(&Hold, &high, 5), 4..5);

        let fit = Hold.fit(&high, &[4.0], &[7.5], 0);
        assert_eq!(fit.value, 7.5);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.weights[0], 1.0);
    }
}
