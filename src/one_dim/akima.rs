//! Akima's locally weighted cubic Hermite kernel.
//!
//! The slope at each grid point is a blend of the secants on either side,
//! weighted by how much the secants change further out. Where the secants
//! on one side agree with each other, that side dominates, which keeps the
//! interpolant from overshooting near steps and outliers.
//!
//! Up to six samples contribute: two points on either side of the bracket.
//! Close to the edge of the grid, the missing secants are continued linearly
//! from the ones that exist (`m[-1] = 2 m[0] - m[1]`, `m[-2] = 2 m[-1] - m[0]`).
//! On a uniform grid this reproduces a quadratic exactly all the way to the
//! boundary, which gives a gradual decrease in the order of the interpolant
//! instead of a discontinuity in slope at the first and last interval.
//!
//! The blend weights depend on the sample values, so the interpolant is not
//! linear in the samples. [`Fit::weights`] is its gradient with respect to the
//! samples, including the change of the blend weights. The interpolant is
//! homogeneous of degree one in the samples, so the gradient dotted with the
//! samples still reproduces the value.
//!
//! References
//! * H. Akima, "A New Method of Interpolation and Smooth Curve Fitting
//!   Based on Local Procedures", J. ACM 17(4), 1970
use core::ops::Range;

use num_traits::Float;

use super::{Bracket, Fit, Kernel, STENCIL};

/// Akima cubic interpolation. Needs at least three points along the axis;
/// with two, the stencil holds a single secant and the fit is linear.
#[derive(Clone, Copy, Debug, Default)]
pub struct Akima;

/// Coefficients of each stencil sample in some linear quantity
type Form<T> = [T; STENCIL];

impl<T: Float> Kernel<T> for Akima {
    #[inline]
    fn stencil(&self, bracket: &Bracket<T>, extent: usize) -> Range<usize> {
        bracket.index.saturating_sub(2)..(bracket.index + 4).min(extent)
    }

    fn fit(&self, bracket: &Bracket<T>, grid: &[T], samples: &[T], lower: usize) -> Fit<T> {
        let one = T::one();
        let two = one + one;
        let n = samples.len();

        // Secants m[-2..=2] relative to the bracket, stored at offset 2.
        // m[0] is the secant across the bracket itself.
        let mut secants: [Option<Form<T>>; 5] = [None; 5];
        for k in 0..5 {
            let j = lower as isize + k as isize - 2;
            if j >= 0 && (j as usize) + 1 < n {
                let j = j as usize;
                let h = grid[j + 1] - grid[j];
                secants[k] = Some(combine(-one / h, &unit(j), one / h, &unit(j + 1)));
            }
        }

        // Continue missing secants linearly from the interior
        let m2 = secants[2].unwrap_or([T::zero(); STENCIL]);
        let m1 = secants[1]
            .or_else(|| secants[3].map(|m3| combine(two, &m2, -one, &m3)))
            .unwrap_or(m2);
        let m3 = secants[3].unwrap_or_else(|| combine(two, &m2, -one, &m1));
        let m0 = secants[0].unwrap_or_else(|| combine(two, &m1, -one, &m2));
        let m4 = secants[4].unwrap_or_else(|| combine(two, &m3, -one, &m2));
        let m = [m0, m1, m2, m3, m4];

        let mut s = [T::zero(); 5];
        (0..5).for_each(|k| s[k] = apply(&m[k], samples));

        // Slopes at the lower and upper point of the bracket
        let (k0, dk0) = tangent(&m, &s, 0);
        let (k1, dk1) = tangent(&m, &s, 1);

        let h = grid[lower + 1] - grid[lower];
        let (basis, dbasis) = hermite_basis(bracket.t);

        let mut value = [T::zero(); STENCIL];
        let mut slope = [T::zero(); STENCIL];
        let mut weights = [T::zero(); STENCIL];
        for i in 0..STENCIL {
            value[i] = h * (basis[1] * k0[i] + basis[3] * k1[i]);
            slope[i] = dbasis[1] * k0[i] + dbasis[3] * k1[i];
            weights[i] = h * (basis[1] * dk0[i] + basis[3] * dk1[i]);
        }
        for (form, c0, c1) in [
            (&mut value, basis[0], basis[2]),
            (&mut slope, dbasis[0] / h, dbasis[2] / h),
            (&mut weights, basis[0], basis[2]),
        ] {
            form[lower] = form[lower] + c0;
            form[lower + 1] = form[lower + 1] + c1;
        }

        Fit {
            value: apply(&value, samples),
            slope: apply(&slope, samples),
            weights,
        }
    }
}

/// Akima slope at the point between secants `offset + 1` and `offset + 2`,
/// as (form with the blend weights held fixed, gradient w.r.t. the samples).
#[inline]
fn tangent<T: Float>(m: &[Form<T>; 5], s: &[T; 5], offset: usize) -> (Form<T>, Form<T>) {
    let da = s[offset + 3] - s[offset + 2];
    let db = s[offset + 1] - s[offset];
    let (a, b) = (da.abs(), db.abs());
    let w = a + b;

    // All four secants agree; take the plain average
    if w == T::zero() {
        let half = T::one() / (T::one() + T::one());
        let k = combine(half, &m[offset + 1], half, &m[offset + 2]);
        return (k, k);
    }

    let (wa, wb) = (a / w, b / w);
    let k = combine(wa, &m[offset + 1], wb, &m[offset + 2]);

    // d(wa) = (b da - a db) / w^2, and d(wb) = -d(wa)
    let grad_a = combine(sign(da), &m[offset + 3], -sign(da), &m[offset + 2]);
    let grad_b = combine(sign(db), &m[offset + 1], -sign(db), &m[offset]);
    let dwa = combine(b / (w * w), &grad_a, -a / (w * w), &grad_b);
    let gap = s[offset + 1] - s[offset + 2];
    let dk = combine(T::one(), &k, gap, &dwa);

    (k, dk)
}

/// Sign with zero mapped to zero
#[inline]
fn sign<T: Float>(x: T) -> T {
    match x {
        x if x > T::zero() => T::one(),
        x if x < T::zero() => -T::one(),
        _ => T::zero(),
    }
}

/// Cubic Hermite basis functions on the unit interval and their derivatives,
/// ordered as (value at 0, slope at 0, value at 1, slope at 1).
#[inline]
fn hermite_basis<T: Float>(t: T) -> ([T; 4], [T; 4]) {
    let one = T::one();
    let two = one + one;
    let three = two + one;
    let four = two + two;
    let six = three + three;

    let t2 = t * t;
    let t3 = t2 * t;
    let u = one - t;

    let basis = [
        (one + two * t) * u * u,
        t * u * u,
        t2 * (three - two * t),
        t3 - t2,
    ];
    let dbasis = [
        six * t2 - six * t,
        three * t2 - four * t + one,
        six * t - six * t2,
        three * t2 - two * t,
    ];

    (basis, dbasis)
}

#[inline]
fn unit<T: Float>(i: usize) -> Form<T> {
    let mut f = [T::zero(); STENCIL];
    f[i] = T::one();
    f
}

/// `a * x + b * y`
#[inline]
fn combine<T: Float>(a: T, x: &Form<T>, b: T, y: &Form<T>) -> Form<T> {
    let mut f = [T::zero(); STENCIL];
    for i in 0..STENCIL {
        f[i] = a * x[i] + b * y[i];
    }
    f
}

#[inline]
fn apply<T: Float>(form: &Form<T>, samples: &[T]) -> T {
    form.iter()
        .zip(samples)
        .fold(T::zero(), |acc, (&c, &y)| acc + c * y)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::one_dim::{locate, Linear};
    use crate::options::ExtrapMethod;
    use crate::testing::{jitter, rng_fixed_seed};
    use crate::utils::linspace;

    /// Evaluate the kernel at `x` the way the table evaluator does
    fn eval(grid: &[f64], y: &[f64], x: f64) -> Fit<f64> {
        let b = locate(grid, x, ExtrapMethod::None);
        let r = Akima.stencil(&b, grid.len());
        Akima.fit(&b, &grid[r.clone()], &y[r.clone()], b.index - r.start)
    }

    #[test]
    fn test_stencil_clipping() {
        let b = Bracket::new(0, 0.5);
        assert_eq!(Kernel::<f64>::stencil(&Akima, &b, 10), 0..4);
        let b = Bracket::new(5, 0.5);
        assert_eq!(Kernel::<f64>::stencil(&Akima, &b, 10), 3..9);
        let b = Bracket::new(8, 0.5);
        assert_eq!(Kernel::<f64>::stencil(&Akima, &b, 10), 6..10);
        let b = Bracket::new(0, 0.5);
        assert_eq!(Kernel::<f64>::stencil(&Akima, &b, 3), 0..3);
    }

    /// On a uniform grid, a quadratic is reproduced exactly,
    /// including in the first and last intervals.
    #[test]
    fn test_quadratic_uniform() {
        let grid = linspace(-2.0, 2.0, 9);
        let y: Vec<f64> = grid.iter().map(|x| x * x - 3.0 * x + 1.0).collect();

        for x in linspace(-2.0, 2.0, 101) {
            let fit = eval(&grid, &y, x);
            assert!((fit.value - (x * x - 3.0 * x + 1.0)).abs() < 1e-12);
            assert!((fit.slope - (2.0 * x - 3.0)).abs() < 1e-10);
        }
    }

    /// Lines are reproduced on an uneven grid
    #[test]
    fn test_linear_uneven() {
        let mut rng = rng_fixed_seed();
        let n = 12;
        let mut grid = linspace(0.0, 11.0, n);
        jitter(&mut rng, &mut grid, 0.5);
        let y: Vec<f64> = grid.iter().map(|x| 0.5 - 2.5 * x).collect();

        for x in linspace(grid[0], grid[n - 1], 77) {
            let fit = eval(&grid, &y, x);
            assert!((fit.value - (0.5 - 2.5 * x)).abs() < 1e-10);
            assert!((fit.slope + 2.5).abs() < 1e-10);
        }
    }

    /// A step does not ring on either side
    #[test]
    fn test_step_no_overshoot() {
        let grid = linspace(0.0, 5.0, 6);
        let y = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];

        for x in linspace(0.0, 5.0, 51) {
            let fit = eval(&grid, &y, x);
            assert!(fit.value >= -1e-15 && fit.value <= 1.0 + 1e-15);
            assert!(fit.slope >= -1e-12);
            if x <= 2.0 {
                assert!(fit.value.abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_sine() {
        let grid = linspace(0.0, 2.0 * std::f64::consts::PI, 41);
        let y: Vec<f64> = grid.iter().map(|x| x.sin()).collect();

        for x in linspace(0.0, 2.0 * std::f64::consts::PI, 200) {
            let fit = eval(&grid, &y, x);
            assert!((fit.value - x.sin()).abs() < 1e-2);
            assert!((fit.slope - x.cos()).abs() < 0.15);
        }
    }

    /// The weights are the gradient of the value with respect to the samples
    #[test]
    fn test_weights_gradient() {
        let grid = [0.0, 0.7, 1.1, 2.0, 3.5, 3.9, 5.0];
        let y = [1.0, -0.3, 2.2, 0.4, 0.9, 3.0, -1.0];
        let eps = 1e-6;
        for x in [0.3, 0.8, 1.6, 2.4, 3.7, 4.5] {
            let b = locate(&grid, x, ExtrapMethod::None);
            let r = Akima.stencil(&b, grid.len());
            let lower = b.index - r.start;
            let fit = Akima.fit(&b, &grid[r.clone()], &y[r.clone()], lower);

            for k in 0..r.len() {
                let mut hi = y;
                let mut lo = y;
                hi[r.start + k] += eps;
                lo[r.start + k] -= eps;
                let vhi = Akima.fit(&b, &grid[r.clone()], &hi[r.clone()], lower).value;
                let vlo = Akima.fit(&b, &grid[r.clone()], &lo[r.clone()], lower).value;
                let fd = (vhi - vlo) / (2.0 * eps);
                assert!((fd - fit.weights[k]).abs() < 1e-6);
            }
        }
    }

    /// The weights also reproduce the value
    #[test]
    fn test_weights_consistent() {
        let grid = [0.0, 0.7, 1.1, 2.0, 3.5, 3.9, 5.0];
        let y = [1.0, -0.3, 2.2, 0.4, 0.9, 3.0, -1.0];
        for x in linspace(0.0, 5.0, 40) {
            let b = locate(&grid, x, ExtrapMethod::None);
            let r = Akima.stencil(&b, grid.len());
            let fit = Akima.fit(&b, &grid[r.clone()], &y[r.clone()], b.index - r.start);
            let v: f64 = (0..r.len()).map(|k| fit.weights[k] * y[r.start + k]).sum();
            assert!((v - fit.value).abs() < 1e-12);
        }
    }

    /// With only two points the fit degenerates to the linear kernel
    #[test]
    fn test_two_points() {
        let grid = [0.0, 2.0];
        let y = [1.0, 2.0];
        let b = Bracket::new(0, 0.25);
        let fit = Akima.fit(&b, &grid, &y, 0);
        let lin = Linear.fit(&b, &grid, &y, 0);
        assert!((fit.value - lin.value).abs() < 1e-12);
        assert!((fit.slope - lin.slope).abs() < 1e-12);
    }
}
