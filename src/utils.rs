//! Helpers for building scales and tabulating functions on them.
use itertools::Itertools;
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint. A single value is `start`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    if n < 2 {
        return vec![start; n];
    }
    let last = T::from(n - 1).unwrap_or_else(T::one);
    let dx: T = (stop - start) / last;
    (0..n)
        .map(|i| match i == n - 1 {
            true => stop,
            false => start + T::from(i).unwrap_or_else(T::zero) * dx,
        })
        .collect()
}

/// Every point of the grid spanned by `scales`, in C ordering
/// (x0, y0, z0, x0, y0, z1, ..., x0, yn, zn)
pub fn meshgrid<T>(scales: &[&[T]]) -> Vec<Vec<T>>
where
    T: Float,
{
    scales
        .iter()
        .map(|s| s.iter().copied())
        .multi_cartesian_product()
        .collect()
}

/// Values of `f` at every point of the grid spanned by `scales`,
/// laid out as table data.
pub fn tabulate<T, F>(scales: &[&[T]], f: F) -> Vec<T>
where
    T: Float,
    F: Fn(&[T]) -> T,
{
    meshgrid(scales).iter().map(|p| f(p)).collect()
}
