//! Evaluation of N-dimensional lookup tables.
//!
//! A [`Table`] holds sample values on a rectilinear grid of up to [`MAX_DIMS`]
//! dimensions, with a strictly increasing coordinate scale per dimension.
//! Evaluating it at a point gives the interpolated value and its partial
//! derivative with respect to each coordinate:
//!
//! ```rust
//! use ndtable::{ExtrapMethod, InterpMethod, Options, Table};
//!
//! // z = x + 0.1 * y on a 3x2 grid
//! let x = vec![0.0, 1.0, 2.0];
//! let y = vec![0.0, 10.0];
//! let z = vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0];
//! let table = Table::from_parts(vec![x, y], z).unwrap();
//!
//! let e = table.evaluate(&[0.5, 5.0], Options::default()).unwrap();
//! assert_eq!(e.value, 1.0);
//! assert_eq!(e.derivatives(), &[1.0, 0.1]);
//!
//! let opts = Options::new(InterpMethod::Akima, ExtrapMethod::Hold);
//! let e = table.evaluate(&[3.0, 5.0], opts).unwrap();
//! assert_eq!(e.value, 2.5);
//! assert_eq!(e.derivatives()[0], 0.0);
//! ```
//!
//! | Method | Samples per axis | Continuity |
//! |--------|------------------|------------|
//! | Nearest | 2 | none |
//! | Linear | 2 | C0 |
//! | Akima | up to 6 | C1 |
//!
//! Outside the grid, [`ExtrapMethod::Hold`] clamps to the boundary and
//! [`ExtrapMethod::Linear`] continues the boundary interval's secant, whatever
//! the interpolation method. [`ExtrapMethod::None`] rejects the query.
//!
//! Non-finite sample values are allowed in the data. An evaluation that
//! touches one, or that is queried at NaN along a dimension with more than
//! one point, produces NaN for the value and every derivative instead of an error.
//!
//! Evaluation does not allocate, and a table can be shared between threads.
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod eval;
pub mod index;
pub mod one_dim;
pub mod options;
pub mod table;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Result, TableError};
pub use eval::Evaluation;
pub use index::Shape;
pub use one_dim::{locate, Bracket, Region};
pub use options::{ExtrapMethod, InterpMethod, Options};
pub use table::Table;

/// Maximum number of dimensions of a table
pub const MAX_DIMS: usize = 16;
