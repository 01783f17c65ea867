//! Failures reported by table assembly, index mapping, and evaluation.
//!
//! A NaN or infinite sample touched during evaluation is not an error:
//! it produces a NaN value and NaN derivatives inside an `Ok`.

use thiserror::Error;

use crate::MAX_DIMS;

/// Result type used throughout the crate.
pub type Result<V> = std::result::Result<V, TableError>;

/// Errors produced by tables and their evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// The query point lies outside the table range and extrapolation is disabled.
    #[error("value {value} of dimension {dim} is outside the table range [{min}, {max}]")]
    OutOfDomain {
        dim: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("number of dimensions ({ndims}) exceeds the maximum ({max})", max = MAX_DIMS)]
    TooManyDims { ndims: usize },

    #[error("table has no dimensions")]
    EmptyShape,

    #[error("dimension {dim} has zero extent")]
    ZeroExtent { dim: usize },

    #[error("number of table elements overflows usize")]
    ShapeOverflow,

    #[error("dimension {dim} does not exist in a table with {ndims} dimensions")]
    NoSuchDim { dim: usize, ndims: usize },

    #[error("expected {expected} entries, got {actual}")]
    DimMismatch { expected: usize, actual: usize },

    #[error("subscript {subscript} of dimension {dim} is outside the extent {extent}")]
    SubscriptOutOfRange {
        dim: usize,
        subscript: usize,
        extent: usize,
    },

    #[error("index {index} is outside the table with {numel} elements")]
    IndexOutOfRange { index: usize, numel: usize },

    #[error("bracket index {index} of dimension {dim} does not fit the extent {extent}")]
    BracketOutOfRange {
        dim: usize,
        index: usize,
        extent: usize,
    },

    #[error("data has {actual} elements but the shape requires {expected}")]
    DataLength { expected: usize, actual: usize },

    #[error("scale of dimension {dim} has {actual} values but the extent is {expected}")]
    ScaleLength {
        dim: usize,
        expected: usize,
        actual: usize,
    },

    #[error("scale of dimension {dim} is not strictly increasing at index {index}")]
    NotIncreasing { dim: usize, index: usize },

    #[error("scale of dimension {dim} has a non-finite value at index {index}")]
    NonFiniteScale { dim: usize, index: usize },

    #[error("table has no data attached")]
    MissingData,

    #[error("scale of dimension {dim} is not attached")]
    MissingScale { dim: usize },

    #[error("unknown method {0:?}")]
    UnknownMethod(String),
}

impl TableError {
    /// Integer status of the failure: `-1` for a domain violation,
    /// `-2` for everything else. Success is not represented.
    pub fn status(&self) -> i32 {
        match self {
            TableError::OutOfDomain { .. } => -1,
            _ => -2,
        }
    }
}
