//! Interpolation and extrapolation methods selected per evaluation.

use core::str::FromStr;

use crate::error::TableError;

/// Interpolation method, applied uniformly to every non-degenerate dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum InterpMethod {
    /// Piecewise-constant; ties resolve to the lower sample.
    Nearest,
    /// Multilinear.
    #[default]
    Linear,
    /// Akima's locally weighted cubic Hermite interpolation.
    #[cfg_attr(feature = "serde", serde(alias = "cubic"))]
    Akima,
}

/// Behavior for query values outside the range of a dimension's scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ExtrapMethod {
    /// Reject the query with [`TableError::OutOfDomain`].
    None,
    /// Hold the boundary sample; the derivative along that axis is zero.
    #[default]
    Hold,
    /// Continue the boundary interval's secant.
    Linear,
}

/// Methods used for one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    pub interp: InterpMethod,
    pub extrap: ExtrapMethod,
}

impl Options {
    pub const fn new(interp: InterpMethod, extrap: ExtrapMethod) -> Self {
        Self { interp, extrap }
    }
}

impl FromStr for InterpMethod {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpMethod::Nearest),
            "linear" => Ok(InterpMethod::Linear),
            "akima" | "cubic" => Ok(InterpMethod::Akima),
            _ => Err(TableError::UnknownMethod(s.to_owned())),
        }
    }
}

impl FromStr for ExtrapMethod {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ExtrapMethod::None),
            "hold" => Ok(ExtrapMethod::Hold),
            "linear" => Ok(ExtrapMethod::Linear),
            _ => Err(TableError::UnknownMethod(s.to_owned())),
        }
    }
}
