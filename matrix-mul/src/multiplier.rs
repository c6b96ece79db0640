//! The common interface implemented by every multiplication strategy.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Matrix};

/// A matrix multiplication strategy over a fixed element type.
pub trait Multiplier {
    /// Element type of both operands and of the product.
    type Element: Copy;

    /// Short, human-readable name of the strategy.
    fn name(&self) -> &'static str;

    /// Computes `a x b`.
    ///
    /// Fails with [`Error::ShapeMismatch`] when `a.cols() != b.rows()`,
    /// before any arithmetic is performed.
    fn multiply(
        &self,
        a: &Matrix<Self::Element>,
        b: &Matrix<Self::Element>,
    ) -> Result<Matrix<Self::Element>, Error>;
}

/// How independent sub-computations are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    Sequential,
    /// Independent sub-products run on the rayon thread pool.
    Parallel,
}

/// Selects one of the available strategies by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Standard,
    Boolean,
    FourRussians,
    Strassen,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Standard,
        Algorithm::Boolean,
        Algorithm::FourRussians,
        Algorithm::Strassen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Standard => "standard",
            Algorithm::Boolean => "boolean",
            Algorithm::FourRussians => "four-russians",
            Algorithm::Strassen => "strassen",
        }
    }

    /// Returns `true` for strategies that work over the boolean semiring.
    pub fn is_boolean(self) -> bool {
        matches!(self, Algorithm::Boolean | Algorithm::FourRussians)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}
