//! Matrix multiplication over the arithmetic and boolean semirings.
//!
//! `matrix-mul` provides four interchangeable strategies behind the
//! [`Multiplier`] trait:
//!
//! - **[`StandardMultiplier`]**: `C[i][j] = sum_k A[i][k] * B[k][j]`, the O(n^3)
//!   reference product
//! - **[`BooleanMultiplier`]**: `C[i][j] = OR_k (A[i][k] AND B[k][j])`
//! - **[`FourRussiansMultiplier`]**: the same boolean product computed with
//!   packed bit masks and a per-block lookup table
//! - **[`StrassenMultiplier`]**: seven-product divide and conquer, with
//!   zero padding to a power-of-two size
//!
//! Every strategy validates `A.cols == B.rows` before doing any work and fails
//! with [`Error::ShapeMismatch`] otherwise.
//!
//! # Example
//!
//! ```
//! use matrix_mul::{Matrix, Multiplier, StandardMultiplier, StrassenMultiplier};
//!
//! fn main() -> Result<(), matrix_mul::Error> {
//!     let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]])?;
//!     let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]])?;
//!
//!     let c = StrassenMultiplier::new().multiply(&a, &b)?;
//!     assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
//!     assert_eq!(c, StandardMultiplier::new().multiply(&a, &b)?);
//!
//!     Ok(())
//! }
//! ```

mod boolean;
mod error;
pub mod four_russians;
mod matrix;
mod multiplier;
mod standard;
pub mod strassen;

pub use boolean::BooleanMultiplier;
pub use error::Error;
pub use four_russians::{FourRussiansMultiplier, FourRussiansStats};
pub use matrix::{Matrix, Scalar, check_product_shape};
pub use multiplier::{Algorithm, Execution, Multiplier};
pub use standard::StandardMultiplier;
pub use strassen::{StrassenMultiplier, StrassenScalar};
