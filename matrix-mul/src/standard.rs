//! Textbook O(n^3) multiplication over the arithmetic semiring.

use std::marker::PhantomData;

use tracing::debug;

use crate::matrix::{Scalar, check_product_shape};
use crate::{Error, Matrix, Multiplier};

/// Computes `C[i][j] = sum_k A[i][k] * B[k][j]` directly from the definition.
///
/// This is the reference the other strategies are checked against.
#[derive(Debug, Clone, Copy)]
pub struct StandardMultiplier<T> {
    _element: PhantomData<T>,
}

impl<T> StandardMultiplier<T> {
    pub fn new() -> Self {
        Self {
            _element: PhantomData,
        }
    }
}

impl<T> Default for StandardMultiplier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Multiplier for StandardMultiplier<T> {
    type Element = T;

    fn name(&self) -> &'static str {
        "standard"
    }

    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, Error> {
        check_product_shape(a, b)?;
        debug!(
            m = a.rows(),
            k = a.cols(),
            n = b.cols(),
            "standard multiply"
        );
        Ok(product(a, b))
    }
}

/// Unchecked product used by the other strategies once shapes are validated.
pub(crate) fn product<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    debug_assert_eq!(a.cols(), b.rows());
    let mut result = Matrix::filled(a.rows(), b.cols());
    for i in 0..a.rows() {
        let row_a = a.row(i);
        for j in 0..b.cols() {
            let mut sum = T::default();
            for (k, &value) in row_a.iter().enumerate() {
                sum = sum + value * b[(k, j)];
            }
            result[(i, j)] = sum;
        }
    }
    result
}
