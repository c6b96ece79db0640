//! O(n^3) multiplication over the boolean (OR, AND) semiring.

use tracing::debug;

use crate::matrix::check_product_shape;
use crate::{Error, Matrix, Multiplier};

/// Computes `C[i][j] = OR_k (A[i][k] AND B[k][j])` from the definition.
#[derive(Debug, Clone, Copy)]
pub struct BooleanMultiplier {
    short_circuit: bool,
}

impl BooleanMultiplier {
    /// Stops scanning `k` for a cell as soon as it becomes `true`.
    pub fn new() -> Self {
        Self {
            short_circuit: true,
        }
    }

    /// Always scans the full inner dimension. Produces the same result as
    /// [`BooleanMultiplier::new`].
    pub fn exhaustive() -> Self {
        Self {
            short_circuit: false,
        }
    }
}

impl Default for BooleanMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplier for BooleanMultiplier {
    type Element = bool;

    fn name(&self) -> &'static str {
        "boolean"
    }

    fn multiply(&self, a: &Matrix<bool>, b: &Matrix<bool>) -> Result<Matrix<bool>, Error> {
        check_product_shape(a, b)?;
        debug!(
            m = a.rows(),
            k = a.cols(),
            n = b.cols(),
            short_circuit = self.short_circuit,
            "boolean multiply"
        );

        let mut result = Matrix::filled(a.rows(), b.cols());
        for i in 0..a.rows() {
            let row_a = a.row(i);
            for j in 0..b.cols() {
                let cell = if self.short_circuit {
                    row_a.iter().enumerate().any(|(k, &x)| x && b[(k, j)])
                } else {
                    row_a
                        .iter()
                        .enumerate()
                        .fold(false, |acc, (k, &x)| acc | (x & b[(k, j)]))
                };
                result[(i, j)] = cell;
            }
        }
        Ok(result)
    }
}
