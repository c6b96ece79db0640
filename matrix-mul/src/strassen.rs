//! Strassen's divide-and-conquer multiplication over the arithmetic semiring.
//!
//! Operands are zero-padded to a common power-of-two square size, multiplied
//! by a kernel that replaces the eight block products of the naive method
//! with seven, and the result is truncated back to `A.rows x B.cols`.
//!
//! The seven products form differences and sums the plain product never
//! sees, so every intermediate uses wrapping arithmetic. Wrapping integers
//! form a ring, so the result is exact whenever the true product fits in `T`.

use std::marker::PhantomData;

use num_traits::{WrappingAdd, WrappingMul, WrappingSub};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::matrix::{Scalar, check_product_shape};
use crate::{Error, Execution, Matrix, Multiplier};

/// Element types Strassen can combine without overflow panics.
pub trait StrassenScalar: Scalar + WrappingAdd + WrappingSub + WrappingMul {}

impl<T> StrassenScalar for T where T: Scalar + WrappingAdd + WrappingSub + WrappingMul {}

/// Blocks smaller than this are multiplied sequentially even under
/// [`Execution::Parallel`].
pub const PARALLEL_CUTOFF: usize = 64;

/// Smallest power of two `>= m`.
pub fn next_power_of_two(m: usize) -> usize {
    m.max(1).next_power_of_two()
}

/// Square size both operands are padded to before entering the kernel.
pub fn padded_size<T: Copy>(a: &Matrix<T>, b: &Matrix<T>) -> usize {
    next_power_of_two(a.rows().max(a.cols()).max(b.cols()))
}

/// A borrowed `size x size` window into a square matrix.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a, T> {
    source: &'a Matrix<T>,
    row: usize,
    col: usize,
    size: usize,
}

impl<'a, T: StrassenScalar> BlockView<'a, T> {
    pub fn whole(source: &'a Matrix<T>) -> Self {
        assert!(source.is_square(), "block views need a square matrix");
        Self {
            source,
            row: 0,
            col: 0,
            size: source.rows(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.source[(self.row + row, self.col + col)]
    }

    /// Splits an even-sized view into `[[X11, X12], [X21, X22]]`.
    pub fn quadrants(self) -> [[Self; 2]; 2] {
        assert!(
            self.size % 2 == 0,
            "cannot split a block of odd size {}",
            self.size
        );
        let half = self.size / 2;
        let at = |dr: usize, dc: usize| Self {
            source: self.source,
            row: self.row + dr,
            col: self.col + dc,
            size: half,
        };
        [[at(0, 0), at(0, half)], [at(half, 0), at(half, half)]]
    }

    pub fn to_matrix(&self) -> Matrix<T> {
        self.source
            .slice(self.row..self.row + self.size, self.col..self.col + self.size)
    }

    pub fn add(&self, other: &Self) -> Matrix<T> {
        self.zip(other, |x, y| x.wrapping_add(&y))
    }

    pub fn sub(&self, other: &Self) -> Matrix<T> {
        self.zip(other, |x, y| x.wrapping_sub(&y))
    }

    fn zip(&self, other: &Self, f: impl Fn(T, T) -> T) -> Matrix<T> {
        assert_eq!(self.size, other.size, "block sizes differ");
        let mut out = Matrix::filled(self.size, self.size);
        for r in 0..self.size {
            for c in 0..self.size {
                out[(r, c)] = f(self.get(r, c), other.get(r, c));
            }
        }
        out
    }
}

fn add<T: StrassenScalar>(x: &Matrix<T>, y: &Matrix<T>) -> Matrix<T> {
    x.zip_map(y, |p, q| p.wrapping_add(&q))
}

fn sub<T: StrassenScalar>(x: &Matrix<T>, y: &Matrix<T>) -> Matrix<T> {
    x.zip_map(y, |p, q| p.wrapping_sub(&q))
}

/// Definition-based product of a leaf block, wrapping like the rest of the
/// kernel.
fn leaf_product<T: StrassenScalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    let mut result = Matrix::filled(a.rows(), b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            result[(i, j)] = a
                .row(i)
                .iter()
                .enumerate()
                .fold(T::default(), |sum, (k, x)| {
                    sum.wrapping_add(&x.wrapping_mul(&b[(k, j)]))
                });
        }
    }
    result
}

/// Strassen product of two equal, square, power-of-two sized matrices.
///
/// Blocks of size `<= leaf_size` fall back to the definition-based product. Panics if
/// the operands violate the shape invariant; [`StrassenMultiplier`] pads its
/// inputs so that this never happens.
pub fn kernel<T: StrassenScalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    leaf_size: usize,
    execution: Execution,
) -> Result<Matrix<T>, Error> {
    assert!(
        a.is_square() && a.shape() == b.shape() && a.rows().is_power_of_two(),
        "strassen kernel requires equal square power-of-two operands, got {}x{} and {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols()
    );

    let n = a.rows();
    if n == 1 {
        return Matrix::from_vec(1, 1, vec![a[(0, 0)].wrapping_mul(&b[(0, 0)])]);
    }
    if n <= leaf_size {
        return Ok(leaf_product(a, b));
    }
    trace!(n, "strassen split");

    let [[a11, a12], [a21, a22]] = BlockView::whole(a).quadrants();
    let [[b11, b12], [b21, b22]] = BlockView::whole(b).quadrants();

    let operands = vec![
        (a11.add(&a22), b11.add(&b22)),
        (a12.sub(&a22), b21.add(&b22)),
        (a21.sub(&a11), b11.add(&b12)),
        (a11.add(&a12), b22.to_matrix()),
        (a21.add(&a22), b11.to_matrix()),
        (a22.to_matrix(), b21.sub(&b11)),
        (a11.to_matrix(), b12.sub(&b22)),
    ];

    let parallel = execution == Execution::Parallel && n >= PARALLEL_CUTOFF;
    let products: Vec<Matrix<T>> = if parallel {
        operands
            .par_iter()
            .map(|(x, y)| kernel(x, y, leaf_size, execution))
            .collect::<Result<_, _>>()?
    } else {
        operands
            .iter()
            .map(|(x, y)| kernel(x, y, leaf_size, execution))
            .collect::<Result<_, _>>()?
    };
    let (d, d1, d2) = (&products[0], &products[1], &products[2]);
    let (h1, h2) = (&products[3], &products[4]);
    let (v1, v2) = (&products[5], &products[6]);

    let c11 = sub(&add(&add(d, d1), v1), h1);
    let c12 = add(v2, h1);
    let c21 = add(v1, h2);
    let c22 = sub(&add(&add(d, d2), v2), h2);

    let top = Matrix::hstack(&[&c11, &c12])?;
    let bottom = Matrix::hstack(&[&c21, &c22])?;
    Matrix::vstack(&[&top, &bottom])
}

/// Strassen multiplication for arbitrary compatible operands.
#[derive(Debug, Clone, Copy)]
pub struct StrassenMultiplier<T> {
    leaf_size: usize,
    execution: Execution,
    _element: PhantomData<T>,
}

impl<T> StrassenMultiplier<T> {
    /// Recurses all the way down to `1 x 1` blocks.
    pub fn new() -> Self {
        Self {
            leaf_size: 1,
            execution: Execution::Sequential,
            _element: PhantomData,
        }
    }

    /// Switches to the standard product once blocks are `leaf_size` wide or
    /// smaller.
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size.max(1);
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }
}

impl<T> Default for StrassenMultiplier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StrassenScalar> Multiplier for StrassenMultiplier<T> {
    type Element = T;

    fn name(&self) -> &'static str {
        "strassen"
    }

    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, Error> {
        check_product_shape(a, b)?;

        let n = padded_size(a, b);
        debug!(
            m = a.rows(),
            k = a.cols(),
            n = b.cols(),
            padded = n,
            leaf_size = self.leaf_size,
            execution = ?self.execution,
            "strassen multiply"
        );

        let (padded_a, padded_b) = (a.padded(n, n), b.padded(n, n));
        let result = kernel(&padded_a, &padded_b, self.leaf_size, self.execution)?;
        Ok(result.slice(0..a.rows(), 0..b.cols()))
    }
}
