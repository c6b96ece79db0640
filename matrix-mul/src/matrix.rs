//! Dense row-major matrix storage shared by all multipliers.

use std::fmt::Debug;
use std::ops::{Add, BitOr, Index, IndexMut, Range, Sub};

use crate::Error;

/// Element types usable with the arithmetic (sum, product) semiring.
pub trait Scalar:
    Copy
    + Default
    + PartialEq
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + Send
    + Sync
{
}

impl<T> Scalar for T where
    T: Copy
        + Default
        + PartialEq
        + Debug
        + Add<Output = T>
        + Sub<Output = T>
        + std::ops::Mul<Output = T>
        + Send
        + Sync
{
}

/// A dense `rows x cols` matrix stored in row-major order.
///
/// Dimensions are fixed at creation and are always at least `1 x 1`.
/// Every operation returns a new matrix; inputs are never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Creates a matrix filled with `T::default()` (`0` or `false`).
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyMatrix(rows, cols));
        }
        Ok(Self::filled(rows, cols))
    }

    /// Zero-filled construction for dimensions already known to be non-empty.
    pub(crate) fn filled(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Returns a copy enlarged to `rows x cols` with zero rows and columns
    /// appended at the bottom and right.
    pub fn padded(&self, rows: usize, cols: usize) -> Self {
        assert!(
            rows >= self.rows && cols >= self.cols,
            "cannot pad {}x{} down to {}x{}",
            self.rows,
            self.cols,
            rows,
            cols
        );
        let mut out = Self::filled(rows, cols);
        for (r, row) in self.data.chunks_exact(self.cols).enumerate() {
            out.data[r * cols..r * cols + self.cols].copy_from_slice(row);
        }
        out
    }
}

impl<T: Copy> Matrix<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyMatrix(rows, cols));
        }
        if data.len() != rows * cols {
            return Err(Error::DataLength(data.len(), rows, cols));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            return Err(Error::EmptyMatrix(height, width));
        }

        let mut data = Vec::with_capacity(height * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(Error::RaggedRows {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            rows: height,
            cols: width,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks_exact(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Applies `f` to every element, producing a matrix of the same shape.
    pub fn map<U, F>(&self, f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Copies the contiguous sub-block `rows x cols` out of this matrix.
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(
            rows.start < rows.end && rows.end <= self.rows,
            "row range {:?} out of bounds for {} rows",
            rows,
            self.rows
        );
        assert!(
            cols.start < cols.end && cols.end <= self.cols,
            "column range {:?} out of bounds for {} columns",
            cols,
            self.cols
        );

        let width = cols.len();
        let mut data = Vec::with_capacity(rows.len() * width);
        for r in rows.clone() {
            data.extend_from_slice(&self.row(r)[cols.clone()]);
        }
        Self {
            rows: rows.len(),
            cols: width,
            data,
        }
    }

    /// Concatenates blocks left to right. All blocks must share a height.
    pub fn hstack(blocks: &[&Matrix<T>]) -> Result<Self, Error> {
        let first = blocks.first().ok_or(Error::EmptyMatrix(0, 0))?;
        let rows = first.rows;
        if let Some(bad) = blocks.iter().find(|b| b.rows != rows) {
            return Err(Error::ShapeMismatch(first.rows, first.cols, bad.rows, bad.cols));
        }

        let cols = blocks.iter().map(|b| b.cols).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for block in blocks {
                data.extend_from_slice(block.row(r));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Concatenates blocks top to bottom. All blocks must share a width.
    pub fn vstack(blocks: &[&Matrix<T>]) -> Result<Self, Error> {
        let first = blocks.first().ok_or(Error::EmptyMatrix(0, 0))?;
        let cols = first.cols;
        if let Some(bad) = blocks.iter().find(|b| b.cols != cols) {
            return Err(Error::ShapeMismatch(first.rows, first.cols, bad.rows, bad.cols));
        }

        let rows = blocks.iter().map(|b| b.rows).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for block in blocks {
            data.extend_from_slice(&block.data);
        }
        Ok(Self { rows, cols, data })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl<T: Copy> Matrix<T> {
    /// Combines two equal-shaped matrices element by element.
    pub(crate) fn zip_map(&self, rhs: &Matrix<T>, f: impl Fn(T, T) -> T) -> Matrix<T> {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "elementwise operands must have equal shapes"
        );
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(&x, &y)| f(x, y))
                .collect(),
        }
    }
}

impl<T: Scalar> Add for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: Self) -> Matrix<T> {
        self.zip_map(rhs, |x, y| x + y)
    }
}

impl<T: Scalar> Sub for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: Self) -> Matrix<T> {
        self.zip_map(rhs, |x, y| x - y)
    }
}

/// Boolean semiring addition: elementwise OR.
impl BitOr for &Matrix<bool> {
    type Output = Matrix<bool>;

    fn bitor(self, rhs: Self) -> Matrix<bool> {
        self.zip_map(rhs, |x, y| x | y)
    }
}

/// Fails with [`Error::ShapeMismatch`] unless `a.cols == b.rows`.
///
/// Every multiplier calls this before touching any element.
pub fn check_product_shape<T: Copy>(a: &Matrix<T>, b: &Matrix<T>) -> Result<(), Error> {
    if a.cols() != b.rows() {
        return Err(Error::ShapeMismatch(a.rows(), a.cols(), b.rows(), b.cols()));
    }
    Ok(())
}
