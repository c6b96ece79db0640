//! Boolean multiplication with the "Four Russians" block-lookup method.
//!
//! The inner dimension `k` is cut into blocks of `t` columns of `A` (and the
//! matching `t` rows of `B`). Inside a block every row of `A` and every column
//! of `B` is packed into a `t`-bit mask, and the block's contribution to
//! `C[i][j]` is a single lookup in a precomputed `2^t x 2^t` table. Building
//! the table costs `O(4^t)` once per block and is shared by all `m * n` cells.

use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::matrix::check_product_shape;
use crate::{Error, Execution, Matrix, Multiplier};

/// Largest supported block width. Caps a table at `2^24` entries.
pub const MAX_BLOCK_WIDTH: usize = 12;

/// Default block width for inner dimension `k`: `floor(log2 k) + 1`,
/// clamped to `k` and to [`MAX_BLOCK_WIDTH`].
pub fn block_width(k: usize) -> usize {
    let k = k.max(1);
    (k.ilog2() as usize + 1).min(k).min(MAX_BLOCK_WIDTH)
}

/// Precomputed `OR_p (row_mask[p] AND col_mask[p])` for every pair of
/// `width`-bit masks.
#[derive(Debug, Clone)]
pub struct LookupTable {
    width: usize,
    entries: Vec<bool>,
}

impl LookupTable {
    pub fn build(width: usize) -> Self {
        assert!(
            (1..=MAX_BLOCK_WIDTH).contains(&width),
            "lookup table width {} out of range",
            width
        );
        let size = 1usize << width;
        let mut entries = Vec::with_capacity(size * size);
        for row_mask in 0..size {
            for col_mask in 0..size {
                let any = (0..width)
                    .any(|p| (row_mask >> p) & 1 == 1 && (col_mask >> p) & 1 == 1);
                entries.push(any);
            }
        }
        Self { width, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, row_mask: usize, col_mask: usize) -> bool {
        debug_assert!(
            row_mask >> self.width == 0 && col_mask >> self.width == 0,
            "mask ({:#b}, {:#b}) wider than {} bits",
            row_mask,
            col_mask,
            self.width
        );
        self.entries[(row_mask << self.width) | col_mask]
    }
}

/// Packs `a[i][cols]` into a mask, first column in the most significant bit.
pub fn compress_row(a: &Matrix<bool>, i: usize, cols: Range<usize>) -> usize {
    a.row(i)[cols]
        .iter()
        .fold(0, |mask, &bit| (mask << 1) | bit as usize)
}

/// Packs `b[rows][j]` into a mask, first row in the most significant bit.
pub fn compress_column(b: &Matrix<bool>, j: usize, rows: Range<usize>) -> usize {
    rows.fold(0, |mask, k| (mask << 1) | b[(k, j)] as usize)
}

/// Work counters reported by [`FourRussiansMultiplier::multiply_with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FourRussiansStats {
    pub block_width: usize,
    pub blocks: usize,
    pub tables_built: usize,
    pub lookups: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct BlockWork {
    tables_built: usize,
    lookups: usize,
}

impl BlockWork {
    fn merge(self, other: Self) -> Self {
        Self {
            tables_built: self.tables_built + other.tables_built,
            lookups: self.lookups + other.lookups,
        }
    }
}

/// Table-driven boolean multiplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct FourRussiansMultiplier {
    block_width: Option<usize>,
    execution: Execution,
}

impl FourRussiansMultiplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a fixed block width instead of [`block_width`]. Widths larger than
    /// the inner dimension are clamped to it.
    pub fn with_block_width(mut self, width: usize) -> Result<Self, Error> {
        if !(1..=MAX_BLOCK_WIDTH).contains(&width) {
            return Err(Error::InvalidBlockWidth(width));
        }
        self.block_width = Some(width);
        Ok(self)
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Multiplies and reports how much table and lookup work was done.
    pub fn multiply_with_stats(
        &self,
        a: &Matrix<bool>,
        b: &Matrix<bool>,
    ) -> Result<(Matrix<bool>, FourRussiansStats), Error> {
        check_product_shape(a, b)?;

        let k = a.cols();
        let t = self.block_width.map_or_else(|| block_width(k), |w| w.min(k));
        let blocks: Vec<Range<usize>> = (0..k).step_by(t).map(|s| s..(s + t).min(k)).collect();
        debug!(
            m = a.rows(),
            k,
            n = b.cols(),
            block_width = t,
            blocks = blocks.len(),
            execution = ?self.execution,
            "four russians multiply"
        );

        let (result, work) = match self.execution {
            Execution::Sequential => {
                let mut result = Matrix::filled(a.rows(), b.cols());
                let work = blocks
                    .iter()
                    .map(|block| fold_block(a, b, block.clone(), &mut result))
                    .fold(BlockWork::default(), BlockWork::merge);
                (result, work)
            }
            Execution::Parallel => blocks
                .par_iter()
                .map(|block| {
                    let mut partial = Matrix::filled(a.rows(), b.cols());
                    let work = fold_block(a, b, block.clone(), &mut partial);
                    (partial, work)
                })
                .reduce(
                    || (Matrix::filled(a.rows(), b.cols()), BlockWork::default()),
                    |(x, wx), (y, wy)| (&x | &y, wx.merge(wy)),
                ),
        };

        let stats = FourRussiansStats {
            block_width: t,
            blocks: blocks.len(),
            tables_built: work.tables_built,
            lookups: work.lookups,
        };
        Ok((result, stats))
    }
}

/// ORs the contribution of the inner-dimension block `range` into `result`.
fn fold_block(
    a: &Matrix<bool>,
    b: &Matrix<bool>,
    range: Range<usize>,
    result: &mut Matrix<bool>,
) -> BlockWork {
    trace!(start = range.start, end = range.end, "building lookup table");
    let table = LookupTable::build(range.len());

    let row_masks: Vec<usize> = (0..a.rows())
        .map(|i| compress_row(a, i, range.clone()))
        .collect();
    let col_masks: Vec<usize> = (0..b.cols())
        .map(|j| compress_column(b, j, range.clone()))
        .collect();

    for (i, &row_mask) in row_masks.iter().enumerate() {
        for (j, &col_mask) in col_masks.iter().enumerate() {
            result[(i, j)] |= table.get(row_mask, col_mask);
        }
    }

    BlockWork {
        tables_built: 1,
        lookups: row_masks.len() * col_masks.len(),
    }
}

impl Multiplier for FourRussiansMultiplier {
    type Element = bool;

    fn name(&self) -> &'static str {
        "four-russians"
    }

    fn multiply(&self, a: &Matrix<bool>, b: &Matrix<bool>) -> Result<Matrix<bool>, Error> {
        self.multiply_with_stats(a, b).map(|(result, _)| result)
    }
}
