/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::element::Element;
use crate::error::{MatrixError, MatrixResult};
use serde::{Deserialize, Serialize};

/// Dense, row-major storage of a `nrows` by `ncols` matrix.
///
/// The dimensions are fixed when the `Buffer` is created and are
/// always larger than zero.
///
/// Deserializing checks the dimensions against the length of the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BufferData<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Buffer<T: Element> {
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,

    // Contains the data ordered by row,
    // Going left to right, and up and down.
    pub(crate) data: Vec<T>,
}

/// The unchecked layout of a serialized `Buffer`
#[derive(Deserialize)]
struct BufferData<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: Element> std::convert::TryFrom<BufferData<T>> for Buffer<T> {
    type Error = MatrixError;

    fn try_from(raw: BufferData<T>) -> MatrixResult<Self> {
        Self::from_data(raw.nrows, raw.ncols, raw.data)
    }
}

/// Fails if either dimension is zero
fn check_dimensions(nrows: usize, ncols: usize) -> MatrixResult<()> {
    if nrows == 0 || ncols == 0 {
        return Err(MatrixError::InvalidDimension { nrows, ncols });
    }
    Ok(())
}

impl<T: Element> Buffer<T> {
    /// Creates a `Buffer` of `nrows` and `ncols` full of zeroes
    pub fn new(nrows: usize, ncols: usize) -> MatrixResult<Self> {
        Self::filled(T::zero(), nrows, ncols)
    }

    /// Creates a `Buffer` of `nrows` and `ncols` full of values `v`
    pub fn filled(v: T, nrows: usize, ncols: usize) -> MatrixResult<Self> {
        check_dimensions(nrows, ncols)?;
        Ok(Self {
            nrows,
            ncols,
            data: vec![v; nrows * ncols],
        })
    }

    /// Creates a `Buffer` from a vector containing the elements of the matrix,
    /// ordered by row.
    pub fn from_data(nrows: usize, ncols: usize, data: Vec<T>) -> MatrixResult<Self> {
        check_dimensions(nrows, ncols)?;
        if nrows * ncols != data.len() {
            return Err(MatrixError::ShapeMismatch {
                operation: "from_data",
                lhs: (nrows, ncols),
                rhs: (data.len(), 1),
            });
        }
        Ok(Self { nrows, ncols, data })
    }

    /// Copies a 2D array (e.g., `&[[1., 2.], [3., 4.]]` or `&[vec![1., 2.]]`)
    /// into a new `Buffer`. All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> MatrixResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        check_dimensions(nrows, ncols)?;

        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(MatrixError::ShapeMismatch {
                    operation: "from_rows",
                    lhs: (1, ncols),
                    rhs: (1, row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { nrows, ncols, data })
    }

    /// Creates a `Buffer` by calling `f(row, col)` for every element
    pub fn from_fn<F: FnMut(usize, usize) -> T>(
        nrows: usize,
        ncols: usize,
        mut f: F,
    ) -> MatrixResult<Self> {
        check_dimensions(nrows, ncols)?;
        let data = (0..nrows * ncols).map(|i| f(i / ncols, i % ncols)).collect();
        Ok(Self { nrows, ncols, data })
    }

    /// Creates an Identity matrix of size NxN
    pub fn identity(n: usize) -> MatrixResult<Self> {
        Self::from_fn(n, n, |r, c| if r == c { T::one() } else { T::zero() })
    }

    /// Creates a squared matrix with the elements of `data`
    /// in the diagonal
    pub fn diag(data: &[T]) -> MatrixResult<Self> {
        let n = data.len();
        Self::from_fn(n, n, |r, c| if r == c { data[r] } else { T::zero() })
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns a tuple with number of rows and columns
    pub fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Checks whether the number of rows equals the number of columns
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Fails with `NonSquareMatrix` unless `self` is square
    pub(crate) fn require_square(&self, operation: &'static str) -> MatrixResult<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NonSquareMatrix {
                operation,
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    /// Gets the index of an element within the `data` array of the Buffer
    pub(crate) fn index(&self, nrow: usize, ncol: usize) -> usize {
        self.ncols * nrow + ncol
    }

    fn check_bounds(&self, nrow: usize, ncol: usize) -> MatrixResult<()> {
        if nrow < self.nrows && ncol < self.ncols {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfBounds {
                row: nrow,
                col: ncol,
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    /// Gets an element from the matrix, checking the bounds
    pub fn get(&self, nrow: usize, ncol: usize) -> MatrixResult<T> {
        self.check_bounds(nrow, ncol)?;
        Ok(self.data[self.index(nrow, ncol)])
    }

    /// Sets an element into the matrix, checking the bounds
    pub fn set(&mut self, nrow: usize, ncol: usize, v: T) -> MatrixResult<()> {
        self.check_bounds(nrow, ncol)?;
        let i = self.index(nrow, ncol);
        self.data[i] = v;
        Ok(())
    }

    /// Gets an element without checking that `ncol < ncols`.
    ///
    /// # Panics
    /// Panics if the position falls outside of the data. A column
    /// out of range silently reads from another row; use `get()` when
    /// the indexes are not known to be valid.
    pub fn at(&self, nrow: usize, ncol: usize) -> T {
        debug_assert!(nrow < self.nrows && ncol < self.ncols);
        self.data[self.index(nrow, ncol)]
    }

    /// Mutable counterpart of `at()`, with the same (lack of) guarantees
    pub fn at_mut(&mut self, nrow: usize, ncol: usize) -> &mut T {
        debug_assert!(nrow < self.nrows && ncol < self.ncols);
        let i = self.index(nrow, ncol);
        &mut self.data[i]
    }

    /// The elements of the matrix, ordered by row
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates the rows of the matrix
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.ncols)
    }

    pub(crate) fn row_slice(&self, nrow: usize) -> &[T] {
        let start = self.index(nrow, 0);
        &self.data[start..start + self.ncols]
    }

    /// Copies row `nrow` into a new `1 x ncols` Buffer
    pub fn row(&self, nrow: usize) -> MatrixResult<Self> {
        self.check_bounds(nrow, 0)?;
        Self::from_data(1, self.ncols, self.row_slice(nrow).to_vec())
    }

    /// Copies column `ncol` into a new `nrows x 1` Buffer
    pub fn col(&self, ncol: usize) -> MatrixResult<Self> {
        self.check_bounds(0, ncol)?;
        let data = self.data.iter().skip(ncol).step_by(self.ncols).copied().collect();
        Self::from_data(self.nrows, 1, data)
    }

    /// Returns a new `ncols x nrows` Buffer with the axes swapped
    pub fn transpose(&self) -> Self {
        let data = (0..self.nrows * self.ncols)
            .map(|i| {
                let (r, c) = (i / self.nrows, i % self.nrows);
                self.data[self.index(c, r)]
            })
            .collect();
        Self {
            nrows: self.ncols,
            ncols: self.nrows,
            data,
        }
    }

    /// Swaps rows `a` and `b` in place
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        let (top, bottom) = self.data.split_at_mut(b * self.ncols);
        top[a * self.ncols..(a + 1) * self.ncols].swap_with_slice(&mut bottom[..self.ncols]);
    }

    /// Checks whether every element in `self` is within `tolerance`
    /// of the matching element in `other`. Buffers of different sizes
    /// are never equal.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.size() == other.size()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.approx_eq(b, tolerance))
    }
}
