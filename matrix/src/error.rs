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

use thiserror::Error;

/// Shorthand for results returned by this library
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Everything that can go wrong when building or operating on matrices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A matrix was requested with zero rows or zero columns
    #[error("Invalid dimension: matrices need at least one row and one column... found {nrows} by {ncols}")]
    InvalidDimension {
        /// Requested number of rows
        nrows: usize,
        /// Requested number of columns
        ncols: usize,
    },

    /// An element was requested outside of the matrix
    #[error("Row or Column out of bounds: ({row}, {col}) in a {nrows} by {ncols} matrix")]
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Rows in the matrix
        nrows: usize,
        /// Columns in the matrix
        ncols: usize,
    },

    /// Two matrices (or a matrix and some data) have incompatible shapes
    #[error("Size mismatch when performing '{operation}': found {lhs:?} and {rhs:?}")]
    ShapeMismatch {
        /// Name of the operation
        operation: &'static str,
        /// `(nrows, ncols)` of the left-hand side
        lhs: (usize, usize),
        /// `(nrows, ncols)` of the right-hand side
        rhs: (usize, usize),
    },

    /// Concatenating matrices that share neither the number of rows nor columns
    #[error("Cannot concatenate a {lhs:?} matrix with a {rhs:?} matrix: they share neither rows nor columns")]
    IncompatibleConcatenation {
        /// `(nrows, ncols)` of the left-hand side
        lhs: (usize, usize),
        /// `(nrows, ncols)` of the right-hand side
        rhs: (usize, usize),
    },

    /// A square-only operation was called over a rectangular matrix
    #[error("'{operation}' only works for squared matrices... found {nrows} by {ncols}")]
    NonSquareMatrix {
        /// Name of the operation
        operation: &'static str,
        /// Rows in the matrix
        nrows: usize,
        /// Columns in the matrix
        ncols: usize,
    },

    /// A zero pivot was found, so the matrix cannot be inverted
    #[error("Singular matrix: no non-zero pivot available for column {column}")]
    SingularMatrix {
        /// The column being eliminated when the zero pivot showed up
        column: usize,
    },

    /// Division of a scalar by an exact zero
    #[error("Division by zero")]
    DivisionByZero,

    /// The result of a scalar operation does not fit the numeric type
    #[error("Arithmetic overflow")]
    Overflow,

    /// The operation needs exact division, which the element type does not have
    #[error("'{operation}' needs an element type with exact division (e.g., not integers)")]
    RequiresField {
        /// Name of the operation
        operation: &'static str,
    },

    /// An iterative solver ran out of iterations
    #[error("Gauss-Seidel algorithm did not converge after {iterations} iterations")]
    NotConverged {
        /// The number of iterations performed
        iterations: usize,
    },
}
