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

#![deny(missing_docs)]

//! A Library for dense Matrix algebra.
//!
//! It is built generically (i.e., `GenericMatrix<T: Element>` where `Element` is a
//! basic numeric Trait) so that the same elimination, LU decomposition and
//! inversion code serves matrices of `f64`, [`Complex`], [`Decimal`] and `i64`.
//!
//! The library is organised in layers:
//! * [`Buffer`]: the dense, row-major storage
//! * [`ops`]: element-wise and matrix arithmetic over `Buffer`s
//! * [`decomposition`]: triangular form, LU, inverse and determinants
//! * [`GenericMatrix`]: the type most users want, wrapping a `Buffer` and
//!   exposing all of the above as methods and operators
//!
//! ```
//! use matrix::Matrix;
//!
//! let a = Matrix::from_rows(&[[4., 3.], [6., 3.]]).unwrap();
//! assert_eq!(a.determinant().unwrap(), -6.);
//!
//! let inv = &a ^ -1;
//! assert!((&a * &inv).approx_eq(&Matrix::eye(2).unwrap(), 1e-9));
//! ```
//!
//! ## Features
//!
//! * `parallel`: uses [rayon](https://docs.rs/rayon) for element-wise operations,
//!   matrix products and the row updates of Gaussian elimination.

pub use complex::Complex;
pub use rust_decimal::Decimal;

/// Dense storage
pub mod buffer;
pub use buffer::Buffer;

/// Gaussian elimination, LU decomposition, inversion and determinants
pub mod decomposition;
pub use decomposition::{Inverse, LuDecomposition, Triangle};

/// The numeric requirements for the elements of a matrix
pub mod element;
pub use element::{Element, Field, OneZero};

/// The errors returned by this library
pub mod error;
pub use error::{MatrixError, MatrixResult};

/// Operations over `Buffer`s
pub mod ops;

mod generic_matrix;
pub use generic_matrix::GenericMatrix;

/// A Matrix of `f64`
pub type Matrix = GenericMatrix<f64>;

/// A Matrix of [`Complex`] numbers
pub type ComplexMatrix = GenericMatrix<Complex>;

/// A Matrix of fixed-point [`Decimal`] numbers
pub type DecimalMatrix = GenericMatrix<Decimal>;

/// A Matrix of `i64`
pub type LongMatrix = GenericMatrix<i64>;

/// A sensible tolerance for comparing the results of floating point operations
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
