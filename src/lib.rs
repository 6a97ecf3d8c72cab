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

//! Dense matrix algebra over real, complex, fixed-point decimal and
//! integer numbers.
//!
//! This crate puts the [`matrix`] and [`complex`] crates together. Most
//! users only need [`Matrix`], [`ComplexMatrix`], [`DecimalMatrix`] or
//! [`LongMatrix`]:
//!
//! ```
//! use numerics::{ComplexMatrix, Complex};
//!
//! let a = ComplexMatrix::from_rows(&[
//!     [Complex::ONE, Complex::I],
//!     [-Complex::I, Complex::new(2., 0.)],
//! ]).unwrap();
//! let inv = a.inverse().unwrap();
//! assert!((&a * &inv).approx_eq(&ComplexMatrix::eye(2).unwrap(), 1e-9));
//! ```

// Re-exports
pub use complex;
pub use complex::Complex;
pub use matrix;
pub use matrix::{
    decomposition, ops, Buffer, ComplexMatrix, Decimal, DecimalMatrix, Element, Field,
    GenericMatrix, LongMatrix, Matrix, MatrixError, MatrixResult, OneZero, DEFAULT_TOLERANCE,
};
