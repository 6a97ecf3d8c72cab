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

use crate::buffer::Buffer;
use crate::decomposition;
use crate::error::{MatrixError, MatrixResult};
use complex::Complex;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// A simple trait required for initializing some matrices (e.g., the
/// identity matrix)
pub trait OneZero {
    /// Returns an element considered to be 0.
    fn zero() -> Self;

    /// Returns an element considered to be 1.
    fn one() -> Self;
}

/// Define the basic algebraic requirements for the elements of a matrix.
///
/// Division is not an operator here because dividing by zero must
/// be reported rather than produce `inf`, `NaN` or a panic, so
/// it goes through [`Element::try_div`].
pub trait Element:
    Copy
    + Clone
    + OneZero
    + PartialEq
    + Sized
    + std::fmt::Display
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Neg<Output = Self>
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::ops::MulAssign
    + Sync
    + Send
    + Serialize
{
    /// The absolute value (or modulus) of the element, used for
    /// ordering pivots and for comparing with a tolerance.
    fn magnitude(&self) -> f64;

    /// Divides `self` by `rhs`. Fails with `DivisionByZero` if `rhs` is exactly zero.
    fn try_div(self, rhs: Self) -> MatrixResult<Self>;

    /// Multiplies `self` by `rhs`, failing with `Overflow` if the result
    /// does not fit. Floating point elements overflow into infinity instead.
    fn try_mul(self, rhs: Self) -> MatrixResult<Self> {
        Ok(self * rhs)
    }

    /// Subtracts `rhs` from `self`, failing with `Overflow` if the result
    /// does not fit.
    fn try_sub(self, rhs: Self) -> MatrixResult<Self> {
        Ok(self - rhs)
    }

    /// Checks whether the element is exactly zero
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Checks whether `self` and `other` are within `tolerance` of each other
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (*self - *other).magnitude() <= tolerance
    }

    /// Calculates the determinant of a square `Buffer` larger than 2x2.
    ///
    /// Defaults to fraction-free elimination, which is exact for
    /// integer and fixed-point elements. Floating point elements use
    /// the LU decomposition instead.
    fn large_determinant(buffer: &Buffer<Self>) -> MatrixResult<Self> {
        decomposition::elimination_determinant(buffer)
    }

    /// Inverts a square `Buffer`. Used for negative powers.
    ///
    /// Only [`Field`] elements can do this; the rest fail with `RequiresField`.
    fn invert(_buffer: &Buffer<Self>) -> MatrixResult<Buffer<Self>> {
        Err(MatrixError::RequiresField {
            operation: "inverse",
        })
    }
}

/// Elements for which division is (close enough to) exact, so
/// that decompositions, inverses and solvers make sense.
///
/// `i64` is an [`Element`] but not a `Field`.
pub trait Field: Element {}

/* f64 */

impl OneZero for f64 {
    fn zero() -> Self {
        0.
    }
    fn one() -> Self {
        1.
    }
}

impl Element for f64 {
    fn magnitude(&self) -> f64 {
        self.abs()
    }

    fn try_div(self, rhs: Self) -> MatrixResult<Self> {
        if rhs == 0.0 {
            return Err(MatrixError::DivisionByZero);
        }
        Ok(self / rhs)
    }

    fn large_determinant(buffer: &Buffer<Self>) -> MatrixResult<Self> {
        decomposition::lu_determinant(buffer)
    }

    fn invert(buffer: &Buffer<Self>) -> MatrixResult<Buffer<Self>> {
        Ok(decomposition::inverse(buffer)?.inverse)
    }
}

impl Field for f64 {}

/* Complex */

impl OneZero for Complex {
    fn zero() -> Self {
        Complex::ZERO
    }
    fn one() -> Self {
        Complex::ONE
    }
}

impl Element for Complex {
    fn magnitude(&self) -> f64 {
        self.abs()
    }

    fn try_div(self, rhs: Self) -> MatrixResult<Self> {
        self.checked_div(rhs).ok_or(MatrixError::DivisionByZero)
    }

    fn large_determinant(buffer: &Buffer<Self>) -> MatrixResult<Self> {
        decomposition::lu_determinant(buffer)
    }

    fn invert(buffer: &Buffer<Self>) -> MatrixResult<Buffer<Self>> {
        Ok(decomposition::inverse(buffer)?.inverse)
    }
}

impl Field for Complex {}

/* Decimal */

impl OneZero for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }
    fn one() -> Self {
        Decimal::ONE
    }
}

impl Element for Decimal {
    fn magnitude(&self) -> f64 {
        self.abs().to_f64().unwrap_or(f64::INFINITY)
    }

    fn try_div(self, rhs: Self) -> MatrixResult<Self> {
        if rhs.is_zero() {
            return Err(MatrixError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(MatrixError::Overflow)
    }

    fn try_mul(self, rhs: Self) -> MatrixResult<Self> {
        self.checked_mul(rhs).ok_or(MatrixError::Overflow)
    }

    fn try_sub(self, rhs: Self) -> MatrixResult<Self> {
        self.checked_sub(rhs).ok_or(MatrixError::Overflow)
    }

    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.checked_sub(*other)
            .map_or(false, |d| d.magnitude() <= tolerance)
    }

    /// Fraction-free elimination is exact but its intermediate values
    /// grow quickly. When they overflow, the pivots of a regular
    /// elimination are multiplied instead.
    fn large_determinant(buffer: &Buffer<Self>) -> MatrixResult<Self> {
        match decomposition::elimination_determinant(buffer) {
            Err(MatrixError::Overflow) => {
                debug!("Fraction-free elimination overflowed: using the pivots of a regular elimination");
                decomposition::pivot_determinant(buffer)
            }
            res => res,
        }
    }

    fn invert(buffer: &Buffer<Self>) -> MatrixResult<Buffer<Self>> {
        Ok(decomposition::inverse(buffer)?.inverse)
    }
}

impl Field for Decimal {}

/* i64 */

impl OneZero for i64 {
    fn zero() -> Self {
        0
    }
    fn one() -> Self {
        1
    }
}

impl Element for i64 {
    fn magnitude(&self) -> f64 {
        self.unsigned_abs() as f64
    }

    fn try_div(self, rhs: Self) -> MatrixResult<Self> {
        if rhs == 0 {
            return Err(MatrixError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(MatrixError::Overflow)
    }

    fn try_mul(self, rhs: Self) -> MatrixResult<Self> {
        self.checked_mul(rhs).ok_or(MatrixError::Overflow)
    }

    fn try_sub(self, rhs: Self) -> MatrixResult<Self> {
        self.checked_sub(rhs).ok_or(MatrixError::Overflow)
    }

    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.abs_diff(*other) as f64 <= tolerance
    }

    /// The intermediate minors of fraction-free elimination can be much
    /// larger than the determinant, so they are calculated as 96-bit
    /// integers (i.e., `Decimal`s with no fractional part).
    fn large_determinant(buffer: &Buffer<Self>) -> MatrixResult<Self> {
        let wide = Buffer::from_fn(buffer.nrows(), buffer.ncols(), |r, c| {
            Decimal::from(buffer.at(r, c))
        })?;
        decomposition::elimination_determinant(&wide)?
            .to_i64()
            .ok_or(MatrixError::Overflow)
    }
}
