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
use crate::decomposition::{self, LuDecomposition, Triangle};
use crate::element::{Element, Field};
use crate::error::MatrixResult;
use crate::ops;
use complex::Complex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The main Structure in this library: a matrix that owns its [`Buffer`]
/// and exposes the arithmetic and decompositions over it.
///
/// Named methods return a [`MatrixResult`]. The operators (`+`, `-`, `*`,
/// `/` and `^`) do the same but panic when the named method would fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericMatrix<T: Element> {
    buffer: Buffer<T>,
}

/// Operator traits cannot return errors
fn or_panic<V>(r: MatrixResult<V>) -> V {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

impl<T: Element> std::fmt::Display for GenericMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.buffer.rows() {
            write!(f, "\n\t")?;
            for v in row {
                write!(f, "{}, ", v)?;
            }
        }
        Ok(())
    }
}

impl<T: Element + std::hash::Hash> std::hash::Hash for GenericMatrix<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        self.as_slice().hash(state);
    }
}

impl<T: Element + Eq> Eq for GenericMatrix<T> {}

impl<T: Element> std::convert::From<Buffer<T>> for GenericMatrix<T> {
    fn from(buffer: Buffer<T>) -> Self {
        Self::from_buffer(buffer)
    }
}

impl<T: Element> GenericMatrix<T> {
    /// Wraps `buffer` without copying it. The matrix takes ownership
    /// of the data, so nothing else can modify it.
    pub fn from_buffer(buffer: Buffer<T>) -> Self {
        Self { buffer }
    }

    /// Creates a matrix with a copy of `buffer`
    pub fn from_buffer_ref(buffer: &Buffer<T>) -> Self {
        Self {
            buffer: buffer.clone(),
        }
    }

    /// Creates a `GenericMatrix` of `nrows` and `ncols` full of values `v`
    pub fn new(v: T, nrows: usize, ncols: usize) -> MatrixResult<Self> {
        Ok(Buffer::filled(v, nrows, ncols)?.into())
    }

    /// Creates a `GenericMatrix` of `nrows` and `ncols` full of zeroes
    pub fn zeros(nrows: usize, ncols: usize) -> MatrixResult<Self> {
        Ok(Buffer::new(nrows, ncols)?.into())
    }

    /// Creates a `GenericMatrix` from a vector containing the elements of the matrix,
    /// ordered by row
    pub fn from_data(nrows: usize, ncols: usize, data: Vec<T>) -> MatrixResult<Self> {
        Ok(Buffer::from_data(nrows, ncols, data)?.into())
    }

    /// Copies a 2D array into a new matrix. See [`Buffer::from_rows`].
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> MatrixResult<Self> {
        Ok(Buffer::from_rows(rows)?.into())
    }

    /// Creates a matrix by calling `f(row, col)` for every element
    pub fn from_fn<F: FnMut(usize, usize) -> T>(
        nrows: usize,
        ncols: usize,
        f: F,
    ) -> MatrixResult<Self> {
        Ok(Buffer::from_fn(nrows, ncols, f)?.into())
    }

    /// Creates an Identity matrix of size NxN
    pub fn eye(n: usize) -> MatrixResult<Self> {
        Ok(Buffer::identity(n)?.into())
    }

    /// Creates a squared matrix with the elements of `data`
    /// in the diagonal
    pub fn diag(data: &[T]) -> MatrixResult<Self> {
        Ok(Buffer::diag(data)?.into())
    }

    /// Borrows the underlying [`Buffer`]
    pub fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }

    /// Unwraps the underlying [`Buffer`]
    pub fn into_buffer(self) -> Buffer<T> {
        self.buffer
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.buffer.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.buffer.ncols
    }

    /// Returns a tuple with number of rows and columns
    pub fn size(&self) -> (usize, usize) {
        self.buffer.size()
    }

    /// Checks whether the matrix is square
    pub fn is_square(&self) -> bool {
        self.buffer.is_square()
    }

    /// Gets an element from the matrix
    pub fn get(&self, nrow: usize, ncol: usize) -> MatrixResult<T> {
        self.buffer.get(nrow, ncol)
    }

    /// Sets an element into the matrix
    pub fn set(&mut self, nrow: usize, ncol: usize, v: T) -> MatrixResult<()> {
        self.buffer.set(nrow, ncol, v)
    }

    /// Gets an element without the bounds check. See [`Buffer::at`]
    pub fn at(&self, nrow: usize, ncol: usize) -> T {
        self.buffer.at(nrow, ncol)
    }

    /// Mutable access to an element without the bounds check. See [`Buffer::at`]
    pub fn at_mut(&mut self, nrow: usize, ncol: usize) -> &mut T {
        self.buffer.at_mut(nrow, ncol)
    }

    /// The elements of the matrix, ordered by row
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Copies row `nrow` into a new `1 x ncols` matrix
    pub fn row(&self, nrow: usize) -> MatrixResult<Self> {
        Ok(self.buffer.row(nrow)?.into())
    }

    /// Copies column `ncol` into a new `nrows x 1` matrix
    pub fn col(&self, ncol: usize) -> MatrixResult<Self> {
        Ok(self.buffer.col(ncol)?.into())
    }

    /// Returns the transposed matrix
    pub fn transpose(&self) -> Self {
        self.buffer.transpose().into()
    }

    /// Checks if every element is within `tolerance` of the matching element of `other`
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.buffer.approx_eq(&other.buffer, tolerance)
    }

    /// Writes the matrix as text: one line per row, with the elements
    /// formatted by `format` and separated by `delimiter`.
    pub fn to_delimited_string<F: Fn(&T) -> String>(&self, delimiter: &str, format: F) -> String {
        self.buffer
            .rows()
            .map(|row| row.iter().map(&format).collect::<Vec<String>>().join(delimiter))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /* ARITHMETIC OPERATION */

    /// Adds `self` and `other`
    pub fn add(&self, other: &Self) -> MatrixResult<Self> {
        Ok(ops::add(&self.buffer, &other.buffer)?.into())
    }

    /// Substracts `other` from `self`
    pub fn sub(&self, other: &Self) -> MatrixResult<Self> {
        Ok(ops::sub(&self.buffer, &other.buffer)?.into())
    }

    /// Adds `s` to every element
    pub fn add_scalar(&self, s: T) -> Self {
        ops::add_scalar(&self.buffer, s).into()
    }

    /// Substracts `s` from every element
    pub fn sub_scalar(&self, s: T) -> Self {
        ops::sub_scalar(&self.buffer, s).into()
    }

    /// Multiplies every element by `s`
    pub fn scale(&self, s: T) -> Self {
        ops::scale(&self.buffer, s).into()
    }

    /// Divides every element by `s`
    pub fn div_scalar(&self, s: T) -> MatrixResult<Self> {
        Ok(ops::div_scalar(&self.buffer, s)?.into())
    }

    /// Multiplies `self` by `other`
    pub fn prod(&self, other: &Self) -> MatrixResult<Self> {
        Ok(ops::multiply(&self.buffer, &other.buffer)?.into())
    }

    /// Multiplies `self` by `other`, putting the result into `into`
    pub fn prod_into(&self, other: &Self, into: &mut Self) -> MatrixResult<()> {
        ops::multiply_into(&self.buffer, &other.buffer, &mut into.buffer)
    }

    /// Raises a square matrix to the power of `n`. `n = 0` returns the identity matrix.
    pub fn pow(&self, n: u32) -> MatrixResult<Self> {
        Ok(ops::pow(&self.buffer, n)?.into())
    }

    /// Raises a square matrix to the power of `n`. Negative powers need
    /// the matrix to be invertible, so integer matrices only accept `n >= 0`.
    pub fn powi(&self, n: i32) -> MatrixResult<Self> {
        Ok(decomposition::powi(&self.buffer, n)?.into())
    }

    /// Joins `self` and `other`, stacking rows first. See [`ops::concatenate`]
    pub fn concat(&self, other: &Self) -> MatrixResult<Self> {
        Ok(ops::concatenate(&self.buffer, &other.buffer)?.into())
    }

    /// Places the rows of `other` below the rows of `self`
    pub fn concat_rows(&self, other: &Self) -> MatrixResult<Self> {
        Ok(ops::concatenate_rows(&self.buffer, &other.buffer)?.into())
    }

    /// Places the columns of `other` to the right of the columns of `self`
    pub fn concat_cols(&self, other: &Self) -> MatrixResult<Self> {
        Ok(ops::concatenate_cols(&self.buffer, &other.buffer)?.into())
    }

    /// Splits the matrix into the rows before `at` and the rest
    pub fn split_rows(&self, at: usize) -> MatrixResult<(Self, Self)> {
        let (a, b) = ops::split_rows(&self.buffer, at)?;
        Ok((a.into(), b.into()))
    }

    /// Splits the matrix into the columns before `at` and the rest
    pub fn split_cols(&self, at: usize) -> MatrixResult<(Self, Self)> {
        let (a, b) = ops::split_cols(&self.buffer, at)?;
        Ok((a.into(), b.into()))
    }

    /* DETERMINANTS */

    /// Calculates the determinant. See [`decomposition::determinant`]
    pub fn determinant(&self) -> MatrixResult<T> {
        decomposition::determinant(&self.buffer)
    }

    /// Calculates the determinant by fraction-free elimination, whatever
    /// the size of the matrix
    pub fn determinant_by_elimination(&self) -> MatrixResult<T> {
        decomposition::elimination_determinant(&self.buffer)
    }

    /// The matrix obtained by deleting row `nrow` and column `ncol`
    pub fn minor(&self, nrow: usize, ncol: usize) -> MatrixResult<Self> {
        Ok(decomposition::minor(&self.buffer, nrow, ncol)?.into())
    }

    /// The cofactor of element `(nrow, ncol)`
    pub fn adjunct(&self, nrow: usize, ncol: usize) -> MatrixResult<T> {
        decomposition::adjunct(&self.buffer, nrow, ncol)
    }
}

impl<T: Field> GenericMatrix<T> {
    /// Reduces the matrix to upper-triangular form. See [`decomposition::triangle`]
    pub fn triangle(&self) -> MatrixResult<Triangle<T>> {
        decomposition::triangle(&self.buffer, None, true)
    }

    /// Reduces `[self | b]` to upper-triangular form, leaving `b` untouched.
    /// The transformed right-hand side is returned in [`Triangle::rhs`].
    pub fn triangle_with_rhs(&self, b: &Self) -> MatrixResult<Triangle<T>> {
        decomposition::triangle(&self.buffer, Some(&mut b.buffer.clone()), true)
    }

    /// Reduces `[self | b]` to upper-triangular form, modifying `b` in place.
    pub fn triangle_in_place(&self, b: &mut Self) -> MatrixResult<Triangle<T>> {
        decomposition::triangle(&self.buffer, Some(&mut b.buffer), false)
    }

    /// Calculates the LU decomposition. `Ok(None)` means that the matrix
    /// is singular. See [`decomposition::lu`]
    pub fn lu(&self) -> MatrixResult<Option<LuDecomposition<T>>> {
        decomposition::lu(&self.buffer)
    }

    /// Calculates the determinant through the LU decomposition, whatever
    /// the size of the matrix
    pub fn determinant_by_lu(&self) -> MatrixResult<T> {
        decomposition::lu_determinant(&self.buffer)
    }

    /// Calculates the inverse matrix by transvections. Fails with
    /// `SingularMatrix` if there is none.
    pub fn inverse(&self) -> MatrixResult<Self> {
        Ok(decomposition::inverse(&self.buffer)?.inverse.into())
    }

    /// Calculates the inverse matrix, also returning the permutation of
    /// the rows used as pivots. See [`decomposition::Inverse`]
    pub fn inverse_with_permutation(&self) -> MatrixResult<(Self, Self)> {
        let inv = decomposition::inverse(&self.buffer)?;
        Ok((inv.inverse.into(), inv.permutation.into()))
    }

    /// Calculates `self * other^-1`
    pub fn div(&self, other: &Self) -> MatrixResult<Self> {
        let inv = decomposition::inverse(&other.buffer)?.inverse;
        Ok(ops::multiply(&self.buffer, &inv)?.into())
    }

    /// Solves $`A \times X = B`$, where `self` is $`A`$.
    pub fn solve(&self, b: &Self) -> MatrixResult<Self> {
        Ok(decomposition::solve(&self.buffer, &b.buffer)?.into())
    }

    /// Solves $`A \times x = b`$ iteratively. See [`decomposition::gauss_seidel`]
    pub fn gauss_seidel(
        &self,
        b: &Self,
        x: &mut Self,
        max_iter: usize,
        tolerance: f64,
    ) -> MatrixResult<usize> {
        decomposition::gauss_seidel(&self.buffer, &b.buffer, &mut x.buffer, max_iter, tolerance)
    }
}

/* MATRIX | MATRIX OPERATIONS */

impl<T: Element> std::ops::Add<&GenericMatrix<T>> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn add(self, other: &GenericMatrix<T>) -> Self::Output {
        or_panic(GenericMatrix::add(self, other))
    }
}

impl<T: Element> std::ops::Sub<&GenericMatrix<T>> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn sub(self, other: &GenericMatrix<T>) -> Self::Output {
        or_panic(GenericMatrix::sub(self, other))
    }
}

impl<T: Element> std::ops::Mul<&GenericMatrix<T>> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn mul(self, other: &GenericMatrix<T>) -> Self::Output {
        or_panic(self.prod(other))
    }
}

impl<T: Field> std::ops::Div<&GenericMatrix<T>> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn div(self, other: &GenericMatrix<T>) -> Self::Output {
        or_panic(GenericMatrix::div(self, other))
    }
}

impl<T: Element> std::ops::AddAssign<&GenericMatrix<T>> for GenericMatrix<T> {
    fn add_assign(&mut self, other: &GenericMatrix<T>) {
        *self = &*self + other;
    }
}

impl<T: Element> std::ops::SubAssign<&GenericMatrix<T>> for GenericMatrix<T> {
    fn sub_assign(&mut self, other: &GenericMatrix<T>) {
        *self = &*self - other;
    }
}

impl<T: Element> std::ops::Neg for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn neg(self) -> Self::Output {
        ops::negate(&self.buffer).into()
    }
}

impl<T: Element> std::ops::BitXor<i32> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;

    /// `m ^ n` raises `m` to the power of `n`; `m ^ -1` is the inverse.
    fn bitxor(self, n: i32) -> Self::Output {
        or_panic(self.powi(n))
    }
}

/* MATRIX | SCALAR OPERATIONS */

impl<T: Element> std::ops::Add<T> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn add(self, s: T) -> Self::Output {
        self.add_scalar(s)
    }
}

impl<T: Element> std::ops::Sub<T> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn sub(self, s: T) -> Self::Output {
        self.sub_scalar(s)
    }
}

impl<T: Element> std::ops::Mul<T> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn mul(self, s: T) -> Self::Output {
        self.scale(s)
    }
}

impl<T: Element> std::ops::Div<T> for &GenericMatrix<T> {
    type Output = GenericMatrix<T>;
    fn div(self, s: T) -> Self::Output {
        or_panic(self.div_scalar(s))
    }
}

impl<T: Element> std::ops::MulAssign<T> for GenericMatrix<T> {
    fn mul_assign(&mut self, s: T) {
        self.buffer.data.iter_mut().for_each(|a| *a *= s);
    }
}

/* SCALAR | MATRIX OPERATIONS */

macro_rules! scalar_first_ops {
    ( $($t : ty),* ) => {
        $(
        impl std::ops::Add<&GenericMatrix<$t>> for $t {
            type Output = GenericMatrix<$t>;
            fn add(self, m: &GenericMatrix<$t>) -> Self::Output {
                m.add_scalar(self)
            }
        }

        impl std::ops::Sub<&GenericMatrix<$t>> for $t {
            type Output = GenericMatrix<$t>;
            fn sub(self, m: &GenericMatrix<$t>) -> Self::Output {
                ops::scalar_sub(self, &m.buffer).into()
            }
        }

        impl std::ops::Mul<&GenericMatrix<$t>> for $t {
            type Output = GenericMatrix<$t>;
            fn mul(self, m: &GenericMatrix<$t>) -> Self::Output {
                m.scale(self)
            }
        }
        )*
    };
}

scalar_first_ops!(f64, i64, Complex, Decimal);
