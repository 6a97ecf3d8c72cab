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

//! Gaussian elimination, LU decomposition, inversion and determinants.
//!
//! Everything in this module reads its input [`Buffer`]s and returns
//! freshly allocated results. The only exception is the right-hand side
//! of [`triangle`], which is modified in place when asked to.

use crate::buffer::Buffer;
use crate::element::{Element, Field};
use crate::error::{MatrixError, MatrixResult};
use crate::ops;
use log::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The result of reducing a matrix to upper-triangular form with [`triangle`]
#[derive(Debug, Clone)]
pub struct Triangle<T: Element> {
    /// The upper-triangular matrix
    pub upper: Buffer<T>,

    /// The right-hand side after going through the same row operations
    /// as `upper`. It is `None` when no right-hand side was given, or
    /// when it was modified in place.
    pub rhs: Option<Buffer<T>>,

    /// The row swaps performed: `permutation * A` is the matrix that
    /// was actually reduced.
    pub permutation: Buffer<T>,

    /// The number of non-zero pivots found before the first column
    /// without one.
    pub rank: usize,

    /// The product of the pivots, with its sign flipped once per row swap.
    /// It is zero if the matrix is rank-deficient, and `None` if the
    /// matrix is not square. Calculating it fails with `Overflow` only when
    /// the determinant itself does not fit the element type.
    pub determinant: Option<T>,
}

/// The result of [`lu`]: `permutation * A = lower * upper`
#[derive(Debug, Clone)]
pub struct LuDecomposition<T: Element> {
    /// Unit lower-triangular factor (i.e., ones in the diagonal)
    pub lower: Buffer<T>,
    /// Upper-triangular factor
    pub upper: Buffer<T>,
    /// Row permutation matrix
    pub permutation: Buffer<T>,
    /// One, or minus one if an odd number of rows were swapped
    pub sign: T,
}

impl<T: Element> LuDecomposition<T> {
    /// The determinant of the decomposed matrix; i.e., the product of
    /// the diagonal of `upper` times `sign`
    pub fn determinant(&self) -> MatrixResult<T> {
        let diagonal = (0..self.upper.nrows).map(|i| self.upper.at(i, i)).collect();
        self.sign.try_mul(balanced_product(diagonal)?)
    }
}

/// The result of [`inverse`]
#[derive(Debug, Clone)]
pub struct Inverse<T: Element> {
    /// The inverse matrix
    pub inverse: Buffer<T>,

    /// The order in which rows were pivoted. The transvections
    /// invert `permutation * A`, so `A^-1 = (permutation * A)^-1 * permutation`.
    pub permutation: Buffer<T>,
}

/// Multiplies all `values` together, keeping the running product close to
/// one (i.e., small factors are used to tame large ones before they overflow).
/// Fails with `Overflow` only if the result itself does not fit.
fn balanced_product<T: Element>(mut values: Vec<T>) -> MatrixResult<T> {
    if values.iter().any(|v| v.is_zero()) {
        return Ok(T::zero());
    }
    values.sort_by(|a, b| a.magnitude().total_cmp(&b.magnitude()));
    let mut values = std::collections::VecDeque::from(values);

    let mut acc = T::one();
    loop {
        let next = if acc.magnitude() >= 1.0 {
            values.pop_front()
        } else {
            values.pop_back()
        };
        match next {
            Some(v) => acc = acc.try_mul(v)?,
            None => return Ok(acc),
        }
    }
}

/// Finds the row (at or below `from`) with the element of largest magnitude
/// in column `col`. Returns the row and that magnitude.
fn pivot_row<T: Element>(a: &Buffer<T>, col: usize, from: usize) -> (usize, f64) {
    let mut best_row = from;
    let mut best = a.at(from, col).magnitude();
    for r in from + 1..a.nrows {
        let v = a.at(r, col).magnitude();
        if v > best {
            best = v;
            best_row = r;
        }
    }
    (best_row, best)
}

/// For every row `r` below `k`, calculates `row_r -= factor * row_k`
/// (starting at column `first_col`), where the factors are given in order.
///
/// The pivot row is fixed at this point, so the rows are independent
/// of each other and can be updated in parallel.
fn subtract_scaled_rows<T: Element>(m: &mut Buffer<T>, k: usize, factors: &[T], first_col: usize) {
    let ncols = m.ncols;
    let (top, bottom) = m.data.split_at_mut((k + 1) * ncols);
    let pivot_row = &top[k * ncols..];

    #[cfg(not(feature = "parallel"))]
    let rows = bottom.chunks_exact_mut(ncols).zip(factors.iter());
    #[cfg(feature = "parallel")]
    let rows = bottom.par_chunks_exact_mut(ncols).zip(factors.par_iter());

    rows.for_each(|(row, factor)| {
        if factor.is_zero() {
            return;
        }
        row.iter_mut()
            .zip(pivot_row.iter())
            .skip(first_col)
            .for_each(|(x, p)| *x -= *factor * *p);
    });
}

/// Eliminates the entries below the pivot `(k, k)`, replicating the
/// row operations on `rhs`
fn eliminate_below<T: Field>(
    u: &mut Buffer<T>,
    rhs: Option<&mut Buffer<T>>,
    k: usize,
) -> MatrixResult<()> {
    let pivot = u.at(k, k);
    let factors = (k + 1..u.nrows)
        .map(|r| u.at(r, k).try_div(pivot))
        .collect::<MatrixResult<Vec<T>>>()?;

    subtract_scaled_rows(u, k, &factors, k);
    if let Some(rhs) = rhs {
        subtract_scaled_rows(rhs, k, &factors, 0);
    }

    // Avoid round-off residuals under the pivot
    for r in k + 1..u.nrows {
        *u.at_mut(r, k) = T::zero();
    }
    Ok(())
}

/// Runs the elimination over `u` in place. Returns the permutation,
/// the rank and the determinant.
fn eliminate<T: Field>(
    u: &mut Buffer<T>,
    mut rhs: Option<&mut Buffer<T>>,
) -> MatrixResult<(Buffer<T>, usize, Option<T>)> {
    let (n, m) = u.size();
    let mut permutation = Buffer::identity(n)?;
    let mut sign = T::one();
    let mut pivots = Vec::with_capacity(n.min(m));

    for k in 0..n.min(m) {
        let (p, best) = pivot_row(u, k, k);
        if best == 0.0 {
            debug!(
                "No pivot available for column {}: elimination stops with rank {}",
                k,
                pivots.len()
            );
            pivots.push(T::zero());
            break;
        }

        if p != k {
            trace!("Swapping rows {} and {}", k, p);
            u.swap_rows(k, p);
            permutation.swap_rows(k, p);
            if let Some(rhs) = rhs.as_deref_mut() {
                rhs.swap_rows(k, p);
            }
            sign = -sign;
        }
        pivots.push(u.at(k, k));

        if k + 1 < n {
            eliminate_below(u, rhs.as_deref_mut(), k)?;
        }
    }

    let rank = pivots.iter().take_while(|p| !p.is_zero()).count();
    let determinant = if u.is_square() {
        Some(sign.try_mul(balanced_product(pivots)?)?)
    } else {
        None
    };
    Ok((permutation, rank, determinant))
}

/// Reduces `a` to upper-triangular form by Gaussian elimination with
/// partial pivoting (i.e., the pivot of each column is the element of
/// largest magnitude at or below the diagonal).
///
/// If a right-hand side `b` is given, the same row operations (swaps included)
/// are applied to it. When `clone_b` is `true` then `b` is left untouched
/// and the transformed copy is returned in [`Triangle::rhs`]; otherwise `b`
/// itself is transformed.
///
/// Elimination stops at the first column with no non-zero pivot, leaving
/// the remaining rows as they are. Check [`Triangle::rank`] before relying
/// on the result for inverting or solving.
pub fn triangle<T: Field>(
    a: &Buffer<T>,
    b: Option<&mut Buffer<T>>,
    clone_b: bool,
) -> MatrixResult<Triangle<T>> {
    let mut upper = a.clone();
    let (rhs, (permutation, rank, determinant)) = match b {
        Some(b) => {
            if b.nrows != a.nrows {
                return Err(MatrixError::ShapeMismatch {
                    operation: "triangle",
                    lhs: a.size(),
                    rhs: b.size(),
                });
            }
            if clone_b {
                let mut rhs = b.clone();
                let res = eliminate(&mut upper, Some(&mut rhs))?;
                (Some(rhs), res)
            } else {
                (None, eliminate(&mut upper, Some(b))?)
            }
        }
        None => (None, eliminate(&mut upper, None)?),
    };

    Ok(Triangle {
        upper,
        rhs,
        permutation,
        rank,
        determinant,
    })
}

/// Calculates the LU decomposition of `a` using Crout's algorithm with
/// partial pivoting. Rows are implicitly scaled by their largest element
/// when choosing pivots.
///
/// Returns `Ok(None)` if `a` is singular, which is detected when a row
/// is made of zeroes or when no non-zero pivot exists for a column. Failing
/// to decompose is an expected outcome, so it is not an error. Fails with
/// `NonSquareMatrix` if `a` is not square.
///
/// # Note
/// Other implementations of this algorithm replace a zero pivot by `1e-20`
/// and carry on. That cannot happen here: a zero pivot is only left after
/// the search when the whole column is zero, which is reported as singular.
pub fn lu<T: Field>(a: &Buffer<T>) -> MatrixResult<Option<LuDecomposition<T>>> {
    a.require_square("LU decomposition")?;
    let n = a.nrows;
    let mut lu = a.clone();

    let mut scale = Vec::with_capacity(n);
    for (i, row) in lu.rows().enumerate() {
        let big = row.iter().map(|v| v.magnitude()).fold(0.0, f64::max);
        if big == 0.0 {
            debug!("Row {} is full of zeroes: matrix is singular", i);
            return Ok(None);
        }
        scale.push(1.0 / big);
    }

    let mut perm: Vec<usize> = (0..n).collect();
    let mut sign = T::one();
    for j in 0..n {
        // Upper part of the column
        for i in 0..j {
            let mut sum = lu.at(i, j);
            for k in 0..i {
                sum -= lu.at(i, k) * lu.at(k, j);
            }
            *lu.at_mut(i, j) = sum;
        }

        // Diagonal and below, looking for the pivot along the way
        let mut big = 0.0;
        let mut imax = j;
        for i in j..n {
            let mut sum = lu.at(i, j);
            for k in 0..j {
                sum -= lu.at(i, k) * lu.at(k, j);
            }
            *lu.at_mut(i, j) = sum;
            let candidate = scale[i] * sum.magnitude();
            if candidate > big {
                big = candidate;
                imax = i;
            }
        }
        if big == 0.0 {
            debug!("No pivot available for column {}: matrix is singular", j);
            return Ok(None);
        }

        if imax != j {
            trace!("Swapping rows {} and {}", j, imax);
            lu.swap_rows(imax, j);
            perm.swap(imax, j);
            scale.swap(imax, j);
            sign = -sign;
        }

        let pivot = lu.at(j, j);
        for i in j + 1..n {
            let v = lu.at(i, j).try_div(pivot)?;
            *lu.at_mut(i, j) = v;
        }
    }

    let lower = Buffer::from_fn(n, n, |r, c| match r.cmp(&c) {
        std::cmp::Ordering::Equal => T::one(),
        std::cmp::Ordering::Greater => lu.at(r, c),
        std::cmp::Ordering::Less => T::zero(),
    })?;
    let upper = Buffer::from_fn(n, n, |r, c| if r <= c { lu.at(r, c) } else { T::zero() })?;
    let permutation = Buffer::from_fn(n, n, |r, c| {
        if perm[r] == c {
            T::one()
        } else {
            T::zero()
        }
    })?;

    Ok(Some(LuDecomposition {
        lower,
        upper,
        permutation,
        sign,
    }))
}

/// Calculates the determinant of `a` through its LU decomposition.
/// Singular matrices have a determinant of zero.
pub fn lu_determinant<T: Field>(a: &Buffer<T>) -> MatrixResult<T> {
    match lu(a)? {
        Some(lu) => lu.determinant(),
        None => Ok(T::zero()),
    }
}

/// Calculates the determinant of `a` as the signed product of the pivots
/// found by [`triangle`].
pub fn pivot_determinant<T: Field>(a: &Buffer<T>) -> MatrixResult<T> {
    a.require_square("determinant")?;
    Ok(triangle(a, None, true)?.determinant.unwrap_or_else(T::zero))
}

/// Calculates the determinant of `a` by fraction-free (Bareiss) Gaussian
/// elimination.
///
/// Every division in the process is exact, so integer and fixed-point
/// determinants come out exact. When no non-zero pivot is left in
/// a column, the determinant is zero.
///
/// The intermediate values are minors of `a`, which can be much larger
/// than its determinant. Fails with `Overflow` if one of them does not fit.
pub fn elimination_determinant<T: Element>(a: &Buffer<T>) -> MatrixResult<T> {
    a.require_square("determinant")?;
    let n = a.nrows;
    let mut m = a.clone();
    let mut sign = T::one();
    let mut previous = T::one();

    for k in 0..n - 1 {
        let (p, best) = pivot_row(&m, k, k);
        if best == 0.0 {
            return Ok(T::zero());
        }
        if p != k {
            m.swap_rows(k, p);
            sign = -sign;
        }

        let pivot = m.at(k, k);
        for i in k + 1..n {
            let below = m.at(i, k);
            for j in k + 1..n {
                let v = m
                    .at(i, j)
                    .try_mul(pivot)?
                    .try_sub(below.try_mul(m.at(k, j))?)?
                    .try_div(previous)?;
                *m.at_mut(i, j) = v;
            }
            *m.at_mut(i, k) = T::zero();
        }
        previous = pivot;
    }

    sign.try_mul(m.at(n - 1, n - 1))
}

/// Calculates the determinant of `a`.
///
/// 1x1 and 2x2 matrices use the closed-form expressions (falling back to
/// the general method if its products overflow). Larger ones
/// are delegated to [`Element::large_determinant`], which uses the LU
/// decomposition for floating point elements and fraction-free elimination
/// for integer and fixed-point ones.
pub fn determinant<T: Element>(a: &Buffer<T>) -> MatrixResult<T> {
    a.require_square("determinant")?;
    match a.nrows {
        1 => Ok(a.at(0, 0)),
        2 => {
            let closed_form = a
                .at(0, 0)
                .try_mul(a.at(1, 1))
                .and_then(|d| d.try_sub(a.at(0, 1).try_mul(a.at(1, 0))?));
            match closed_form {
                Err(MatrixError::Overflow) => T::large_determinant(a),
                res => res,
            }
        }
        _ => T::large_determinant(a),
    }
}

/// The matrix obtained by deleting row `nrow` and column `ncol`
pub fn minor<T: Element>(a: &Buffer<T>, nrow: usize, ncol: usize) -> MatrixResult<Buffer<T>> {
    a.get(nrow, ncol)?;
    Buffer::from_fn(a.nrows - 1, a.ncols - 1, |r, c| {
        let r = if r < nrow { r } else { r + 1 };
        let c = if c < ncol { c } else { c + 1 };
        a.at(r, c)
    })
}

/// The cofactor of element `(nrow, ncol)`:
/// $`(-1)^{nrow+ncol} \det(\text{minor}(nrow, ncol))`$
///
/// The (only) cofactor of a 1x1 matrix is one.
pub fn adjunct<T: Element>(a: &Buffer<T>, nrow: usize, ncol: usize) -> MatrixResult<T> {
    a.require_square("adjunct")?;
    if a.nrows == 1 {
        a.get(nrow, ncol)?;
        return Ok(T::one());
    }
    let det = determinant(&minor(a, nrow, ncol)?)?;
    if (nrow + ncol) % 2 == 0 {
        Ok(det)
    } else {
        Ok(-det)
    }
}

/// Fills column `j` of the transvection that turns column `j` of `w`
/// into the `j`-th column of the identity matrix
fn transvection_column<T: Field>(w: &Buffer<T>, j: usize) -> MatrixResult<Vec<T>> {
    let pivot = w.at(j, j);
    if pivot.is_zero() {
        return Err(MatrixError::SingularMatrix { column: j });
    }
    (0..w.nrows)
        .map(|i| {
            if i == j {
                T::one().try_div(pivot)
            } else {
                (-w.at(i, j)).try_div(pivot)
            }
        })
        .collect()
}

/// Calculates `T * m` in place, where `T` is the identity matrix with
/// its column `j` replaced by `column`.
fn apply_transvection<T: Field>(m: &mut Buffer<T>, column: &[T], j: usize) {
    let ncols = m.ncols;
    let row_j = m.row_slice(j).to_vec();
    for (i, (row, t)) in m.data.chunks_exact_mut(ncols).zip(column.iter()).enumerate() {
        if i == j {
            row.iter_mut().for_each(|x| *x = *t * *x);
        } else if !t.is_zero() {
            row.iter_mut()
                .zip(row_j.iter())
                .for_each(|(x, p)| *x += *t * *p);
        }
    }
}

/// Builds the transvection matrix that, multiplied on the left of `w`,
/// turns column `j` of `w` into the `j`-th column of the identity matrix.
///
/// It is the identity matrix except for column `j`, which holds
/// `1/w[j,j]` on the diagonal and `-w[i,j]/w[j,j]` everywhere else.
/// Fails with `SingularMatrix` if `w[j,j]` is zero.
pub fn transvection<T: Field>(w: &Buffer<T>, j: usize) -> MatrixResult<Buffer<T>> {
    w.require_square("transvection")?;
    w.get(j, j)?;
    let column = transvection_column(w, j)?;
    Buffer::from_fn(w.nrows, w.ncols, |r, c| {
        if c == j {
            column[r]
        } else if r == c {
            T::one()
        } else {
            T::zero()
        }
    })
}

/// Inverts `a` as a product of transvections, one per column.
///
/// Before each transvection the row with the largest element in the
/// column (at or below the diagonal) is swapped into the diagonal. If the
/// whole column is zero the matrix is singular, and this fails with
/// `SingularMatrix`. Unlike [`lu`], singularity is an error here.
pub fn inverse<T: Field>(a: &Buffer<T>) -> MatrixResult<Inverse<T>> {
    a.require_square("inverse")?;
    let n = a.nrows;
    let mut w = a.clone();
    let mut inv = Buffer::identity(n)?;
    let mut permutation = Buffer::identity(n)?;

    for j in 0..n {
        let (p, best) = pivot_row(&w, j, j);
        if best == 0.0 {
            debug!("No pivot available for column {}: cannot invert", j);
            return Err(MatrixError::SingularMatrix { column: j });
        }
        if p != j {
            trace!("Swapping rows {} and {}", j, p);
            w.swap_rows(j, p);
            inv.swap_rows(j, p);
            permutation.swap_rows(j, p);
        }

        let column = transvection_column(&w, j)?;
        apply_transvection(&mut w, &column, j);
        apply_transvection(&mut inv, &column, j);
    }

    Ok(Inverse {
        inverse: inv,
        permutation,
    })
}

/// Raises a square matrix to the power of `n`, inverting it first when
/// `n` is negative.
///
/// The result is built by `|n| - 1` successive multiplications, so this
/// takes time linear in `|n|`. `n = 0` returns the identity matrix.
/// Negative powers fail with `RequiresField` for integer elements.
pub fn powi<T: Element>(a: &Buffer<T>, n: i32) -> MatrixResult<Buffer<T>> {
    if n >= 0 {
        ops::pow(a, n.unsigned_abs())
    } else {
        a.require_square("power")?;
        let inv = T::invert(a)?;
        ops::pow(&inv, n.unsigned_abs())
    }
}

/// Solves $`A \times X = B`$ by reducing `[A | B]` to upper-triangular
/// form and substituting backwards.
///
/// Fails with `SingularMatrix` if the rank of `a` is lower than its size.
pub fn solve<T: Field>(a: &Buffer<T>, b: &Buffer<T>) -> MatrixResult<Buffer<T>> {
    a.require_square("solve")?;
    let n = a.nrows;
    let mut x = b.clone();
    let tri = triangle(a, Some(&mut x), false)?;
    if tri.rank < n {
        return Err(MatrixError::SingularMatrix { column: tri.rank });
    }

    let u = &tri.upper;
    for i in (0..n).rev() {
        let pivot = u.at(i, i);
        for c in 0..x.ncols {
            let mut sum = x.at(i, c);
            for k in i + 1..n {
                sum -= u.at(i, k) * x.at(k, c);
            }
            *x.at_mut(i, c) = sum.try_div(pivot)?;
        }
    }
    Ok(x)
}

/// Solves $`A \times x = b`$ using the [Gauss-Seidel](https://en.wikipedia.org/wiki/Gauss–Seidel_method)
/// algorithm, where `b` and `x` are column vectors. `x` is the initial
/// guess, and it is replaced by the solution.
///
/// Returns the number of iterations performed, or `NotConverged` if the
/// largest change in `x` was still above `tolerance` after `max_iter` iterations.
pub fn gauss_seidel<T: Field>(
    a: &Buffer<T>,
    b: &Buffer<T>,
    x: &mut Buffer<T>,
    max_iter: usize,
    tolerance: f64,
) -> MatrixResult<usize> {
    a.require_square("Gauss-Seidel")?;
    let n = a.nrows;
    for other in [&*b, &*x] {
        if other.size() != (n, 1) {
            return Err(MatrixError::ShapeMismatch {
                operation: "Gauss-Seidel",
                lhs: a.size(),
                rhs: other.size(),
            });
        }
    }

    let mut new_x = x.clone();
    for iteration in 0..max_iter {
        for i in 0..n {
            let mut sum = b.data[i];
            for j in 0..i {
                sum -= a.at(i, j) * new_x.data[j];
            }
            for j in i + 1..n {
                sum -= a.at(i, j) * x.data[j];
            }
            new_x.data[i] = sum.try_div(a.at(i, i))?;
        }

        let max_err = x
            .data
            .iter()
            .zip(new_x.data.iter())
            .map(|(old, new)| (*old - *new).magnitude())
            .fold(0.0, f64::max);
        x.data.copy_from_slice(&new_x.data);

        if max_err < tolerance {
            return Ok(iteration + 1);
        }
    }

    Err(MatrixError::NotConverged {
        iterations: max_iter,
    })
}
