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

//! Element-wise and matrix arithmetic performed directly over [`Buffer`]s.
//!
//! Every function here allocates its result.

use crate::buffer::Buffer;
use crate::element::Element;
use crate::error::{MatrixError, MatrixResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn same_shape<T: Element>(
    operation: &'static str,
    a: &Buffer<T>,
    b: &Buffer<T>,
) -> MatrixResult<()> {
    if a.size() != b.size() {
        return Err(MatrixError::ShapeMismatch {
            operation,
            lhs: a.size(),
            rhs: b.size(),
        });
    }
    Ok(())
}

/// Applies `f` to every pair of elements in `a` and `b`, which are
/// assumed to have the same size.
fn zip_with<T: Element, F>(a: &Buffer<T>, b: &Buffer<T>, f: F) -> Buffer<T>
where
    F: Fn(T, T) -> T + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let data = a.data.iter().zip(b.data.iter()).map(|(x, y)| f(*x, *y)).collect();

    #[cfg(feature = "parallel")]
    let data = a
        .data
        .par_iter()
        .zip(&b.data)
        .map(|(x, y)| f(*x, *y))
        .collect();

    Buffer {
        nrows: a.nrows,
        ncols: a.ncols,
        data,
    }
}

/// Applies `f` to every element in `a`
fn map<T: Element, F>(a: &Buffer<T>, f: F) -> Buffer<T>
where
    F: Fn(T) -> T + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let data = a.data.iter().map(|x| f(*x)).collect();

    #[cfg(feature = "parallel")]
    let data = a.data.par_iter().map(|x| f(*x)).collect();

    Buffer {
        nrows: a.nrows,
        ncols: a.ncols,
        data,
    }
}

/// Adds `a` and `b`, element by element
pub fn add<T: Element>(a: &Buffer<T>, b: &Buffer<T>) -> MatrixResult<Buffer<T>> {
    same_shape("add", a, b)?;
    Ok(zip_with(a, b, |x, y| x + y))
}

/// Substracts `b` from `a`, element by element
pub fn sub<T: Element>(a: &Buffer<T>, b: &Buffer<T>) -> MatrixResult<Buffer<T>> {
    same_shape("sub", a, b)?;
    Ok(zip_with(a, b, |x, y| x - y))
}

/// Calculates `a + s` for every element
pub fn add_scalar<T: Element>(a: &Buffer<T>, s: T) -> Buffer<T> {
    map(a, |x| x + s)
}

/// Calculates `a - s` for every element
pub fn sub_scalar<T: Element>(a: &Buffer<T>, s: T) -> Buffer<T> {
    map(a, |x| x - s)
}

/// Calculates `s - a` for every element
pub fn scalar_sub<T: Element>(s: T, a: &Buffer<T>) -> Buffer<T> {
    map(a, |x| s - x)
}

/// Multiplies every element by `s`
pub fn scale<T: Element>(a: &Buffer<T>, s: T) -> Buffer<T> {
    map(a, |x| x * s)
}

/// Changes the sign of every element
pub fn negate<T: Element>(a: &Buffer<T>) -> Buffer<T> {
    map(a, |x| -x)
}

/// Divides every element by `s`. Fails if `s` is zero.
pub fn div_scalar<T: Element>(a: &Buffer<T>, s: T) -> MatrixResult<Buffer<T>> {
    let data = a
        .data
        .iter()
        .map(|x| x.try_div(s))
        .collect::<MatrixResult<Vec<T>>>()?;
    Ok(Buffer {
        nrows: a.nrows,
        ncols: a.ncols,
        data,
    })
}

/// Multiplies `a` by `b` (rows times columns), putting the result into `into`.
pub fn multiply_into<T: Element>(
    a: &Buffer<T>,
    b: &Buffer<T>,
    into: &mut Buffer<T>,
) -> MatrixResult<()> {
    if a.ncols != b.nrows {
        return Err(MatrixError::ShapeMismatch {
            operation: "multiply",
            lhs: a.size(),
            rhs: b.size(),
        });
    }
    if into.nrows != a.nrows || into.ncols != b.ncols {
        return Err(MatrixError::ShapeMismatch {
            operation: "multiply (result)",
            lhs: (a.nrows, b.ncols),
            rhs: into.size(),
        });
    }

    let a_rows = a.data.chunks_exact(a.ncols);
    #[cfg(not(feature = "parallel"))]
    let a_rows = a_rows.zip(into.data.chunks_exact_mut(b.ncols));
    #[cfg(feature = "parallel")]
    let a_rows = a_rows
        .collect::<Vec<&[T]>>()
        .into_par_iter()
        .zip(into.data.par_chunks_exact_mut(b.ncols));

    a_rows.for_each(|(row_data, into_data)| {
        for (col, item) in into_data.iter_mut().enumerate() {
            let coldata = b.data.iter().skip(col).step_by(b.ncols);
            *item = row_data
                .iter()
                .zip(coldata)
                .map(|(x, y)| *x * *y)
                .fold(T::zero(), |acc, val| acc + val);
        }
    });

    Ok(())
}

/// Multiplies `a` by `b`. The result is `a.nrows x b.ncols`
pub fn multiply<T: Element>(a: &Buffer<T>, b: &Buffer<T>) -> MatrixResult<Buffer<T>> {
    let mut ret = Buffer::filled(T::zero(), a.nrows, b.ncols)?;
    multiply_into(a, b, &mut ret)?;
    Ok(ret)
}

/// Raises a square matrix to the power of `n` by `n - 1` successive
/// multiplications. `n = 0` returns the identity matrix.
pub fn pow<T: Element>(a: &Buffer<T>, n: u32) -> MatrixResult<Buffer<T>> {
    a.require_square("power")?;
    match n {
        0 => Buffer::identity(a.nrows),
        1 => Ok(a.clone()),
        _ => {
            let mut ret = a.clone();
            for _ in 1..n {
                ret = multiply(&ret, a)?;
            }
            Ok(ret)
        }
    }
}

/// Joins `a` and `b`.
///
/// If they have the same number of columns, the rows of `b` are placed
/// below those of `a`. Otherwise, if they have the same number of rows,
/// the columns of `b` are placed to the right of `a`. Stacking rows wins
/// when both are possible (e.g., two square matrices of the same size);
/// use [`concatenate_cols`] to force the other layout.
pub fn concatenate<T: Element>(a: &Buffer<T>, b: &Buffer<T>) -> MatrixResult<Buffer<T>> {
    if a.ncols == b.ncols {
        concatenate_rows(a, b)
    } else if a.nrows == b.nrows {
        concatenate_cols(a, b)
    } else {
        Err(MatrixError::IncompatibleConcatenation {
            lhs: a.size(),
            rhs: b.size(),
        })
    }
}

/// Places the rows of `b` below the rows of `a`
pub fn concatenate_rows<T: Element>(a: &Buffer<T>, b: &Buffer<T>) -> MatrixResult<Buffer<T>> {
    if a.ncols != b.ncols {
        return Err(MatrixError::IncompatibleConcatenation {
            lhs: a.size(),
            rhs: b.size(),
        });
    }
    let mut data = Vec::with_capacity(a.data.len() + b.data.len());
    data.extend_from_slice(&a.data);
    data.extend_from_slice(&b.data);
    Ok(Buffer {
        nrows: a.nrows + b.nrows,
        ncols: a.ncols,
        data,
    })
}

/// Places the columns of `b` to the right of the columns of `a`
pub fn concatenate_cols<T: Element>(a: &Buffer<T>, b: &Buffer<T>) -> MatrixResult<Buffer<T>> {
    if a.nrows != b.nrows {
        return Err(MatrixError::IncompatibleConcatenation {
            lhs: a.size(),
            rhs: b.size(),
        });
    }
    let mut data = Vec::with_capacity(a.data.len() + b.data.len());
    for (row_a, row_b) in a.rows().zip(b.rows()) {
        data.extend_from_slice(row_a);
        data.extend_from_slice(row_b);
    }
    Ok(Buffer {
        nrows: a.nrows,
        ncols: a.ncols + b.ncols,
        data,
    })
}

/// Splits `a` into the rows before `at` and the rows from `at` onwards.
/// Undoes [`concatenate_rows`].
///
/// Both halves must have at least one row.
pub fn split_rows<T: Element>(a: &Buffer<T>, at: usize) -> MatrixResult<(Buffer<T>, Buffer<T>)> {
    if at == 0 || at >= a.nrows {
        return Err(MatrixError::InvalidDimension {
            nrows: at,
            ncols: a.ncols,
        });
    }
    let (top, bottom) = a.data.split_at(at * a.ncols);
    Ok((
        Buffer::from_data(at, a.ncols, top.to_vec())?,
        Buffer::from_data(a.nrows - at, a.ncols, bottom.to_vec())?,
    ))
}

/// Splits `a` into the columns before `at` and the columns from `at` onwards.
/// Undoes [`concatenate_cols`].
///
/// Both halves must have at least one column.
pub fn split_cols<T: Element>(a: &Buffer<T>, at: usize) -> MatrixResult<(Buffer<T>, Buffer<T>)> {
    if at == 0 || at >= a.ncols {
        return Err(MatrixError::InvalidDimension {
            nrows: a.nrows,
            ncols: at,
        });
    }
    let mut left = Vec::with_capacity(a.nrows * at);
    let mut right = Vec::with_capacity(a.nrows * (a.ncols - at));
    for row in a.rows() {
        left.extend_from_slice(&row[..at]);
        right.extend_from_slice(&row[at..]);
    }
    Ok((
        Buffer::from_data(a.nrows, at, left)?,
        Buffer::from_data(a.nrows, a.ncols - at, right)?,
    ))
}
