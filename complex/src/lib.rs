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

//! A small complex-number value type.
//!
//! It is the scalar used by complex-valued matrices, so it only carries
//! the algebra those need: the four arithmetic operations, negation,
//! conjugation, modulus and argument.
//!
//! ```
//! use complex::Complex;
//!
//! let z = Complex::new(3.0, 4.0);
//! assert_eq!(z.abs(), 5.0);
//! ```

use serde::{Deserialize, Serialize};

/// Calculates $`\sqrt{a^2 + b^2}`$ without overflowing when `a` or `b`
/// are large (or underflowing when they are tiny).
///
/// The larger component is factored out before squaring, so
/// the result is `max * sqrt(1 + (min/max)^2)`.
pub fn radius(a: f64, b: f64) -> f64 {
    let a = a.abs();
    let b = b.abs();
    let (max, min) = if a > b { (a, b) } else { (b, a) };
    if max == 0.0 {
        return 0.0;
    }
    let r = min / max;
    max * (1.0 + r * r).sqrt()
}

/// A complex number $`re + i \cdot im`$
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    /// The real part
    pub re: f64,
    /// The imaginary part
    pub im: f64,
}

impl Complex {
    /// $`0 + 0i`$
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// $`1 + 0i`$
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    /// $`0 + 1i`$
    pub const I: Self = Self { re: 0.0, im: 1.0 };

    /// Creates a new complex number
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Builds a complex number from its modulus `r` and argument `theta` (in radians)
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// The modulus (i.e., the distance to the origin), calculated with [`radius`]
    pub fn abs(&self) -> f64 {
        radius(self.re, self.im)
    }

    /// The argument, in radians, within $`(-\pi, \pi]`$
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// The complex conjugate
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Checks whether both parts are exactly zero
    pub fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// Divides `self` by `other`, returning `None` if `other` is exactly zero.
    ///
    /// Uses Smith's algorithm, scaling by the larger component of the
    /// divisor so intermediate products do not overflow.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let ret = if other.re.abs() >= other.im.abs() {
            let r = other.im / other.re;
            let den = other.re + other.im * r;
            Self::new((self.re + self.im * r) / den, (self.im - self.re * r) / den)
        } else {
            let r = other.re / other.im;
            let den = other.re * r + other.im;
            Self::new((self.re * r + self.im) / den, (self.im * r - self.re) / den)
        };
        Some(ret)
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl std::convert::From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

/* COMPLEX | COMPLEX OPERATIONS */

impl std::ops::Add for Complex {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.re + other.re, self.im + other.im)
    }
}

impl std::ops::Sub for Complex {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.re - other.re, self.im - other.im)
    }
}

impl std::ops::Mul for Complex {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }
}

impl std::ops::Div for Complex {
    type Output = Self;

    /// # Panics
    /// Panics if `other` is zero. Use `checked_div()` to handle that case.
    fn div(self, other: Self) -> Self {
        match self.checked_div(other) {
            Some(v) => v,
            None => panic!("Attempted to divide {} by complex zero", self),
        }
    }
}

impl std::ops::Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl std::ops::AddAssign for Complex {
    fn add_assign(&mut self, other: Self) {
        self.re += other.re;
        self.im += other.im;
    }
}

impl std::ops::SubAssign for Complex {
    fn sub_assign(&mut self, other: Self) {
        self.re -= other.re;
        self.im -= other.im;
    }
}

impl std::ops::MulAssign for Complex {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

/* COMPLEX | FLOAT OPERATIONS */

impl std::ops::Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::new(self.re * s, self.im * s)
    }
}

impl std::ops::Mul<Complex> for f64 {
    type Output = Complex;
    fn mul(self, c: Complex) -> Complex {
        c * self
    }
}

/***********/
/* TESTING */
/***********/
