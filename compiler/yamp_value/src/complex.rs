//! Double-precision complex scalar.
//!
//! Every numeric value in the language is a `Complex`; real numbers simply
//! carry `im == 0.0`. Operations keep a real fast path so that real inputs
//! produce bit-exact real results (`2^16` is exactly `65536`).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    #[inline]
    pub const fn real(re: f64) -> Self {
        Complex { re, im: 0.0 }
    }

    #[inline]
    pub fn is_real(self) -> bool {
        self.im == 0.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// Real and integral, e.g. usable as an index or factorial operand.
    #[inline]
    pub fn is_integer(self) -> bool {
        self.is_real() && self.re.is_finite() && self.re.fract() == 0.0
    }

    /// Modulus `|z|`.
    #[inline]
    pub fn norm(self) -> f64 {
        if self.is_real() {
            self.re.abs()
        } else {
            self.re.hypot(self.im)
        }
    }

    #[inline]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    #[inline]
    #[must_use]
    pub fn conj(self) -> Self {
        Complex::new(self.re, -self.im)
    }

    #[must_use]
    pub fn exp(self) -> Self {
        if self.is_real() {
            return Complex::real(self.re.exp());
        }
        let r = self.re.exp();
        Complex::new(r * self.im.cos(), r * self.im.sin())
    }

    /// Principal natural logarithm.
    #[must_use]
    pub fn ln(self) -> Self {
        if self.is_real() && self.re >= 0.0 {
            return Complex::real(self.re.ln());
        }
        Complex::new(self.norm().ln(), self.arg())
    }

    /// Principal square root.
    #[must_use]
    pub fn sqrt(self) -> Self {
        if self.is_real() {
            return if self.re >= 0.0 {
                Complex::real(self.re.sqrt())
            } else {
                Complex::new(0.0, (-self.re).sqrt())
            };
        }
        let r = self.norm().sqrt();
        let theta = self.arg() / 2.0;
        Complex::new(r * theta.cos(), r * theta.sin())
    }

    #[must_use]
    pub fn sin(self) -> Self {
        if self.is_real() {
            return Complex::real(self.re.sin());
        }
        Complex::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    #[must_use]
    pub fn cos(self) -> Self {
        if self.is_real() {
            return Complex::real(self.re.cos());
        }
        Complex::new(
            self.re.cos() * self.im.cosh(),
            -(self.re.sin() * self.im.sinh()),
        )
    }

    #[must_use]
    pub fn tan(self) -> Self {
        if self.is_real() {
            return Complex::real(self.re.tan());
        }
        self.sin() / self.cos()
    }

    /// `self ^ exponent`.
    ///
    /// Real bases with real exponents stay on `powf` when the result is
    /// real (non-negative base or integral exponent). Everything else goes
    /// through `exp(exponent * ln(self))`.
    #[must_use]
    pub fn pow(self, exponent: Complex) -> Self {
        if self.is_real() && exponent.is_real() && (self.re >= 0.0 || exponent.re.fract() == 0.0)
        {
            return Complex::real(self.re.powf(exponent.re));
        }
        if self.is_zero() {
            return if exponent.is_zero() {
                Complex::ONE
            } else if exponent.re > 0.0 {
                Complex::ZERO
            } else {
                Complex::real(f64::INFINITY)
            };
        }
        (exponent * self.ln()).exp()
    }

    /// Ordering key for sets and sorting: real part, then imaginary part.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.re
            .total_cmp(&other.re)
            .then_with(|| self.im.total_cmp(&other.im))
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Complex::real(re)
    }
}

impl Add for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        if self.is_real() && rhs.is_real() {
            return Complex::real(self.re * rhs.re);
        }
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Complex {
    type Output = Complex;

    /// Never fails: a real zero divisor yields a signed infinity or NaN.
    #[inline]
    fn div(self, rhs: Complex) -> Complex {
        if rhs.is_real() {
            if self.is_real() {
                return Complex::real(self.re / rhs.re);
            }
            return Complex::new(self.re / rhs.re, self.im / rhs.re);
        }
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;
    #[inline]
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

/// Bitwise hash with `-0.0` folded into `0.0`, consistent with `==` for
/// every non-NaN value.
impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fn bits(x: f64) -> u64 {
            if x == 0.0 {
                0
            } else {
                x.to_bits()
            }
        }
        bits(self.re).hash(state);
        bits(self.im).hash(state);
    }
}

/// Formats a real component: integers without a fractional part, `-0`
/// printed as `0`.
pub(crate) fn format_real(x: f64) -> String {
    if x == 0.0 {
        "0".to_string()
    } else {
        format!("{x}")
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im == 0.0 {
            return write!(f, "{}", format_real(self.re));
        }
        let im = if self.im.abs() == 1.0 {
            String::new()
        } else {
            format_real(self.im.abs())
        };
        let sign = if self.im < 0.0 { "-" } else { "+" };
        if self.re == 0.0 {
            let lead = if self.im < 0.0 { "-" } else { "" };
            write!(f, "{lead}{im}i")
        } else {
            write!(f, "{}{sign}{im}i", format_real(self.re))
        }
    }
}
