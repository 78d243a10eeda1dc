//! Fraction: Exact rational arithmetic for layout math.
//!
//! Percentage and ratio constraints are resolved against integer lengths.
//! Doing that in floating point loses columns at region boundaries, so the
//! layout solver accumulates exact fractions and only truncates at the end.
//!
//! Values are always stored in lowest terms with the sign folded into the
//! numerator, which makes the derived equality and hashing structural.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// Error type for fraction construction and arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionError {
    /// A fraction was constructed with a zero denominator.
    #[error("fraction denominator must not be zero")]
    ZeroDenominator,

    /// A fraction was divided by zero (or a zero fraction was inverted).
    #[error("division by a zero fraction")]
    DivisionByZero,

    /// The reduced result does not fit in 64-bit terms.
    #[error("fraction arithmetic overflowed")]
    Overflow,
}

/// An exact rational number `numerator / denominator`.
///
/// # Example
///
/// ```
/// use tessera::Fraction;
///
/// let third = Fraction::new(1, 3).unwrap();
/// assert_eq!(third + third + third, Fraction::ONE);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    /// Zero (0/1).
    pub const ZERO: Self = Self::from_integer(0);
    /// One (1/1).
    pub const ONE: Self = Self::from_integer(1);

    /// Create a fraction reduced to lowest terms.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, FractionError> {
        Self::reduce(i128::from(numerator), i128::from(denominator))
    }

    /// Create a whole-number fraction (`n/1`).
    #[inline]
    pub const fn from_integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    /// The numerator (carries the sign).
    #[inline]
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// The denominator (always positive).
    #[inline]
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Whether this fraction equals zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Whether this fraction is strictly negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Exact sum.
    pub fn checked_add(self, other: Self) -> Result<Self, FractionError> {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        Self::reduce(a * d + c * b, b * d)
    }

    /// Exact difference.
    pub fn checked_sub(self, other: Self) -> Result<Self, FractionError> {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        Self::reduce(a * d - c * b, b * d)
    }

    /// Exact negation. Fails only for a numerator of `i64::MIN`.
    pub fn checked_neg(self) -> Result<Self, FractionError> {
        let numerator = self
            .numerator
            .checked_neg()
            .ok_or(FractionError::Overflow)?;
        Ok(Self {
            numerator,
            denominator: self.denominator,
        })
    }

    /// Exact product.
    pub fn checked_mul(self, other: Self) -> Result<Self, FractionError> {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        Self::reduce(a * c, b * d)
    }

    /// Exact quotient. Fails when `other` is zero.
    pub fn checked_div(self, other: Self) -> Result<Self, FractionError> {
        self.checked_mul(other.reciprocal()?)
    }

    /// `1 / self`. Fails when `self` is zero.
    pub fn reciprocal(self) -> Result<Self, FractionError> {
        if self.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        let (a, b) = self.wide();
        Self::reduce(b, a)
    }

    /// Absolute value.
    ///
    /// # Panics
    /// Panics if the numerator is `i64::MIN`.
    #[must_use]
    #[track_caller]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Truncate toward zero.
    #[inline]
    pub const fn trunc(&self) -> i64 {
        self.numerator / self.denominator
    }

    /// Largest integer less than or equal to this fraction.
    #[inline]
    pub const fn floor(&self) -> i64 {
        self.numerator.div_euclid(self.denominator)
    }

    /// Truncate toward zero, saturating at the `i32` range.
    pub fn to_i32(&self) -> i32 {
        let t = self.trunc();
        i32::try_from(t).unwrap_or(if t < 0 { i32::MIN } else { i32::MAX })
    }

    /// Nearest `f64` approximation. Only for display and diagnostics.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    #[inline]
    const fn wide(self) -> (i128, i128) {
        (self.numerator as i128, self.denominator as i128)
    }

    fn reduce(numerator: i128, denominator: i128) -> Result<Self, FractionError> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        let g = gcd(numerator.unsigned_abs(), denominator.unsigned_abs());
        // g >= 1 here because the denominator is non-zero
        let g = i128::try_from(g).map_err(|_| FractionError::Overflow)?;
        let (mut n, mut d) = (numerator / g, denominator / g);
        if d < 0 {
            n = -n;
            d = -d;
        }
        Ok(Self {
            numerator: i64::try_from(n).map_err(|_| FractionError::Overflow)?,
            denominator: i64::try_from(d).map_err(|_| FractionError::Overflow)?,
        })
    }
}

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Fraction {
    #[inline]
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<u16> for Fraction {
    #[inline]
    fn from(n: u16) -> Self {
        Self::from_integer(i64::from(n))
    }
}

impl TryFrom<(i64, i64)> for Fraction {
    type Error = FractionError;

    fn try_from((n, d): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(n, d)
    }
}

/// # Panics
/// Panics if the reduced result overflows `i64` terms.
impl Add for Fraction {
    type Output = Self;

    #[track_caller]
    fn add(self, rhs: Self) -> Self {
        match self.checked_add(rhs) {
            Ok(f) => f,
            Err(e) => panic!("{e}: {self} + {rhs}"),
        }
    }
}

/// # Panics
/// Panics if the reduced result overflows `i64` terms.
impl Sub for Fraction {
    type Output = Self;

    #[track_caller]
    fn sub(self, rhs: Self) -> Self {
        match self.checked_sub(rhs) {
            Ok(f) => f,
            Err(e) => panic!("{e}: {self} - {rhs}"),
        }
    }
}

/// # Panics
/// Panics if the reduced result overflows `i64` terms.
impl Mul for Fraction {
    type Output = Self;

    #[track_caller]
    fn mul(self, rhs: Self) -> Self {
        match self.checked_mul(rhs) {
            Ok(f) => f,
            Err(e) => panic!("{e}: {self} * {rhs}"),
        }
    }
}

/// # Panics
/// Panics if the numerator is `i64::MIN`.
impl Neg for Fraction {
    type Output = Self;

    #[track_caller]
    fn neg(self) -> Self {
        match self.checked_neg() {
            Ok(f) => f,
            Err(e) => panic!("{e}: -{self}"),
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        (a * d).cmp(&(c * b))
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}
