//! An exact rational number type with a numerator and denominator kept in canonical form.

use num_traits::{FromPrimitive, Num, One, PrimInt, Signed, Zero};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    str::FromStr,
};
use thiserror::Error;

use crate::parsing;

/// The base type used for the numerator and denominator.
pub type BaseInt = i32;

/// The type comparisons promote to, so that cross-multiplication cannot overflow.
type WideInt = i64;

/// An exact fraction: a numerator over a positive denominator, always in lowest terms.
///
/// Values are canonical. The denominator is positive and coprime with the numerator, and zero is
/// stored as 0/1, so field-wise equality and hashing are exact value equality.
///
/// Storage is fixed at 32 bits per field. Comparison promotes to 64 bits and is always exact, but
/// the intermediate products of `+`, `-`, `*` and `/` are formed at storage width and can overflow
/// for large or badly-reduced operands. Keep magnitudes well below [`BaseInt::MAX`] if the inputs
/// are not under your control.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct Rational {
    /// The numerator. Carries the sign of the value.
    numerator: BaseInt,
    /// The denominator, always positive.
    denominator: BaseInt,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RationalError {
    #[error("Denominator cannot be zero")]
    ZeroDenominator,
    #[error("Cannot invert zero")]
    InvertZero,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Could not parse {0:?} as a rational")]
    Parse(String),
}

/// Computes the greatest common divisor of two integers, the second non-negative.
const fn gcd(p: BaseInt, q: BaseInt) -> BaseInt {
    let mut p = p;
    let mut q = q;
    while q != 0 {
        let r = p % q;
        p = q;
        q = r;
    }

    p
}

impl Rational {
    /// Creates a new `Rational` from a numerator and denominator, reducing it to canonical form.
    /// Fails if the denominator is zero.
    pub fn new(numerator: BaseInt, denominator: BaseInt) -> Result<Self, RationalError> {
        if denominator == 0 {
            Err(RationalError::ZeroDenominator)
        } else {
            Ok(Self::normalized(numerator, denominator))
        }
    }

    /// Creates the `Rational` n/1.
    pub const fn from_integer(numerator: BaseInt) -> Self {
        Self {
            numerator,
            denominator: 1,
        }
    }

    /// Reduces a pair with a known-nonzero denominator to canonical form: the sign moves into the
    /// numerator and the greatest common divisor is divided out.
    fn normalized(numerator: BaseInt, denominator: BaseInt) -> Self {
        debug_assert!(denominator != 0);
        let (numerator, denominator) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        // gcd(0, d) = d, so zero always reduces to 0/1.
        let g = gcd(numerator.abs(), denominator);
        Self {
            numerator: numerator / g,
            denominator: denominator / g,
        }
    }

    /// The canonical numerator.
    pub const fn numerator(&self) -> BaseInt {
        self.numerator
    }

    /// The canonical denominator, always positive.
    pub const fn denominator(&self) -> BaseInt {
        self.denominator
    }

    /// Whether the value is an integer, i.e., has denominator 1.
    pub const fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    /// The multiplicative inverse: numerator and denominator swapped, re-normalized so the sign
    /// stays in the numerator. Fails for zero, which has no inverse.
    pub fn inv(&self) -> Result<Self, RationalError> {
        if self.numerator == 0 {
            Err(RationalError::InvertZero)
        } else {
            Ok(Self::normalized(self.denominator, self.numerator))
        }
    }

    /// Division that fails instead of panicking when `rhs` is zero. The `/` operator is a
    /// panicking shorthand for this.
    pub fn checked_div(self, rhs: Self) -> Result<Self, RationalError> {
        if rhs.numerator == 0 {
            Err(RationalError::DivisionByZero)
        } else {
            Ok(Self::normalized(
                self.numerator * rhs.denominator,
                self.denominator * rhs.numerator,
            ))
        }
    }

    /// The integer part of the value, rounding toward zero.
    pub const fn trunc(&self) -> Self {
        Self::from_integer(self.numerator / self.denominator)
    }

    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Rational = Rational {
        numerator: 1,
        denominator: 1,
    };

    pub const NEG_ONE: Rational = Rational {
        numerator: -1,
        denominator: 1,
    };
}

impl Default for Rational {
    // Can't be derived: the all-zero struct is not a valid value.
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::normalized(
            self.numerator * rhs.denominator + rhs.numerator * self.denominator,
            self.denominator * rhs.denominator,
        )
    }
}

impl AddAssign for Rational {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::normalized(
            self.numerator * rhs.denominator - rhs.numerator * self.denominator,
            self.denominator * rhs.denominator,
        )
    }
}

impl SubAssign for Rational {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::normalized(
            self.numerator * rhs.numerator,
            self.denominator * rhs.denominator,
        )
    }
}

impl MulAssign for Rational {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Rational {
    type Output = Self;

    /// Note: this panics when `rhs` is zero. Use [`Rational::checked_div`] for a `Result`.
    fn div(self, rhs: Self) -> Self::Output {
        assert!(rhs.numerator != 0, "Division by zero");
        Self::normalized(
            self.numerator * rhs.denominator,
            self.denominator * rhs.numerator,
        )
    }
}

impl DivAssign for Rational {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Rem for Rational {
    type Output = Self;

    /// The remainder after truncating division, so `7/2 % 2` is `3/2`. Panics when `rhs` is zero,
    /// like `/`.
    fn rem(self, rhs: Self) -> Self::Output {
        assert!(rhs.numerator != 0, "Division by zero");
        self - (self / rhs).trunc() * rhs
    }
}

impl RemAssign for Rational {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        // Magnitudes are unchanged, so the result is already canonical.
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Cross-multiply in the wide type. Valid because denominators are positive, and exact
        // because the products of two 32-bit values always fit in 64 bits.
        let lhs = self.numerator as WideInt * other.denominator as WideInt;
        let rhs = other.numerator as WideInt * self.denominator as WideInt;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }
}

impl Num for Rational {
    type FromStrRadixErr = RationalError;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        match str.split_once('/') {
            Some((n, d)) => {
                let numerator = BaseInt::from_str_radix(n, radix)
                    .map_err(|_| RationalError::Parse(str.to_owned()))?;
                let denominator = BaseInt::from_str_radix(d, radix)
                    .map_err(|_| RationalError::Parse(str.to_owned()))?;
                Self::new(numerator, denominator)
            }
            None => BaseInt::from_str_radix(str, radix)
                .map(Self::from_integer)
                .map_err(|_| RationalError::Parse(str.to_owned())),
        }
    }
}

impl Signed for Rational {
    fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator,
        }
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::ZERO
        } else {
            *self - *other
        }
    }

    fn signum(&self) -> Self {
        Self::from_integer(self.numerator.signum())
    }

    fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    fn is_negative(&self) -> bool {
        self.numerator < 0
    }
}

impl FromPrimitive for Rational {
    fn from_i64(n: i64) -> Option<Self> {
        BaseInt::from_i64(n).map(Self::from_integer)
    }

    fn from_u64(n: u64) -> Option<Self> {
        BaseInt::from_u64(n).map(Self::from_integer)
    }
}

impl<T: PrimInt> From<T> for Rational {
    fn from(x: T) -> Self {
        Self::from_integer(x.to_i32().unwrap())
    }
}

impl FromStr for Rational {
    type Err = RationalError;

    /// Accepts `"<int>"` or `"<int>/<int>"`, tolerating whitespace around the slash and the whole
    /// token. The entire input must be consumed; use [`parsing::rational`] to read a rational off
    /// the front of a longer input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsing::rational_str(s)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{} / {}", self.numerator, self.denominator)
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ratio!({} / {})", self.numerator, self.denominator)
    }
}

#[macro_export]
macro_rules! ratio {
    ($num:literal / $denom:expr) => {
        match $crate::rational::Rational::new($num, $denom) {
            Ok(r) => r,
            Err(_) => panic!("Denominator cannot be zero"),
        }
    };
    ($num:expr) => {
        $crate::rational::Rational::from_integer($num)
    };
}
