use super::{Digit, Digits};
use crate::error::{Error, ParseError, Result};

use num_traits::*;
use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::*,
    str::FromStr
};

/// The largest power of ten that fits in a single digit
const DECIMAL_CHUNK: Digit = 1_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Positive
}
impl Default for Sign {
    fn default() -> Self {
        Sign::Positive
    }
}
impl Neg for Sign {
    type Output = Self;
    fn neg(self) -> Self::Output {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative
        }
    }
}
impl Mul for Sign {
    type Output = Self;
    fn mul(self, other: Self) -> Self::Output {
        if self == other { Sign::Positive } else { Sign::Negative }
    }
}

/// An arbitrary size signed integer.
///
/// Additions and subtractions are deferred: they leave the digits out of
/// range and the carrying is done once something needs the canonical form
/// (comparison, division, rendering). Every public method accounts for this,
/// so it's only visible through `digits`, which should be read after
/// `settle`.
#[derive(Clone, Default)]
pub struct BigInteger {
    sign: Sign,
    magnitude: Digits
}
impl BigInteger {
    /// Alias of `from`
    pub fn new<T: Into<Self>>(value: T) -> Self {
        value.into()
    }
    fn signum_ordering(&self) -> Ordering {
        let ordering = self.magnitude.value_signum();
        match self.sign {
            Sign::Positive => ordering,
            Sign::Negative => ordering.reverse()
        }
    }
    /// Return the sign. Zero is positive.
    pub fn sign(&self) -> Sign {
        if self.signum_ordering() == Ordering::Less { Sign::Negative } else { Sign::Positive }
    }
    /// Borrow the little endian magnitude digits. Only meaningful after
    /// `settle`.
    pub fn digits(&self) -> &[Digit] {
        self.magnitude.as_slice()
    }
    /// True if the digits are all in range with no leading zero, and zero
    /// isn't negative.
    pub fn is_canonical(&self) -> bool {
        self.magnitude.is_canonical() && !(self.sign == Sign::Negative && self.magnitude.is_empty())
    }
    fn canonical(&self) -> Cow<Self> {
        if self.is_canonical() {
            Cow::Borrowed(self)
        } else {
            let mut copy = self.clone();
            copy.settle();
            Cow::Owned(copy)
        }
    }
    fn fix_zero(&mut self) {
        if self.magnitude.is_empty() {
            self.sign = Sign::Positive;
        }
    }
    /// Run any pending carries, leaving the digits within `(-BASE, BASE)`.
    pub fn normalize(&mut self) -> &mut Self {
        self.magnitude.normalize(false);
        self
    }
    /// Bring the number into canonical form: carry, move the sign out of the
    /// digits and borrow away any negative digit.
    pub fn settle(&mut self) -> &mut Self {
        if self.magnitude.settle() {
            self.sign = -self.sign;
        }
        self.fix_zero();
        self
    }

    /// Divide by `divisor`, leaving the quotient in `self` and returning the
    /// remainder. Division truncates, so the remainder takes the sign of the
    /// dividend.
    /// ```rust
    /// use tpa::BigInteger;
    /// let mut number = BigInteger::new(-100);
    /// assert_eq!(number.divide(&BigInteger::new(7)).unwrap(), BigInteger::new(-2));
    /// assert_eq!(number, BigInteger::new(-14));
    /// ```
    pub fn divide(&mut self, divisor: &Self) -> Result<Self> {
        if divisor.is_zero() {
            return Err(Error::DivideByZero);
        }
        Ok(self.divide_unchecked(divisor))
    }
    /// `divide`, panicking on a zero divisor
    pub(crate) fn divide_unchecked(&mut self, divisor: &Self) -> Self {
        let divisor = divisor.canonical();
        assert!(!divisor.magnitude.is_empty(), "division by zero");
        self.settle();
        let magnitude = self.magnitude.divide_magnitude(&divisor.magnitude);
        let mut remainder = Self {
            sign: self.sign,
            magnitude
        };
        self.sign = self.sign * divisor.sign;
        self.fix_zero();
        remainder.fix_zero();
        remainder
    }

    /// Quick check for divisibility by a single digit.
    ///
    /// ## Panics
    /// Panics unless `0 < divisor < BASE`
    pub fn is_divisible_by(&self, divisor: u32) -> bool {
        self.canonical().magnitude.is_divisible_by(divisor as Digit)
    }
    /// Divide by a single digit, returning the remainder of the magnitude.
    ///
    /// ## Panics
    /// Panics unless `0 < divisor < BASE`
    pub fn digit_divide(&mut self, divisor: u32) -> u32 {
        self.settle();
        let remainder = self.magnitude.digit_divide(divisor as Digit);
        self.fix_zero();
        remainder as u32
    }
    /// Calculate `self * multiplier + carry` in one pass.
    ///
    /// ## Panics
    /// Panics if either argument doesn't fit in a single digit
    pub fn digit_multiply_with_add(&mut self, multiplier: u32, carry: u32) -> &mut Self {
        let carry = match self.sign {
            Sign::Positive => carry as Digit,
            Sign::Negative => -(carry as Digit)
        };
        self.magnitude.multiply_digit_with_add(multiplier as Digit, carry);
        self
    }
    /// An upper bound for the square root of the magnitude, accurate to
    /// within a factor of about `1 + 1/BASE`.
    pub fn rough_sqrt(&self) -> Self {
        Self {
            sign: Sign::Positive,
            magnitude: self.canonical().magnitude.rough_sqrt()
        }
    }
    /// Multiply by `BASE^count`
    pub fn shift_digits(&mut self, count: usize) -> &mut Self {
        self.magnitude.shift(count);
        self
    }
    /// Best effort float approximation. Infinite if out of range.
    pub fn value(&self) -> f64 {
        let value = self.magnitude.to_f64();
        match self.sign {
            Sign::Positive => value,
            Sign::Negative => -value
        }
    }
    /// Generate a random positive number with exactly `decimal_digits`
    /// decimal digits.
    #[cfg(feature = "random")]
    pub fn random<R: rand::Rng + ?Sized>(decimal_digits: usize, rng: &mut R) -> Result<Self> {
        if decimal_digits == 0 {
            return Err(Error::NonPositiveDigits);
        }
        let mut magnitude = Digits::zero();
        for i in 0..decimal_digits {
            let digit = if i == 0 { rng.gen_range(1..10) } else { rng.gen_range(0..10) };
            magnitude.multiply_digit_with_add(10, digit);
        }
        Ok(Self {
            sign: Sign::Positive,
            magnitude
        })
    }
}
impl Num for BigInteger {
    type FromStrRadixErr = Error;

    fn from_str_radix(input: &str, radix: u32) -> Result<Self> {
        if !(2..=36).contains(&radix) {
            return Err(ParseError::InvalidRadix(radix).into());
        }
        let (sign, start) = match input.as_bytes().first() {
            Some(b'-') => (Sign::Negative, 1),
            Some(b'+') => (Sign::Positive, 1),
            _ => (Sign::Positive, 0)
        };
        if input.len() == start {
            return Err(ParseError::Empty.into());
        }
        let mut magnitude = Digits::zero();
        for (i, c) in input[start..].char_indices() {
            let digit = c.to_digit(radix).ok_or(ParseError::UnexpectedCharacter {
                found: c,
                position: start + i
            })?;
            magnitude.multiply_digit_with_add(radix as Digit, digit as Digit);
        }
        let mut result = Self { sign, magnitude };
        result.settle();
        Ok(result)
    }
}
impl FromStr for BigInteger {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::from_str_radix(input, 10)
    }
}
impl Zero for BigInteger {
    fn zero() -> Self {
        Self::default()
    }
    fn is_zero(&self) -> bool {
        self.signum_ordering() == Ordering::Equal
    }
}
impl One for BigInteger {
    fn one() -> Self {
        Self::from(1)
    }
    fn is_one(&self) -> bool {
        let this = self.canonical();
        this.sign == Sign::Positive && this.magnitude.as_slice() == [1]
    }
}
impl Signed for BigInteger {
    fn abs(&self) -> Self {
        let mut abs = self.canonical().into_owned();
        abs.sign = Sign::Positive;
        abs
    }
    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::zero()
        } else {
            let mut difference = self.clone();
            difference -= other;
            difference.settle();
            difference
        }
    }
    fn signum(&self) -> Self {
        match self.signum_ordering() {
            Ordering::Less => Self::from(-1),
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self::one()
        }
    }
    fn is_positive(&self) -> bool {
        self.signum_ordering() == Ordering::Greater
    }
    fn is_negative(&self) -> bool {
        self.signum_ordering() == Ordering::Less
    }
}
impl ToPrimitive for BigInteger {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|value| i64::try_from(value).ok())
    }
    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|value| u64::try_from(value).ok())
    }
    fn to_i128(&self) -> Option<i128> {
        let this = self.canonical();
        let magnitude = this.magnitude.to_u128()?;
        match this.sign {
            Sign::Positive => i128::try_from(magnitude).ok(),
            Sign::Negative if magnitude == i128::MIN.unsigned_abs() => Some(i128::MIN),
            Sign::Negative => i128::try_from(magnitude).ok().map(|value| -value)
        }
    }
    fn to_u128(&self) -> Option<u128> {
        let this = self.canonical();
        match this.sign {
            Sign::Positive => this.magnitude.to_u128(),
            Sign::Negative => None
        }
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.value())
    }
}
impl FromPrimitive for BigInteger {
    fn from_i64(value: i64) -> Option<Self> {
        Some(Self::from(value))
    }
    fn from_u64(value: u64) -> Option<Self> {
        Some(Self::from(value))
    }
    fn from_i128(value: i128) -> Option<Self> {
        Some(Self::from(value))
    }
    fn from_u128(value: u128) -> Option<Self> {
        Some(Self {
            sign: Sign::Positive,
            magnitude: Digits::from_u128(value)
        })
    }
    /// Truncates towards zero. `None` if the value isn't finite.
    fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let mut result = Self {
            sign: if value < 0.0 { Sign::Negative } else { Sign::Positive },
            magnitude: Digits::from_whole_f64(value.abs().trunc())
        };
        result.fix_zero();
        Some(result)
    }
}
impl<T: Into<i128>> From<T> for BigInteger {
    fn from(i: T) -> Self {
        let i = i.into();
        Self {
            sign: if i < 0 { Sign::Negative } else { Sign::Positive },
            magnitude: Digits::from_u128(i.unsigned_abs())
        }
    }
}
impl Neg for BigInteger {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        self.sign = -self.sign;
        if self.magnitude.is_empty() {
            self.sign = Sign::Positive;
        }
        self
    }
}
impl Neg for &BigInteger {
    type Output = BigInteger;
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}
impl AddAssign<&Self> for BigInteger {
    fn add_assign(&mut self, other: &Self) {
        self.magnitude.accumulate(&other.magnitude, self.sign != other.sign);
    }
}
impl SubAssign<&Self> for BigInteger {
    fn sub_assign(&mut self, other: &Self) {
        self.magnitude.accumulate(&other.magnitude, self.sign == other.sign);
    }
}
impl MulAssign<&Self> for BigInteger {
    fn mul_assign(&mut self, other: &Self) {
        let other = other.canonical();
        self.settle();
        self.magnitude.multiply(&other.magnitude);
        self.sign = self.sign * other.sign;
        self.fix_zero();
    }
}
impl DivAssign<&Self> for BigInteger {
    fn div_assign(&mut self, other: &Self) {
        self.divide_unchecked(other);
    }
}
impl RemAssign<&Self> for BigInteger {
    fn rem_assign(&mut self, other: &Self) {
        *self = self.divide_unchecked(other);
    }
}
impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right) = (self.canonical(), other.canonical());
        match (left.sign, right.sign) {
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (Sign::Positive, Sign::Positive) => left.magnitude.cmp_magnitude(&right.magnitude),
            (Sign::Negative, Sign::Negative) => right.magnitude.cmp_magnitude(&left.magnitude)
        }
    }
}
impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for BigInteger {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for BigInteger {}
impl Hash for BigInteger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let this = self.canonical();
        this.sign.hash(state);
        this.magnitude.as_slice().hash(state);
    }
}
impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut this = self.canonical().into_owned();
        let mut chunks = Vec::new();
        while !this.magnitude.is_empty() {
            chunks.push(this.magnitude.digit_divide(DECIMAL_CHUNK));
        }
        let mut buf = String::new();
        match chunks.split_last() {
            None => buf.push('0'),
            Some((top, rest)) => {
                buf.push_str(&top.to_string());
                for chunk in rest.iter().rev() {
                    buf.push_str(&format!("{:09}", chunk));
                }
            }
        }
        f.pad_integral(this.sign == Sign::Positive, "", &buf)
    }
}
impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

macro_rules! impl_op {
    ($($op_trait:ident $op_fn:ident, $checked_trait:ident $checked_fn:ident = $assign_trait:ident $assign_fn:ident $fallible:literal),*) => {
        $(
            impl<T: Into<Self>> $assign_trait<T> for BigInteger {
                fn $assign_fn(&mut self, other: T) {
                    self.$assign_fn(&other.into())
                }
            }
            impl $op_trait<&Self> for BigInteger {
                type Output = Self;
                fn $op_fn(mut self, other: &Self) -> Self::Output {
                    self.$assign_fn(other);
                    self
                }
            }
            impl<T: Into<Self>> $op_trait<T> for BigInteger {
                type Output = Self;
                fn $op_fn(mut self, other: T) -> Self::Output {
                    self.$assign_fn(other);
                    self
                }
            }
            impl $op_trait<&BigInteger> for &BigInteger {
                type Output = BigInteger;
                fn $op_fn(self, other: &BigInteger) -> Self::Output {
                    self.clone().$op_fn(other)
                }
            }
            impl $checked_trait for BigInteger {
                fn $checked_fn(&self, other: &Self) -> Option<Self> {
                    if !$fallible || !other.is_zero() {
                        Some(self.clone().$op_fn(other))
                    } else {
                        None
                    }
                }
            }
        )*
    }
}
impl_op! {
    Add add, CheckedAdd checked_add = AddAssign add_assign false,
    Sub sub, CheckedSub checked_sub = SubAssign sub_assign false,
    Mul mul, CheckedMul checked_mul = MulAssign mul_assign false,
    Div div, CheckedDiv checked_div = DivAssign div_assign true,
    Rem rem, CheckedRem checked_rem = RemAssign rem_assign true
}
