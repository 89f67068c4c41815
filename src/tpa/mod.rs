mod arith;
mod format;
mod parse;
mod simplify;

use crate::{
    big::{BigInteger, Sign, BASE},
    error::{Error, Result}
};

use num_traits::*;
use std::{mem, str::FromStr, time::Duration};

/// Number of fractional digits `Display` renders unless a precision is given
pub const DEFAULT_DECIMAL_PLACES: usize = 100;
/// Time `simplify` may spend looking for common factors by default
pub const DEFAULT_SIMPLIFY_BUDGET: Duration = Duration::from_millis(100);
/// Decimal places kept when splitting a float into integer and fraction.
/// This is the number of whole decimal digits that fit in one digit.
pub const FLOAT_DECIMAL_PLACES: u32 = 9;

/// Whether a number keeps a fractional part
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Any fraction is discarded, both of this number and of operands
    Integer,
    /// An exact `numerator/denominator` is kept next to the integer part
    Fractional
}

/// The fractional part of a number, `0 <= numerator < denominator` once
/// normalised
#[derive(Clone, Debug)]
pub(crate) struct Remainder {
    pub(crate) numerator: BigInteger,
    pub(crate) denominator: BigInteger
}
impl Default for Remainder {
    fn default() -> Self {
        Self {
            numerator: BigInteger::zero(),
            denominator: BigInteger::one()
        }
    }
}

/// Anything a number can be built from
#[derive(Clone, Copy, Debug)]
pub enum Source<'a> {
    Integer(&'a BigInteger),
    Float(f64),
    Text(&'a str),
    Copy(&'a Tpa),
    /// Zero. Integer mode unless another is requested.
    Zero
}

/// A total precision number: an arbitrary size integer part and, in
/// fractional mode, an exact fraction.
///
/// All arithmetic methods mutate the receiver and return it for chaining.
/// For an operation that leaves both sides alone, use the operators on
/// references: `&a + &b`.
/// ```rust
/// use tpa::Tpa;
/// let mut third: Tpa = "1/3".parse().unwrap();
/// third.times(&Tpa::new(2)).plus(&"0.5".parse().unwrap());
/// assert_eq!(third.to_string(), "1.1[6]");
/// ```
#[derive(Clone, Default)]
pub struct Tpa {
    sign: Sign,
    number: BigInteger,
    remainder: Option<Remainder>
}
impl Tpa {
    /// Alias of `from`
    pub fn new<T: Into<Self>>(value: T) -> Self {
        value.into()
    }
    /// Build a number from any `Source`. When `mode` is given it wins over
    /// the mode the source implies.
    pub fn build(source: Source, mode: Option<Mode>) -> Result<Self> {
        let tpa = match source {
            Source::Integer(integer) => Self::from(integer.clone()),
            Source::Float(value) => Self::from_f64(value)?,
            Source::Text(input) => return Self::parse_with_mode(input, mode),
            Source::Copy(other) => other.clone(),
            Source::Zero => Self::zero()
        };
        Ok(match mode {
            Some(mode) => tpa.with_mode(mode),
            None => tpa
        })
    }
    /// Split a float into an integer part and a fraction with
    /// `FLOAT_DECIMAL_PLACES` decimal places. Integer mode only if the
    /// rounded fraction is 0, so a fraction that rounds up to a whole one is
    /// carried into the integer part and stays fractional.
    /// ```rust
    /// use tpa::{Mode, Tpa};
    /// assert_eq!(Tpa::from_f64(-7.8).unwrap().to_fraction(), "-7 8/10");
    /// assert_eq!(Tpa::from_f64(3.0).unwrap().mode(), Mode::Integer);
    /// ```
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::NotANumber);
        }
        let magnitude = value.abs();
        let whole = magnitude.floor();
        let scale = 10u64.pow(FLOAT_DECIMAL_PLACES);
        let mut numerator = ((magnitude - whole) * scale as f64).round() as u64;
        let mut denominator = scale;
        while numerator != 0 && numerator % 10 == 0 {
            numerator /= 10;
            denominator /= 10;
        }
        let mut tpa = Self {
            sign: if value < 0.0 { Sign::Negative } else { Sign::Positive },
            number: BigInteger::from_f64(whole).ok_or(Error::NotANumber)?,
            remainder: if numerator == 0 {
                None
            } else {
                Some(Remainder {
                    numerator: BigInteger::from(numerator),
                    denominator: BigInteger::from(denominator)
                })
            }
        };
        tpa.normalise_remainder();
        tpa.fix_zero_sign();
        Ok(tpa)
    }
    /// Parse with an explicit mode, see `FromStr` for the grammar
    pub fn parse_with_mode(input: &str, mode: Option<Mode>) -> Result<Self> {
        parse::parse(input, mode)
    }
    /// Convert to the given mode, dropping any fraction in integer mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        match mode {
            Mode::Integer => self.make_integer(),
            Mode::Fractional => self.make_fractional()
        };
        self
    }
    /// Generate a random positive integer with `decimal_digits` digits
    #[cfg(feature = "random")]
    pub fn random(decimal_digits: usize) -> Result<Self> {
        BigInteger::random(decimal_digits, &mut rand::thread_rng()).map(Self::from)
    }

    pub fn mode(&self) -> Mode {
        if self.remainder.is_some() { Mode::Fractional } else { Mode::Integer }
    }
    pub fn is_integer(&self) -> bool {
        self.remainder.is_none()
    }
    pub fn is_fractional(&self) -> bool {
        self.remainder.is_some()
    }
    /// True if in fractional mode with a nonzero fraction
    pub fn has_fraction(&self) -> bool {
        self.remainder.as_ref().map_or(false, |remainder| !remainder.numerator.is_zero())
    }
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative && !self.is_zero()
    }
    pub fn is_positive(&self) -> bool {
        self.sign == Sign::Positive && !self.is_zero()
    }
    /// Return the sign. Zero is positive.
    pub fn sign(&self) -> Sign {
        self.sign
    }
    /// The magnitude of the integer part
    pub fn integer_part(&self) -> &BigInteger {
        &self.number
    }
    /// The fraction's numerator, in fractional mode
    pub fn numerator(&self) -> Option<&BigInteger> {
        self.remainder.as_ref().map(|remainder| &remainder.numerator)
    }
    /// The fraction's denominator, in fractional mode
    pub fn denominator(&self) -> Option<&BigInteger> {
        self.remainder.as_ref().map(|remainder| &remainder.denominator)
    }

    /// Switch to integer mode, discarding the fraction
    pub fn make_integer(&mut self) -> &mut Self {
        self.remainder = None;
        self.fix_zero_sign();
        self
    }
    /// Switch to fractional mode. An integer gets a fraction of `0/1`.
    pub fn make_fractional(&mut self) -> &mut Self {
        if self.remainder.is_none() {
            self.remainder = Some(Remainder::default());
        }
        self
    }
    /// Keep only the integer part, staying in the same mode
    pub fn int(&mut self) -> &mut Self {
        if let Some(remainder) = &mut self.remainder {
            *remainder = Remainder::default();
        }
        self.fix_zero_sign();
        self
    }
    /// Keep only the fractional part, staying in the same mode. Always zero
    /// in integer mode.
    pub fn frac(&mut self) -> &mut Self {
        self.number = BigInteger::zero();
        self.fix_zero_sign();
        self
    }

    /// Best effort float approximation
    pub fn value(&self) -> f64 {
        let mut value = self.number.value();
        if let Some(remainder) = &self.remainder {
            // Two extra digits of the fraction are enough for any float
            let mut scaled = remainder.numerator.clone();
            scaled.shift_digits(2);
            scaled.divide_unchecked(&remainder.denominator);
            value += scaled.value() / (BASE as f64 * BASE as f64);
        }
        match self.sign {
            Sign::Positive => value,
            Sign::Negative => -value
        }
    }

    /// The integer part with the sign applied
    fn signed_number(&self) -> BigInteger {
        signed(&self.number, self.sign)
    }
    // Fold an improper fraction into the integer part
    fn normalise_remainder(&mut self) {
        if let Some(remainder) = &mut self.remainder {
            if remainder.numerator >= remainder.denominator {
                let rest = remainder.numerator.divide_unchecked(&remainder.denominator);
                self.number += &mem::replace(&mut remainder.numerator, rest);
                self.number.settle();
            }
            if remainder.numerator.is_zero() {
                remainder.denominator = BigInteger::one();
            }
        }
    }
    fn fix_zero_sign(&mut self) {
        if self.is_zero() {
            self.sign = Sign::Positive;
        }
    }
}

fn signed(magnitude: &BigInteger, sign: Sign) -> BigInteger {
    match sign {
        Sign::Positive => magnitude.clone(),
        Sign::Negative => -magnitude
    }
}

impl<T: Into<i128>> From<T> for Tpa {
    fn from(i: T) -> Self {
        Self::from(BigInteger::from(i))
    }
}
impl From<BigInteger> for Tpa {
    fn from(mut integer: BigInteger) -> Self {
        integer.settle();
        Self {
            sign: integer.sign(),
            number: integer.abs(),
            remainder: None
        }
    }
}
/// Decimal, mixed number or fraction notation:
///
/// - `-12.34`, `.5` or `0.1[6]`, where the bracketed digits recur forever
/// - `5 3/4`
/// - `-3/4`
///
/// Decimals with a fraction and fractions give a fractional mode number,
/// anything else an integer one.
impl FromStr for Tpa {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse_with_mode(input, None)
    }
}
impl Zero for Tpa {
    fn zero() -> Self {
        Self::default()
    }
    fn is_zero(&self) -> bool {
        self.number.is_zero() && !self.has_fraction()
    }
}
impl One for Tpa {
    fn one() -> Self {
        Self::from(1)
    }
}
impl Num for Tpa {
    type FromStrRadixErr = Error;

    fn from_str_radix(input: &str, radix: u32) -> Result<Self> {
        if radix != 10 {
            return Err(crate::error::ParseError::InvalidRadix(radix).into());
        }
        input.parse()
    }
}
impl Signed for Tpa {
    fn abs(&self) -> Self {
        let mut abs = self.clone();
        abs.sign = Sign::Positive;
        abs
    }
    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::zero().with_mode(self.mode())
        } else {
            self - other
        }
    }
    fn signum(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else if self.is_positive() {
            Self::one()
        } else {
            Self::from(-1)
        }
    }
    fn is_positive(&self) -> bool {
        Tpa::is_positive(self)
    }
    fn is_negative(&self) -> bool {
        Tpa::is_negative(self)
    }
}
impl ToPrimitive for Tpa {
    fn to_i64(&self) -> Option<i64> {
        self.signed_number().to_i64()
    }
    fn to_u64(&self) -> Option<u64> {
        self.signed_number().to_u64()
    }
    fn to_i128(&self) -> Option<i128> {
        self.signed_number().to_i128()
    }
    fn to_u128(&self) -> Option<u128> {
        self.signed_number().to_u128()
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.value())
    }
}
