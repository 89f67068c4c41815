use super::{signed, Remainder, Tpa};
use crate::{
    big::Sign,
    error::{Error, Result}
};

use num_traits::*;
use std::{
    cmp::Ordering,
    ops::*
};

impl Tpa {
    /// Add `other` to `self`. In integer mode the fraction of `other` is
    /// ignored.
    pub fn plus(&mut self, other: &Tpa) -> &mut Self {
        self.combine(other, other.sign)
    }
    /// Subtract `other` from `self`. In integer mode the fraction of `other`
    /// is ignored.
    pub fn minus(&mut self, other: &Tpa) -> &mut Self {
        self.combine(other, -other.sign)
    }
    fn combine(&mut self, other: &Tpa, other_sign: Sign) -> &mut Self {
        let mut integer = self.signed_number();
        integer += &signed(&other.number, other_sign);

        let remainder = match &mut self.remainder {
            None => {
                integer.settle();
                self.sign = integer.sign();
                self.number = integer.abs();
                return self;
            },
            Some(remainder) => remainder
        };

        // a/b + c/d = (ad + cb)/bd, all signed
        let mut numerator = signed(&remainder.numerator, self.sign);
        let mut denominator = remainder.denominator.clone();
        if let Some(theirs) = other.remainder.as_ref().filter(|theirs| !theirs.numerator.is_zero()) {
            numerator *= &theirs.denominator;
            let mut cross = signed(&theirs.numerator, other_sign);
            cross *= &remainder.denominator;
            numerator += &cross;
            denominator *= &theirs.denominator;
        }
        let rest = numerator.divide_unchecked(&denominator);
        integer += &numerator;
        integer.settle();
        let mut numerator = rest;

        // Both parts need the same sign
        if integer.is_positive() && numerator.is_negative() {
            integer -= 1;
            numerator += &denominator;
        } else if integer.is_negative() && numerator.is_positive() {
            integer += 1;
            numerator -= &denominator;
        }
        integer.settle();
        numerator.settle();

        self.sign = if integer.is_zero() { numerator.sign() } else { integer.sign() };
        self.number = integer.abs();
        remainder.numerator = numerator.abs();
        remainder.denominator = denominator;
        self.normalise_remainder();
        self.fix_zero_sign();
        self
    }
    /// Multiply `self` by `other`. In integer mode the fraction of `other` is
    /// ignored.
    pub fn times(&mut self, other: &Tpa) -> &mut Self {
        self.sign = self.sign * other.sign;
        if let Some(remainder) = &mut self.remainder {
            match &other.remainder {
                Some(theirs) => {
                    // (I + n/d)(I' + n'/d') = II' + (n(n' + d'I') + n'Id)/dd'
                    let mut scale = theirs.denominator.clone();
                    scale *= &other.number;
                    scale += &theirs.numerator;
                    let mut cross = theirs.numerator.clone();
                    cross *= &self.number;
                    cross *= &remainder.denominator;
                    remainder.numerator *= &scale;
                    remainder.numerator += &cross;
                    remainder.numerator.settle();
                    remainder.denominator *= &theirs.denominator;
                },
                None => remainder.numerator *= &other.number
            }
        }
        self.number *= &other.number;
        self.normalise_remainder();
        self.fix_zero_sign();
        self
    }
    /// Divide `self` by `other`. In fractional mode the result is exact, in
    /// integer mode it's truncated and the fraction of `other` is ignored, so
    /// dividing by `0.5` in integer mode is a division by zero. On error
    /// `self` is left untouched.
    pub fn divide(&mut self, other: &Tpa) -> Result<&mut Self> {
        let divisor_is_zero = if self.is_fractional() { other.is_zero() } else { other.number.is_zero() };
        if divisor_is_zero {
            return Err(Error::DivideByZero);
        }
        self.sign = self.sign * other.sign;
        match &mut self.remainder {
            Some(remainder) => {
                // (I + n/d) / (I' + n'/d') = (Id + n)d' / (I'd' + n')d
                let mut total = self.number.clone();
                total *= &remainder.denominator;
                total += &remainder.numerator;
                let mut divisor = remainder.denominator.clone();
                match &other.remainder {
                    Some(theirs) => {
                        total *= &theirs.denominator;
                        let mut scale = other.number.clone();
                        scale *= &theirs.denominator;
                        scale += &theirs.numerator;
                        divisor *= &scale;
                    },
                    None => divisor *= &other.number
                }
                let rest = total.divide_unchecked(&divisor);
                self.number = total;
                *remainder = Remainder {
                    numerator: rest,
                    denominator: divisor
                };
            },
            None => {
                self.number.divide_unchecked(&other.number);
            }
        }
        self.normalise_remainder();
        self.fix_zero_sign();
        Ok(self)
    }
    /// Replace `self` with the remainder of dividing the integer parts. Both
    /// fractions are ignored and the result has the sign of `self`.
    /// ```rust
    /// use tpa::Tpa;
    /// let mut number = Tpa::from_f64(-12542.123).unwrap();
    /// number.modulo(&Tpa::new(284)).unwrap();
    /// assert_eq!(number.to_string(), "-46");
    /// ```
    pub fn modulo(&mut self, other: &Tpa) -> Result<&mut Self> {
        if other.number.is_zero() {
            return Err(Error::DivideByZero);
        }
        self.number = self.number.divide_unchecked(&other.number);
        if let Some(remainder) = &mut self.remainder {
            *remainder = Remainder::default();
        }
        self.fix_zero_sign();
        Ok(self)
    }

    /// Compare the way `self`'s mode sees it: an integer mode receiver
    /// ignores the fraction of `other`, and a fractional receiver with a
    /// fraction is greater than an integer mode `other` with the same
    /// integer part.
    ///
    /// `Ord` compares exact values instead.
    pub fn compare(&self, other: &Tpa) -> Ordering {
        if self.sign != other.sign {
            return self.sign.cmp(&other.sign);
        }
        let ordering = self.number.cmp(&other.number).then_with(|| match &self.remainder {
            Some(remainder) => cmp_fractions(Some(remainder), other.remainder.as_ref()),
            None => Ordering::Equal
        });
        match self.sign {
            Sign::Positive => ordering,
            Sign::Negative => ordering.reverse()
        }
    }
    pub fn less_than(&self, other: &Tpa) -> bool {
        self.compare(other) == Ordering::Less
    }
    pub fn less_or_equal(&self, other: &Tpa) -> bool {
        self.compare(other) != Ordering::Greater
    }
    pub fn greater_than(&self, other: &Tpa) -> bool {
        self.compare(other) == Ordering::Greater
    }
    pub fn greater_or_equal(&self, other: &Tpa) -> bool {
        self.compare(other) != Ordering::Less
    }
    pub fn equals(&self, other: &Tpa) -> bool {
        self.compare(other) == Ordering::Equal
    }
    fn cmp_value(&self, other: &Tpa) -> Ordering {
        if self.sign != other.sign {
            return self.sign.cmp(&other.sign);
        }
        let ordering = self.number.cmp(&other.number)
            .then_with(|| cmp_fractions(self.remainder.as_ref(), other.remainder.as_ref()));
        match self.sign {
            Sign::Positive => ordering,
            Sign::Negative => ordering.reverse()
        }
    }
}

// Compare two proper fractions, a missing one being zero
fn cmp_fractions(left: Option<&Remainder>, right: Option<&Remainder>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => {
            let mut left_scaled = left.numerator.clone();
            left_scaled *= &right.denominator;
            let mut right_scaled = right.numerator.clone();
            right_scaled *= &left.denominator;
            left_scaled.cmp(&right_scaled)
        },
        (Some(left), None) if !left.numerator.is_zero() => Ordering::Greater,
        (None, Some(right)) if !right.numerator.is_zero() => Ordering::Less,
        _ => Ordering::Equal
    }
}

impl Ord for Tpa {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_value(other)
    }
}
impl PartialOrd for Tpa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Tpa {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Tpa {}

impl Neg for Tpa {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        self.sign = -self.sign;
        self.fix_zero_sign();
        self
    }
}
impl Neg for &Tpa {
    type Output = Tpa;
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}
impl AddAssign<&Self> for Tpa {
    fn add_assign(&mut self, other: &Self) {
        self.plus(other);
    }
}
impl SubAssign<&Self> for Tpa {
    fn sub_assign(&mut self, other: &Self) {
        self.minus(other);
    }
}
impl MulAssign<&Self> for Tpa {
    fn mul_assign(&mut self, other: &Self) {
        self.times(other);
    }
}
impl DivAssign<&Self> for Tpa {
    fn div_assign(&mut self, other: &Self) {
        if self.divide(other).is_err() {
            panic!("division by zero");
        }
    }
}
impl RemAssign<&Self> for Tpa {
    fn rem_assign(&mut self, other: &Self) {
        if self.modulo(other).is_err() {
            panic!("division by zero");
        }
    }
}
impl CheckedDiv for Tpa {
    fn checked_div(&self, other: &Self) -> Option<Self> {
        let mut quotient = self.clone();
        quotient.divide(other).ok()?;
        Some(quotient)
    }
}
impl CheckedRem for Tpa {
    fn checked_rem(&self, other: &Self) -> Option<Self> {
        let mut remainder = self.clone();
        remainder.modulo(other).ok()?;
        Some(remainder)
    }
}

macro_rules! impl_op {
    ($($op_trait:ident $op_fn:ident = $assign_trait:ident $assign_fn:ident),*) => {
        $(
            impl<T: Into<Self>> $assign_trait<T> for Tpa {
                fn $assign_fn(&mut self, other: T) {
                    self.$assign_fn(&other.into())
                }
            }
            impl $op_trait<&Self> for Tpa {
                type Output = Self;
                fn $op_fn(mut self, other: &Self) -> Self::Output {
                    self.$assign_fn(other);
                    self
                }
            }
            impl<T: Into<Self>> $op_trait<T> for Tpa {
                type Output = Self;
                fn $op_fn(mut self, other: T) -> Self::Output {
                    self.$assign_fn(other);
                    self
                }
            }
            impl $op_trait<&Tpa> for &Tpa {
                type Output = Tpa;
                fn $op_fn(self, other: &Tpa) -> Self::Output {
                    self.clone().$op_fn(other)
                }
            }
        )*
    }
}
impl_op! {
    Add add = AddAssign add_assign,
    Sub sub = SubAssign sub_assign,
    Mul mul = MulAssign mul_assign,
    Div div = DivAssign div_assign,
    Rem rem = RemAssign rem_assign
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tpa::Mode;

    fn tpa(input: &str) -> Tpa {
        input.parse().unwrap()
    }

    #[test]
    fn add_sub() {
        assert_eq!((tpa("123456789") + &tpa("987654321")).to_string(), "1111111110");
        assert_eq!((Tpa::new(3) + &Tpa::from_f64(7.8).unwrap()).to_string(), "10");

        let hundred = Tpa::new(100).with_mode(Mode::Fractional);
        assert_eq!((&hundred + &Tpa::from_f64(-99.5).unwrap()).to_string(), "0.5");
        assert_eq!((&hundred + &Tpa::from_f64(-100.5).unwrap()).to_string(), "-0.5");
        assert_eq!((&hundred - &Tpa::from_f64(100.5).unwrap()).to_fraction(), "-0 5/10");
        assert_eq!((&hundred - &hundred).to_fraction(), "0");
        assert_eq!((&hundred - &hundred).sign(), Sign::Positive);

        let mut sum = tpa("5 3/10");
        sum.plus(&tpa("2/10")).plus(&tpa("-7/10"));
        assert_eq!(sum.to_fraction(), "4 800/1000");
        assert_eq!((tpa("-1/3") - &tpa("2/3")).to_fraction(), "-1");
        assert_eq!((tpa("-2 1/4") + &tpa("3 1/2")).to_fraction(), "1 2/8");
        assert_eq!((tpa("2 1/4") - 5).to_fraction(), "-2 3/4");
    }
    #[test]
    fn mul() {
        assert_eq!((tpa("1 7/12") * &tpa("13 20/13")).to_string(), "23.01[923076]");
        assert_eq!(
            (tpa("1234567890") * &tpa("98765432198654321987654321")).to_string(),
            "121932631234430727135679001126352690"
        );
        assert_eq!((tpa("-1/2") * &tpa("-4")).to_fraction(), "2");
        assert_eq!((tpa("-1/2") * 0).to_fraction(), "0");
        assert_eq!((tpa("-1/2") * 0).sign(), Sign::Positive);
        assert_eq!((Tpa::new(3) * &tpa("2.5")).to_string(), "6");

        let base = tpa("123.5");
        let mut power = base.clone();
        for _ in 0..20 {
            power.times(&base);
        }
        assert_eq!(
            power.to_string(),
            "84140697819361566263630764279294864662329687.298320293426513671875"
        );
    }
    #[test]
    fn div() {
        let mut hundred = Tpa::new(100);
        hundred.divide(&Tpa::new(4)).unwrap();
        assert_eq!(hundred.to_string(), "25");

        assert_eq!((tpa("123 764/999") / &tpa("5 512/1001")).to_fraction(), "22 2512015/5511483");
        assert_eq!(
            (Tpa::from_f64(123135.5).unwrap() / &tpa("-2213213976721367821365812")).to_fraction(),
            "-0 1231355/22132139767213678213658120"
        );
        assert_eq!((Tpa::new(7) / 2).to_string(), "3");
        assert_eq!((Tpa::new(-7) / &tpa("2.9")).to_string(), "-3");
        assert_eq!((tpa("1/2") / &tpa("1/4")).to_string(), "2");
    }
    #[test]
    fn divide_by_zero() {
        let mut integer = Tpa::new(5);
        assert_eq!(integer.divide(&tpa("0.5")).err(), Some(Error::DivideByZero));
        assert_eq!(integer, Tpa::new(5));

        let mut fractional = tpa("5.5");
        assert_eq!(fractional.divide(&Tpa::zero()).err(), Some(Error::DivideByZero));
        assert_eq!(fractional.to_string(), "5.5");
        assert_eq!(fractional.divide(&tpa("0.5")).map(|x| x.to_string()), Ok("11".to_string()));

        assert_eq!(fractional.modulo(&tpa("0.5")).err(), Some(Error::DivideByZero));
        assert_eq!(fractional.checked_div(&Tpa::zero()), None);
        assert_eq!(fractional.checked_rem(&Tpa::new(4)), Some(Tpa::new(3)));
    }
    #[test]
    #[should_panic]
    fn div_panics() {
        let _ = tpa("1.5") / 0;
    }
    #[test]
    fn modulo() {
        assert_eq!((Tpa::from_f64(12542.123).unwrap() % 284).to_string(), "46");
        assert_eq!((Tpa::new(-7) % 2).to_string(), "-1");
        assert_eq!((Tpa::new(8) % -3).to_string(), "2");
        let mut zero = tpa("-4.5");
        zero.modulo(&Tpa::new(2)).unwrap();
        assert_eq!(zero.to_fraction(), "0");
        assert_eq!(zero.sign(), Sign::Positive);
    }
    #[test]
    fn compare() {
        assert!(tpa("5").less_than(&tpa("6")));
        assert!(tpa("-5").less_than(&tpa("3")));
        assert!(tpa("-5").less_than(&tpa("-3")));
        assert!(tpa("-1/2").less_than(&Tpa::zero()));
        assert!(tpa("1/3").less_than(&tpa("1/2")));
        assert!(tpa("-1/3").greater_than(&tpa("-1/2")));
        assert!(tpa("2/4").equals(&tpa("1/2")));

        // The receiver's mode decides
        assert!(tpa("5").equals(&tpa("5.5")));
        assert!(tpa("5.5").greater_than(&tpa("5")));
        assert!(tpa("5.5").greater_or_equal(&tpa("5 1/2")));
        assert!(tpa("5.5").less_or_equal(&tpa("5 1/2")));

        // Exact value for the std traits
        assert!(tpa("5") < tpa("5.5"));
        assert_ne!(tpa("5"), tpa("5.5"));
        assert_eq!(tpa("0.5"), tpa("1/2"));
        let mut sorted = vec![tpa("1.5"), tpa("-2"), tpa("1/3"), tpa("-2.25"), tpa("0")];
        sorted.sort();
        assert_eq!(sorted, vec![tpa("-2.25"), tpa("-2"), tpa("0"), tpa("1/3"), tpa("1.5")]);
    }
    #[test]
    fn operands_untouched() {
        let left = tpa("2.5");
        let right = tpa("-1/4");
        let _ = &left * &right;
        let _ = &left / &right;
        assert_eq!(left.to_fraction(), "2 5/10");
        assert_eq!(right.to_fraction(), "-0 1/4");
    }
}
