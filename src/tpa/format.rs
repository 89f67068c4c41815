use super::{Tpa, DEFAULT_DECIMAL_PLACES};
use crate::big::{BigInteger, Sign};

use num_traits::{ToPrimitive, Zero};
use std::{collections::HashMap, fmt};

impl Tpa {
    /// Render in decimal notation with at most `max_places` fractional
    /// digits. A recurring sequence is put in brackets, and a fraction cut
    /// short before it ends or recurs is followed by `...`.
    /// ```rust
    /// use tpa::Tpa;
    /// let number: Tpa = "1/12".parse().unwrap();
    /// assert_eq!(number.to_decimal(100), "0.08[3]");
    /// assert_eq!(number.to_decimal(1), "0.0...");
    /// ```
    pub fn to_decimal(&self, max_places: usize) -> String {
        let mut out = String::new();
        if self.sign == Sign::Negative {
            out.push('-');
        }
        out.push_str(&self.number.to_string());

        let remainder = match &self.remainder {
            Some(remainder) if !remainder.numerator.is_zero() => remainder,
            _ => return out
        };
        out.push('.');

        // Position in `out` of the digit produced from each numerator seen
        let mut seen: HashMap<BigInteger, usize> = HashMap::new();
        let mut numerator = remainder.numerator.clone();
        let mut places = max_places;
        while !numerator.is_zero() {
            if places == 0 {
                out.push_str("...");
                break;
            }
            if let Some(&start) = seen.get(&numerator) {
                out.insert(start, '[');
                out.push(']');
                break;
            }
            seen.insert(numerator.clone(), out.len());

            numerator.digit_multiply_with_add(10, 0);
            let rest = numerator.divide_unchecked(&remainder.denominator);
            // A proper fraction times ten divided by its denominator is one digit
            let digit = numerator.to_u32()
                .and_then(|digit| std::char::from_digit(digit, 10))
                .expect("fractional digit out of range");
            out.push(digit);
            numerator = rest;
            places -= 1;
        }
        out
    }
    /// Render as an integer followed by the fraction, like `-3 1/4`. The
    /// fraction is left out when it's zero.
    pub fn to_fraction(&self) -> String {
        let mut out = String::new();
        if self.sign == Sign::Negative {
            out.push('-');
        }
        out.push_str(&self.number.to_string());
        if let Some(remainder) = &self.remainder {
            if !remainder.numerator.is_zero() {
                out.push_str(&format!(" {}/{}", remainder.numerator, remainder.denominator));
            }
        }
        out
    }
}

/// Decimal notation, with the precision as the maximum number of fractional
/// digits (`DEFAULT_DECIMAL_PLACES` if unset)
impl fmt::Display for Tpa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_decimal(f.precision().unwrap_or(DEFAULT_DECIMAL_PLACES)))
    }
}
impl fmt::Debug for Tpa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_fraction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tpa(input: &str) -> Tpa {
        input.parse().unwrap()
    }

    #[test]
    fn decimal() {
        assert_eq!(tpa("1/3").to_string(), "0.[3]");
        assert_eq!(tpa("22/7").to_string(), "3.[142857]");
        assert_eq!(tpa("1/12").to_string(), "0.08[3]");
        assert_eq!(tpa("300/250").to_string(), "1.2");
        assert_eq!(tpa("-1/4").to_string(), "-0.25");
        assert_eq!(tpa("1.35[45]").to_string(), "1.3[54]");
        assert_eq!(tpa("3.33[33]").to_string(), "3.[3]");
        assert_eq!(tpa("1234567890123456789012345678901234567890").to_string(), "1234567890123456789012345678901234567890");
        assert_eq!(tpa("-1000000000").to_string(), "-1000000000");
    }
    #[test]
    fn truncated() {
        assert_eq!(tpa("1/4").to_decimal(1), "0.2...");
        assert_eq!(tpa("1/4").to_decimal(2), "0.25");
        assert_eq!(tpa("1/3").to_decimal(1), "0.3...");
        assert_eq!(tpa("12345/23456").to_decimal(10), "0.5263045702...");
        assert_eq!(format!("{:.10}", tpa("12345/23456")), "0.5263045702...");
        assert_eq!(tpa("1/7").to_decimal(0), "0....");
    }
    #[test]
    fn fraction() {
        assert_eq!(Tpa::from_f64(123.5).unwrap().to_fraction(), "123 5/10");
        assert_eq!(tpa("-3 1/4").to_fraction(), "-3 1/4");
        assert_eq!(tpa("7.0").to_fraction(), "7");
        assert_eq!(format!("{:?}", tpa("-1/4")), "-0 1/4");
    }
}
