use super::{Mode, Remainder, Tpa};
use crate::{
    big::{BigInteger, Sign},
    error::{ParseError, Result}
};

use num_traits::{One, Zero};

struct Cursor<'a> {
    input: &'a str,
    position: usize
}
impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }
    fn bump(&mut self) {
        self.position += 1;
    }
    fn unexpected(&self) -> ParseError {
        match self.input[self.position..].chars().next() {
            Some(found) => ParseError::UnexpectedCharacter {
                found,
                position: self.position
            },
            None => ParseError::MissingDigits { position: self.position }
        }
    }
    // Read a run of decimal digits into `into`, returning how many there were
    fn digits(&mut self, into: &mut BigInteger) -> usize {
        let start = self.position;
        while let Some(c @ b'0'..=b'9') = self.peek() {
            into.digit_multiply_with_add(10, (c - b'0') as u32);
            self.bump();
        }
        into.settle();
        self.position - start
    }
    // A required, positive run of digits
    fn positive(&mut self, missing: ParseError, zero: ParseError) -> Result<BigInteger> {
        let mut number = BigInteger::zero();
        if self.digits(&mut number) == 0 {
            return Err(match self.peek() {
                None | Some(b'/') => missing,
                Some(_) => self.unexpected()
            }.into());
        }
        if number.is_zero() {
            return Err(zero.into());
        }
        Ok(number)
    }
    fn end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected().into())
        }
    }
    // The part after a decimal point, with an optional recurring tail
    fn decimal(&mut self) -> Result<Remainder> {
        let mut numerator = BigInteger::zero();
        let mut denominator = BigInteger::one();
        let mut count = 0;
        // Fraction and digit count just before the recurring part
        let mut recurring: Option<(BigInteger, BigInteger, usize)> = None;
        loop {
            match self.peek() {
                Some(c @ b'0'..=b'9') => {
                    numerator.digit_multiply_with_add(10, (c - b'0') as u32);
                    denominator.digit_multiply_with_add(10, 0);
                    count += 1;
                    self.bump();
                },
                Some(b'[') => {
                    if recurring.is_some() {
                        return Err(ParseError::NestedRecurring { position: self.position }.into());
                    }
                    recurring = Some((numerator.clone(), denominator.clone(), count));
                    self.bump();
                },
                Some(b']') => {
                    let (numerator_before, denominator_before, count_before) = match recurring.take() {
                        Some(before) => before,
                        None => return Err(self.unexpected().into())
                    };
                    if count_before == count {
                        return Err(ParseError::EmptyRecurring { position: self.position }.into());
                    }
                    self.bump();
                    if self.peek().is_some() {
                        return Err(ParseError::TrailingAfterRecurring { position: self.position }.into());
                    }
                    // x = N/D repeats from N0/D0 on, so x = (N - N0)/(D - D0)
                    numerator -= &numerator_before;
                    denominator -= &denominator_before;
                    break;
                },
                None => break,
                Some(_) => return Err(self.unexpected().into())
            }
        }
        if recurring.is_some() {
            return Err(ParseError::UnterminatedRecurring.into());
        }
        if count == 0 {
            return Err(ParseError::MissingDigits { position: self.position }.into());
        }
        numerator.settle();
        denominator.settle();
        Ok(Remainder { numerator, denominator })
    }
}

pub(super) fn parse(input: &str, mode: Option<Mode>) -> Result<Tpa> {
    if input.is_empty() {
        return Err(ParseError::Empty.into());
    }
    let mut cursor = Cursor { input, position: 0 };
    let sign = match cursor.peek() {
        Some(b'-') => {
            cursor.bump();
            Sign::Negative
        },
        Some(b'+') => {
            cursor.bump();
            Sign::Positive
        },
        _ => Sign::Positive
    };

    let mut number = BigInteger::zero();
    let count = cursor.digits(&mut number);
    let remainder = match cursor.peek() {
        None if count == 0 => return Err(ParseError::MissingDigits { position: cursor.position }.into()),
        None => None,
        Some(b'.') => {
            cursor.bump();
            Some(cursor.decimal()?)
        },
        Some(b' ') if count > 0 => {
            cursor.bump();
            let numerator = cursor.positive(ParseError::MissingNumerator, ParseError::ZeroNumerator)?;
            match cursor.peek() {
                Some(b'/') => cursor.bump(),
                None => return Err(ParseError::MissingDenominator.into()),
                Some(_) => return Err(cursor.unexpected().into())
            }
            let denominator = cursor.positive(ParseError::MissingDenominator, ParseError::ZeroDenominator)?;
            cursor.end()?;
            Some(Remainder { numerator, denominator })
        },
        Some(b'/') => {
            if count == 0 {
                return Err(ParseError::MissingNumerator.into());
            }
            cursor.bump();
            let denominator = cursor.positive(ParseError::MissingDenominator, ParseError::ZeroDenominator)?;
            cursor.end()?;
            Some(Remainder {
                numerator: std::mem::take(&mut number),
                denominator
            })
        },
        Some(_) => return Err(cursor.unexpected().into())
    };

    let mut tpa = Tpa { sign, number, remainder };
    tpa.normalise_remainder();
    if let Some(mode) = mode {
        tpa = tpa.with_mode(mode);
    }
    tpa.fix_zero_sign();
    Ok(tpa)
}
