use super::{BASE, ROOT_BASE, SQUARE_BASE};

use log::trace;
use smallvec::SmallVec;
use std::{
    cmp::Ordering,
    iter,
    mem
};

pub type Digit = i64;

/// A little endian list of digits in base `BASE`.
///
/// Digits are allowed to leave `[0, BASE)` while arithmetic is in progress:
/// additions and subtractions just add digits pairwise and leave the carrying
/// for later. `safe_max` is the worst absolute value any digit may currently
/// hold, and a carry pass is forced before it could reach `SQUARE_BASE`.
///
/// The buffer is *canonical* when every digit is in `[0, BASE)` and there is
/// no most significant zero. Zero is the empty buffer.
#[derive(Clone, Default)]
pub struct Digits {
    digits: SmallVec<[Digit; 4]>,
    safe_max: Digit
}
impl Digits {
    pub fn zero() -> Self {
        Self::default()
    }
    pub fn from_u128(mut value: u128) -> Self {
        let mut digits = SmallVec::new();
        while value > 0 {
            digits.push((value % BASE as u128) as Digit);
            value /= BASE as u128;
        }
        Self {
            digits,
            safe_max: BASE - 1
        }
    }
    /// Build from a non-negative whole float. Exact because `BASE` is a power
    /// of two.
    pub fn from_whole_f64(mut value: f64) -> Self {
        let base = BASE as f64;
        let mut digits = SmallVec::new();
        while value >= 1.0 {
            digits.push((value % base) as Digit);
            value = (value / base).floor();
        }
        Self {
            digits,
            safe_max: BASE - 1
        }
    }
    pub fn as_slice(&self) -> &[Digit] {
        &self.digits
    }
    pub fn len(&self) -> usize {
        self.digits.len()
    }
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
    pub fn safe_max(&self) -> Digit {
        self.safe_max
    }
    pub fn clear(&mut self) {
        self.digits.clear();
        self.safe_max = 0;
    }
    fn trim_end(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
    }
    fn common_size(&mut self, other: &Self) {
        if other.digits.len() > self.digits.len() {
            self.digits.extend(iter::repeat(0).take(other.digits.len() - self.digits.len()));
        }
    }
    /// True if every digit is in `[0, BASE)` with no leading zero.
    pub fn is_canonical(&self) -> bool {
        (self.safe_max < BASE || self.digits.is_empty())
            && self.digits.iter().all(|&digit| digit >= 0 && digit < BASE)
            && self.digits.last() != Some(&0)
    }
    /// Sign of the value held, without needing a carry pass on `self`.
    pub fn value_signum(&self) -> Ordering {
        if self.safe_max >= BASE {
            let mut copy = self.clone();
            copy.normalize(false);
            return copy.value_signum();
        }
        // With every digit below BASE the top non-zero digit decides
        match self.digits.iter().rev().find(|&&digit| digit != 0) {
            None => Ordering::Equal,
            Some(digit) => digit.cmp(&0)
        }
    }

    /// Carry pass: makes every digit strictly smaller than `BASE` in absolute
    /// value. Negative digits survive this, see `positivise`. Unless
    /// `keep_zeros` is set, most significant zero digits are dropped.
    pub fn normalize(&mut self, keep_zeros: bool) -> &mut Self {
        if self.safe_max >= BASE {
            let mut carry = 0;
            for digit in &mut self.digits {
                carry += *digit;
                *digit = carry % BASE;
                carry /= BASE;
            }
            while carry != 0 {
                self.digits.push(carry % BASE);
                carry /= BASE;
            }
            self.safe_max = BASE - 1;
        }
        if !keep_zeros {
            self.trim_end();
        }
        self
    }
    /// Borrow pass: removes negative digits.
    ///
    /// ## Panics
    /// The buffer must be normalized and hold a non-negative value.
    pub fn positivise(&mut self) -> &mut Self {
        debug_assert!(self.safe_max < BASE || self.digits.is_empty(), "positivise on an unnormalized buffer");
        let len = self.digits.len();
        for i in 0..len {
            if self.digits[i] < 0 {
                assert!(i + 1 < len, "positivise on a negative value");
                self.digits[i] += BASE;
                self.digits[i + 1] -= 1;
            }
        }
        self.trim_end();
        self
    }
    pub fn negate(&mut self) {
        for digit in &mut self.digits {
            *digit = -*digit;
        }
    }
    /// Bring the buffer into canonical form. If the value held was negative
    /// the buffer ends up holding its absolute value and `true` is returned.
    pub fn settle(&mut self) -> bool {
        self.normalize(false);
        let negative = self.digits.last().map_or(false, |&digit| digit < 0);
        if negative {
            self.negate();
        }
        self.positivise();
        negative
    }

    /// Compare two canonical buffers
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let cmp = self.digits.len().cmp(&other.digits.len());
        if cmp != Ordering::Equal {
            return cmp;
        }
        self.digits.iter().rev().cmp(other.digits.iter().rev())
    }

    /// Deferred addition (or subtraction if `negate`): digits are combined
    /// pairwise and carrying is put off until the budget runs out.
    pub fn accumulate(&mut self, other: &Self, negate: bool) {
        if self.safe_max + other.safe_max >= SQUARE_BASE {
            self.normalize(true);
        }
        self.common_size(other);
        for (digit, &other) in self.digits.iter_mut().zip(other.digits.iter()) {
            if negate {
                *digit -= other;
            } else {
                *digit += other;
            }
        }
        self.safe_max += other.safe_max;
        if self.safe_max >= SQUARE_BASE {
            self.normalize(true);
        }
    }

    /// Multiply by a value below `BASE`, adding `carry` at the bottom, with
    /// immediate carry propagation. Leaves every digit below `BASE`.
    ///
    /// ## Panics
    /// Panics if either argument doesn't fit in a single digit.
    pub fn multiply_digit_with_add(&mut self, multiplier: Digit, mut carry: Digit) -> &mut Self {
        assert!(multiplier.abs() < BASE && carry.abs() < BASE, "single digit multiplication with a value out of range");
        if self.safe_max >= BASE {
            self.normalize(true);
        }
        for digit in &mut self.digits {
            carry += *digit * multiplier;
            *digit = carry % BASE;
            carry /= BASE;
        }
        while carry != 0 {
            self.digits.push(carry % BASE);
            carry /= BASE;
        }
        self.safe_max = BASE - 1;
        self
    }
    /// Multiply every digit by a single digit value, deferring the carry if
    /// the budget allows it.
    pub fn scale(&mut self, multiplier: Digit) {
        assert!(multiplier.abs() < BASE, "scale by a value that isn't a single digit");
        if (self.safe_max as i128) * (multiplier.abs() as i128) < SQUARE_BASE as i128 {
            for digit in &mut self.digits {
                *digit *= multiplier;
            }
            self.safe_max *= multiplier.abs();
        } else {
            self.multiply_digit_with_add(multiplier, 0);
        }
    }
    /// Multiply two canonical buffers
    pub fn multiply(&mut self, other: &Self) {
        debug_assert!(self.is_canonical() && other.is_canonical());
        if self.digits.is_empty() || other.digits.is_empty() {
            self.clear();
            return;
        }
        if other.digits.len() == 1 {
            self.scale(other.digits[0]);
            return;
        }
        if self.digits.len() == 1 {
            let multiplier = self.digits[0];
            *self = other.clone();
            self.scale(multiplier);
            return;
        }

        let original = mem::take(&mut self.digits);
        let operand = &other.digits;
        self.digits.extend(iter::repeat(0).take(original.len() + operand.len() - 1));
        self.safe_max = 0;

        if original.len() > 3 && operand.len() > 3 {
            self.split_multiplication(&original, operand, Half::High);
            self.multiply_digit_with_add(ROOT_BASE, 0);
            self.split_multiplication(&original, operand, Half::Low);
        } else {
            self.basic_multiplication(&original, operand);
        }
        self.normalize(false);
    }
    // Schoolbook multiplication into a zeroed buffer, carrying as it goes
    fn basic_multiplication(&mut self, a: &[Digit], b: &[Digit]) {
        let (a, b) = if a.len() > b.len() { (b, a) } else { (a, b) };
        for (i, &a_digit) in a.iter().enumerate() {
            let mut carry = 0;
            for (j, &b_digit) in b.iter().enumerate() {
                carry += a_digit * b_digit + self.digits[i + j];
                self.digits[i + j] = carry % BASE;
                carry /= BASE;
            }
            if carry != 0 {
                // Nothing has been written this high up yet
                let top = i + b.len();
                if top < self.digits.len() {
                    self.digits[top] = carry;
                } else {
                    self.digits.push(carry);
                }
            }
        }
        self.safe_max = BASE - 1;
    }
    // Accumulate one half (split at ROOT_BASE) of every digit of `a` times
    // `b`, without carrying. The budget is checked before each row.
    fn split_multiplication(&mut self, a: &[Digit], b: &[Digit], half: Half) {
        let (a, b) = if a.len() > b.len() { (b, a) } else { (a, b) };
        let row_max = (ROOT_BASE - 1) * (BASE - 1);
        for i in (0..a.len()).rev() {
            let q = match half {
                Half::High => a[i] / ROOT_BASE,
                Half::Low => a[i] % ROOT_BASE
            };
            if q == 0 {
                continue;
            }
            if self.safe_max + row_max >= SQUARE_BASE {
                self.normalize(true);
            }
            for (j, &b_digit) in b.iter().enumerate() {
                self.digits[i + j] += q * b_digit;
            }
            self.safe_max += row_max;
        }
    }

    /// Divide a canonical buffer by a single digit, returning the remainder
    ///
    /// ## Panics
    /// Panics unless `0 < divisor < BASE`
    pub fn digit_divide(&mut self, divisor: Digit) -> Digit {
        assert!(divisor > 0 && divisor < BASE, "fast divisor must be positive and below BASE");
        debug_assert!(self.is_canonical());
        let mut remainder = 0;
        for digit in self.digits.iter_mut().rev() {
            let temp = remainder * BASE + *digit;
            *digit = temp / divisor;
            remainder = temp % divisor;
        }
        self.trim_end();
        self.safe_max = BASE - 1;
        remainder
    }
    /// ## Panics
    /// Panics unless `0 < divisor < BASE`
    pub fn is_divisible_by(&self, divisor: Digit) -> bool {
        assert!(divisor > 0 && divisor < BASE, "divisibility test needs a divisor below BASE");
        debug_assert!(self.is_canonical());
        self.digits.iter().rev().fold(0, |remainder, &digit| (remainder * BASE + digit) % divisor) == 0
    }

    /// Divide two canonical buffers. `self` becomes the quotient and the
    /// remainder is returned.
    ///
    /// ## Panics
    /// Panics if `divisor` is zero
    pub fn divide_magnitude(&mut self, divisor: &Self) -> Self {
        assert!(!divisor.digits.is_empty(), "division by 0");
        if self.digits.is_empty() {
            return Self::zero();
        }
        if divisor.digits.len() == 1 {
            let remainder = self.digit_divide(divisor.digits[0]);
            return Self::from_u128(remainder as u128);
        }
        match self.cmp_magnitude(divisor) {
            Ordering::Less => mem::take(self),
            Ordering::Equal => {
                *self = Self::from_u128(1);
                Self::zero()
            },
            Ordering::Greater => self.long_divide(divisor)
        }
    }
    // Classic long division. The quotient is written over the dividend from
    // the top down while a window of the dividend serves as the remainder.
    fn long_divide(&mut self, divisor: &Self) -> Self {
        let divisor_digits = &divisor.digits;
        let split = self.digits.len() - divisor_digits.len();

        let mut remainder = Self {
            digits: self.digits[split..].iter().copied().collect(),
            safe_max: BASE - 1
        };
        self.digits.truncate(split);
        self.digits.push(0);

        for i in (0..=split).rev() {
            self.digits[i] = 0;
            let mut rounds = 0;
            while remainder.cmp_magnitude(divisor) != Ordering::Less {
                // Never an overestimate, so the remainder can't go negative,
                // but it may take a few rounds to get there
                let estimate = estimate_quotient(&remainder.digits, divisor_digits);
                self.digits[i] += estimate;
                remainder.subtract_multiple(divisor_digits, estimate);
                rounds += 1;
            }
            if rounds > 2 {
                trace!("quotient digit {} took {} correction rounds", i, rounds);
            }
            if i > 0 {
                remainder.digits.insert(0, self.digits[i - 1]);
                remainder.trim_end();
            }
        }
        self.safe_max = BASE - 1;
        self.trim_end();
        remainder
    }
    // Subtract `number * multiple` from a canonical buffer, borrowing as it
    // goes. The result must not be negative.
    fn subtract_multiple(&mut self, number: &[Digit], multiple: Digit) {
        let mut carry = 0;
        for (i, &digit) in number.iter().enumerate() {
            carry += digit * multiple;
            let modulus = carry % BASE;
            carry /= BASE;
            if modulus > self.digits[i] {
                self.digits[i] += BASE - modulus;
                carry += 1;
            } else {
                self.digits[i] -= modulus;
            }
        }
        if carry != 0 {
            let top = self.digits.get_mut(number.len());
            assert!(
                top.as_ref().map_or(false, |top| **top >= carry),
                "deferred subtraction from a smaller number"
            );
            if let Some(top) = top {
                *top -= carry;
            }
        }
        self.trim_end();
    }

    /// Multiply by `BASE^count`
    pub fn shift(&mut self, count: usize) {
        if !self.digits.is_empty() {
            self.digits.insert_many(0, iter::repeat(0).take(count));
        }
    }
    /// An upper bound on the square root of a canonical buffer, good to
    /// about one part in `BASE`.
    pub fn rough_sqrt(&self) -> Self {
        let len = self.digits.len();
        match len {
            0 => Self::zero(),
            1 => Self::from_u128((self.digits[0] as f64).sqrt().ceil() as u128),
            _ => {
                let top = self.digits[len - 1] * BASE + self.digits[len - 2] + 1;
                let mut msd = (top as f64).sqrt().ceil() as u128 + 1;
                if len % 2 == 1 {
                    msd *= ROOT_BASE as u128;
                }
                let mut sqrt = Self::from_u128(msd);
                sqrt.shift((len - 2) / 2);
                sqrt
            }
        }
    }

    /// Value of a canonical buffer, if it fits
    pub fn to_u128(&self) -> Option<u128> {
        self.digits.iter().rev().try_fold(0u128, |acc, &digit| {
            acc.checked_mul(BASE as u128)?.checked_add(digit as u128)
        })
    }
    /// Approximate value. Infinite if too large for a float.
    pub fn to_f64(&self) -> f64 {
        self.digits.iter().rev().fold(0.0, |acc, &digit| acc * BASE as f64 + digit as f64)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Half {
    High,
    Low
}

// Estimate the next quotient digit from the top two digits of each side.
// The +1 on the divisor side makes this an underestimate.
fn estimate_quotient(remainder: &[Digit], divisor: &[Digit]) -> Digit {
    let (r, n) = (remainder.len(), divisor.len());
    let base = BASE as i128;
    let top = remainder[r - 1] as i128 * base + remainder[r - 2] as i128;
    let bottom = divisor[n - 1] as i128 * base + divisor[n - 2] as i128 + 1;
    let estimate = if r > n { top * base / bottom } else { top / bottom };
    estimate.max(1) as Digit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(value: u128) -> Digits {
        Digits::from_u128(value)
    }

    #[test]
    fn deferred_carry() {
        let mut a = digits(BASE as u128 - 1);
        for _ in 0..1000 {
            a.accumulate(&digits(BASE as u128 - 1), false);
        }
        assert!(a.safe_max() < SQUARE_BASE);
        a.normalize(false);
        assert!(a.is_canonical());
        assert_eq!(a.to_u128(), Some(1001 * (BASE as u128 - 1)));
    }
    #[test]
    fn settle_negative() {
        let mut a = digits(5);
        a.accumulate(&digits(BASE as u128 * 3), true);
        assert_eq!(a.value_signum(), Ordering::Less);
        assert!(a.settle());
        assert_eq!(a.to_u128(), Some(BASE as u128 * 3 - 5));
        assert!(a.is_canonical());
    }
    #[test]
    fn positivise() {
        let mut a = digits(BASE as u128 * 2);
        a.accumulate(&digits(1), true);
        a.normalize(false).positivise();
        assert!(a.is_canonical());
        assert_eq!(a.to_u128(), Some(BASE as u128 * 2 - 1));
    }
    #[test]
    #[should_panic]
    fn positivise_negative() {
        let mut a = digits(1);
        a.accumulate(&digits(BASE as u128), true);
        a.normalize(false).positivise();
    }
    #[test]
    fn multiply_strategies() {
        let a = 0xffff_ffff_ffff_ffff_ffffu128;
        let b = 0x12_3456_789au128;
        let mut basic = digits(a);
        basic.multiply(&digits(b));
        assert_eq!(basic.to_u128(), Some(a * b));

        let mut small = digits(a);
        small.multiply(&digits(3));
        small.normalize(false);
        assert_eq!(small.to_u128(), Some(a * 3));

        // Both sides longer than 3 digits use the split strategy; check it
        // against the schoolbook one
        let left = digits(u128::MAX);
        let right = digits(u128::MAX - 12345);
        let mut split = left.clone();
        split.multiply(&right);

        let mut schoolbook = Digits::zero();
        schoolbook.digits.extend(iter::repeat(0).take(left.len() + right.len() - 1));
        schoolbook.basic_multiplication(left.as_slice(), right.as_slice());
        schoolbook.normalize(false);
        assert_eq!(split.as_slice(), schoolbook.as_slice());
    }
    #[test]
    fn digit_divide() {
        let mut a = digits(1_000_000_000_000_000_000_007);
        assert_eq!(a.digit_divide(10), 7);
        assert_eq!(a.to_u128(), Some(100_000_000_000_000_000_000));
        assert!(a.is_divisible_by(1000));
        assert!(!a.is_divisible_by(7));
    }
    #[test]
    #[should_panic]
    fn digit_divide_out_of_range() {
        digits(100).digit_divide(BASE);
    }
    #[test]
    fn long_divide() {
        let a = 0xdead_beef_dead_beef_dead_beef_dead_beefu128;
        let b = 0x1_0000_0001_2345u128;
        let mut quotient = digits(a);
        let remainder = quotient.divide_magnitude(&digits(b));
        assert_eq!(quotient.to_u128(), Some(a / b));
        assert_eq!(remainder.to_u128(), Some(a % b));

        let mut same = digits(b);
        assert!(same.divide_magnitude(&digits(b)).is_empty());
        assert_eq!(same.to_u128(), Some(1));

        let mut smaller = digits(b - 1);
        let remainder = smaller.divide_magnitude(&digits(b));
        assert!(smaller.is_empty());
        assert_eq!(remainder.to_u128(), Some(b - 1));
    }
    #[test]
    fn rough_sqrt() {
        for &value in &[1u128, 2, 99, 1 << 40, 12345678901234567890, u128::MAX >> 3] {
            let sqrt = digits(value).rough_sqrt().to_u128().unwrap();
            assert!(sqrt * sqrt >= value, "{} is not above the root of {}", sqrt, value);
        }
    }
    #[test]
    fn shift() {
        let mut a = digits(3);
        a.shift(2);
        assert_eq!(a.as_slice(), &[0, 0, 3]);
        let mut zero = Digits::zero();
        zero.shift(2);
        assert!(zero.is_empty());
    }
}
