//! Property-based tests for the kernel and for fractions.

use crate::{BigInteger, Tpa};

use num_traits::{Signed, Zero};
use proptest::prelude::*;
use std::{cmp::Ordering, time::Duration};

// Strategy for nonzero integers well past the single digit range
fn big_integer(max_digits: usize) -> impl Strategy<Value = BigInteger> {
    proptest::string::string_regex(&format!("-?[1-9][0-9]{{0,{}}}", max_digits - 1))
        .unwrap()
        .prop_map(|digits| digits.parse().unwrap())
}

fn maybe_zero(max_digits: usize) -> impl Strategy<Value = BigInteger> {
    prop_oneof![
        1 => Just(BigInteger::zero()),
        9 => big_integer(max_digits)
    ]
}

// Strategy for fractional numbers built from a bare fraction
fn fraction() -> impl Strategy<Value = Tpa> {
    ("-?[0-9]{1,30}", "[1-9][0-9]{0,25}")
        .prop_map(|(numerator, denominator)| format!("{}/{}", numerator, denominator).parse().unwrap())
}

// Fractions whose numerator can be fully factored with cached primes quickly
fn small_fraction() -> impl Strategy<Value = Tpa> {
    ("-?[0-9]{1,12}", "[1-9][0-9]{0,12}")
        .prop_map(|(numerator, denominator)| format!("{}/{}", numerator, denominator).parse().unwrap())
}

proptest! {
    #[test]
    fn division_identity(a in maybe_zero(120), b in big_integer(60)) {
        let mut quotient = a.clone();
        let remainder = quotient.divide(&b).unwrap();
        prop_assert!(remainder.abs() < b.abs());
        if !remainder.is_zero() {
            prop_assert_eq!(remainder.is_negative(), a.is_negative());
        }
        prop_assert_eq!(quotient * &b + &remainder, a);
    }

    #[test]
    fn long_division_terminates(a in big_integer(400), b in big_integer(150)) {
        let product = &a * &b;
        let mut quotient = product.clone() + 1;
        let remainder = quotient.divide(&b).unwrap();
        prop_assert_eq!(&quotient * &b + &remainder, product + 1);
    }

    #[test]
    fn matches_machine_integers(a in any::<i64>(), b in any::<i64>()) {
        let (big_a, big_b) = (BigInteger::new(a), BigInteger::new(b));
        let (a, b) = (a as i128, b as i128);
        prop_assert_eq!(&big_a + &big_b, BigInteger::new(a + b));
        prop_assert_eq!(&big_a - &big_b, BigInteger::new(a - b));
        prop_assert_eq!(&big_a * &big_b, BigInteger::new(a * b));
        prop_assert_eq!(big_a.cmp(&big_b), a.cmp(&b));
        if b != 0 {
            prop_assert_eq!(&big_a / &big_b, BigInteger::new(a / b));
            prop_assert_eq!(&big_a % &big_b, BigInteger::new(a % b));
        }
        prop_assert_eq!(big_a.to_string(), a.to_string());
    }

    #[test]
    fn add_sub_inverse(a in maybe_zero(100), b in maybe_zero(100)) {
        prop_assert_eq!((a.clone() + &b) - &b, a.clone());
        prop_assert_eq!((a.clone() - &b) + &b, a);
    }

    #[test]
    fn commutative(a in maybe_zero(80), b in maybe_zero(80)) {
        prop_assert_eq!(&a + &b, &b + &a);
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn distributive(a in big_integer(50), b in big_integer(50), c in big_integer(50)) {
        prop_assert_eq!(&a * &(&b + &c), &a * &b + &(&a * &c));
    }

    #[test]
    fn total_order(a in maybe_zero(40), b in maybe_zero(40)) {
        let difference = &b - &a;
        let expected = if difference.is_positive() {
            Ordering::Less
        } else if difference.is_negative() {
            Ordering::Greater
        } else {
            Ordering::Equal
        };
        prop_assert_eq!(a.cmp(&b), expected);
        prop_assert_eq!(b.cmp(&a), expected.reverse());
    }

    #[test]
    fn decimal_text_round_trip(a in maybe_zero(200)) {
        prop_assert_eq!(a.to_string().parse::<BigInteger>().unwrap(), a);
    }

    #[test]
    fn fraction_round_trip(x in fraction()) {
        let text = x.to_fraction();
        let parsed: Tpa = text.parse().unwrap();
        prop_assert_eq!(&parsed, &x);
        prop_assert_eq!(parsed.to_fraction(), text);
    }

    #[test]
    fn terminating_decimal_round_trip(input in "-?[0-9]{1,20}\\.[0-9]{1,20}") {
        let x: Tpa = input.parse().unwrap();
        let rendered = x.to_string();
        prop_assert!(!rendered.contains('[') && !rendered.ends_with("..."));
        prop_assert_eq!(rendered.parse::<Tpa>().unwrap(), x);
    }

    #[test]
    fn recurring_decimal_round_trip(numerator in 0u32..10_000, denominator in 1u32..100) {
        let x: Tpa = format!("{}/{}", numerator, denominator).parse().unwrap();
        let rendered = x.to_string();
        prop_assert!(!rendered.ends_with("..."));
        prop_assert_eq!(rendered.parse::<Tpa>().unwrap(), x);
    }

    #[test]
    fn fraction_arithmetic(x in fraction(), y in fraction()) {
        prop_assert_eq!(&(&x + &y) - &y, x.clone());
        prop_assert_eq!(&x + &y, &y + &x);
        prop_assert_eq!(&x * &y, &y * &x);
        if !y.is_zero() {
            prop_assert_eq!(&(&x * &y) / &y, x);
        }
    }

    #[test]
    fn simplify_idempotent(x in small_fraction()) {
        let mut simplified = x.clone();
        prop_assert!(simplified.simplify(Duration::ZERO));
        prop_assert_eq!(&simplified, &x);

        let once = simplified.to_fraction();
        prop_assert!(simplified.simplify(Duration::ZERO));
        prop_assert_eq!(simplified.to_fraction(), once);
    }
}
