use super::{Tpa, DEFAULT_SIMPLIFY_BUDGET};
use crate::{big::BigInteger, primes::PrimeCache};

use log::debug;
use num_traits::{One, ToPrimitive, Zero};
use std::time::{Duration, Instant};

impl Tpa {
    /// Reduce the fraction by trial division with primes, spending at most
    /// `budget` on the search (`Duration::ZERO` for no limit).
    ///
    /// Returns `true` if the fraction is known to be fully reduced. `false`
    /// means the search ran out of time or primes, and the fraction may or
    /// may not still be reducible. Either way the value is unchanged.
    /// ```rust
    /// use std::time::Duration;
    /// use tpa::Tpa;
    /// let mut number: Tpa = "5 50/100".parse().unwrap();
    /// assert!(number.simplify(Duration::ZERO));
    /// assert_eq!(number.to_fraction(), "5 1/2");
    /// ```
    pub fn simplify(&mut self, budget: Duration) -> bool {
        self.simplify_with(budget, &PrimeCache::shared())
    }
    /// `simplify` with `DEFAULT_SIMPLIFY_BUDGET`
    pub fn simplify_default(&mut self) -> bool {
        self.simplify(DEFAULT_SIMPLIFY_BUDGET)
    }
    /// `simplify`, drawing primes from `cache`
    pub fn simplify_with(&mut self, budget: Duration, cache: &PrimeCache) -> bool {
        let remainder = match &mut self.remainder {
            Some(remainder) if !remainder.numerator.is_zero() => remainder,
            _ => return true
        };
        let start = Instant::now();

        // Factors of the numerator that the denominator doesn't share
        let mut factor = BigInteger::one();
        // None if too big to ever be reached
        let mut limit = remainder.numerator.rough_sqrt().to_u64();
        let mut tried = 0;
        let mut completed = false;
        for prime in cache.primes() {
            if limit.map_or(false, |limit| u64::from(prime) > limit) {
                completed = true;
                break;
            }
            tried += 1;
            while remainder.numerator.is_divisible_by(prime) {
                remainder.numerator.digit_divide(prime);
                if remainder.denominator.is_divisible_by(prime) {
                    remainder.denominator.digit_divide(prime);
                } else {
                    factor.digit_multiply_with_add(prime, 0);
                }
                limit = remainder.numerator.rough_sqrt().to_u64();
            }
            if !budget.is_zero() && start.elapsed() > budget {
                break;
            }
        }

        // Whatever is left of the numerator may be a large prime dividing
        // the denominator
        let mut quotient = remainder.denominator.clone();
        let rest = quotient.divide_unchecked(&remainder.numerator);
        let fallback = rest.is_zero();
        if fallback {
            remainder.denominator = quotient;
            remainder.numerator = factor;
        } else {
            remainder.numerator *= &factor;
        }
        debug!(
            "simplify tried {} primes in {:?}: sweep {}, large factor {}",
            tried,
            start.elapsed(),
            if completed { "completed" } else { "cut short" },
            if fallback { "divided out" } else { "not found" }
        );
        completed || fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tpa(input: &str) -> Tpa {
        input.parse().unwrap()
    }

    #[test]
    fn reduces() {
        let mut sum = tpa("5 3/10");
        sum.plus(&tpa("2/10"));
        assert!(sum.simplify(Duration::ZERO));
        assert_eq!(sum.to_fraction(), "5 1/2");

        let mut number = tpa("-360/1024");
        assert!(number.simplify_default());
        assert_eq!(number.to_fraction(), "-0 45/128");

        let mut number = tpa("0.1[6]");
        assert!(number.simplify(Duration::ZERO));
        assert_eq!(number.to_fraction(), "0 1/6");
    }
    #[test]
    fn nothing_to_do() {
        let mut integer = Tpa::new(10);
        assert!(integer.simplify(Duration::ZERO));
        let mut zero = tpa("0/7");
        assert!(zero.simplify(Duration::ZERO));
        let mut coprime = tpa("3/4");
        assert!(coprime.simplify(Duration::ZERO));
        assert_eq!(coprime.to_fraction(), "0 3/4");
    }
    #[test]
    fn large_factors() {
        // 1638001554596000993183 = 31 * 83 * 4384823 * 145185236477, none
        // of which divide the denominator
        let mut number = tpa("234789789167435342333343/4239123411142533478912");
        assert!(number.simplify(Duration::ZERO));
        assert_eq!(number.to_fraction(), "55 1638001554596000993183/4239123411142533478912");

        // A large prime numerator that divides the denominator is found
        // without sweeping up to it
        let mut number = tpa("1000000007/3000000021");
        assert!(number.simplify(Duration::from_secs(60)));
        assert_eq!(number.to_fraction(), "0 1/3");
    }
    #[test]
    fn out_of_primes() {
        // 101 * 103 with no primes past 100 to find either
        let cache = PrimeCache::with_ceiling(100);
        let mut number = tpa("10403/20000");
        assert!(!number.simplify_with(Duration::ZERO, &cache));
        assert_eq!(number, tpa("10403/20000"));
        assert_eq!(number.to_fraction(), "0 10403/20000");

        let mut reducible = tpa("10403/20806");
        assert!(reducible.simplify_with(Duration::ZERO, &cache));
        assert_eq!(reducible.to_fraction(), "0 1/2");
    }
    #[test]
    fn out_of_time() {
        // 998244353 * 1000000007, neither dividing the denominator
        let mut number = tpa("998244359987710471/1000000000000000000");
        assert!(!number.simplify(Duration::from_nanos(1)));
        assert_eq!(number, tpa("998244359987710471/1000000000000000000"));
        assert_eq!(number.to_fraction(), "0 998244359987710471/1000000000000000000");
    }
    #[test]
    fn idempotent() {
        let mut number = tpa("123 764/999");
        number.times(&tpa("5 512/1001"));
        assert!(number.simplify(Duration::ZERO));
        let once = number.to_fraction();
        assert!(number.simplify(Duration::ZERO));
        assert_eq!(number.to_fraction(), once);
    }
}
