//! Total precision arithmetic: arbitrary size integers, and numbers with an
//! exact fractional part that can be read and written as decimals (with
//! recurring digits in brackets, like `0.1[6]`) or as fractions.

mod big;
mod error;
mod primes;
mod tpa;

#[cfg(test)]
mod proptests;

pub use self::big::*;
pub use self::error::*;
pub use self::primes::*;
pub use self::tpa::*;
