use thiserror::Error;

/// Everything that can go wrong while building or dividing numbers.
///
/// Contract breaches inside the kernel (a fast single digit path fed a
/// divisor that doesn't fit in one digit, a deferred subtraction that would
/// underflow) are not represented here: they panic, just like `BigUint`
/// underflow always did.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("number initialisation value badly formed: {0}")]
    InvalidInput(#[from] ParseError),

    #[error("number initialisation value is not a finite number")]
    NotANumber,

    #[error("attempt to divide by zero")]
    DivideByZero,

    #[error("a random number needs a positive count of decimal digits")]
    NonPositiveDigits,
}

/// Grammar violations reported by the textual codec. Positions are byte
/// offsets into the original input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no digits in input")]
    Empty,

    #[error("unrecognised character {found:?} at position {position}")]
    UnexpectedCharacter { found: char, position: usize },

    #[error("expected at least one digit at position {position}")]
    MissingDigits { position: usize },

    #[error("recurring section opened twice at position {position}")]
    NestedRecurring { position: usize },

    #[error("empty recurring section at position {position}")]
    EmptyRecurring { position: usize },

    #[error("recurring section is never closed")]
    UnterminatedRecurring,

    #[error("no characters may follow the recurring section (position {position})")]
    TrailingAfterRecurring { position: usize },

    #[error("fraction has no numerator")]
    MissingNumerator,

    #[error("fractional numerator must be a positive integer")]
    ZeroNumerator,

    #[error("fraction has no denominator")]
    MissingDenominator,

    #[error("fractional denominator must be a positive integer")]
    ZeroDenominator,

    #[error("radix {0} is not supported")]
    InvalidRadix(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
