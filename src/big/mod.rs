mod digits;
mod signed;

pub use self::digits::*;
pub use self::signed::*;

/// The radix digits are stored in. A power of two close to the square root
/// of the `i64` range so a product of two digits, plus some change, never
/// overflows.
pub const BASE: i64 = 1 << 30;
/// Exact square root of `BASE`, used to split digits into halves.
pub const ROOT_BASE: i64 = 1 << 15;
/// Ceiling for the overflow budget: no digit may be allowed to reach this
/// before a carry pass.
pub const SQUARE_BASE: i64 = BASE * BASE;
