//! Bounded display quantities.

use std::fmt;

use thiserror::Error;

use crate::digit::Digit;

/// Maximum number of digit slots the display can materialize.
pub const DIGIT_CAPACITY: usize = 3;

/// The display cannot structurally fit `value`.
///
/// Raised when a number's decimal representation needs more than
/// [`DIGIT_CAPACITY`] digit slots, or a sign. Distinct from the 1-300
/// gameplay bound: error codes are shown with bounds disabled and may
/// legitimately exceed 300, but nothing outside 0-999 can ever be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{value} does not fit in {DIGIT_CAPACITY} digit slots")]
pub struct OutOfRangeError {
    pub value: i32,
}

/// A quantity the seven-segment display is showing.
///
/// Guaranteed by construction to have a 1-3 character decimal
/// representation. Replaced wholesale on every display update, never
/// partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayNumber(u16);

impl DisplayNumber {
    /// The bootstrap value shown before the first round resolves.
    pub const ZERO: DisplayNumber = DisplayNumber(0);

    pub fn new(value: i32) -> Result<Self, OutOfRangeError> {
        if (0..=999).contains(&value) {
            Ok(Self(value as u16))
        } else {
            Err(OutOfRangeError { value })
        }
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Decimal digits, left to right, without leading zeros.
    ///
    /// Zero is the one exception: it renders as a single literal digit.
    #[must_use]
    pub fn digits(self) -> Vec<Digit> {
        let n = self.0;
        let mut digits = Vec::with_capacity(DIGIT_CAPACITY);
        if n >= 100 {
            digits.push(Digit::new_unchecked((n / 100) as u8));
        }
        if n >= 10 {
            digits.push(Digit::new_unchecked((n / 10 % 10) as u8));
        }
        digits.push(Digit::new_unchecked((n % 10) as u8));
        digits
    }
}

impl fmt::Display for DisplayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
