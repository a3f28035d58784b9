//! Guess parsing and live input validation.

use std::fmt;

use thiserror::Error;

use crate::number::DIGIT_CAPACITY;

/// Inclusive gameplay bounds for a guess and for the acquired target.
pub const GUESS_MIN: u16 = 1;
pub const GUESS_MAX: u16 = 300;

/// The guess field held something that cannot be submitted.
///
/// Always recovered locally (blocked submission plus a message); never a
/// crash path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGuessError {
    #[error("guess is not a number")]
    NotANumber,
    #[error("guess {value} is outside {GUESS_MIN}-{GUESS_MAX}")]
    OutOfBounds { value: i64 },
}

/// A validated guess in the 1-300 gameplay range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Guess(u16);

impl Guess {
    pub fn new(value: u16) -> Result<Self, InvalidGuessError> {
        if (GUESS_MIN..=GUESS_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidGuessError::OutOfBounds {
                value: i64::from(value),
            })
        }
    }

    /// Parse the raw text of the guess field.
    pub fn parse(text: &str) -> Result<Self, InvalidGuessError> {
        let value: i64 = text
            .trim()
            .parse()
            .map_err(|_| InvalidGuessError::NotANumber)?;
        if (i64::from(GUESS_MIN)..=i64::from(GUESS_MAX)).contains(&value) {
            Ok(Self(value as u16))
        } else {
            Err(InvalidGuessError::OutOfBounds { value })
        }
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of evaluating the guess field on a keystroke.
///
/// An empty field parks the counter at `0/3` without blocking the send
/// action; a valid guess reports how many digit slots the text uses;
/// anything else blocks submission until corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessInput {
    Empty,
    Valid { guess: Guess, chars: usize },
    Invalid,
}

impl GuessInput {
    #[must_use]
    pub fn evaluate(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return GuessInput::Empty;
        }
        let chars = trimmed.chars().count();
        // "0100" parses in-bounds but overflows the three slots.
        if chars > DIGIT_CAPACITY {
            return GuessInput::Invalid;
        }
        match Guess::parse(trimmed) {
            Ok(guess) => GuessInput::Valid { guess, chars },
            Err(_) => GuessInput::Invalid,
        }
    }

    /// Whether the submit action should be available for this input.
    #[must_use]
    pub const fn submit_allowed(self) -> bool {
        !matches!(self, GuessInput::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_in_bounds() {
        assert_eq!(Guess::parse("150").unwrap().value(), 150);
        assert_eq!(Guess::parse("1").unwrap().value(), 1);
        assert_eq!(Guess::parse("300").unwrap().value(), 300);
        assert_eq!(Guess::parse(" 42 ").unwrap().value(), 42);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(Guess::parse("abc"), Err(InvalidGuessError::NotANumber));
        assert_eq!(Guess::parse(""), Err(InvalidGuessError::NotANumber));
        assert_eq!(Guess::parse("12.5"), Err(InvalidGuessError::NotANumber));
    }

    #[test]
    fn test_parse_rejects_out_of_bounds() {
        assert_eq!(
            Guess::parse("0"),
            Err(InvalidGuessError::OutOfBounds { value: 0 })
        );
        assert_eq!(
            Guess::parse("301"),
            Err(InvalidGuessError::OutOfBounds { value: 301 })
        );
        assert_eq!(
            Guess::parse("-5"),
            Err(InvalidGuessError::OutOfBounds { value: -5 })
        );
    }

    #[test]
    fn test_evaluate_empty_allows_submit() {
        let input = GuessInput::evaluate("   ");
        assert_eq!(input, GuessInput::Empty);
        assert!(input.submit_allowed());
    }

    #[test]
    fn test_evaluate_valid_counts_chars() {
        match GuessInput::evaluate("42") {
            GuessInput::Valid { guess, chars } => {
                assert_eq!(guess.value(), 42);
                assert_eq!(chars, 2);
            }
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_blocks_invalid() {
        assert_eq!(GuessInput::evaluate("abc"), GuessInput::Invalid);
        assert_eq!(GuessInput::evaluate("500"), GuessInput::Invalid);
        // In-bounds value, but the text itself overflows the slots.
        assert_eq!(GuessInput::evaluate("0100"), GuessInput::Invalid);
        assert!(!GuessInput::evaluate("abc").submit_allowed());
    }
}
