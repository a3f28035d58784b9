//! Seven-segment digit glyphs and their activation patterns.
//!
//! Segments are addressed in a fixed order: the middle bar first, then the
//! top bar, then clockwise around the glyph. The activation table below is
//! keyed by that order. A display that wires its segment images differently
//! will render garbage, so the order is part of the contract.

use std::fmt;

use thiserror::Error;

/// Number of independently lit regions in one digit glyph.
pub const SEGMENT_COUNT: usize = 7;

/// One of the seven segment positions, in activation-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Middle,
    Top,
    TopRight,
    BottomRight,
    Bottom,
    BottomLeft,
    TopLeft,
}

impl Segment {
    /// All segments, in activation-vector order.
    pub const ALL: [Segment; SEGMENT_COUNT] = [
        Segment::Middle,
        Segment::Top,
        Segment::TopRight,
        Segment::BottomRight,
        Segment::Bottom,
        Segment::BottomLeft,
        Segment::TopLeft,
    ];

    /// Position of this segment within an activation vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Activation vectors for 0-9, indexed by digit value.
///
/// Order per row: middle, top, top-right, bottom-right, bottom,
/// bottom-left, top-left.
const PATTERNS: [[bool; SEGMENT_COUNT]; 10] = [
    [false, true, true, true, true, true, true],     // 0
    [false, false, true, true, false, false, false], // 1
    [true, true, true, false, true, true, false],    // 2
    [true, true, true, true, true, false, false],    // 3
    [true, false, true, true, false, false, true],   // 4
    [true, true, false, true, true, false, true],    // 5
    [true, true, false, true, true, true, true],     // 6
    [false, true, true, true, false, false, false],  // 7
    [true, true, true, true, true, true, true],      // 8
    [true, true, true, true, false, false, true],    // 9
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("'{0}' is not a decimal digit")]
pub struct InvalidDigit(pub char);

/// A single decimal digit, 0-9.
///
/// Immutable; its activation pattern comes from a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// The digit's value, 0-9.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The digit's segment activation vector, in [`Segment::ALL`] order.
    #[must_use]
    pub const fn pattern(self) -> [bool; SEGMENT_COUNT] {
        PATTERNS[self.0 as usize]
    }

    /// Whether `segment` is lit when this digit is displayed.
    #[must_use]
    pub const fn is_lit(self, segment: Segment) -> bool {
        self.pattern()[segment.index()]
    }

    /// Internal constructor for callers that already hold a 0-9 value.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        debug_assert!(value <= 9);
        Self(value)
    }
}

impl TryFrom<char> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        value
            .to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(InvalidDigit(value))
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(value: u8) -> Digit {
        Digit::new_unchecked(value)
    }

    #[test]
    fn test_all_activation_vectors_exact() {
        let expected: [[bool; SEGMENT_COUNT]; 10] = [
            [false, true, true, true, true, true, true],
            [false, false, true, true, false, false, false],
            [true, true, true, false, true, true, false],
            [true, true, true, true, true, false, false],
            [true, false, true, true, false, false, true],
            [true, true, false, true, true, false, true],
            [true, true, false, true, true, true, true],
            [false, true, true, true, false, false, false],
            [true, true, true, true, true, true, true],
            [true, true, true, true, false, false, true],
        ];
        for (value, want) in expected.iter().enumerate() {
            assert_eq!(
                digit(value as u8).pattern(),
                *want,
                "pattern mismatch for {value}"
            );
        }
    }

    #[test]
    fn test_segment_order_matches_indices() {
        for (i, segment) in Segment::ALL.iter().enumerate() {
            assert_eq!(segment.index(), i);
        }
    }

    #[test]
    fn test_is_lit_follows_pattern() {
        // 1 lights only the two right-hand segments.
        let one = digit(1);
        assert!(one.is_lit(Segment::TopRight));
        assert!(one.is_lit(Segment::BottomRight));
        assert!(!one.is_lit(Segment::Middle));
        assert!(!one.is_lit(Segment::Top));
        assert!(!one.is_lit(Segment::Bottom));
        assert!(!one.is_lit(Segment::BottomLeft));
        assert!(!one.is_lit(Segment::TopLeft));
    }

    #[test]
    fn test_digit_from_char() {
        assert_eq!(Digit::try_from('7').unwrap().value(), 7);
        assert_eq!(Digit::try_from('0').unwrap().value(), 0);
        assert!(Digit::try_from('x').is_err());
        assert!(Digit::try_from('-').is_err());
    }
}
