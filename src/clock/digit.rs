//! Decimal digit glyphs and their seven-segment masks.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Digit {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
}

impl Digit {
    pub const ALL: [Digit; 10] = [
        Digit::Zero,
        Digit::One,
        Digit::Two,
        Digit::Three,
        Digit::Four,
        Digit::Five,
        Digit::Six,
        Digit::Seven,
        Digit::Eight,
        Digit::Nine,
    ];

    /// 7-segment bitmask, bits 0..6 correspond to SegmentId 0..6
    pub const fn mask(self) -> u8 {
        match self {
            Digit::Zero => 0b0111111,
            Digit::One => 0b0000110,
            Digit::Two => 0b1011011,
            Digit::Three => 0b1001111,
            Digit::Four => 0b1100110,
            Digit::Five => 0b1101101,
            Digit::Six => 0b1111101,
            Digit::Seven => 0b0000111,
            Digit::Eight => 0b1111111,
            Digit::Nine => 0b1101111,
        }
    }

    /// Convert digit to its numeric value (0-9)
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(n: u8) -> Option<Self> {
        Self::ALL.get(n as usize).copied()
    }

    /// Parse an ASCII digit character
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|n| Self::from_u8(n as u8))
    }

    pub fn is_segment_lit(self, segment: SegmentId) -> bool {
        self.mask() & (1 << segment as u8) != 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentId {
    Top = 0,
    TopRight = 1,
    BottomRight = 2,
    Bottom = 3,
    BottomLeft = 4,
    TopLeft = 5,
    Middle = 6,
}

impl SegmentId {
    pub const ALL: [SegmentId; 7] = [
        SegmentId::Top,
        SegmentId::TopRight,
        SegmentId::BottomRight,
        SegmentId::Bottom,
        SegmentId::BottomLeft,
        SegmentId::TopLeft,
        SegmentId::Middle,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Digit::from_char('0'), Some(Digit::Zero));
        assert_eq!(Digit::from_char('7'), Some(Digit::Seven));
        assert_eq!(Digit::from_char('9'), Some(Digit::Nine));
        assert_eq!(Digit::from_char('a'), None);
        assert_eq!(Digit::from_char(':'), None);
    }

    #[test]
    fn test_from_u8_matches_to_u8() {
        for digit in Digit::ALL {
            assert_eq!(Digit::from_u8(digit.to_u8()), Some(digit));
        }
        assert_eq!(Digit::from_u8(10), None);
    }

    #[test]
    fn test_masks_are_unique() {
        for a in Digit::ALL {
            for b in Digit::ALL {
                if a != b {
                    assert_ne!(a.mask(), b.mask(), "{:?} and {:?} share a mask", a, b);
                }
            }
        }
    }

    #[test]
    fn test_eight_lights_every_segment() {
        for segment in SegmentId::ALL {
            assert!(Digit::Eight.is_segment_lit(segment));
        }
        assert!(!Digit::One.is_segment_lit(SegmentId::Top));
        assert!(Digit::One.is_segment_lit(SegmentId::TopRight));
    }
}
