//! Side colors and the pawn geometry that depends on them.

use std::fmt;
use std::ops::Not;

/// A side: White or Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// All colors in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Padded-index offset of one pawn step toward the enemy back rank.
    #[inline]
    pub const fn pawn_forward(self) -> i8 {
        match self {
            Color::White => 10,
            Color::Black => -10,
        }
    }

    /// Zero-based rank from which this color's pawns may advance two squares.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Zero-based rank on which this color's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Zero-based rank of an en passant target this color's pawns can capture onto.
    #[inline]
    pub const fn en_passant_rank(self) -> u8 {
        match self {
            Color::White => 5,
            Color::Black => 2,
        }
    }

    /// Zero-based back rank, where the king and rooks start.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Parse the FEN side-to-move token.
    pub fn from_fen(s: &str) -> Option<Color> {
        match s {
            "w" => Some(Color::White),
            "b" => Some(Color::Black),
            _ => None,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn flip_and_not() {
        assert_eq!(Color::White.flip(), Color::Black);
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(Color::White.flip().flip(), Color::White);
    }

    #[test]
    fn pawn_geometry_is_mirrored() {
        assert_eq!(Color::White.pawn_forward(), -Color::Black.pawn_forward());
        assert_eq!(Color::White.pawn_start_rank() + Color::Black.pawn_start_rank(), 7);
        assert_eq!(Color::White.promotion_rank(), Color::Black.back_rank());
        assert_eq!(Color::White.en_passant_rank() + Color::Black.en_passant_rank(), 7);
    }

    #[test]
    fn fen_token() {
        assert_eq!(Color::from_fen("w"), Some(Color::White));
        assert_eq!(Color::from_fen("b"), Some(Color::Black));
        assert_eq!(Color::from_fen("x"), None);
        assert_eq!(format!("{}", Color::Black), "b");
    }
}
