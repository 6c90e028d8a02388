//! The four castle-right flags packed into one byte.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;

/// Wing a king castles toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// Castle rights as independent bits: K = 1, Q = 2, k = 4, q = 8.
///
/// A right says castling is still potentially available. Whether it can be
/// played right now depends on the board and is decided by move generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    /// FEN letter of each single right, in FEN order.
    const LETTERS: [(CastleRights, char); 4] = [
        (CastleRights::WHITE_KING, 'K'),
        (CastleRights::WHITE_QUEEN, 'Q'),
        (CastleRights::BLACK_KING, 'k'),
        (CastleRights::BLACK_QUEEN, 'q'),
    ];

    /// Return the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if every bit of `other` is held.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Return the single right for one color and wing.
    pub const fn of(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => CastleRights::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => CastleRights::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => CastleRights::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => CastleRights::BLACK_QUEEN,
        }
    }

    /// Return both rights of `color`.
    pub const fn both(color: Color) -> CastleRights {
        CastleRights::of(color, CastleSide::KingSide).insert(CastleRights::of(color, CastleSide::QueenSide))
    }

    /// Parse the FEN castling field: `-` or any subset of `KQkq`.
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        s.chars().try_fold(CastleRights::NONE, |rights, c| {
            CastleRights::LETTERS
                .iter()
                .find(|(_, letter)| *letter == c)
                .map(|(right, _)| rights.insert(*right))
                .ok_or(FenError::InvalidCastlingChar { character: c })
        })
    }

    /// Format as the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        CastleRights::LETTERS
            .iter()
            .filter(|(right, _)| self.contains(*right))
            .map(|(_, letter)| *letter)
            .collect()
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide};
    use crate::color::Color;
    use crate::error::FenError;

    #[test]
    fn fen_field_roundtrip() {
        for field in ["KQkq", "Kq", "k", "-", "KQ", "kq"] {
            let rights = CastleRights::from_fen(field).unwrap();
            assert_eq!(rights.to_fen(), field);
        }
        // Letters out of order are accepted and normalized.
        assert_eq!(CastleRights::from_fen("qK").unwrap().to_fen(), "Kq");
        assert_eq!(CastleRights::from_fen("KQkq").unwrap(), CastleRights::ALL);
    }

    #[test]
    fn bad_letters_are_rejected() {
        assert_eq!(
            CastleRights::from_fen("KQxq"),
            Err(FenError::InvalidCastlingChar { character: 'x' })
        );
        assert!(CastleRights::from_fen("1").is_err());
    }

    #[test]
    fn per_color_rights() {
        assert_eq!(CastleRights::both(Color::White).bits(), 0b0011);
        assert_eq!(CastleRights::both(Color::Black).bits(), 0b1100);
        assert_eq!(
            CastleRights::of(Color::Black, CastleSide::QueenSide),
            CastleRights::BLACK_QUEEN
        );

        let rights = CastleRights::ALL.remove(CastleRights::both(Color::White));
        assert!(!rights.contains(CastleRights::WHITE_KING));
        assert!(rights.contains(CastleRights::BLACK_KING));
        assert_eq!(format!("{rights}"), "kq");
    }
}
