//! The four castling variants and the squares each one depends on.

use crate::castle_rights::{CastleRights, CastleSide};
use crate::color::Color;
use crate::square::Square;

/// One castling variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRule {
    pub color: Color,
    pub side: CastleSide,
    /// The right this variant consumes.
    pub right: CastleRights,
    /// King `(from, to)`.
    pub king: (Square, Square),
    /// Rook `(from, to)`.
    pub rook: (Square, Square),
    /// Squares that must be empty.
    pub vacant: &'static [Square],
    /// Squares the enemy must not attack: the king's start, transit and end.
    pub safe: &'static [Square],
}

/// White king-side, white queen-side, black king-side, black queen-side.
pub static CASTLING_RULES: [CastlingRule; 4] = [
    CastlingRule {
        color: Color::White,
        side: CastleSide::KingSide,
        right: CastleRights::WHITE_KING,
        king: (Square::E1, Square::G1),
        rook: (Square::H1, Square::F1),
        vacant: &[Square::F1, Square::G1],
        safe: &[Square::E1, Square::F1, Square::G1],
    },
    CastlingRule {
        color: Color::White,
        side: CastleSide::QueenSide,
        right: CastleRights::WHITE_QUEEN,
        king: (Square::E1, Square::C1),
        rook: (Square::A1, Square::D1),
        vacant: &[Square::D1, Square::C1, Square::B1],
        safe: &[Square::E1, Square::D1, Square::C1],
    },
    CastlingRule {
        color: Color::Black,
        side: CastleSide::KingSide,
        right: CastleRights::BLACK_KING,
        king: (Square::E8, Square::G8),
        rook: (Square::H8, Square::F8),
        vacant: &[Square::F8, Square::G8],
        safe: &[Square::E8, Square::F8, Square::G8],
    },
    CastlingRule {
        color: Color::Black,
        side: CastleSide::QueenSide,
        right: CastleRights::BLACK_QUEEN,
        king: (Square::E8, Square::C8),
        rook: (Square::A8, Square::D8),
        vacant: &[Square::D8, Square::C8, Square::B8],
        safe: &[Square::E8, Square::D8, Square::C8],
    },
];

impl CastlingRule {
    /// Look up the variant that consumes a single right.
    pub fn by_right(right: CastleRights) -> Option<&'static CastlingRule> {
        CASTLING_RULES.iter().find(|rule| rule.right == right)
    }

    /// Look up the variant whose king lands on `square`.
    pub fn by_king_destination(square: Square) -> Option<&'static CastlingRule> {
        CASTLING_RULES.iter().find(|rule| rule.king.1 == square)
    }

    /// Look up the variant whose rook starts on `square`.
    pub fn by_rook_origin(square: Square) -> Option<&'static CastlingRule> {
        CASTLING_RULES.iter().find(|rule| rule.rook.0 == square)
    }

    /// Both variants of `color`, king-side first.
    pub fn for_color(color: Color) -> impl Iterator<Item = &'static CastlingRule> {
        CASTLING_RULES.iter().filter(move |rule| rule.color == color)
    }
}
