//! Per-ply incidental state and its transition across one move.

use crate::castle_rights::CastleRights;
use crate::castling::CastlingRule;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Everything about a position that is not piece placement.
///
/// One value exists per ply. Making a move pushes the current value onto the
/// board's history and replaces it with [`BoardState::next`]; unmaking pops it
/// back verbatim, so a state is never edited after it has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    ply: u32,
}

impl BoardState {
    /// State of the standard starting position.
    pub const INITIAL: BoardState = BoardState {
        castling: CastleRights::ALL,
        en_passant: None,
        halfmove_clock: 0,
        ply: 0,
    };

    /// Build a state from FEN-style fields.
    ///
    /// A fullmove number of 0 is treated as 1.
    pub fn new(
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> BoardState {
        let ply = u32::from(fullmove_number.max(1) - 1) * 2 + side_to_move.index() as u32;
        BoardState {
            castling,
            en_passant,
            halfmove_clock,
            ply,
        }
    }

    /// Side to move, from ply parity.
    #[inline]
    pub const fn side_to_move(&self) -> Color {
        if self.ply % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Square a pawn skipped on the previous ply, if any.
    #[inline]
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Half-moves played since the first White move of the game.
    #[inline]
    pub const fn ply(&self) -> u32 {
        self.ply
    }

    /// Fullmove number as written in FEN: starts at 1, advances after Black moves.
    #[inline]
    pub const fn fullmove_number(&self) -> u32 {
        self.ply / 2 + 1
    }

    /// Derive the state that follows `mv`.
    pub fn next(&self, mv: &Move) -> BoardState {
        let halfmove_clock = if mv.piece() == PieceKind::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        let en_passant = match mv.kind() {
            MoveKind::DoublePawnPush => mv.from().offset(mv.color().pawn_forward()),
            _ => None,
        };

        let mut castling = self.castling;
        match mv.piece() {
            PieceKind::King => castling = castling.remove(CastleRights::both(mv.color())),
            // A rook that still holds its right has never left its origin.
            PieceKind::Rook => {
                if let Some(rule) = CastlingRule::by_rook_origin(mv.from()) {
                    castling = castling.remove(rule.right);
                }
            }
            _ => {}
        }
        if mv.is_capture() {
            match CastlingRule::by_rook_origin(mv.to()) {
                Some(rule) if rule.color != mv.color() => castling = castling.remove(rule.right),
                _ => {}
            }
        }

        BoardState {
            castling,
            en_passant,
            halfmove_clock,
            ply: self.ply + 1,
        }
    }
}

impl Default for BoardState {
    fn default() -> BoardState {
        BoardState::INITIAL
    }
}
