//! Attack detection.

use std::ops::ControlFlow;

use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::rays::{CARDINAL, DIAGONAL, FULL_REACH, KNIGHT, walk_rays};

impl Board {
    /// Return `true` if `sq` is attacked by any piece of `by`.
    ///
    /// A defender standing on `sq` is imagined to move like a knight, a rook
    /// and a bishop in turn. Whatever enemy piece each of those walks would
    /// capture attacks `sq` back if it moves with the same geometry: a knight
    /// for knight jumps, a rook or queen along files and ranks, a bishop or
    /// queen along diagonals, a king from one step away, and a pawn from one
    /// diagonal step behind its direction of travel.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attacked_along(sq, by, &KNIGHT, 1, |piece, _| piece.kind() == PieceKind::Knight)
            || self.attacked_along(sq, by, &CARDINAL, FULL_REACH, |piece, from| match piece.kind() {
                PieceKind::Rook | PieceKind::Queen => true,
                PieceKind::King => from.is_adjacent_to(sq),
                _ => false,
            })
            || self.attacked_along(sq, by, &DIAGONAL, FULL_REACH, |piece, from| match piece.kind() {
                PieceKind::Bishop | PieceKind::Queen => true,
                PieceKind::King => from.is_adjacent_to(sq),
                PieceKind::Pawn => {
                    let delta = sq.padded() as isize - from.padded() as isize;
                    let forward = piece.color().pawn_forward() as isize;
                    delta == forward - 1 || delta == forward + 1
                }
                _ => false,
            })
    }

    /// Walk `offsets` from `sq` and report whether the first piece of `by` met
    /// on some ray satisfies `capable`.
    fn attacked_along<F>(&self, sq: Square, by: Color, offsets: &[i8], reach: u8, capable: F) -> bool
    where
        F: Fn(&Piece, Square) -> bool,
    {
        walk_rays(self, sq, offsets, reach, |from, occupant| match occupant {
            Some(id) if self.piece(id).color() == by && capable(self.piece(id), from) => {
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        })
        .is_break()
    }

    /// Return `true` if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), !color)
    }
}
