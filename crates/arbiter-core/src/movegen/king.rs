//! King steps and castling.

use crate::board::Board;
use crate::castling::CastlingRule;
use crate::chess_move::{Move, MoveKind};
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;

use super::gen_steps_and_slides;

pub(super) fn gen_king(board: &Board, id: PieceId, out: &mut Vec<Move>) {
    gen_steps_and_slides(board, id, out);

    let king = board.piece(id);
    let (from, color) = (king.square(), king.color());
    for rule in CastlingRule::for_color(color) {
        if from == rule.king.0 && can_castle(board, rule) {
            out.push(Move::new(
                from,
                rule.king.1,
                id,
                PieceKind::King,
                color,
                None,
                MoveKind::Castle,
            ));
        }
    }
}

/// Right held, the castling rook still on its origin, the path clear and
/// none of the king's squares attacked.
fn can_castle(board: &Board, rule: &CastlingRule) -> bool {
    if !board.castling().contains(rule.right) {
        return false;
    }
    let rook_home = board.piece_on(rule.rook.0).is_some_and(|rook| {
        rook.kind() == PieceKind::Rook && rook.color() == rule.color && rook.origin() == rule.rook.0
    });
    rook_home
        && rule.vacant.iter().all(|&sq| board.is_empty(sq))
        && rule
            .safe
            .iter()
            .all(|&sq| !board.is_square_attacked(sq, !rule.color))
}
