//! Pawn move generation: pushes, captures, en passant and promotion.

use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::error::MoveError;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Push `mv`, or one copy per promotion kind if it reaches the last rank.
fn push_with_promotions(out: &mut Vec<Move>, mv: Move) {
    if mv.to().rank() == mv.color().promotion_rank() {
        out.extend(PieceKind::PROMOTIONS.map(|kind| mv.promoting_to(kind)));
    } else {
        out.push(mv);
    }
}

pub(super) fn gen_pawn(board: &Board, id: PieceId, out: &mut Vec<Move>) -> Result<(), MoveError> {
    let pawn = board.piece(id);
    let (from, color) = (pawn.square(), pawn.color());
    let forward = color.pawn_forward();
    let make = |to: Square, captured: Option<PieceId>, kind: MoveKind| {
        Move::new(from, to, id, PieceKind::Pawn, color, captured, kind)
    };

    let empty = |sq: &Square| board.is_empty(*sq);
    if let Some(single) = from.offset(forward).filter(empty) {
        push_with_promotions(out, make(single, None, MoveKind::Simple));
        if from.rank() == color.pawn_start_rank() {
            if let Some(double) = single.offset(forward).filter(empty) {
                out.push(make(double, None, MoveKind::DoublePawnPush));
            }
        }
    }

    for side in [-1, 1] {
        let Some(target) = from.offset(forward + side) else {
            continue;
        };
        match board.occupant(target) {
            Some(victim) if board.piece(victim).color() != color => {
                push_with_promotions(out, make(target, Some(victim), MoveKind::Simple));
            }
            Some(_) => {}
            None if board.en_passant() == Some(target)
                && target.rank() == color.en_passant_rank() =>
            {
                let behind = target
                    .offset(-forward)
                    .ok_or(MoveError::MissingEnPassantPawn { square: target })?;
                let victim = board
                    .occupant(behind)
                    .filter(|&v| {
                        let piece = board.piece(v);
                        piece.kind() == PieceKind::Pawn && piece.color() != color
                    })
                    .ok_or(MoveError::MissingEnPassantPawn { square: behind })?;
                out.push(make(target, Some(victim), MoveKind::EnPassant));
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::chess_move::MoveKind;
    use crate::error::MoveError;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn targets(board: &Board, from: Square) -> Vec<String> {
        let mut moves: Vec<String> = board
            .pseudo_legal_moves(from)
            .unwrap()
            .iter()
            .map(|mv| mv.to_uci())
            .collect();
        moves.sort();
        moves
    }

    #[test]
    fn single_and_double_push() {
        let board = Board::starting_position();
        assert_eq!(targets(&board, Square::E2), vec!["e2e3", "e2e4"]);
        assert_eq!(targets(&board, Square::D7), vec!["d7d5", "d7d6"]);

        let pushes = board.pseudo_legal_moves(Square::E2).unwrap();
        let double = pushes.iter().find(|mv| mv.to() == Square::E4).unwrap();
        assert_eq!(double.kind(), MoveKind::DoublePawnPush);
    }

    #[test]
    fn blocked_pawns() {
        // e3 blocks both pushes; a knight on b4 blocks only the double push from b2.
        let board: Board = "4k3/8/8/8/1n6/4p3/1P2P3/4K3 w - - 0 1".parse().unwrap();
        assert!(targets(&board, Square::E2).is_empty());
        assert_eq!(targets(&board, Square::B2), vec!["b2b3"]);
    }

    #[test]
    fn captures_enemies_not_friends() {
        let board: Board = "4k3/8/8/3p1P2/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(targets(&board, Square::E4), vec!["e4d5", "e4e5"]);
    }

    #[test]
    fn promotions_expand_in_order() {
        let board: Board = "3rk3/2P5/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = board.pseudo_legal_moves(Square::C7).unwrap();
        assert_eq!(moves.len(), 8);
        let kinds: Vec<PieceKind> = moves
            .iter()
            .filter(|mv| mv.to() == Square::C8)
            .filter_map(|mv| mv.promotion())
            .collect();
        assert_eq!(kinds, PieceKind::PROMOTIONS.to_vec());
        assert!(moves.iter().filter(|mv| mv.to() == Square::D8).all(|mv| mv.is_capture()));
    }

    #[test]
    fn en_passant_targets_the_skipped_square() {
        let board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2".parse().unwrap();
        let moves = board.pseudo_legal_moves(Square::E5).unwrap();
        let ep = moves.iter().find(|mv| mv.is_en_passant()).unwrap();
        assert_eq!(ep.to(), Square::D6);
        assert_eq!(board.piece(ep.captured().unwrap()).square(), Square::D5);
    }

    #[test]
    fn en_passant_needs_the_passed_pawn() {
        let board: Board = "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 2".parse().unwrap();
        assert_eq!(
            board.pseudo_legal_moves(Square::E5),
            Err(MoveError::MissingEnPassantPawn { square: Square::D5 })
        );
    }
}
