//! Move execution: make and unmake on a single board.
//!
//! Every change goes through the board's placement primitives so cells and
//! pieces stay in sync. `unmake` undoes `make` step for step in reverse, and
//! the per-ply state is popped rather than recomputed.

use crate::board::Board;
use crate::castling::CastlingRule;
use crate::chess_move::{Move, MoveKind};
use crate::error::MoveError;
use crate::piece_kind::PieceKind;

impl Board {
    /// Apply `mv`, which must have been generated for this exact position.
    ///
    /// # Panics
    ///
    /// Panics if the move would capture a king. Legal generation never
    /// produces such a move, so reaching it means the legality filter is broken.
    pub fn make(&mut self, mv: &Move) -> Result<(), MoveError> {
        let (from, to) = (mv.from(), mv.to());
        if self.occupant(from) != Some(mv.mover()) {
            return Err(MoveError::MoverMismatch { square: from });
        }

        match mv.kind() {
            MoveKind::Simple | MoveKind::DoublePawnPush => {
                // Clear the destination first so no square is ever doubly occupied.
                if let Some(victim) = self.occupant(to) {
                    if self.piece(victim).kind() == PieceKind::King {
                        panic!("king capture attempted by {mv:?} in {self}");
                    }
                    debug_assert_eq!(Some(victim), mv.captured());
                    self.capture_on(to)?;
                }
                self.relocate(from, to)?;
            }
            MoveKind::EnPassant => {
                let behind = to
                    .offset(-mv.color().pawn_forward())
                    .ok_or(MoveError::MissingEnPassantPawn { square: to })?;
                let victim = self
                    .occupant(behind)
                    .filter(|&id| {
                        let piece = self.piece(id);
                        piece.kind() == PieceKind::Pawn && piece.color() != mv.color()
                    })
                    .ok_or(MoveError::MissingEnPassantPawn { square: behind })?;
                debug_assert_eq!(Some(victim), mv.captured());
                self.capture_on(behind)?;
                self.relocate(from, to)?;
            }
            MoveKind::Castle => {
                let rule = CastlingRule::by_king_destination(to)
                    .ok_or(MoveError::UnknownCastle { square: to })?;
                if self.is_empty(rule.rook.0) {
                    return Err(MoveError::EmptySquare {
                        square: rule.rook.0,
                    });
                }
                self.relocate(rule.king.0, rule.king.1)?;
                self.relocate(rule.rook.0, rule.rook.1)?;
            }
        }

        if let Some(kind) = mv.promotion() {
            self.promote(mv.mover(), kind)?;
        }

        let next = self.state().next(mv);
        self.push_state(next);
        Ok(())
    }

    /// Reverse `mv`, which must be the last move made.
    pub fn unmake(&mut self, mv: &Move) -> Result<(), MoveError> {
        let (from, to) = (mv.from(), mv.to());
        if self.occupant(to) != Some(mv.mover()) {
            return Err(MoveError::MoverMismatch { square: to });
        }

        if mv.is_promotion() {
            self.demote(mv.mover())?;
        }

        match mv.kind() {
            MoveKind::Simple | MoveKind::DoublePawnPush => {
                self.relocate(to, from)?;
                if let Some(victim) = mv.captured() {
                    self.uncapture(victim)?;
                }
            }
            MoveKind::EnPassant => {
                let victim = mv
                    .captured()
                    .ok_or(MoveError::MissingEnPassantPawn { square: to })?;
                self.relocate(to, from)?;
                self.uncapture(victim)?;
            }
            MoveKind::Castle => {
                let rule = CastlingRule::by_king_destination(to)
                    .ok_or(MoveError::UnknownCastle { square: to })?;
                if self.is_empty(rule.rook.1) {
                    return Err(MoveError::EmptySquare {
                        square: rule.rook.1,
                    });
                }
                self.relocate(rule.rook.1, rule.rook.0)?;
                self.relocate(rule.king.1, rule.king.0)?;
            }
        }

        self.pop_state()
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::board_state::BoardState;
    use crate::castle_rights::CastleRights;
    use crate::chess_move::{Move, MoveKind};
    use crate::color::Color;
    use crate::error::MoveError;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    fn find(board: &mut Board, uci: &str) -> Move {
        let side = board.side_to_move();
        board
            .all_legal_moves(side)
            .unwrap()
            .into_iter()
            .find(|mv| mv.to_uci() == uci)
            .unwrap_or_else(|| panic!("{uci} not legal in {board}"))
    }

    /// Make `uci`, check the resulting FEN, unmake, and check the board is unchanged.
    fn make_unmake(fen: &str, uci: &str, expected: &str) {
        let mut board = board(fen);
        let before = board.clone();
        let mv = find(&mut board, uci);
        board.make(&mv).unwrap();
        assert_eq!(format!("{board}"), expected, "after {uci}");
        board.unmake(&mv).unwrap();
        assert_eq!(board, before, "unmake {uci}");
        assert_eq!(format!("{board}"), fen);
    }

    #[test]
    fn quiet_move() {
        make_unmake(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "g1f3",
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1",
        );
    }

    #[test]
    fn double_push_sets_en_passant() {
        make_unmake(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2e4",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        );
    }

    #[test]
    fn capture() {
        make_unmake(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "e4d5",
            "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2",
        );
    }

    #[test]
    fn en_passant_removes_the_pawn_behind() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        make_unmake(
            fen,
            "e5f6",
            "rnbqkbnr/ppp1p1pp/5P2/3p4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3",
        );

        let mut b = board(fen);
        let mv = find(&mut b, "e5f6");
        let victim = mv.captured().unwrap();
        b.make(&mv).unwrap();
        assert!(b.is_empty(Square::F5));
        assert!(b.pieces().is_captured(victim));
        assert_eq!(b.piece(victim).square(), Square::F5);
        b.unmake(&mv).unwrap();
        assert_eq!(b.occupant(Square::F5), Some(victim));
    }

    #[test]
    fn castling_moves_both_pieces() {
        make_unmake(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            "e1g1",
            "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1",
        );
        make_unmake(
            "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
            "e8c8",
            "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 1 2",
        );
    }

    #[test]
    fn promotion_and_demotion() {
        let fen = "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        make_unmake(fen, "a7a8q", "Qn2k3/8/8/8/8/8/8/4K3 b - - 0 1");
        make_unmake(fen, "a7b8n", "1N2k3/8/8/8/8/8/8/4K3 b - - 0 1");

        let mut b = board(fen);
        let mv = find(&mut b, "a7b8r");
        b.make(&mv).unwrap();
        assert_eq!(b.pieces().count(Color::White, PieceKind::Pawn), 0);
        assert_eq!(b.pieces().count(Color::White, PieceKind::Rook), 1);
        b.unmake(&mv).unwrap();
        assert_eq!(b.pieces().count(Color::White, PieceKind::Rook), 0);
        assert_eq!(b.piece_on(Square::A7).unwrap().kind(), PieceKind::Pawn);
    }

    #[test]
    fn capturing_a_rook_at_home_revokes_its_right() {
        make_unmake(
            "r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1",
            "g2h1",
            "r3k2r/8/8/8/8/8/8/R3K2b w Qkq - 0 2",
        );
    }

    #[test]
    fn stale_moves_are_rejected() {
        let mut b = Board::starting_position();
        let mv = find(&mut b, "e2e4");
        b.make(&mv).unwrap();
        assert_eq!(b.make(&mv), Err(MoveError::MoverMismatch { square: Square::E2 }));
        b.unmake(&mv).unwrap();
        assert_eq!(b.unmake(&mv), Err(MoveError::MoverMismatch { square: Square::E4 }));
        assert_eq!(b.castling(), CastleRights::ALL);
    }

    #[test]
    fn failed_en_passant_leaves_the_board_alone() {
        // The target is set but no pawn stands behind it.
        let mut b = board("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 2");
        let before = b.clone();
        let pawn = b.occupant(Square::E5).unwrap();
        let mv = Move::new(
            Square::E5,
            Square::D6,
            pawn,
            PieceKind::Pawn,
            Color::White,
            None,
            MoveKind::EnPassant,
        );
        assert_eq!(
            b.make(&mv),
            Err(MoveError::MissingEnPassantPawn { square: Square::D5 })
        );
        assert_eq!(b, before);
    }

    #[test]
    fn failed_castle_leaves_the_board_alone() {
        let mut b = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let before = b.clone();
        let king = b.occupant(Square::E1).unwrap();
        let mv = Move::new(
            Square::E1,
            Square::G1,
            king,
            PieceKind::King,
            Color::White,
            None,
            MoveKind::Castle,
        );
        assert_eq!(b.make(&mv), Err(MoveError::EmptySquare { square: Square::H1 }));
        assert_eq!(b, before);
    }

    #[test]
    #[should_panic(expected = "king capture")]
    fn king_capture_panics() {
        // Black to move with White's king already attacked: an impossible
        // position that notation parsing refuses, so it is built by hand.
        let mut b = Board::empty(BoardState::new(Color::Black, CastleRights::NONE, None, 0, 1));
        b.add_piece(Piece::new(PieceKind::King, Color::Black, Square::E8));
        b.add_piece(Piece::new(PieceKind::King, Color::White, Square::E1));
        b.add_piece(Piece::new(PieceKind::Rook, Color::Black, Square::A1));
        let rook_moves = b.pseudo_legal_moves(Square::A1).unwrap();
        let take_king = rook_moves.iter().find(|mv| mv.to() == Square::E1).unwrap();
        let _ = b.make(take_king);
    }
}
