//! Move generation: pseudo-legal candidates, the legality filter and game status.
//!
//! Candidates come from walking offset tables on the padded board. Each one is
//! then made, the mover's king is tested for attack, and the move is unmade.
//! Enumeration order is fixed (pieces kings first then by origin square,
//! offsets in table order), so results are reproducible.

mod attacks;
mod king;
mod pawns;
mod rays;

use std::ops::ControlFlow;

use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::error::MoveError;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::king::gen_king;
use self::pawns::gen_pawn;
use self::rays::{movement, walk_rays};

/// Which annotations the legality filter attaches to accepted moves.
///
/// Mate detection searches the opponent's replies and only runs for moves
/// that check, so turning off `checks` turns off both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Annotations {
    pub checks: bool,
    pub mates: bool,
}

impl Annotations {
    /// Annotate nothing; the fastest setting.
    pub const NONE: Annotations = Annotations {
        checks: false,
        mates: false,
    };

    /// Annotate checks and mates.
    pub const ALL: Annotations = Annotations {
        checks: true,
        mates: true,
    };
}

impl Default for Annotations {
    fn default() -> Annotations {
        Annotations::ALL
    }
}

/// Whether the side to move can play on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check and has no legal move.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

/// Knight, bishop, rook, queen and the king's plain steps.
fn gen_steps_and_slides(board: &Board, id: PieceId, out: &mut Vec<Move>) {
    let piece = board.piece(id);
    let (from, color, kind) = (piece.square(), piece.color(), piece.kind());
    let shape = movement(kind);
    let flow = walk_rays(board, from, shape.offsets, shape.reach, |to, occupant| {
        match occupant {
            None => out.push(Move::new(from, to, id, kind, color, None, MoveKind::Simple)),
            Some(victim) if board.piece(victim).color() != color => {
                out.push(Move::new(from, to, id, kind, color, Some(victim), MoveKind::Simple));
            }
            Some(_) => {}
        }
        ControlFlow::Continue(())
    });
    debug_assert!(flow.is_continue());
}

impl Board {
    /// Append the pseudo-legal moves of one live piece to `out`.
    fn pseudo_legal_into(&self, id: PieceId, out: &mut Vec<Move>) -> Result<(), MoveError> {
        match self.piece(id).kind() {
            PieceKind::Pawn => gen_pawn(self, id, out)?,
            PieceKind::King => gen_king(self, id, out),
            _ => gen_steps_and_slides(self, id, out),
        }
        Ok(())
    }

    /// Generate the moves of the piece on `sq` that obey movement and
    /// occupancy rules, without checking king safety.
    pub fn pseudo_legal_moves(&self, sq: Square) -> Result<Vec<Move>, MoveError> {
        let id = self
            .occupant(sq)
            .ok_or(MoveError::EmptySquare { square: sq })?;
        let mut out = Vec::with_capacity(28);
        self.pseudo_legal_into(id, &mut out)?;
        Ok(out)
    }

    /// Generate the legal moves of the piece on `sq`, annotated according to
    /// [`Board::annotations`].
    pub fn legal_moves(&mut self, sq: Square) -> Result<Vec<Move>, MoveError> {
        let candidates = self.pseudo_legal_moves(sq)?;
        self.retain_legal(candidates)
    }

    /// Generate every legal move of `color`, annotated according to
    /// [`Board::annotations`].
    pub fn all_legal_moves(&mut self, color: Color) -> Result<Vec<Move>, MoveError> {
        let mut candidates = Vec::with_capacity(64);
        for id in self.pieces().live_ids(color) {
            self.pseudo_legal_into(id, &mut candidates)?;
        }
        self.retain_legal(candidates)
    }

    /// Return `true` if `color` has at least one legal move.
    ///
    /// Stops at the first legal move found and never annotates.
    pub fn has_legal_moves(&mut self, color: Color) -> Result<bool, MoveError> {
        let mut candidates = Vec::with_capacity(28);
        for id in self.pieces().live_ids(color) {
            candidates.clear();
            self.pseudo_legal_into(id, &mut candidates)?;
            for mv in &candidates {
                if self.is_legal(mv)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Classify the position for the side to move.
    pub fn status(&mut self) -> Result<GameStatus, MoveError> {
        let us = self.side_to_move();
        if self.has_legal_moves(us)? {
            Ok(GameStatus::Ongoing)
        } else if self.is_in_check(us) {
            Ok(GameStatus::Checkmate)
        } else {
            Ok(GameStatus::Stalemate)
        }
    }

    /// Return `true` if `mv` would take a king.
    ///
    /// Only possible when moves are asked for the side that is not to move
    /// while the side to move stands in check. Such a move is never legal and
    /// must not reach [`Board::make`].
    fn takes_king(&self, mv: &Move) -> bool {
        mv.captured()
            .is_some_and(|victim| self.piece(victim).kind() == PieceKind::King)
    }

    /// Make `mv`, test whether the mover's king survives, and unmake it.
    fn is_legal(&mut self, mv: &Move) -> Result<bool, MoveError> {
        if self.takes_king(mv) {
            return Ok(false);
        }
        self.make(mv)?;
        let legal = !self.is_in_check(mv.color());
        self.unmake(mv)?;
        Ok(legal)
    }

    fn retain_legal(&mut self, candidates: Vec<Move>) -> Result<Vec<Move>, MoveError> {
        let annotations = self.annotations();
        let mut legal = Vec::with_capacity(candidates.len());
        for mut mv in candidates {
            if self.takes_king(&mv) {
                continue;
            }
            let us = mv.color();
            self.make(&mv)?;
            if !self.is_in_check(us) {
                if annotations.checks && self.is_in_check(!us) {
                    let mate = annotations.mates && !self.has_legal_moves(!us)?;
                    mv.annotate(true, mate);
                }
                legal.push(mv);
            }
            self.unmake(&mv)?;
        }
        Ok(legal)
    }
}
