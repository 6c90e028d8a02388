//! The chess board: cells, pieces, per-ply state and its history.

use std::fmt;

use crate::board_state::BoardState;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::{BoardError, MoveError};
use crate::movegen::Annotations;
use crate::piece::{Piece, PieceId};
use crate::piece_index::PieceIndex;
use crate::piece_kind::PieceKind;
use crate::square::{PADDED_SIZE, Square};

/// Content of one cell of the padded index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Border cell outside the 8x8 area.
    OffBoard,
    Empty,
    Occupied(PieceId),
}

/// Back rank of the starting position, a-file to h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chess position that can be moved forward and back.
///
/// The board owns the cells, the [`PieceIndex`] and a stack of superseded
/// [`BoardState`]s. Cells and pieces reference each other by [`PieceId`] and
/// square; every placement change goes through [`Board::put`] and
/// [`Board::lift`] so the two sides never disagree.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; PADDED_SIZE],
    pieces: PieceIndex,
    state: BoardState,
    history: Vec<BoardState>,
    annotations: Annotations,
}

impl Board {
    /// Create a board with no pieces.
    ///
    /// The result is not a valid position until both kings are placed; see
    /// [`Board::validate`].
    pub fn empty(state: BoardState) -> Board {
        let mut cells = [Cell::OffBoard; PADDED_SIZE];
        for sq in Square::all() {
            cells[sq.padded()] = Cell::Empty;
        }
        Board {
            cells,
            pieces: PieceIndex::new(),
            state,
            history: Vec::new(),
            annotations: Annotations::default(),
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut board = Board::empty(BoardState::INITIAL);
        // Same insertion order as FEN parsing: rank 8 first, a-file to h-file.
        for rank in (0u8..8).rev() {
            for file in 0u8..8 {
                let sq = Square::new(file, rank);
                let (color, kind) = match rank {
                    0 => (Color::White, BACK_RANK[file as usize]),
                    1 => (Color::White, PieceKind::Pawn),
                    6 => (Color::Black, PieceKind::Pawn),
                    7 => (Color::Black, BACK_RANK[file as usize]),
                    _ => continue,
                };
                board.add_piece(Piece::new(kind, color, sq));
            }
        }
        board
    }

    /// Place a new piece on its origin square during setup.
    ///
    /// The square must be empty.
    pub(crate) fn add_piece(&mut self, piece: Piece) -> PieceId {
        debug_assert_eq!(self.cells[piece.origin().padded()], Cell::Empty);
        let id = self.pieces.insert(piece);
        self.cells[piece.origin().padded()] = Cell::Occupied(id);
        id
    }

    /// Return the cell at a padded index.
    #[inline]
    pub fn cell(&self, padded: usize) -> Cell {
        self.cells[padded]
    }

    /// Return the handle of the piece on `sq`, if any.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<PieceId> {
        match self.cells[sq.padded()] {
            Cell::Occupied(id) => Some(id),
            _ => None,
        }
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<&Piece> {
        self.occupant(sq).map(|id| self.pieces.get(id))
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.padded()] == Cell::Empty
    }

    /// Return the piece behind a handle, live or captured.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        self.pieces.get(id)
    }

    /// Return the piece index for inspection.
    #[inline]
    pub fn pieces(&self) -> &PieceIndex {
        &self.pieces
    }

    /// Return the square of the king for the given side.
    ///
    /// # Panics
    ///
    /// Panics if the board has no king for the given color (invalid board state).
    pub fn king_square(&self, color: Color) -> Square {
        let king = self
            .pieces
            .king(color)
            .expect("board must have a king for each side");
        self.pieces.get(king).square()
    }

    /// Return the current per-ply state.
    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move()
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.state.castling()
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.state.en_passant()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.state.halfmove_clock()
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.state.fullmove_number()
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.state.ply()
    }

    /// Number of moves currently made on top of the position as constructed.
    #[inline]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn annotations(&self) -> Annotations {
        self.annotations
    }

    /// Choose which annotations the legality filter computes.
    pub fn set_annotations(&mut self, annotations: Annotations) {
        self.annotations = annotations;
    }

    /// Put a piece on an empty square, updating both the cell and the piece.
    #[inline]
    pub(crate) fn put(&mut self, id: PieceId, sq: Square) {
        debug_assert_eq!(self.cells[sq.padded()], Cell::Empty, "put onto occupied {sq}");
        self.cells[sq.padded()] = Cell::Occupied(id);
        self.pieces.get_mut(id).set_square(sq);
    }

    /// Empty a square, returning what stood there.
    ///
    /// The lifted piece keeps `sq` as its last known square.
    #[inline]
    pub(crate) fn lift(&mut self, sq: Square) -> Result<PieceId, MoveError> {
        let id = self
            .occupant(sq)
            .ok_or(MoveError::EmptySquare { square: sq })?;
        self.cells[sq.padded()] = Cell::Empty;
        Ok(id)
    }

    /// Move whatever stands on `from` to the empty square `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Result<PieceId, MoveError> {
        let id = self.lift(from)?;
        self.put(id, to);
        Ok(id)
    }

    /// Take the piece on `sq` off the board and archive it.
    pub(crate) fn capture_on(&mut self, sq: Square) -> Result<PieceId, MoveError> {
        let id = self.lift(sq)?;
        self.pieces.remove(id)?;
        Ok(id)
    }

    /// Bring an archived piece back onto its last square.
    pub(crate) fn uncapture(&mut self, id: PieceId) -> Result<(), MoveError> {
        let sq = self.pieces.get(id).square();
        if !self.is_empty(sq) {
            return Err(MoveError::SquareOccupied { square: sq });
        }
        self.pieces.restore(id)?;
        self.put(id, sq);
        Ok(())
    }

    /// Promote the piece `id` and re-key it in the index.
    pub(crate) fn promote(&mut self, id: PieceId, kind: PieceKind) -> Result<(), MoveError> {
        self.pieces.get_mut(id).promote(kind)?;
        self.pieces.change_kind(PieceKind::Pawn, id);
        Ok(())
    }

    /// Turn the promoted piece `id` back into a pawn and re-key it.
    pub(crate) fn demote(&mut self, id: PieceId) -> Result<(), MoveError> {
        let old = self.pieces.get_mut(id).demote()?;
        self.pieces.change_kind(old, id);
        Ok(())
    }

    /// Push the current state and install its successor.
    pub(crate) fn push_state(&mut self, next: BoardState) {
        self.history.push(self.state);
        self.state = next;
    }

    /// Reinstate the state that was current before the last push.
    pub(crate) fn pop_state(&mut self) -> Result<(), MoveError> {
        self.state = self.history.pop().ok_or(MoveError::HistoryUnderflow)?;
        Ok(())
    }

    /// Validate the structural integrity of the board.
    ///
    /// Each side has exactly one king, no pawn stands on the first or eighth
    /// rank, and the side not to move is not in check.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self.pieces.count(color, PieceKind::King);
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
            for id in self.pieces.live(color, PieceKind::Pawn) {
                let square = self.pieces.get(id).square();
                if square.rank() == 0 || square.rank() == 7 {
                    return Err(BoardError::PawnOnBackRank { square });
                }
            }
        }
        let idle = !self.side_to_move();
        if self.is_in_check(idle) {
            return Err(BoardError::OpponentInCheck { color: idle });
        }
        Ok(())
    }

    /// Serialize the piece placement, rank 8 first, as in the first FEN field.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0u8..8).rev() {
            let mut gap = 0u8;
            for file in 0u8..8 {
                match self.piece_on(Square::new(file, rank)) {
                    Some(piece) => {
                        if gap > 0 {
                            out.push((b'0' + gap) as char);
                            gap = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push((b'0' + gap) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = self
                    .0
                    .piece_on(Square::new(file, rank))
                    .map_or('.', Piece::fen_char);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
