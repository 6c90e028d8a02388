//! Pieces as persistent entities with a fixed identity and a mutable kind.

use std::fmt;

use crate::color::Color;
use crate::error::MoveError;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Handle of a piece in the board's piece arena.
///
/// Handles are assigned once when the position is set up and stay valid for
/// the life of the board, whether or not the piece is currently captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    pub(crate) const fn new(index: usize) -> PieceId {
        debug_assert!(index < 256);
        PieceId(index as u8)
    }

    /// Return the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A chess piece.
///
/// `origin` is the square the piece stood on when the position was set up and
/// is its permanent identity. `square` is where it stands now, or where it was
/// captured.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    origin: Square,
    square: Square,
}

impl Piece {
    /// Create a piece standing on its origin square.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, origin: Square) -> Piece {
        Piece {
            color,
            kind,
            origin,
            square: origin,
        }
    }

    /// Parse a FEN character into a piece standing on `origin`.
    ///
    /// Uppercase letters produce White pieces; lowercase letters produce Black pieces.
    pub fn from_fen_char(c: char, origin: Square) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color, origin))
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn origin(&self) -> Square {
        self.origin
    }

    /// Current square, or the last square occupied if the piece is captured.
    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Only the board's placement primitive may move a piece.
    #[inline]
    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    /// Turn this pawn into `kind`.
    pub fn promote(&mut self, kind: PieceKind) -> Result<(), MoveError> {
        if self.kind != PieceKind::Pawn {
            return Err(MoveError::NotAPawn {
                square: self.square,
                kind: self.kind,
            });
        }
        if !kind.is_promotion_target() {
            return Err(MoveError::InvalidPromotion { kind });
        }
        self.kind = kind;
        Ok(())
    }

    /// Turn a promoted piece back into a pawn, returning the kind it had.
    pub fn demote(&mut self) -> Result<PieceKind, MoveError> {
        if self.kind == PieceKind::Pawn {
            return Err(MoveError::NotPromoted {
                square: self.square,
            });
        }
        let old = self.kind;
        self.kind = PieceKind::Pawn;
        Ok(old)
    }

    /// Return the FEN character: uppercase for White, lowercase for Black.
    #[inline]
    pub const fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.kind.fen_char().to_ascii_uppercase(),
            Color::Black => self.kind.fen_char(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({} from {} on {})", self.fen_char(), self.origin, self.square)
    }
}
