//! Move descriptors.

use std::fmt;

use crate::color::Color;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The shape of a move. Promotion is orthogonal and carried separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A step or slide, with or without a capture on the destination.
    Simple,
    /// A pawn advancing two squares from its start rank.
    DoublePawnPush,
    /// A pawn capturing the pawn that just passed it.
    EnPassant,
    /// The king move of a castle; the rook follows from the castling table.
    Castle,
}

/// One transition from a position to the next.
///
/// Fields are fixed at generation time. The only thing the legality filter
/// adds afterwards is the `check`/`mate` annotation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    mover: PieceId,
    piece: PieceKind,
    color: Color,
    captured: Option<PieceId>,
    kind: MoveKind,
    promotion: Option<PieceKind>,
    check: bool,
    mate: bool,
}

impl Move {
    /// Create an unannotated move of `kind`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        from: Square,
        to: Square,
        mover: PieceId,
        piece: PieceKind,
        color: Color,
        captured: Option<PieceId>,
        kind: MoveKind,
    ) -> Move {
        Move {
            from,
            to,
            mover,
            piece,
            color,
            captured,
            kind,
            promotion: None,
            check: false,
            mate: false,
        }
    }

    /// Return a copy of this move that promotes to `kind`.
    #[inline]
    pub(crate) const fn promoting_to(self, kind: PieceKind) -> Move {
        Move {
            promotion: Some(kind),
            ..self
        }
    }

    #[inline]
    pub(crate) fn annotate(&mut self, check: bool, mate: bool) {
        self.check = check;
        self.mate = mate;
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Handle of the moving piece.
    #[inline]
    pub const fn mover(&self) -> PieceId {
        self.mover
    }

    /// Kind of the moving piece before the move (a pawn for promotions).
    #[inline]
    pub const fn piece(&self) -> PieceKind {
        self.piece
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Handle of the captured piece. For en passant this piece is not on `to`.
    #[inline]
    pub const fn captured(&self) -> Option<PieceId> {
        self.captured
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Set by the legality filter when the move attacks the enemy king.
    #[inline]
    pub const fn is_check(&self) -> bool {
        self.check
    }

    /// Set by the legality filter when the move checks and leaves no reply.
    #[inline]
    pub const fn is_mate(&self) -> bool {
        self.mate
    }

    /// Format in coordinate notation, e.g. `"e2e4"`, `"e7e8q"`, `"e1g1"`.
    pub fn to_uci(&self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.fen_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())?;
        if self.mate {
            write!(f, "#")
        } else if self.check {
            write!(f, "+")
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Move")
            .field("uci", &self.to_uci())
            .field("piece", &self.piece)
            .field("color", &self.color)
            .field("kind", &self.kind)
            .field("capture", &self.captured.is_some())
            .field("check", &self.check)
            .field("mate", &self.mate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveKind};
    use crate::color::Color;
    use crate::piece::PieceId;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn pawn_push() -> Move {
        Move::new(
            Square::E7,
            Square::E8,
            PieceId::new(3),
            PieceKind::Pawn,
            Color::White,
            None,
            MoveKind::Simple,
        )
    }

    #[test]
    fn uci_formatting() {
        let mv = pawn_push();
        assert_eq!(mv.to_uci(), "e7e8");
        assert_eq!(mv.promoting_to(PieceKind::Knight).to_uci(), "e7e8n");
        assert_eq!(format!("{}", mv.promoting_to(PieceKind::Queen)), "e7e8q");
    }

    #[test]
    fn annotations_show_in_display() {
        let mut mv = pawn_push().promoting_to(PieceKind::Rook);
        assert!(!mv.is_check());
        mv.annotate(true, false);
        assert_eq!(format!("{mv}"), "e7e8r+");
        mv.annotate(true, true);
        assert_eq!(format!("{mv}"), "e7e8r#");
    }

    #[test]
    fn flags() {
        let mv = pawn_push();
        assert!(!mv.is_capture());
        assert!(!mv.is_promotion());
        assert!(mv.promoting_to(PieceKind::Queen).is_promotion());
        assert_eq!(mv.piece(), PieceKind::Pawn);

        let ep = Move::new(
            Square::E5,
            Square::D6,
            PieceId::new(3),
            PieceKind::Pawn,
            Color::White,
            Some(PieceId::new(20)),
            MoveKind::EnPassant,
        );
        assert!(ep.is_capture());
        assert!(ep.is_en_passant());
        assert!(!ep.is_castle());
    }
}
