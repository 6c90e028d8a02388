//! Lookup of live pieces by color, kind and origin, plus the capture archive.

use std::collections::BTreeMap;

use crate::color::Color;
use crate::error::MoveError;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Owns every piece of a position and tracks which are live and which are captured.
///
/// Pieces live in an arena addressed by [`PieceId`] and are never deallocated.
/// Both the live sets and the archive are keyed by origin square, which keeps
/// iteration order deterministic and makes restoring a capture unambiguous.
/// A piece is in exactly one of the two at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceIndex {
    arena: Vec<Piece>,
    live: [[BTreeMap<Square, PieceId>; PieceKind::COUNT]; Color::COUNT],
    captured: [BTreeMap<Square, PieceId>; Color::COUNT],
    kings: [Option<PieceId>; Color::COUNT],
}

impl PieceIndex {
    /// Create an empty index.
    pub fn new() -> PieceIndex {
        PieceIndex::default()
    }

    /// Store a new piece in the arena and add it to the live set.
    pub fn insert(&mut self, piece: Piece) -> PieceId {
        let id = PieceId::new(self.arena.len());
        self.arena.push(piece);
        self.add(id);
        id
    }

    /// Add a piece to the live set, dropping any stale archive entry.
    pub fn add(&mut self, id: PieceId) {
        let piece = self.arena[id.index()];
        let color = piece.color().index();
        if piece.kind() == PieceKind::King {
            self.kings[color] = Some(id);
        }
        self.captured[color].remove(&piece.origin());
        self.live[color][piece.kind().index()].insert(piece.origin(), id);
    }

    /// Move a piece from the live set to the capture archive.
    pub fn remove(&mut self, id: PieceId) -> Result<(), MoveError> {
        let piece = self.arena[id.index()];
        debug_assert!(piece.kind() != PieceKind::King, "kings never leave the index");
        let color = piece.color().index();
        if self.live[color][piece.kind().index()]
            .remove(&piece.origin())
            .is_none()
        {
            return Err(MoveError::NotLive {
                origin: piece.origin(),
            });
        }
        self.captured[color].insert(piece.origin(), id);
        Ok(())
    }

    /// Re-key a piece whose kind just changed from `old`.
    ///
    /// Archive state is untouched.
    pub fn change_kind(&mut self, old: PieceKind, id: PieceId) {
        let piece = self.arena[id.index()];
        let color = piece.color().index();
        self.live[color][old.index()].remove(&piece.origin());
        self.live[color][piece.kind().index()].insert(piece.origin(), id);
    }

    /// Return a captured piece to the live set. The exact inverse of [`PieceIndex::remove`].
    pub fn restore(&mut self, id: PieceId) -> Result<(), MoveError> {
        let piece = self.arena[id.index()];
        let color = piece.color().index();
        match self.captured[color].remove(&piece.origin()) {
            Some(archived) if archived == id => {
                self.live[color][piece.kind().index()].insert(piece.origin(), id);
                Ok(())
            }
            Some(other) => {
                self.captured[color].insert(piece.origin(), other);
                Err(MoveError::NotCaptured {
                    origin: piece.origin(),
                })
            }
            None => Err(MoveError::NotCaptured {
                origin: piece.origin(),
            }),
        }
    }

    /// Return the king of `color`.
    #[inline]
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.kings[color.index()]
    }

    /// Return the piece behind a handle.
    #[inline]
    pub fn get(&self, id: PieceId) -> &Piece {
        &self.arena[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.arena[id.index()]
    }

    /// Return `true` if the piece is on the board.
    pub fn is_live(&self, id: PieceId) -> bool {
        let piece = self.get(id);
        self.live[piece.color().index()][piece.kind().index()].get(&piece.origin()) == Some(&id)
    }

    /// Return `true` if the piece sits in the capture archive.
    pub fn is_captured(&self, id: PieceId) -> bool {
        let piece = self.get(id);
        self.captured[piece.color().index()].get(&piece.origin()) == Some(&id)
    }

    /// Iterate over live pieces of one color and kind, in origin order.
    pub fn live(&self, color: Color, kind: PieceKind) -> impl Iterator<Item = PieceId> + '_ {
        self.live[color.index()][kind.index()].values().copied()
    }

    /// Return every live piece of `color`, kings first and pawns last.
    pub fn live_ids(&self, color: Color) -> Vec<PieceId> {
        PieceKind::GENERATION_ORDER
            .into_iter()
            .flat_map(|kind| self.live(color, kind))
            .collect()
    }

    /// Iterate over captured pieces of `color`, in origin order.
    pub fn captured(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.captured[color.index()].values().copied()
    }

    /// Number of live pieces of one color and kind.
    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.live[color.index()][kind.index()].len()
    }

    /// Iterate over every piece ever placed, live or captured.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.arena
            .iter()
            .enumerate()
            .map(|(i, piece)| (PieceId::new(i), piece))
    }
}

#[cfg(test)]
mod tests {
    use super::PieceIndex;
    use crate::color::Color;
    use crate::error::MoveError;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn small_index() -> PieceIndex {
        let mut index = PieceIndex::new();
        index.insert(Piece::new(PieceKind::King, Color::White, Square::E1));
        index.insert(Piece::new(PieceKind::Pawn, Color::White, Square::G7));
        index.insert(Piece::new(PieceKind::Knight, Color::Black, Square::F3));
        index.insert(Piece::new(PieceKind::King, Color::Black, Square::E8));
        index
    }

    #[test]
    fn kings_are_tracked() {
        let index = small_index();
        let white_king = index.king(Color::White).unwrap();
        assert_eq!(index.get(white_king).origin(), Square::E1);
        let black_king = index.king(Color::Black).unwrap();
        assert_eq!(index.get(black_king).origin(), Square::E8);
    }

    #[test]
    fn remove_and_restore_are_inverse() {
        let mut index = small_index();
        let before = index.clone();
        let knight = index.live(Color::Black, PieceKind::Knight).next().unwrap();

        index.remove(knight).unwrap();
        assert!(!index.is_live(knight));
        assert!(index.is_captured(knight));
        assert_eq!(index.count(Color::Black, PieceKind::Knight), 0);
        assert_eq!(index.captured(Color::Black).collect::<Vec<_>>(), vec![knight]);

        index.restore(knight).unwrap();
        assert!(index.is_live(knight));
        assert!(!index.is_captured(knight));
        assert_eq!(index, before);
    }

    #[test]
    fn restore_requires_an_archive_entry() {
        let mut index = small_index();
        let knight = index.live(Color::Black, PieceKind::Knight).next().unwrap();
        assert_eq!(
            index.restore(knight),
            Err(MoveError::NotCaptured { origin: Square::F3 })
        );
        index.remove(knight).unwrap();
        assert_eq!(
            index.remove(knight),
            Err(MoveError::NotLive { origin: Square::F3 })
        );
    }

    #[test]
    fn change_kind_rekeys_without_touching_archive() {
        let mut index = small_index();
        let pawn = index.live(Color::White, PieceKind::Pawn).next().unwrap();

        index.get_mut(pawn).promote(PieceKind::Queen).unwrap();
        index.change_kind(PieceKind::Pawn, pawn);
        assert_eq!(index.count(Color::White, PieceKind::Pawn), 0);
        assert_eq!(index.live(Color::White, PieceKind::Queen).next(), Some(pawn));

        let old = index.get_mut(pawn).demote().unwrap();
        index.change_kind(old, pawn);
        assert_eq!(index.count(Color::White, PieceKind::Queen), 0);
        assert_eq!(index.live(Color::White, PieceKind::Pawn).next(), Some(pawn));
        assert_eq!(index.captured(Color::White).count(), 0);
    }

    #[test]
    fn live_ids_put_kings_first() {
        let index = small_index();
        let ids = index.live_ids(Color::White);
        assert_eq!(ids.len(), 2);
        assert_eq!(index.get(ids[0]).kind(), PieceKind::King);
        assert_eq!(index.get(ids[1]).kind(), PieceKind::Pawn);
    }
}
