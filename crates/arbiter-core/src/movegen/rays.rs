//! Offset tables, the per-kind movement table and the shared ray walker.

use std::ops::ControlFlow;

use crate::board::{Board, Cell};
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::square::Square;

pub(crate) const CARDINAL: [i8; 4] = [10, 1, -10, -1];
pub(crate) const DIAGONAL: [i8; 4] = [11, -9, -11, 9];
pub(crate) const KNIGHT: [i8; 8] = [21, 12, -8, -19, -21, -12, 8, 19];
pub(crate) const ROYAL: [i8; 8] = [10, 11, 1, -9, -10, -11, -1, 9];

/// Longest possible slide.
pub(crate) const FULL_REACH: u8 = 7;

/// Directions a piece moves in and how far it may go along each.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Movement {
    pub offsets: &'static [i8],
    pub reach: u8,
}

/// Movement of each kind, indexed by [`PieceKind::index`].
///
/// Pawns move asymmetrically and have their own generator, so their entry is empty.
const MOVEMENT: [Movement; PieceKind::COUNT] = [
    Movement {
        offsets: &[],
        reach: 0,
    },
    Movement {
        offsets: &KNIGHT,
        reach: 1,
    },
    Movement {
        offsets: &DIAGONAL,
        reach: FULL_REACH,
    },
    Movement {
        offsets: &CARDINAL,
        reach: FULL_REACH,
    },
    Movement {
        offsets: &ROYAL,
        reach: FULL_REACH,
    },
    Movement {
        offsets: &ROYAL,
        reach: 1,
    },
];

#[inline]
pub(crate) const fn movement(kind: PieceKind) -> Movement {
    MOVEMENT[kind.index()]
}

/// Walk outward from `from` along each offset, up to `reach` steps.
///
/// `visit` sees every square reached together with its occupant. A ray ends
/// at the board edge or on the first occupied square, after that square has
/// been visited. Returning `Break` from `visit` stops the whole walk.
pub(crate) fn walk_rays<F>(
    board: &Board,
    from: Square,
    offsets: &[i8],
    reach: u8,
    mut visit: F,
) -> ControlFlow<()>
where
    F: FnMut(Square, Option<PieceId>) -> ControlFlow<()>,
{
    for &delta in offsets {
        let mut index = from.padded();
        for _ in 0..reach {
            // The border is two cells deep, so one step never leaves the padded array.
            index = (index as isize + delta as isize) as usize;
            let occupant = match board.cell(index) {
                Cell::OffBoard => break,
                Cell::Empty => None,
                Cell::Occupied(id) => Some(id),
            };
            let flow = visit(Square::from_padded_unchecked(index), occupant);
            if flow.is_break() {
                return flow;
            }
            if occupant.is_some() {
                break;
            }
        }
    }
    ControlFlow::Continue(())
}
