//! Board squares on a padded 10x12 index space.
//!
//! The 8x8 board sits inside a border two cells deep above and below and one
//! cell deep on each side. Knight, king, pawn and sliding steps become fixed
//! offsets on the linear index, and any step that leaves the board lands on a
//! border cell, so one lookup detects running off the edge.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;

/// Width of a padded row.
pub const PADDED_WIDTH: usize = 10;

/// Number of cells in the padded index space.
pub const PADDED_SIZE: usize = 120;

/// `ON_BOARD[i]` is `true` when padded index `i` is one of the 64 playable squares.
const ON_BOARD: [bool; PADDED_SIZE] = {
    let mut table = [false; PADDED_SIZE];
    let mut i = 0;
    while i < PADDED_SIZE {
        let row = i / PADDED_WIDTH;
        let col = i % PADDED_WIDTH;
        table[i] = row >= 2 && row <= 9 && col >= 1 && col <= 8;
        i += 1;
    }
    table
};

/// Shade of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareColor {
    Light,
    Dark,
}

/// A playable square, stored as its padded index.
///
/// Ordering follows rank-major order from a1 to h8.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of playable squares.
    pub const COUNT: usize = 64;

    /// Create a square from a zero-based file and rank.
    ///
    /// # Panics
    ///
    /// Debug-asserts that both coordinates are below 8.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square((rank + 2) * PADDED_WIDTH as u8 + file + 1)
    }

    /// Create a square from zero-based coordinates, returning `None` if out of range.
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square::new(file, rank))
        } else {
            None
        }
    }

    /// Create a square from a padded index, returning `None` for border cells.
    #[inline]
    pub const fn from_padded(index: usize) -> Option<Square> {
        if index < PADDED_SIZE && ON_BOARD[index] {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// Create a square from a padded index already known to be playable.
    #[inline]
    pub(crate) const fn from_padded_unchecked(index: usize) -> Square {
        debug_assert!(ON_BOARD[index]);
        Square(index as u8)
    }

    /// Parse an algebraic square name such as `"e4"`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Square::new(file - b'a', rank - b'1'))
    }

    /// Return the padded index (21..=98).
    #[inline]
    pub const fn padded(self) -> usize {
        self.0 as usize
    }

    /// Return the dense index, a1 = 0 through h8 = 63.
    #[inline]
    pub const fn index(self) -> usize {
        self.rank() as usize * 8 + self.file() as usize
    }

    /// Return the zero-based file (0 = a).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % PADDED_WIDTH as u8 - 1
    }

    /// Return the zero-based rank (0 = rank 1).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / PADDED_WIDTH as u8 - 2
    }

    /// Return the shade of this square; a1 is dark.
    #[inline]
    pub const fn color(self) -> SquareColor {
        if (self.file() + self.rank()) % 2 == 0 {
            SquareColor::Dark
        } else {
            SquareColor::Light
        }
    }

    /// Step by a padded offset, returning `None` if the step leaves the board.
    #[inline]
    pub fn offset(self, delta: i8) -> Option<Square> {
        let target = self.0 as isize + delta as isize;
        if target < 0 {
            return None;
        }
        Square::from_padded(target as usize)
    }

    /// Return `true` if `other` is one king step away.
    #[inline]
    pub const fn is_adjacent_to(self, other: Square) -> bool {
        let df = self.file().abs_diff(other.file());
        let dr = self.rank().abs_diff(other.rank());
        df <= 1 && dr <= 1 && (df | dr) != 0
    }

    /// Iterate over all 64 squares in dense order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(|i| Square::new(i % 8, i / 8))
    }

    pub const A1: Square = Square::new(0, 0);
    pub const B1: Square = Square::new(1, 0);
    pub const C1: Square = Square::new(2, 0);
    pub const D1: Square = Square::new(3, 0);
    pub const E1: Square = Square::new(4, 0);
    pub const F1: Square = Square::new(5, 0);
    pub const G1: Square = Square::new(6, 0);
    pub const H1: Square = Square::new(7, 0);
    pub const A2: Square = Square::new(0, 1);
    pub const B2: Square = Square::new(1, 1);
    pub const C2: Square = Square::new(2, 1);
    pub const D2: Square = Square::new(3, 1);
    pub const E2: Square = Square::new(4, 1);
    pub const F2: Square = Square::new(5, 1);
    pub const G2: Square = Square::new(6, 1);
    pub const H2: Square = Square::new(7, 1);
    pub const A3: Square = Square::new(0, 2);
    pub const B3: Square = Square::new(1, 2);
    pub const C3: Square = Square::new(2, 2);
    pub const D3: Square = Square::new(3, 2);
    pub const E3: Square = Square::new(4, 2);
    pub const F3: Square = Square::new(5, 2);
    pub const G3: Square = Square::new(6, 2);
    pub const H3: Square = Square::new(7, 2);
    pub const A4: Square = Square::new(0, 3);
    pub const B4: Square = Square::new(1, 3);
    pub const C4: Square = Square::new(2, 3);
    pub const D4: Square = Square::new(3, 3);
    pub const E4: Square = Square::new(4, 3);
    pub const F4: Square = Square::new(5, 3);
    pub const G4: Square = Square::new(6, 3);
    pub const H4: Square = Square::new(7, 3);
    pub const A5: Square = Square::new(0, 4);
    pub const B5: Square = Square::new(1, 4);
    pub const C5: Square = Square::new(2, 4);
    pub const D5: Square = Square::new(3, 4);
    pub const E5: Square = Square::new(4, 4);
    pub const F5: Square = Square::new(5, 4);
    pub const G5: Square = Square::new(6, 4);
    pub const H5: Square = Square::new(7, 4);
    pub const A6: Square = Square::new(0, 5);
    pub const B6: Square = Square::new(1, 5);
    pub const C6: Square = Square::new(2, 5);
    pub const D6: Square = Square::new(3, 5);
    pub const E6: Square = Square::new(4, 5);
    pub const F6: Square = Square::new(5, 5);
    pub const G6: Square = Square::new(6, 5);
    pub const H6: Square = Square::new(7, 5);
    pub const A7: Square = Square::new(0, 6);
    pub const B7: Square = Square::new(1, 6);
    pub const C7: Square = Square::new(2, 6);
    pub const D7: Square = Square::new(3, 6);
    pub const E7: Square = Square::new(4, 6);
    pub const F7: Square = Square::new(5, 6);
    pub const G7: Square = Square::new(6, 6);
    pub const H7: Square = Square::new(7, 6);
    pub const A8: Square = Square::new(0, 7);
    pub const B8: Square = Square::new(1, 7);
    pub const C8: Square = Square::new(2, 7);
    pub const D8: Square = Square::new(3, 7);
    pub const E8: Square = Square::new(4, 7);
    pub const F8: Square = Square::new(5, 7);
    pub const G8: Square = Square::new(6, 7);
    pub const H8: Square = Square::new(7, 7);
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Square, NotationError> {
        Square::from_algebraic(s).ok_or_else(|| NotationError::InvalidSquare {
            found: s.to_string(),
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}
