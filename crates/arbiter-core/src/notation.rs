//! Coordinate move notation: `e2e4`, `e2 e4`, `e7e8q`, `e7e8=Q`.

use crate::board::Board;
use crate::chess_move::Move;
use crate::error::NotationError;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Origin, destination and promotion read from a notation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl CoordinateMove {
    /// Read coordinate notation without consulting any position.
    pub fn parse(input: &str) -> Result<CoordinateMove, NotationError> {
        let unreadable = || NotationError::Unreadable {
            input: input.to_string(),
        };
        let text = input.trim();
        if !text.is_ascii() || text.len() < 4 {
            return Err(unreadable());
        }

        let from: Square = text[..2].parse()?;
        let rest = text[2..].trim_start();
        if rest.len() < 2 {
            return Err(unreadable());
        }
        let to: Square = rest[..2].parse()?;

        let mut suffix = rest[2..].trim_start();
        if let Some(stripped) = suffix.strip_prefix('=') {
            suffix = stripped;
        }
        let promotion = match suffix.len() {
            0 => None,
            1 => {
                let c = suffix.chars().next().ok_or_else(unreadable)?;
                let kind = PieceKind::from_fen_char(c)
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or_else(unreadable)?;
                Some(kind)
            }
            _ => return Err(unreadable()),
        };

        Ok(CoordinateMove {
            from,
            to,
            promotion,
        })
    }
}

impl Board {
    /// Resolve coordinate notation to the one legal move it names.
    ///
    /// The piece on the origin square must belong to the side to move. A
    /// promoting move written without its piece matches every promotion and
    /// is reported as ambiguous.
    pub fn parse_move(&mut self, input: &str) -> Result<Move, NotationError> {
        let coords = CoordinateMove::parse(input)?;
        let illegal = || NotationError::Illegal {
            input: input.to_string(),
        };

        let mover = self.piece_on(coords.from).ok_or_else(illegal)?;
        if mover.color() != self.side_to_move() {
            return Err(illegal());
        }

        let mut matches: Vec<Move> = self
            .legal_moves(coords.from)?
            .into_iter()
            .filter(|mv| mv.to() == coords.to)
            .filter(|mv| coords.promotion.is_none() || mv.promotion() == coords.promotion)
            .collect();

        match matches.len() {
            0 => Err(illegal()),
            1 => Ok(matches.remove(0)),
            count => Err(NotationError::Ambiguous {
                input: input.to_string(),
                count,
            }),
        }
    }
}
