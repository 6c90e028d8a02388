//! FEN string parsing and serialization for [`Board`].
//!
//! Trailing fields may be omitted; they default to `w - - 0 1`. Perft suites
//! commonly quote positions without the two move counters.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::board::Board;
use crate::board_state::BoardState;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The "Kiwipete" perft position, rich in castling, en passant and pins.
pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn parse_counter(field: &'static str, raw: Option<&str>, default: u16) -> Result<u16, FenError> {
    match raw {
        None => Ok(default),
        Some(s) => s.parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
            field,
            found: s.to_string(),
        }),
    }
}

fn parse_placement(placement: &str) -> Result<Vec<Piece>, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut pieces = Vec::with_capacity(32);
    for (rank_index, rank_str) in ranks.iter().enumerate() {
        // FEN ranks go from 8 to 1 (top to bottom)
        let rank = 7 - rank_index as u8;
        let mut file: u8 = 0;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                let length = usize::from(file) + digit as usize;
                if length > 8 {
                    return Err(FenError::BadRankLength { rank_index, length });
                }
                file += digit as u8;
                continue;
            }
            if file >= 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file as usize + 1,
                });
            }
            let piece = Piece::from_fen_char(c, Square::new(file, rank))
                .ok_or(FenError::InvalidPieceChar { character: c })?;
            pieces.push(piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file as usize,
            });
        }
    }
    Ok(pieces)
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.is_empty() || fields.len() > 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let pieces = parse_placement(fields[0])?;

        let side_to_move = match fields.get(1) {
            None => Color::White,
            Some(s) => Color::from_fen(s).ok_or_else(|| FenError::InvalidColor {
                found: s.to_string(),
            })?,
        };

        let castling = match fields.get(2) {
            None => CastleRights::NONE,
            Some(s) => CastleRights::from_fen(s)?,
        };

        let en_passant = match fields.get(3) {
            None | Some(&"-") => None,
            Some(s) => {
                let sq = Square::from_algebraic(s)
                    .filter(|sq| sq.rank() == 2 || sq.rank() == 5)
                    .ok_or_else(|| FenError::InvalidEnPassant {
                        found: s.to_string(),
                    })?;
                Some(sq)
            }
        };

        let halfmove_clock = parse_counter("halfmove clock", fields.get(4).copied(), 0)?;
        let fullmove_number = parse_counter("fullmove number", fields.get(5).copied(), 1)?;

        let state = BoardState::new(
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );
        let mut board = Board::empty(state);
        for piece in pieces {
            board.add_piece(piece);
        }

        board.validate()?;
        debug!(fen, side = %side_to_move, %castling, "position parsed");
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.serialize(), self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::{KIWIPETE_FEN, STARTING_FEN};
    use crate::board::Board;
    use crate::color::Color;
    use crate::error::{BoardError, FenError};
    use crate::square::Square;

    fn roundtrip(fen: &str) {
        let board: Board = fen.parse().unwrap();
        let output = format!("{board}");
        assert_eq!(output, fen, "FEN roundtrip failed");
        let board2: Board = output.parse().unwrap();
        assert_eq!(board, board2);
    }

    #[test]
    fn roundtrip_starting() {
        roundtrip(STARTING_FEN);
    }

    #[test]
    fn roundtrip_sicilian() {
        roundtrip("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2");
    }

    #[test]
    fn roundtrip_kiwipete() {
        roundtrip(KIWIPETE_FEN);
    }

    #[test]
    fn roundtrip_endgame() {
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    }

    #[test]
    fn roundtrip_black_to_move() {
        roundtrip("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        roundtrip("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 12 40");
    }

    #[test]
    fn starting_position_matches_fen() {
        let from_constructor = Board::starting_position();
        let from_fen: Board = STARTING_FEN.parse().unwrap();
        assert_eq!(from_constructor, from_fen);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let board: Board = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"
            .parse()
            .unwrap();
        assert_eq!(format!("{board}"), KIWIPETE_FEN);

        let bare: Board = "4k3/8/8/8/8/8/8/4K3".parse().unwrap();
        assert_eq!(bare.side_to_move(), Color::White);
        assert_eq!(format!("{bare}"), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn fullmove_and_side_set_ply() {
        let board: Board = "4k3/8/8/8/8/8/8/4K3 b - - 3 10".parse().unwrap();
        assert_eq!(board.ply(), 19);
        assert_eq!(board.fullmove_number(), 10);
        assert_eq!(board.halfmove_clock(), 3);
    }

    #[test]
    fn error_wrong_field_count() {
        assert_eq!(
            "".parse::<Board>(),
            Err(FenError::WrongFieldCount { found: 0 })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1 extra".parse::<Board>(),
            Err(FenError::WrongFieldCount { found: 7 })
        );
    }

    #[test]
    fn error_wrong_rank_count() {
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>(),
            Err(FenError::WrongRankCount { found: 7 })
        );
    }

    #[test]
    fn error_invalid_piece_char() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>();
        assert_eq!(result, Err(FenError::InvalidPieceChar { character: 'X' }));
    }

    #[test]
    fn error_bad_rank_length() {
        let result = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>();
        assert_eq!(
            result,
            Err(FenError::BadRankLength {
                rank_index: 1,
                length: 7
            })
        );
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1".parse::<Board>().is_err());
    }

    #[test]
    fn error_overlong_empty_rank() {
        let long_rank = "8".repeat(33);
        let fen = format!("4k3/8/8/8/{long_rank}/8/8/4K3 w - - 0 1");
        assert_eq!(
            fen.parse::<Board>(),
            Err(FenError::BadRankLength {
                rank_index: 4,
                length: 16
            })
        );
        assert_eq!(
            "4k3/8/8/8/44p/8/8/4K3 w - - 0 1".parse::<Board>(),
            Err(FenError::BadRankLength {
                rank_index: 4,
                length: 9
            })
        );
        assert_eq!(
            "4k3/8/8/8/p8/8/8/4K3 w - - 0 1".parse::<Board>(),
            Err(FenError::BadRankLength {
                rank_index: 4,
                length: 9
            })
        );
    }

    #[test]
    fn error_invalid_color() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Board>();
        assert!(matches!(result, Err(FenError::InvalidColor { .. })));
    }

    #[test]
    fn error_invalid_castling() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1".parse::<Board>();
        assert_eq!(result, Err(FenError::InvalidCastlingChar { character: 'X' }));
    }

    #[test]
    fn error_invalid_en_passant() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1".parse::<Board>();
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // Only the third and sixth ranks can hold a skipped square.
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1".parse::<Board>();
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn error_invalid_move_counter() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - abc 1".parse::<Board>();
        assert!(matches!(
            result,
            Err(FenError::InvalidMoveCounter {
                field: "halfmove clock",
                ..
            })
        ));
    }

    #[test]
    fn error_invalid_board() {
        let result = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>();
        assert_eq!(
            result,
            Err(FenError::InvalidBoard {
                source: BoardError::InvalidKingCount {
                    color: Color::Black,
                    count: 0
                }
            })
        );
        let result = "4k2P/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>();
        assert_eq!(
            result,
            Err(FenError::InvalidBoard {
                source: BoardError::PawnOnBackRank { square: Square::H8 }
            })
        );
        // Black is in check from the rook but White is to move.
        let result = "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1".parse::<Board>();
        assert_eq!(
            result,
            Err(FenError::InvalidBoard {
                source: BoardError::OpponentInCheck {
                    color: Color::Black
                }
            })
        );
        assert!("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1".parse::<Board>().is_ok());
    }
}
