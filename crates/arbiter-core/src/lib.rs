//! Legal chess move generation on a padded mailbox board, with reversible
//! make/unmake and a perft harness.

mod board;
mod board_state;
mod castle_rights;
mod castling;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
mod movegen;
mod notation;
mod piece;
mod piece_index;
mod piece_kind;
mod square;

pub mod perft;

pub use board::{Board, Cell, PrettyBoard};
pub use board_state::BoardState;
pub use castle_rights::{CastleRights, CastleSide};
pub use castling::{CASTLING_RULES, CastlingRule};
pub use chess_move::{Move, MoveKind};
pub use color::Color;
pub use error::{BoardError, FenError, MoveError, NotationError};
pub use fen::{KIWIPETE_FEN, STARTING_FEN};
pub use movegen::{Annotations, GameStatus};
pub use notation::CoordinateMove;
pub use perft::{PerftCounts, divide, perft, perft_parallel};
pub use piece::{Piece, PieceId};
pub use piece_index::PieceIndex;
pub use piece_kind::PieceKind;
pub use square::{Square, SquareColor};
