//! Error types for position parsing, board validation, move execution and
//! move-notation decoding.

use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string has no fields or more than 6 space-separated fields.
    #[error("expected 1 to 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index (0 = rank 8 in FEN, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is not "-" or a valid algebraic square.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter is not a valid number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed position fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawn found on back rank at {square}")]
    PawnOnBackRank {
        /// Where the pawn stands.
        square: Square,
    },
    /// The side that just moved has its king attacked.
    #[error("side not to move ({color}) is in check")]
    OpponentInCheck {
        /// The side not to move.
        color: Color,
    },
}

/// Broken invariants detected while generating, making or unmaking moves.
///
/// Each of these means an upstream defect: the board is not in the state the
/// move (or the caller) assumed. They are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Moves were requested from, or a move departs from, an empty square.
    #[error("no piece on {square}")]
    EmptySquare {
        /// The empty square.
        square: Square,
    },
    /// The piece standing on the origin square is not the move's mover.
    #[error("piece on {square} is not the piece this move was generated for")]
    MoverMismatch {
        /// The origin square.
        square: Square,
    },
    /// An en passant target has no capturable pawn behind it.
    #[error("no enemy pawn to capture en passant on {square}")]
    MissingEnPassantPawn {
        /// The square where the pawn was expected.
        square: Square,
    },
    /// A capture targets a piece that is not live on the board.
    #[error("piece from {origin} is not on the board and cannot be captured")]
    NotLive {
        /// Origin square of the targeted piece.
        origin: Square,
    },
    /// A restore targets a piece absent from the capture archive.
    #[error("piece from {origin} is not in the capture archive")]
    NotCaptured {
        /// Origin square of the targeted piece.
        origin: Square,
    },
    /// A restore targets a square that is already occupied.
    #[error("cannot restore piece onto occupied square {square}")]
    SquareOccupied {
        /// The occupied square.
        square: Square,
    },
    /// Only pawns promote.
    #[error("cannot promote {kind} on {square}: not a pawn")]
    NotAPawn {
        /// Where the piece stands.
        square: Square,
        /// Its current kind.
        kind: PieceKind,
    },
    /// Pawns promote only to knight, bishop, rook or queen.
    #[error("invalid promotion kind: {kind}")]
    InvalidPromotion {
        /// The requested kind.
        kind: PieceKind,
    },
    /// Demotion was requested for a piece that is already a pawn.
    #[error("cannot demote pawn on {square}")]
    NotPromoted {
        /// Where the pawn stands.
        square: Square,
    },
    /// A castle move whose king destination matches no castling variant.
    #[error("no castling variant moves the king to {square}")]
    UnknownCastle {
        /// The king destination.
        square: Square,
    },
    /// Unmake was called with no state left on the history stack.
    #[error("state history is empty")]
    HistoryUnderflow,
}

/// Errors from decoding coordinate move notation such as `e2e4` or `e7e8q`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// The input does not have the shape `<square><square>[promotion]`.
    #[error("unreadable coordinate notation: \"{input}\"")]
    Unreadable {
        /// The raw input.
        input: String,
    },
    /// A square name is not a valid algebraic square.
    #[error("invalid square name: \"{found}\"")]
    InvalidSquare {
        /// The invalid name.
        found: String,
    },
    /// No legal move matches the input.
    #[error("illegal move: {input}")]
    Illegal {
        /// The raw input.
        input: String,
    },
    /// More than one legal move matches the input (a promotion without its piece).
    #[error("ambiguous move: {input} matches {count} legal moves")]
    Ambiguous {
        /// The raw input.
        input: String,
        /// Number of matching moves.
        count: usize,
    },
    /// Move generation itself failed.
    #[error(transparent)]
    Move(#[from] MoveError),
}
