//! Error types for board operations.
//!
//! Input errors (`SquareError`, `FenError`, `SetupError`, `MoveParseError`)
//! are recoverable and never leave a position half-modified. `InternalError`
//! means the board caches or the undo stack are corrupt; callers abort the
//! current operation when they see one.

use std::fmt;

use super::types::{Piece, Square};

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Not two characters `a`-`h` then `1`-`8`
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Rejected piece placement when building a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Piece placed on a border cell
    OffBoardSquare { square: Square },
    /// Two pieces placed on the same square
    DuplicateSquare { square: Square },
    /// More of one piece than a piece list holds
    TooManyPieces { piece: Piece },
    /// En passant target not on the third or sixth rank
    InvalidEnPassant { square: Square },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::OffBoardSquare { square } => {
                write!(f, "Square {square:?} is not on the board")
            }
            SetupError::DuplicateSquare { square } => {
                write!(f, "Square {square} holds more than one piece")
            }
            SetupError::TooManyPieces { piece } => {
                write!(f, "Too many pieces of type '{piece}'")
            }
            SetupError::InvalidEnPassant { square } => {
                write!(f, "Invalid en passant square {square}")
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN needs 4 to 6 whitespace separated fields
    WrongFieldCount { found: usize },
    /// Invalid piece character in placement field
    InvalidPiece { char: char },
    /// Placement field does not have 8 ranks
    WrongRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    BadRankLength { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Halfmove or fullmove counter is not a number
    InvalidCounter { found: String },
    /// Fields parsed but the placement was rejected
    Setup(SetupError),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "FEN must have 4 to 6 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::BadRankLength { rank, files } => {
                write!(f, "Rank {rank} describes {files} files instead of 8")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}'")
            }
            FenError::Setup(err) => write!(f, "Invalid position: {err}"),
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::Setup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SetupError> for FenError {
    fn from(err: SetupError) -> Self {
        FenError::Setup(err)
    }
}

/// Error type for move text parsing failures
///
/// Text that is well formed but matches no legal move is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Legality test hit a corrupt position
    Internal(InternalError),
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::Internal(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MoveParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveParseError::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InternalError> for MoveParseError {
    fn from(err: InternalError) -> Self {
        MoveParseError::Internal(err)
    }
}

/// Broken board invariant. Not recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// Board access on a border cell
    OffBoardSquare { square: Square },
    /// Expected a piece on an empty square
    EmptySquare { square: Square },
    /// Expected an empty square, found a piece
    OccupiedSquare { square: Square, piece: Piece },
    /// Board holds a piece its piece list does not know about
    PieceListMismatch { piece: Piece, square: Square },
    /// Piece list already at capacity
    PieceListFull { piece: Piece },
    /// Captured piece in the move differs from the board
    CaptureMismatch {
        square: Square,
        expected: Piece,
        found: Option<Piece>,
    },
    /// Castle move to a square that is not a castling destination
    InvalidCastleTarget { square: Square },
    /// Make on a position with no side to move
    NoSideToMove,
    /// Undo stack full
    HistoryOverflow { capacity: usize },
    /// Unmake with an empty undo stack
    HistoryUnderflow,
    /// A derived cache disagrees with a recount from the board
    CacheMismatch { detail: String },
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::OffBoardSquare { square } => {
                write!(f, "internal error: access to off-board cell {square:?}")
            }
            InternalError::EmptySquare { square } => {
                write!(f, "internal error: no piece on {square}")
            }
            InternalError::OccupiedSquare { square, piece } => {
                write!(f, "internal error: {square} already holds '{piece}'")
            }
            InternalError::PieceListMismatch { piece, square } => {
                write!(f, "internal error: '{piece}' on {square} missing from its piece list")
            }
            InternalError::PieceListFull { piece } => {
                write!(f, "internal error: piece list for '{piece}' is full")
            }
            InternalError::CaptureMismatch {
                square,
                expected,
                found,
            } => match found {
                Some(found) => write!(
                    f,
                    "internal error: move captures '{expected}' on {square} but board has '{found}'"
                ),
                None => write!(
                    f,
                    "internal error: move captures '{expected}' on {square} but it is empty"
                ),
            },
            InternalError::InvalidCastleTarget { square } => {
                write!(f, "internal error: {square} is not a castling destination")
            }
            InternalError::NoSideToMove => write!(f, "internal error: no side to move"),
            InternalError::HistoryOverflow { capacity } => {
                write!(f, "internal error: undo history exceeds {capacity} plies")
            }
            InternalError::HistoryUnderflow => {
                write!(f, "internal error: unmake with empty undo history")
            }
            InternalError::CacheMismatch { detail } => {
                write!(f, "internal error: cache mismatch: {detail}")
            }
        }
    }
}

impl std::error::Error for InternalError {}
