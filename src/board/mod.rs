//! Chess position representation and game logic.
//!
//! Uses a 120-cell mailbox with piece lists for move generation and an
//! incremental make/unmake protocol with Zobrist hashing.
//! Supports full chess rules including castling, en passant, and promotions.
//!
//! # Example
//! ```
//! use mailbox_chess::board::Position;
//!
//! let mut pos = Position::new();
//! let moves = pos.legal_moves().unwrap();
//! assert_eq!(moves.len(), 20);
//! ```

mod attacks;
mod builder;
mod consistency;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{FenError, InternalError, MoveParseError, SetupError, SquareError};
pub use fen::START_FEN;
pub use state::{Position, Undo, MAX_GAME_PLY, MAX_PIECES_PER_TYPE};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Cell, Color, Move, MoveList, MoveListIntoIter, Piece,
    PieceKind, Square, BISHOP_DIRS, BOARD_SQ_NUM, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS,
};

pub use search::{search, SearchLimits, SearchResult, Searcher};
