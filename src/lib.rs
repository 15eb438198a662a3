//! A mailbox chess engine: 120-cell board, pseudo-legal move generation,
//! reversible make/unmake with Zobrist hashing, and negamax alpha-beta search.

pub mod board;
pub mod eval;
pub mod logging;
pub mod uci;
pub mod zobrist;

pub use board::{Color, Move, Piece, Position, Square};
pub use zobrist::ZobristKeys;
