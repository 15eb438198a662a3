//! Core chess types.
//!
//! - `Square` - a cell of the 120-cell mailbox, plus the 120/64 tables
//! - `Piece`, `PieceKind`, `Color`, `Cell` - piece identity and metadata
//! - `Bitboard` - 64-bit set used for pawn occupancy
//! - `Move` and `MoveList` - packed moves
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{Cell, Color, Piece, PieceKind, BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS};
pub use square::{Square, BOARD_SQ_NUM};

pub(crate) use square::{RANK_2, RANK_7};
