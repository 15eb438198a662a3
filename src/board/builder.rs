//! Fluent builder for constructing positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use mailbox_chess::board::{Color, Piece, PositionBuilder, Square};
//!
//! let pos = PositionBuilder::new()
//!     .piece(Square::E1, Piece::WhiteKing)
//!     .piece(Square::E8, Piece::BlackKing)
//!     .piece("a2".parse().unwrap(), Piece::WhitePawn)
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
//! ```

use std::sync::Arc;

use super::error::SetupError;
use super::{CastlingRights, Color, Piece, Position, Square};
use crate::zobrist::ZobristKeys;

/// A fluent builder over [`Position::from_pieces`].
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Square, Piece)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    keys: Option<Arc<ZobristKeys>>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            keys: None,
        }
    }

    /// Place a piece, replacing anything already on that square.
    #[must_use]
    pub fn piece(mut self, square: Square, piece: Piece) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self.pieces.push((square, piece));
        self
    }

    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Enable kingside castling for a color.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling_rights.set(CastlingRights::for_side(color, true));
        self
    }

    /// Enable queenside castling for a color.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling_rights.set(CastlingRights::for_side(color, false));
        self
    }

    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant_target = Some(target);
        self
    }

    /// Set the halfmove clock (for 50-move rule).
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Hash with `keys` instead of the shared table.
    #[must_use]
    pub fn keys(mut self, keys: Arc<ZobristKeys>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub fn build(self) -> Result<Position, SetupError> {
        Position::from_pieces(
            self.keys.unwrap_or_else(ZobristKeys::shared),
            self.pieces,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
            self.halfmove_clock,
            self.fullmove_number,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_builder_matches_fen() {
        let built = PositionBuilder::new()
            .piece(Square::E1, Piece::WhiteKing)
            .piece(Square::H1, Piece::WhiteRook)
            .piece(Square::E8, Piece::BlackKing)
            .castle_kingside(Color::White)
            .side_to_move(Color::Black)
            .halfmove_clock(4)
            .fullmove_number(12)
            .build()
            .unwrap();
        let parsed = Position::from_fen("4k3/8/8/8/8/8/8/4K2R b K - 4 12").unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_piece_replaces_and_clear_removes() {
        let pos = PositionBuilder::new()
            .piece(sq("d4"), Piece::WhiteKnight)
            .piece(sq("d4"), Piece::BlackQueen)
            .piece(sq("a1"), Piece::WhiteRook)
            .clear(sq("a1"))
            .build()
            .unwrap();
        assert_eq!(pos.piece_at(sq("d4")), Some(Piece::BlackQueen));
        assert_eq!(pos.piece_at(sq("a1")), None);
        assert_eq!(pos.piece_count(Piece::WhiteKnight), 0);
    }

    #[test]
    fn test_custom_keys_change_hash() {
        let shared = PositionBuilder::new()
            .piece(Square::E1, Piece::WhiteKing)
            .build()
            .unwrap();
        let custom = PositionBuilder::new()
            .piece(Square::E1, Piece::WhiteKing)
            .keys(Arc::new(ZobristKeys::from_seed(99)))
            .build()
            .unwrap();
        assert_ne!(shared.hash(), custom.hash());
        assert_eq!(custom.hash(), custom.compute_hash());
    }

    #[test]
    fn test_too_many_pieces() {
        let mut builder = PositionBuilder::new();
        for file in 0..8 {
            for rank in 2..4 {
                if let Some(s) = Square::from_file_rank(file, rank) {
                    builder = builder.piece(s, Piece::WhiteQueen);
                }
            }
        }
        assert_eq!(
            builder.build(),
            Err(SetupError::TooManyPieces {
                piece: Piece::WhiteQueen
            })
        );
        assert!(Position::from_fen(START_FEN).is_ok());
    }
}
