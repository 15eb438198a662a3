use std::str::FromStr;
use std::sync::Arc;

use super::error::{FenError, MoveParseError};
use super::{CastlingRights, Color, Move, Piece, PieceKind, Position, Square};
use crate::zobrist::ZobristKeys;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN using the shared hash keys.
    ///
    /// The halfmove and fullmove fields may be omitted (0 and 1).
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with_keys(fen, ZobristKeys::shared())
    }

    pub fn from_fen_with_keys(fen: &str, keys: Arc<ZobristKeys>) -> Result<Self, FenError> {
        log::trace!("parsing FEN '{fen}'");
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::WrongFieldCount { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        let mut pieces = Vec::with_capacity(32);
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if let Some(sq) = Square::from_file_rank(file as u8, rank) {
                    pieces.push((sq, piece));
                }
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank: rank as usize + 1,
                    files: file,
                });
            }
        }

        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        for c in parts[2].chars() {
            match c {
                'K' => castling.set(CastlingRights::WHITE_KING),
                'Q' => castling.set(CastlingRights::WHITE_QUEEN),
                'k' => castling.set(CastlingRights::BLACK_KING),
                'q' => castling.set(CastlingRights::BLACK_QUEEN),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            text => Some(text.parse::<Square>().map_err(|_| FenError::InvalidEnPassant {
                found: text.to_string(),
            })?),
        };

        let counter = |idx: usize, default: u32| -> Result<u32, FenError> {
            parts.get(idx).map_or(Ok(default), |text| {
                text.parse().map_err(|_| FenError::InvalidCounter {
                    found: (*text).to_string(),
                })
            })
        };
        let halfmove = counter(4, 0)?;
        let fullmove = counter(5, 1)?;

        Ok(Position::from_pieces(
            keys, pieces, side, castling, en_passant, halfmove, fullmove,
        )?)
    }

    /// Six-field FEN of the current position.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                match Square::from_file_rank(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side {
            Some(Color::Black) => "b",
            _ => "w",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number()
        )
    }

    /// Match long algebraic text (`e2e4`, `e7e8q`) against the legal moves.
    ///
    /// `Ok(None)` means the text is well formed but no legal move matches.
    /// A promotion needs its suffix, and a suffix only matches a promotion.
    pub fn parse_move_text(&mut self, text: &str) -> Result<Option<Move>, MoveParseError> {
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: text.len() });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
                    Some(kind)
                }
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        for mv in self.legal_moves()? {
            if mv.from() == from
                && mv.to() == to
                && mv.promoted().map(Piece::kind) == promotion
            {
                return Ok(Some(mv));
            }
        }
        Ok(None)
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_fen_matches_new() {
        let pos = Position::from_fen(START_FEN).unwrap();
        assert_eq!(pos, Position::new());
        assert_eq!(pos.to_fen(), START_FEN);
    }

    #[test]
    fn fen_round_trip_preserves_fields() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq e3 7 42";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(pos.side_to_move(), Some(Color::Black));
        assert_eq!(pos.en_passant(), Some("e3".parse().unwrap()));
        assert_eq!(pos.halfmove_clock(), 7);
        assert_eq!(pos.fullmove_number(), 42);
    }

    #[test]
    fn counters_are_optional() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn fen_errors() {
        assert_eq!(
            Position::from_fen("8/8/8 w - -"),
            Err(FenError::WrongRankCount { found: 3 })
        );
        assert!(matches!(
            Position::from_fen("rnbqkbnr/pppppppp w KQkq"),
            Err(FenError::WrongFieldCount { found: 3 })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4X3 w - -"),
            Err(FenError::InvalidPiece { char: 'X' })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K4 w - -"),
            Err(FenError::BadRankLength { rank: 1, files: 9 })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w Z -"),
            Err(FenError::InvalidCastling { char: 'Z' })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e9"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::InvalidCounter { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e4"),
            Err(FenError::Setup(_))
        ));
    }

    #[test]
    fn missing_king_is_accepted() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(pos.king_square(Color::White), None);
        assert!(!pos.is_king_attacked());
    }

    #[test]
    fn parse_move_text_matches_legal_moves() {
        let mut pos = Position::new();
        let mv = pos.parse_move_text("e2e4").unwrap().unwrap();
        assert!(mv.is_pawn_start());
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(pos.parse_move_text("e2e5").unwrap(), None);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn parse_move_text_promotion_suffix() {
        let mut pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let knight = pos.parse_move_text("a7a8n").unwrap().unwrap();
        assert_eq!(knight.promoted(), Some(Piece::WhiteKnight));
        assert_eq!(pos.parse_move_text("a7a8").unwrap(), None);
        assert_eq!(pos.parse_move_text("a1a2q").unwrap(), None);
    }

    #[test]
    fn parse_move_text_skips_illegal_moves() {
        // The e-file bishop is pinned against the king.
        let mut pos = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert_eq!(pos.parse_move_text("e2d3").unwrap(), None);
        assert!(pos.parse_move_text("e1d1").unwrap().is_some());
    }

    #[test]
    fn parse_move_text_errors() {
        let mut pos = Position::new();
        assert_eq!(
            pos.parse_move_text("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert!(matches!(
            pos.parse_move_text("z2e4"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert_eq!(
            pos.parse_move_text("e2e4k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        );
    }
}
