//! Static position scoring.
//!
//! The search only calls [`Scorer::evaluate_absolute`].

use crate::board::{Color, Piece, PieceKind, Position};

pub trait Scorer {
    /// Centipawns, positive when white is better.
    fn evaluate(&self, pos: &Position) -> i32;

    /// Centipawns, positive when the side to move is better.
    fn evaluate_absolute(&self, pos: &Position) -> i32 {
        let score = self.evaluate(pos);
        match pos.side_to_move() {
            Some(Color::Black) => -score,
            _ => score,
        }
    }
}

/// Material difference only. Kings are not counted, so a missing king
/// never swamps the score.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialScorer;

fn material_without_king(pos: &Position, color: Color) -> i32 {
    let king = Piece::new(color, PieceKind::King);
    pos.material(color) - king.value() * pos.piece_count(king) as i32
}

impl Scorer for MaterialScorer {
    fn evaluate(&self, pos: &Position) -> i32 {
        material_without_king(pos, Color::White) - material_without_king(pos, Color::Black)
    }
}

/// Material plus piece-square bonuses for pawns, knights, bishops, and rooks.
#[derive(Clone, Copy, Debug, Default)]
pub struct PieceSquareScorer;

// White's view, a1 first. Black squares are mirrored by rank.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    10,  10,   0, -10, -10,   0,  10,  10,
     5,   0,   0,   5,   5,   0,   0,   5,
     0,   0,  10,  20,  20,  10,   0,   0,
     5,   5,   5,  10,  10,   5,   5,   5,
    10,  10,  10,  20,  20,  10,  10,  10,
    20,  20,  20,  30,  30,  20,  20,  20,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
     0, -10,   0,   0,   0,   0, -10,   0,
     0,   0,   0,   5,   5,   0,   0,   0,
     0,   0,  10,  10,  10,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   5,   0,
     5,  10,  15,  20,  20,  15,  10,   5,
     5,  10,  10,  20,  20,  10,  10,   5,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
     0,   0, -10,   0,   0, -10,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,  10,  15,  15,  10,   0,   0,
     0,  10,  15,  20,  20,  15,  10,   0,
     0,  10,  15,  20,  20,  15,  10,   0,
     0,   0,  10,  15,  15,  10,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
    25,  25,  25,  25,  25,  25,  25,  25,
     0,   0,   5,  10,  10,   5,   0,   0,
];

const TABLES: [(Piece, Piece, &[i32; 64]); 4] = [
    (Piece::WhitePawn, Piece::BlackPawn, &PAWN_TABLE),
    (Piece::WhiteKnight, Piece::BlackKnight, &KNIGHT_TABLE),
    (Piece::WhiteBishop, Piece::BlackBishop, &BISHOP_TABLE),
    (Piece::WhiteRook, Piece::BlackRook, &ROOK_TABLE),
];

impl Scorer for PieceSquareScorer {
    fn evaluate(&self, pos: &Position) -> i32 {
        let mut score = MaterialScorer.evaluate(pos);
        for (white, black, table) in TABLES {
            for sq in pos.squares_of(white) {
                if let Some(idx) = sq.sq64() {
                    score += table[idx];
                }
            }
            for sq in pos.squares_of(black) {
                if let Some(idx) = sq.sq64() {
                    score -= table[idx ^ 56];
                }
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let pos = Position::new();
        assert_eq!(MaterialScorer.evaluate(&pos), 0);
        assert_eq!(PieceSquareScorer.evaluate(&pos), 0);
    }

    #[test]
    fn absolute_flips_for_black() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();
        assert_eq!(MaterialScorer.evaluate(&white), 1000);
        assert_eq!(MaterialScorer.evaluate_absolute(&white), 1000);
        assert_eq!(MaterialScorer.evaluate_absolute(&black), -1000);
    }

    #[test]
    fn missing_king_is_not_material() {
        let lone = Position::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(MaterialScorer.evaluate(&lone), 0);
        let rook = Position::from_fen("8/8/8/8/8/8/8/KR6 w - - 0 1").unwrap();
        assert_eq!(PieceSquareScorer.evaluate(&rook), 550);
    }

    #[test]
    fn mirrored_positions_score_opposite() {
        let white = Position::from_fen("4k3/8/8/8/3N4/8/4P3/4K3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/4p3/8/3n4/8/8/8/4K3 w - - 0 1").unwrap();
        let w = PieceSquareScorer.evaluate(&white);
        assert!(w > MaterialScorer.evaluate(&white));
        assert_eq!(w, -PieceSquareScorer.evaluate(&black));
    }
}
