use super::super::types::{
    Cell, CastlingRights, Color, Move, MoveList, Piece, PieceKind, Square, KING_DIRS,
};
use super::super::Position;

struct CastlePath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    // Squares between king and rook.
    between: &'static [Square],
    // King start and the square it crosses.
    safe: [Square; 2],
}

const CASTLES: [[CastlePath; 2]; 2] = [
    [
        CastlePath {
            right: CastlingRights::WHITE_KING,
            king_from: Square::E1,
            king_to: Square::G1,
            rook_from: Square::H1,
            between: &[Square::F1, Square::G1],
            safe: [Square::E1, Square::F1],
        },
        CastlePath {
            right: CastlingRights::WHITE_QUEEN,
            king_from: Square::E1,
            king_to: Square::C1,
            rook_from: Square::A1,
            between: &[Square::D1, Square::C1, Square::B1],
            safe: [Square::E1, Square::D1],
        },
    ],
    [
        CastlePath {
            right: CastlingRights::BLACK_KING,
            king_from: Square::E8,
            king_to: Square::G8,
            rook_from: Square::H8,
            between: &[Square::F8, Square::G8],
            safe: [Square::E8, Square::F8],
        },
        CastlePath {
            right: CastlingRights::BLACK_QUEEN,
            king_from: Square::E8,
            king_to: Square::C8,
            rook_from: Square::A8,
            between: &[Square::D8, Square::C8, Square::B8],
            safe: [Square::E8, Square::D8],
        },
    ],
];

impl Position {
    pub(super) fn generate_king_moves(&self, side: Color, moves: &mut MoveList) {
        let king = Piece::new(side, PieceKind::King);
        for &from in self.squares_of(king) {
            for &dir in &KING_DIRS {
                self.push_step(side, from, from.offset(dir), moves);
            }
        }
    }

    /// The destination square is not tested for attacks here; make rejects
    /// a castle that ends in check like any other move.
    pub(super) fn generate_castles(&self, side: Color, moves: &mut MoveList) {
        let king = Piece::new(side, PieceKind::King);
        let rook = Piece::new(side, PieceKind::Rook);
        for path in &CASTLES[side.index()] {
            if !self.castling.has(path.right) {
                continue;
            }
            if self.board[path.king_from.index()] != Cell::Occupied(king)
                || self.board[path.rook_from.index()] != Cell::Occupied(rook)
            {
                continue;
            }
            if !path.between.iter().all(|sq| self.board[sq.index()].is_empty()) {
                continue;
            }
            let them = side.opponent();
            if path.safe.iter().any(|&sq| self.is_square_attacked(sq, them)) {
                continue;
            }
            moves.push(Move::castle(path.king_from, path.king_to));
        }
    }
}
