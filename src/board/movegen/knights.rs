use super::super::types::{Color, MoveList, Piece, PieceKind, KNIGHT_DIRS};
use super::super::Position;

impl Position {
    pub(super) fn generate_knight_moves(&self, side: Color, moves: &mut MoveList) {
        let knight = Piece::new(side, PieceKind::Knight);
        for &from in self.squares_of(knight) {
            for &dir in &KNIGHT_DIRS {
                self.push_step(side, from, from.offset(dir), moves);
            }
        }
    }
}
