use super::super::types::{Color, MoveList, Piece, PieceKind};
use super::super::Position;

const SLIDERS: [PieceKind; 3] = [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen];

impl Position {
    pub(super) fn generate_slider_moves(&self, side: Color, moves: &mut MoveList) {
        for kind in SLIDERS {
            let piece = Piece::new(side, kind);
            for &from in self.squares_of(piece) {
                for &dir in piece.directions() {
                    let mut to = from.offset(dir);
                    while self.push_step(side, from, to, moves) {
                        to = to.offset(dir);
                    }
                }
            }
        }
    }
}
