use super::super::types::{Cell, Color, Move, MoveList, Piece, PieceKind, RANK_2, RANK_7};
use super::super::Position;

impl Position {
    pub(super) fn generate_pawn_moves(&self, side: Color, moves: &mut MoveList) {
        let (forward, captures, start_rank, promo_rank): (i8, [i8; 2], u8, u8) = match side {
            Color::White => (10, [9, 11], RANK_2, RANK_7),
            Color::Black => (-10, [-9, -11], RANK_7, RANK_2),
        };
        let pawn = Piece::new(side, PieceKind::Pawn);

        for &from in self.squares_of(pawn) {
            let promotes = from.rank_unchecked() == promo_rank;

            let one = from.offset(forward);
            if self.board[one.index()].is_empty() {
                push_pawn_move(side, Move::quiet(from, one), promotes, moves);
                let two = one.offset(forward);
                if from.rank_unchecked() == start_rank && self.board[two.index()].is_empty() {
                    moves.push(Move::pawn_start(from, two));
                }
            }

            for delta in captures {
                let to = from.offset(delta);
                match self.board[to.index()] {
                    Cell::Occupied(target) if target.color() != side => {
                        push_pawn_move(side, Move::capture(from, to, target), promotes, moves);
                    }
                    Cell::Empty if self.en_passant == Some(to) => {
                        moves.push(Move::en_passant(from, to));
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Push `mv`, or its four promotion variants when the pawn leaves the
/// seventh rank of its color.
fn push_pawn_move(side: Color, mv: Move, promotes: bool, moves: &mut MoveList) {
    if promotes {
        for kind in PieceKind::PROMOTIONS {
            moves.push(mv.with_promotion(Piece::new(side, kind)));
        }
    } else {
        moves.push(mv);
    }
}
