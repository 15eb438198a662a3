//! Pseudo-legal move generation.
//!
//! Moves obey piece movement but may leave the mover's king attacked;
//! [`Position::make_move`] rejects those.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::types::{Cell, Color, Move, MoveList, Square};
use super::error::InternalError;
use super::Position;

impl Position {
    /// All pseudo-legal moves for the side to move.
    ///
    /// Order: castling, pawns, knights, kings, then bishops, rooks, queens.
    /// A blank position with no side to move yields nothing.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let Some(side) = self.side else {
            return moves;
        };
        self.generate_castles(side, &mut moves);
        self.generate_pawn_moves(side, &mut moves);
        self.generate_knight_moves(side, &mut moves);
        self.generate_king_moves(side, &mut moves);
        self.generate_slider_moves(side, &mut moves);
        moves
    }

    /// True if `mv` is among the pseudo-legal moves of this position.
    #[must_use]
    pub fn move_exists(&self, mv: Move) -> bool {
        self.generate_moves().contains(mv)
    }

    /// Pseudo-legal moves that survive make, in generation order.
    pub fn legal_moves(&mut self) -> Result<MoveList, InternalError> {
        let mut legal = MoveList::new();
        for mv in self.generate_moves() {
            if self.make_move(mv)? {
                self.unmake_move()?;
                legal.push(mv);
            }
        }
        Ok(legal)
    }

    pub fn has_legal_move(&mut self) -> Result<bool, InternalError> {
        for mv in self.generate_moves() {
            if self.make_move(mv)? {
                self.unmake_move()?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// No legal move and the king is attacked.
    pub fn is_checkmate(&mut self) -> Result<bool, InternalError> {
        Ok(self.is_king_attacked() && !self.has_legal_move()?)
    }

    /// No legal move and the king is safe.
    pub fn is_stalemate(&mut self) -> Result<bool, InternalError> {
        Ok(!self.is_king_attacked() && !self.has_legal_move()?)
    }

    /// Emit a quiet move or capture onto `to`; false when the ray must stop.
    #[inline]
    fn push_step(&self, side: Color, from: Square, to: Square, moves: &mut MoveList) -> bool {
        match self.board[to.index()] {
            Cell::Empty => {
                moves.push(Move::quiet(from, to));
                true
            }
            Cell::Occupied(target) => {
                if target.color() != side {
                    moves.push(Move::capture(from, to, target));
                }
                false
            }
            Cell::OffBoard => false,
        }
    }
}
