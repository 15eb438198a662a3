//! Recount every derived cache from the board and compare.
//!
//! Diagnostic only: make/unmake never call this in release builds.

use super::error::InternalError;
use super::state::{BOTH, MAX_PIECES_PER_TYPE};
use super::types::{Bitboard, Cell, Piece, Square, BOARD_SQ_NUM};
use super::Position;

fn mismatch(detail: String) -> InternalError {
    InternalError::CacheMismatch { detail }
}

impl Position {
    /// Fail on the first cache that disagrees with the board.
    pub fn assert_consistency(&self) -> Result<(), InternalError> {
        for idx in 0..BOARD_SQ_NUM {
            let Some(sq) = Square::from_index(idx) else {
                continue;
            };
            let cell = self.board[idx];
            if sq.is_on_board() == cell.is_off_board() {
                return Err(mismatch(format!("cell {idx} holds {cell:?}")));
            }
        }

        let mut material = [0i32; 2];
        let mut big = [0u8; 2];
        let mut major = [0u8; 2];
        let mut minor = [0u8; 2];
        let mut pawns = [Bitboard::EMPTY; 3];
        let mut kings = [None; 2];

        for piece in Piece::ALL {
            let listed = self.squares_of(piece);
            let on_board: Vec<Square> = Square::all()
                .filter(|&sq| self.board[sq.index()] == Cell::Occupied(piece))
                .collect();
            if listed.len() != on_board.len()
                || !on_board.iter().all(|sq| listed.contains(sq))
            {
                return Err(mismatch(format!(
                    "list for '{piece}' is {listed:?}, board has {on_board:?}"
                )));
            }
            let unused = &self.piece_list[piece.index()][listed.len()..MAX_PIECES_PER_TYPE];
            if unused.iter().any(|&sq| sq != Square::OFFBOARD) {
                return Err(mismatch(format!("stale slots in list for '{piece}'")));
            }

            let c = piece.color().index();
            for &sq in &on_board {
                material[c] += piece.value();
                if piece.is_big() {
                    big[c] += 1;
                }
                if piece.is_major() {
                    major[c] += 1;
                }
                if piece.is_minor() {
                    minor[c] += 1;
                }
                if piece.is_pawn() {
                    pawns[c].set(sq);
                    pawns[BOTH].set(sq);
                }
                if piece.is_king() {
                    kings[c] = Some(sq);
                }
            }
        }

        if material != self.material {
            return Err(mismatch(format!("material {:?} vs {material:?}", self.material)));
        }
        if big != self.big_pieces || major != self.major_pieces || minor != self.minor_pieces {
            return Err(mismatch("big/major/minor counts".to_string()));
        }
        if pawns != self.pawns {
            return Err(mismatch("pawn bitboards".to_string()));
        }
        if kings != self.king_square {
            return Err(mismatch(format!("king squares {:?} vs {kings:?}", self.king_square)));
        }
        let hash = self.compute_hash();
        if hash != self.hash {
            return Err(mismatch(format!("hash {:#018x} vs {hash:#018x}", self.hash)));
        }
        Ok(())
    }
}
