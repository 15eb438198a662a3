//! Square attack detection over the mailbox.

use super::types::{
    Cell, Color, Piece, PieceKind, Square, BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS,
};
use super::Position;

impl Position {
    /// True if any piece of `by` attacks `sq`, whoever is to move.
    ///
    /// `sq` must be a playable square.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        debug_assert!(sq.is_on_board(), "attack test on border cell {sq:?}");

        let pawn = Piece::new(by, PieceKind::Pawn);
        let pawn_from: [i8; 2] = match by {
            Color::White => [-9, -11],
            Color::Black => [9, 11],
        };
        if pawn_from
            .iter()
            .any(|&d| self.board[sq.offset(d).index()] == Cell::Occupied(pawn))
        {
            return true;
        }

        let knight = Cell::Occupied(Piece::new(by, PieceKind::Knight));
        if KNIGHT_DIRS
            .iter()
            .any(|&d| self.board[sq.offset(d).index()] == knight)
        {
            return true;
        }

        let queen = Piece::new(by, PieceKind::Queen);
        let rook = Piece::new(by, PieceKind::Rook);
        if ROOK_DIRS
            .iter()
            .any(|&d| matches!(self.first_piece_on_ray(sq, d), Some(p) if p == rook || p == queen))
        {
            return true;
        }

        let bishop = Piece::new(by, PieceKind::Bishop);
        if BISHOP_DIRS
            .iter()
            .any(|&d| matches!(self.first_piece_on_ray(sq, d), Some(p) if p == bishop || p == queen))
        {
            return true;
        }

        let king = Cell::Occupied(Piece::new(by, PieceKind::King));
        KING_DIRS
            .iter()
            .any(|&d| self.board[sq.offset(d).index()] == king)
    }

    fn first_piece_on_ray(&self, from: Square, dir: i8) -> Option<Piece> {
        let mut sq = from.offset(dir);
        loop {
            match self.board[sq.index()] {
                Cell::Empty => sq = sq.offset(dir),
                Cell::Occupied(piece) => return Some(piece),
                Cell::OffBoard => return None,
            }
        }
    }

    /// True if the side to move is in check. False without a king.
    #[must_use]
    pub fn is_king_attacked(&self) -> bool {
        let Some(side) = self.side else {
            return false;
        };
        self.king_square(side)
            .is_some_and(|king| self.is_square_attacked(king, side.opponent()))
    }

    /// Eight ranks, rank 8 first, `X` on squares `by` attacks.
    #[must_use]
    pub fn attack_board_string(&self, by: Color) -> String {
        let mut out = String::with_capacity(80);
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let hit = Square::from_file_rank(file, rank)
                    .is_some_and(|sq| self.is_square_attacked(sq, by));
                out.push(if hit { 'X' } else { '-' });
            }
            out.push('\n');
        }
        out
    }
}
