use super::error::InternalError;
use super::state::{Position, Undo, BOTH, MAX_GAME_PLY, NO_SLOT};
use super::types::{Cell, Color, Move, Piece, PieceKind, Square};

/// Rook origin and destination for a king castling onto `king_to`.
pub(crate) fn castle_rook_squares(king_to: Square) -> Result<(Square, Square), InternalError> {
    match king_to {
        Square::G1 => Ok((Square::H1, Square::F1)),
        Square::C1 => Ok((Square::A1, Square::D1)),
        Square::G8 => Ok((Square::H8, Square::F8)),
        Square::C8 => Ok((Square::A8, Square::D8)),
        square => Err(InternalError::InvalidCastleTarget { square }),
    }
}

/// Square of the pawn removed by an en passant capture landing on `to`.
#[inline]
fn en_passant_victim(to: Square, mover: Color) -> Square {
    match mover {
        Color::White => to.offset(-10),
        Color::Black => to.offset(10),
    }
}

impl Position {
    fn occupant(&self, sq: Square) -> Result<Piece, InternalError> {
        match self.board[sq.index()] {
            Cell::Occupied(piece) => Ok(piece),
            Cell::Empty => Err(InternalError::EmptySquare { square: sq }),
            Cell::OffBoard => Err(InternalError::OffBoardSquare { square: sq }),
        }
    }

    fn require_empty(&self, sq: Square) -> Result<(), InternalError> {
        match self.board[sq.index()] {
            Cell::Empty => Ok(()),
            Cell::Occupied(piece) => Err(InternalError::OccupiedSquare { square: sq, piece }),
            Cell::OffBoard => Err(InternalError::OffBoardSquare { square: sq }),
        }
    }

    fn list_slot(&self, piece: Piece, sq: Square) -> Result<usize, InternalError> {
        self.squares_of(piece)
            .iter()
            .position(|&s| s == sq)
            .ok_or(InternalError::PieceListMismatch { piece, square: sq })
    }

    /// Remove the piece on `sq`; returns it and the list slot it left.
    ///
    /// The last list entry moves into the vacated slot.
    pub(crate) fn clear_piece(&mut self, sq: Square) -> Result<(Piece, u8), InternalError> {
        let piece = self.occupant(sq)?;
        let slot = self.list_slot(piece, sq)?;
        let idx = piece.index();

        self.hash ^= self.keys.piece(piece, sq);
        self.board[sq.index()] = Cell::Empty;
        self.remove_from_counters(sq, piece);

        let last = self.piece_count[idx] as usize - 1;
        self.piece_list[idx][slot] = self.piece_list[idx][last];
        self.piece_list[idx][last] = Square::OFFBOARD;
        self.piece_count[idx] -= 1;
        Ok((piece, slot as u8))
    }

    /// Put `piece` on `sq`, appended to its list.
    pub(crate) fn add_piece(&mut self, sq: Square, piece: Piece) -> Result<(), InternalError> {
        let slot = self.piece_count[piece.index()];
        self.insert_piece(sq, piece, slot)
    }

    /// Put `piece` on `sq` at list `slot`, undoing a [`clear_piece`] that
    /// returned that slot.
    ///
    /// [`clear_piece`]: Position::clear_piece
    pub(crate) fn insert_piece(
        &mut self,
        sq: Square,
        piece: Piece,
        slot: u8,
    ) -> Result<(), InternalError> {
        self.require_empty(sq)?;
        let idx = piece.index();
        let count = self.piece_count[idx] as usize;
        let slot = slot as usize;
        if count >= self.piece_list[idx].len() {
            return Err(InternalError::PieceListFull { piece });
        }
        if slot > count {
            return Err(InternalError::PieceListMismatch { piece, square: sq });
        }

        self.hash ^= self.keys.piece(piece, sq);
        self.board[sq.index()] = Cell::Occupied(piece);
        self.add_to_counters(sq, piece);

        self.piece_list[idx][count] = self.piece_list[idx][slot];
        self.piece_list[idx][slot] = sq;
        self.piece_count[idx] += 1;
        Ok(())
    }

    /// Relocate a piece, keeping its list slot.
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) -> Result<(), InternalError> {
        let piece = self.occupant(from)?;
        self.require_empty(to)?;
        let slot = self.list_slot(piece, from)?;

        self.hash ^= self.keys.piece(piece, from);
        self.board[from.index()] = Cell::Empty;
        self.hash ^= self.keys.piece(piece, to);
        self.board[to.index()] = Cell::Occupied(piece);

        let c = piece.color().index();
        if piece.is_pawn() {
            self.pawns[c].clear(from);
            self.pawns[BOTH].clear(from);
            self.pawns[c].set(to);
            self.pawns[BOTH].set(to);
        }
        if piece.is_king() {
            self.king_square[c] = Some(to);
        }
        self.piece_list[piece.index()][slot] = to;
        Ok(())
    }

    /// Apply a pseudo-legal move.
    ///
    /// Returns `Ok(false)` and leaves the position untouched if the move
    /// leaves the mover's king attacked. An `Err` means the position is
    /// corrupt and must be discarded.
    pub fn make_move(&mut self, mv: Move) -> Result<bool, InternalError> {
        let side = self.side.ok_or(InternalError::NoSideToMove)?;
        if self.history.len() >= MAX_GAME_PLY {
            return Err(InternalError::HistoryOverflow {
                capacity: MAX_GAME_PLY,
            });
        }
        let from = mv.from();
        let to = mv.to();
        let moving = self.occupant(from)?;

        let mut undo = Undo {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
            captured_slot: NO_SLOT,
            promotion_slot: NO_SLOT,
        };

        if mv.is_en_passant() {
            let (_, slot) = self.clear_piece(en_passant_victim(to, side))?;
            undo.captured_slot = slot;
        } else if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to)?;
            self.move_piece(rook_from, rook_to)?;
        }

        if let Some(ep) = self.en_passant {
            self.hash ^= self.keys.en_passant(ep);
        }
        self.hash ^= self.keys.castling(self.castling);
        self.castling = self.castling.after_touching(from).after_touching(to);
        self.hash ^= self.keys.castling(self.castling);

        self.en_passant = None;
        if mv.is_pawn_start() {
            let ep = match side {
                Color::White => from.offset(10),
                Color::Black => from.offset(-10),
            };
            self.en_passant = Some(ep);
            self.hash ^= self.keys.en_passant(ep);
        }

        self.halfmove_clock += 1;
        if moving.kind() == PieceKind::Pawn {
            self.halfmove_clock = 0;
        }

        if let Some(expected) = mv.captured() {
            let found = self.piece_at(to);
            if found != Some(expected) {
                return Err(InternalError::CaptureMismatch {
                    square: to,
                    expected,
                    found,
                });
            }
            let (_, slot) = self.clear_piece(to)?;
            undo.captured_slot = slot;
            self.halfmove_clock = 0;
        }

        self.move_piece(from, to)?;

        if let Some(promoted) = mv.promoted() {
            let (_, slot) = self.clear_piece(to)?;
            undo.promotion_slot = slot;
            self.add_piece(to, promoted)?;
        }

        self.side = Some(side.opponent());
        self.hash ^= self.keys.white_to_move();
        self.search_ply += 1;
        self.game_ply += 1;
        self.history.push(undo);

        debug_assert_eq!(self.hash, self.compute_hash(), "incremental hash after {mv}");

        if let Some(king) = self.king_square(side) {
            if self.is_square_attacked(king, side.opponent()) {
                self.unmake_move()?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Take back the last move made.
    pub fn unmake_move(&mut self) -> Result<(), InternalError> {
        let undo = self.history.pop().ok_or(InternalError::HistoryUnderflow)?;
        let mv = undo.mv;
        let from = mv.from();
        let to = mv.to();
        let mover = self.side.ok_or(InternalError::NoSideToMove)?.opponent();

        self.search_ply = self.search_ply.saturating_sub(1);
        self.game_ply = self.game_ply.saturating_sub(1);
        self.side = Some(mover);
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;

        if mv.promoted().is_some() {
            self.clear_piece(to)?;
            self.insert_piece(to, Piece::new(mover, PieceKind::Pawn), undo.promotion_slot)?;
        }

        self.move_piece(to, from)?;

        if let Some(captured) = mv.captured() {
            self.insert_piece(to, captured, undo.captured_slot)?;
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to)?;
            self.move_piece(rook_to, rook_from)?;
        } else if mv.is_en_passant() {
            let victim = Piece::new(mover.opponent(), PieceKind::Pawn);
            self.insert_piece(en_passant_victim(to, mover), victim, undo.captured_slot)?;
        }

        self.hash = undo.hash;
        Ok(())
    }
}
