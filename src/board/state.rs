use std::sync::Arc;

use super::error::SetupError;
use super::types::{
    Bitboard, CastlingRights, Cell, Color, Move, Piece, Square, BOARD_SQ_NUM,
};
use crate::zobrist::ZobristKeys;

/// Capacity of one piece list. Ten covers two originals plus eight promotions.
pub const MAX_PIECES_PER_TYPE: usize = 10;

/// Hard limit on the undo history; making a move past it is an internal error.
pub const MAX_GAME_PLY: usize = 2048;

/// Index of the combined entry in [`Position::pawns`].
pub(crate) const BOTH: usize = 2;

/// Slot value for an undo record that touched no piece list.
pub(crate) const NO_SLOT: u8 = u8::MAX;

/// State needed to take back one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    pub(crate) mv: Move,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
    // Piece-list slot the captured (or en passant) piece was removed from.
    pub(crate) captured_slot: u8,
    // Piece-list slot of the pawn replaced by a promotion.
    pub(crate) promotion_slot: u8,
}

impl Undo {
    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Hash of the position before the move.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// Mutable chess position over a 120-cell mailbox.
///
/// The board is the source of truth. Piece lists, king squares, pawn
/// bitboards, piece counts, material, and the hash are kept in sync by
/// [`make_move`](Position::make_move) and [`unmake_move`](Position::unmake_move).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: [Cell; BOARD_SQ_NUM],
    pub(crate) side: Option<Color>,
    pub(crate) en_passant: Option<Square>,
    pub(crate) castling: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) search_ply: usize,
    pub(crate) game_ply: usize,
    pub(crate) hash: u64,

    pub(crate) piece_list: [[Square; MAX_PIECES_PER_TYPE]; 12],
    pub(crate) piece_count: [u8; 12],
    pub(crate) king_square: [Option<Square>; 2],
    // [white, black, both]
    pub(crate) pawns: [Bitboard; 3],
    pub(crate) big_pieces: [u8; 2],
    pub(crate) major_pieces: [u8; 2],
    pub(crate) minor_pieces: [u8; 2],
    pub(crate) material: [i32; 2],

    pub(crate) history: Vec<Undo>,
    pub(crate) keys: Arc<ZobristKeys>,
}

const START_BACK_RANK: [Piece; 8] = [
    Piece::WhiteRook,
    Piece::WhiteKnight,
    Piece::WhiteBishop,
    Piece::WhiteQueen,
    Piece::WhiteKing,
    Piece::WhiteBishop,
    Piece::WhiteKnight,
    Piece::WhiteRook,
];

impl Position {
    /// Blank position using the shared hash keys.
    #[must_use]
    pub fn empty() -> Self {
        Self::empty_with_keys(ZobristKeys::shared())
    }

    #[must_use]
    pub fn empty_with_keys(keys: Arc<ZobristKeys>) -> Self {
        let mut pos = Position {
            board: [Cell::OffBoard; BOARD_SQ_NUM],
            side: None,
            en_passant: None,
            castling: CastlingRights::none(),
            halfmove_clock: 0,
            search_ply: 0,
            game_ply: 0,
            hash: 0,
            piece_list: [[Square::OFFBOARD; MAX_PIECES_PER_TYPE]; 12],
            piece_count: [0; 12],
            king_square: [None; 2],
            pawns: [Bitboard::EMPTY; 3],
            big_pieces: [0; 2],
            major_pieces: [0; 2],
            minor_pieces: [0; 2],
            material: [0; 2],
            history: Vec::with_capacity(MAX_GAME_PLY),
            keys,
        };
        pos.reset();
        pos
    }

    /// The standard initial position.
    #[must_use]
    pub fn new() -> Self {
        Self::with_keys(ZobristKeys::shared())
    }

    /// The standard initial position hashed with `keys`.
    #[must_use]
    pub fn with_keys(keys: Arc<ZobristKeys>) -> Self {
        let mut pieces = Vec::with_capacity(32);
        for (file, &piece) in START_BACK_RANK.iter().enumerate() {
            let file = file as u8;
            let black = Piece::new(Color::Black, piece.kind());
            pieces.extend(
                [
                    (file, 0, piece),
                    (file, 1, Piece::WhitePawn),
                    (file, 6, Piece::BlackPawn),
                    (file, 7, black),
                ]
                .into_iter()
                .filter_map(|(f, r, p)| Square::from_file_rank(f, r).map(|sq| (sq, p))),
            );
        }
        let mut pos = Self::empty_with_keys(keys);
        for (sq, piece) in pieces {
            pos.place_for_setup(sq, piece);
        }
        pos.side = Some(Color::White);
        pos.castling = CastlingRights::all();
        pos.hash = pos.compute_hash();
        pos
    }

    /// Clear to a blank, side-neutral board: border cells off-board,
    /// playable cells empty, counters and rights zero, hash 0.
    pub fn reset(&mut self) {
        self.board = [Cell::OffBoard; BOARD_SQ_NUM];
        for sq in Square::all() {
            self.board[sq.index()] = Cell::Empty;
        }
        self.side = None;
        self.en_passant = None;
        self.castling = CastlingRights::none();
        self.halfmove_clock = 0;
        self.search_ply = 0;
        self.game_ply = 0;
        self.hash = 0;
        self.piece_list = [[Square::OFFBOARD; MAX_PIECES_PER_TYPE]; 12];
        self.piece_count = [0; 12];
        self.king_square = [None; 2];
        self.pawns = [Bitboard::EMPTY; 3];
        self.big_pieces = [0; 2];
        self.major_pieces = [0; 2];
        self.minor_pieces = [0; 2];
        self.material = [0; 2];
        self.history.clear();
    }

    /// Build a position from a piece placement and game state.
    ///
    /// All derived caches and the hash are computed once here. The fullmove
    /// number counts from 1 and sets the game ply.
    pub fn from_pieces<I>(
        keys: Arc<ZobristKeys>,
        pieces: I,
        side: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove: u32,
    ) -> Result<Position, SetupError>
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut pos = Self::empty_with_keys(keys);
        for (sq, piece) in pieces {
            if !sq.is_on_board() {
                return Err(SetupError::OffBoardSquare { square: sq });
            }
            if !pos.board[sq.index()].is_empty() {
                return Err(SetupError::DuplicateSquare { square: sq });
            }
            if pos.piece_count[piece.index()] as usize >= MAX_PIECES_PER_TYPE {
                return Err(SetupError::TooManyPieces { piece });
            }
            pos.place_for_setup(sq, piece);
        }
        if let Some(ep) = en_passant {
            let expected_rank = match side {
                Color::White => 5,
                Color::Black => 2,
            };
            if ep.rank() != Some(expected_rank) {
                return Err(SetupError::InvalidEnPassant { square: ep });
            }
        }
        pos.side = Some(side);
        pos.castling = castling;
        pos.en_passant = en_passant;
        pos.halfmove_clock = halfmove_clock;
        pos.game_ply = 2 * (fullmove.max(1) as usize - 1) + usize::from(side == Color::Black);
        pos.hash = pos.compute_hash();
        log::trace!("loaded position hash {:#018x}", pos.hash);
        Ok(pos)
    }

    // Only called on checked, empty, playable squares with room in the list.
    fn place_for_setup(&mut self, sq: Square, piece: Piece) {
        let idx = piece.index();
        let slot = self.piece_count[idx] as usize;
        self.board[sq.index()] = Cell::Occupied(piece);
        self.piece_list[idx][slot] = sq;
        self.piece_count[idx] += 1;
        self.add_to_counters(sq, piece);
    }

    /// Counters shared by setup and make/unmake.
    pub(crate) fn add_to_counters(&mut self, sq: Square, piece: Piece) {
        let c = piece.color().index();
        self.material[c] += piece.value();
        if piece.is_big() {
            self.big_pieces[c] += 1;
            if piece.is_major() {
                self.major_pieces[c] += 1;
            }
            if piece.is_minor() {
                self.minor_pieces[c] += 1;
            }
        } else {
            self.pawns[c].set(sq);
            self.pawns[BOTH].set(sq);
        }
        if piece.is_king() {
            self.king_square[c] = Some(sq);
        }
    }

    pub(crate) fn remove_from_counters(&mut self, sq: Square, piece: Piece) {
        let c = piece.color().index();
        self.material[c] -= piece.value();
        if piece.is_big() {
            self.big_pieces[c] -= 1;
            if piece.is_major() {
                self.major_pieces[c] -= 1;
            }
            if piece.is_minor() {
                self.minor_pieces[c] -= 1;
            }
        } else {
            self.pawns[c].clear(sq);
            self.pawns[BOTH].clear(sq);
        }
        if piece.is_king() && self.king_square[c] == Some(sq) {
            self.king_square[c] = None;
        }
    }

    /// Hash recomputed from the board, side, en passant target, and rights.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for sq in Square::all() {
            if let Cell::Occupied(piece) = self.board[sq.index()] {
                hash ^= self.keys.piece(piece, sq);
            }
        }
        if self.side == Some(Color::White) {
            hash ^= self.keys.white_to_move();
        }
        if let Some(ep) = self.en_passant {
            hash ^= self.keys.en_passant(ep);
        }
        hash ^ self.keys.castling(self.castling)
    }

    /// True if the current hash occurred since the last capture or pawn move.
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        self.history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .any(|undo| undo.hash == self.hash)
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, sq: Square) -> Cell {
        self.board[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].piece()
    }

    /// `None` only for a blank, side-neutral position.
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Option<Color> {
        self.side
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Plies made since the search root.
    #[inline]
    #[must_use]
    pub fn search_ply(&self) -> usize {
        self.search_ply
    }

    /// Make the current position the search root.
    pub fn reset_search_ply(&mut self) {
        self.search_ply = 0;
    }

    /// Half-moves since the game start.
    #[inline]
    #[must_use]
    pub fn game_ply(&self) -> usize {
        self.game_ply
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        (self.game_ply / 2 + 1) as u32
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn keys(&self) -> &Arc<ZobristKeys> {
        &self.keys
    }

    /// Squares holding `piece`, in piece-list order.
    #[inline]
    #[must_use]
    pub fn squares_of(&self, piece: Piece) -> &[Square] {
        let idx = piece.index();
        &self.piece_list[idx][..self.piece_count[idx] as usize]
    }

    #[inline]
    #[must_use]
    pub fn piece_count(&self, piece: Piece) -> usize {
        self.piece_count[piece.index()] as usize
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_square[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn pawns(&self, color: Color) -> Bitboard {
        self.pawns[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_pawns(&self) -> Bitboard {
        self.pawns[BOTH]
    }

    /// Sum of piece values, king included.
    #[inline]
    #[must_use]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    #[must_use]
    pub fn big_piece_count(&self, color: Color) -> usize {
        self.big_pieces[color.index()] as usize
    }

    #[must_use]
    pub fn major_piece_count(&self, color: Color) -> usize {
        self.major_pieces[color.index()] as usize
    }

    #[must_use]
    pub fn minor_piece_count(&self, color: Color) -> usize {
        self.minor_pieces[color.index()] as usize
    }

    /// Moves made since the position was loaded.
    #[must_use]
    pub fn history(&self) -> &[Undo] {
        &self.history
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|undo| undo.mv)
    }

    /// Eight ranks, rank 8 first, `.` for empty squares.
    #[must_use]
    pub fn board_string(&self) -> String {
        let mut out = String::with_capacity(200);
        for rank in (0..8u8).rev() {
            out.push((b'1' + rank) as char);
            for file in 0..8u8 {
                out.push(' ');
                let c = Square::from_file_rank(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_char);
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_blank() {
        let mut pos = Position::new();
        pos.reset();
        assert_eq!(pos.hash(), 0);
        assert_eq!(pos.side_to_move(), None);
        assert_eq!(pos.castling_rights(), CastlingRights::none());
        assert!(Square::all().all(|sq| pos.cell(sq) == Cell::Empty));
        let border = (0..BOARD_SQ_NUM)
            .filter_map(Square::from_index)
            .filter(|sq| pos.cell(*sq) == Cell::OffBoard)
            .count();
        assert_eq!(border, BOARD_SQ_NUM - 64);
        assert!(pos.history().is_empty());
    }

    #[test]
    fn start_position_caches() {
        let pos = Position::new();
        assert_eq!(pos.piece_count(Piece::WhitePawn), 8);
        assert_eq!(pos.piece_count(Piece::BlackKnight), 2);
        assert_eq!(pos.king_square(Color::White), Some(Square::E1));
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
        assert_eq!(pos.pawns(Color::White).popcount(), 8);
        assert_eq!(pos.all_pawns().popcount(), 16);
        assert_eq!(pos.big_piece_count(Color::White), 8);
        assert_eq!(pos.major_piece_count(Color::Black), 4);
        assert_eq!(pos.minor_piece_count(Color::Black), 4);
        assert_eq!(pos.material(Color::White), pos.material(Color::Black));
        assert_eq!(pos.hash(), pos.compute_hash());
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn from_pieces_rejects_bad_setup() {
        let keys = ZobristKeys::shared();
        let dup = Position::from_pieces(
            keys.clone(),
            [(Square::E1, Piece::WhiteKing), (Square::E1, Piece::BlackKing)],
            Color::White,
            CastlingRights::none(),
            None,
            0,
            1,
        );
        assert_eq!(dup, Err(SetupError::DuplicateSquare { square: Square::E1 }));

        let off = Position::from_pieces(
            keys.clone(),
            [(Square::OFFBOARD, Piece::WhiteKing)],
            Color::White,
            CastlingRights::none(),
            None,
            0,
            1,
        );
        assert!(matches!(off, Err(SetupError::OffBoardSquare { .. })));

        let ep = Position::from_pieces(
            keys,
            [(Square::E1, Piece::WhiteKing)],
            Color::White,
            CastlingRights::none(),
            Some(Square::E1),
            0,
            1,
        );
        assert!(matches!(ep, Err(SetupError::InvalidEnPassant { .. })));
    }

    #[test]
    fn fullmove_sets_game_ply() {
        let pos = Position::from_pieces(
            ZobristKeys::shared(),
            [(Square::E1, Piece::WhiteKing), (Square::E8, Piece::BlackKing)],
            Color::Black,
            CastlingRights::none(),
            None,
            3,
            10,
        )
        .unwrap();
        assert_eq!(pos.game_ply(), 19);
        assert_eq!(pos.fullmove_number(), 10);
        assert_eq!(pos.halfmove_clock(), 3);
    }

    #[test]
    fn board_string_layout() {
        let text = Position::new().board_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[7], "1 R N B Q K B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
    }
}
