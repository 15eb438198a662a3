//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind};
use super::square::Square;

const FROM_MASK: u32 = 0x7F;
const TO_SHIFT: u32 = 7;
const CAPTURED_SHIFT: u32 = 14;
const PROMOTED_SHIFT: u32 = 20;
const PIECE_MASK: u32 = 0xF;

const FLAG_EN_PASSANT: u32 = 0x4_0000;
const FLAG_PAWN_START: u32 = 0x8_0000;
const FLAG_CASTLE: u32 = 0x100_0000;
const CAPTURED_BITS: u32 = 0x3_C000;
const PROMOTED_BITS: u32 = 0xF0_0000;

/// Packed 32-bit move.
///
/// Encoding:
/// - bits 0-6:   from square (120-index)
/// - bits 7-13:  to square (120-index)
/// - bits 14-17: captured piece (0 = none)
/// - bit 18:     en passant capture
/// - bit 19:     pawn double step
/// - bits 20-23: promoted piece (0 = none)
/// - bit 24:     castle
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// The all-zero move, never produced by the generator.
    pub const NULL: Move = Move(0);

    #[inline]
    const fn with_squares(from: Square, to: Square) -> u32 {
        (from.index() as u32) | ((to.index() as u32) << TO_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move(Move::with_squares(from, to))
    }

    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square, captured: Piece) -> Self {
        Move(Move::with_squares(from, to) | ((captured.as_u8() as u32) << CAPTURED_SHIFT))
    }

    /// Pawn double step; the square it skips becomes the en passant target.
    #[inline]
    #[must_use]
    pub const fn pawn_start(from: Square, to: Square) -> Self {
        Move(Move::with_squares(from, to) | FLAG_PAWN_START)
    }

    /// En passant capture. The captured pawn is implied, not stored.
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move(Move::with_squares(from, to) | FLAG_EN_PASSANT)
    }

    /// King move of a castle; the rook follows during make.
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square) -> Self {
        Move(Move::with_squares(from, to) | FLAG_CASTLE)
    }

    /// Copy of this move promoting to `piece`.
    #[inline]
    #[must_use]
    pub const fn with_promotion(self, piece: Piece) -> Self {
        Move((self.0 & !PROMOTED_BITS) | ((piece.as_u8() as u32) << PROMOTED_SHIFT))
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        match Square::from_index((self.0 & FROM_MASK) as usize) {
            Some(sq) => sq,
            None => Square::OFFBOARD,
        }
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        match Square::from_index(((self.0 >> TO_SHIFT) & FROM_MASK) as usize) {
            Some(sq) => sq,
            None => Square::OFFBOARD,
        }
    }

    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        Piece::from_u8(((self.0 >> CAPTURED_SHIFT) & PIECE_MASK) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn promoted(self) -> Option<Piece> {
        Piece::from_u8(((self.0 >> PROMOTED_SHIFT) & PIECE_MASK) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_pawn_start(self) -> bool {
        self.0 & FLAG_PAWN_START != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.0 & FLAG_CASTLE != 0
    }

    /// Captures, en passant included.
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.0 & (CAPTURED_BITS | FLAG_EN_PASSANT) != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.0 & PROMOTED_BITS != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from(), self.to())?;
        if let Some(promo) = self.promoted() {
            write!(f, "={}", promo.kind().to_char().to_ascii_uppercase())?;
        }
        if let Some(captured) = self.captured() {
            write!(f, " x{captured}")?;
        }
        if self.is_pawn_start() {
            write!(f, " start")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

/// Long algebraic text: `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promoted() {
            let c = match promo.kind() {
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                _ => 'q',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Swap `mv` to the front if present; returns whether it was found.
    pub fn move_to_front(&mut self, mv: Move) -> bool {
        match self.as_slice().iter().position(|&m| m == mv) {
            Some(idx) => {
                self.moves.swap(0, idx);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}
