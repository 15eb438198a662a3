//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::{Square, BOARD_SQ_NUM};

/// Castling rights as a 4-bit mask: 0 is none, 15 is all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KING: CastlingRights = CastlingRights(1);
    pub const WHITE_QUEEN: CastlingRights = CastlingRights(2);
    pub const BLACK_KING: CastlingRights = CastlingRights(4);
    pub const BLACK_QUEEN: CastlingRights = CastlingRights(8);

    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(15)
    }

    /// True when every right in `flag` is present.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: CastlingRights) -> bool {
        flag.0 != 0 && self.0 & flag.0 == flag.0
    }

    #[inline]
    pub fn set(&mut self, flag: CastlingRights) {
        self.0 |= flag.0;
    }

    #[inline]
    pub fn clear(&mut self, flag: CastlingRights) {
        self.0 &= !flag.0;
    }

    #[inline]
    pub fn toggle(&mut self, flag: CastlingRights) {
        self.0 ^= flag.0;
    }

    /// The king-side or queen-side right of one color.
    #[inline]
    #[must_use]
    pub const fn for_side(color: Color, kingside: bool) -> Self {
        match (color, kingside) {
            (Color::White, true) => Self::WHITE_KING,
            (Color::White, false) => Self::WHITE_QUEEN,
            (Color::Black, true) => Self::BLACK_KING,
            (Color::Black, false) => Self::BLACK_QUEEN,
        }
    }

    /// Raw mask (index into the castle hash keys).
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Bits above the low four are dropped.
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & 15)
    }

    /// Rights that survive a piece leaving or landing on `sq`.
    #[inline]
    #[must_use]
    pub(crate) const fn after_touching(self, sq: Square) -> Self {
        CastlingRights(self.0 & CASTLE_PERM[sq.index()])
    }
}

const fn build_castle_perm() -> [u8; BOARD_SQ_NUM] {
    let mut perm = [15u8; BOARD_SQ_NUM];
    perm[Square::A1.index()] = 15 & !2;
    perm[Square::E1.index()] = 15 & !3;
    perm[Square::H1.index()] = 15 & !1;
    perm[Square::A8.index()] = 15 & !8;
    perm[Square::E8.index()] = 15 & !12;
    perm[Square::H8.index()] = 15 & !4;
    perm
}

const CASTLE_PERM: [u8; BOARD_SQ_NUM] = build_castle_perm();

/// `KQkq` letters, `-` when empty.
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (flag, c) in [
            (Self::WHITE_KING, 'K'),
            (Self::WHITE_QUEEN, 'Q'),
            (Self::BLACK_KING, 'k'),
            (Self::BLACK_QUEEN, 'q'),
        ] {
            if self.has(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_toggle() {
        let mut rights = CastlingRights::none();
        rights.set(CastlingRights::WHITE_KING);
        rights.set(CastlingRights::BLACK_QUEEN);
        assert_eq!(rights.as_u8(), 9);
        assert!(rights.has(CastlingRights::WHITE_KING));
        assert!(!rights.has(CastlingRights::WHITE_QUEEN));
        rights.toggle(CastlingRights::WHITE_KING);
        assert!(!rights.has(CastlingRights::WHITE_KING));
        rights.toggle(CastlingRights::WHITE_KING);
        rights.clear(CastlingRights::BLACK_QUEEN);
        assert_eq!(rights, CastlingRights::WHITE_KING);
        assert!(!CastlingRights::all().has(CastlingRights::none()));
    }

    #[test]
    fn touching_rook_and_king_squares() {
        let all = CastlingRights::all();
        assert_eq!(all.after_touching(Square::E1).to_string(), "kq");
        assert_eq!(all.after_touching(Square::H8).to_string(), "KQq");
        assert_eq!(all.after_touching(Square::A1).to_string(), "Kkq");
        assert_eq!(all.after_touching(Square::E8).to_string(), "KQ");
        assert_eq!(all.after_touching(Square::D1), all);
    }

    #[test]
    fn display_and_from_u8() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::none().to_string(), "-");
        assert_eq!(CastlingRights::from_u8(0xFF), CastlingRights::all());
    }
}
