//! Square types and the 120/64 index tables.
//!
//! The board is a padded 10x12 mailbox: two sentinel ranks above and below,
//! one sentinel file on each side. `A1` sits at index 21 and each rank adds
//! 10. A second, dense 0..64 index space is used only for bitboards.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Number of cells in the padded mailbox.
pub const BOARD_SQ_NUM: usize = 120;

/// Marker stored in the 120->64 table for border cells.
pub(crate) const NO_SQ64: u8 = 64;
pub(crate) const NO_FILE_RANK: u8 = 0xFF;

pub(crate) const RANK_2: u8 = 1;
pub(crate) const RANK_7: u8 = 6;

const fn file_rank_to_index(file: u8, rank: u8) -> u8 {
    21 + file + rank * 10
}

const fn build_sq64_to_sq120() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[(rank * 8 + file) as usize] = file_rank_to_index(file, rank);
            file += 1;
        }
        rank += 1;
    }
    table
}

const fn build_sq120_to_sq64() -> [u8; BOARD_SQ_NUM] {
    let mut table = [NO_SQ64; BOARD_SQ_NUM];
    let mut sq64 = 0;
    while sq64 < 64 {
        table[SQ64_TO_SQ120[sq64] as usize] = sq64 as u8;
        sq64 += 1;
    }
    table
}

const fn build_file_rank_tables() -> ([u8; BOARD_SQ_NUM], [u8; BOARD_SQ_NUM]) {
    let mut files = [NO_FILE_RANK; BOARD_SQ_NUM];
    let mut ranks = [NO_FILE_RANK; BOARD_SQ_NUM];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            let sq = file_rank_to_index(file, rank) as usize;
            files[sq] = file;
            ranks[sq] = rank;
            file += 1;
        }
        rank += 1;
    }
    (files, ranks)
}

pub(crate) const SQ64_TO_SQ120: [u8; 64] = build_sq64_to_sq120();
pub(crate) const SQ120_TO_SQ64: [u8; BOARD_SQ_NUM] = build_sq120_to_sq64();
const FILE_RANK: ([u8; BOARD_SQ_NUM], [u8; BOARD_SQ_NUM]) = build_file_rank_tables();
pub(crate) const FILES_BRD: [u8; BOARD_SQ_NUM] = FILE_RANK.0;
pub(crate) const RANKS_BRD: [u8; BOARD_SQ_NUM] = FILE_RANK.1;

/// A cell of the 120-cell mailbox, stored as its 120-index.
///
/// A `Square` may name a border cell; [`Square::is_on_board`] tells the two
/// apart. Squares parsed from text or built from file/rank are always playable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

macro_rules! squares {
    ($($name:ident = ($file:expr, $rank:expr)),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square(file_rank_to_index($file, $rank));)*
        }
    };
}

squares! {
    A1 = (0, 0), B1 = (1, 0), C1 = (2, 0), D1 = (3, 0),
    E1 = (4, 0), F1 = (5, 0), G1 = (6, 0), H1 = (7, 0),
    A8 = (0, 7), B8 = (1, 7), C8 = (2, 7), D8 = (3, 7),
    E8 = (4, 7), F8 = (5, 7), G8 = (6, 7), H8 = (7, 7),
}

impl Square {
    /// Border cell 0, used to fill unused piece-list slots.
    pub(crate) const OFFBOARD: Square = Square(0);

    /// Build a playable square from a 0-based file and rank.
    #[must_use]
    pub fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(file_rank_to_index(file, rank)))
        } else {
            None
        }
    }

    /// Wrap a raw 120-index.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < BOARD_SQ_NUM {
            Some(Square(idx as u8))
        } else {
            None
        }
    }

    /// Map a dense 0..64 index (a1 = 0, h8 = 63) to its mailbox square.
    #[inline]
    #[must_use]
    pub const fn from_sq64(idx: usize) -> Self {
        Square(SQ64_TO_SQ120[idx])
    }

    /// The 120-index of this cell.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The dense 0..64 index, or `None` for border cells.
    #[inline]
    #[must_use]
    pub const fn sq64(self) -> Option<usize> {
        match SQ120_TO_SQ64[self.0 as usize] {
            NO_SQ64 => None,
            idx => Some(idx as usize),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        SQ120_TO_SQ64[self.0 as usize] != NO_SQ64
    }

    /// File 0..8 (a = 0), `None` on the border.
    #[inline]
    #[must_use]
    pub const fn file(self) -> Option<u8> {
        match FILES_BRD[self.0 as usize] {
            NO_FILE_RANK => None,
            f => Some(f),
        }
    }

    /// Rank 0..8 (rank 1 = 0), `None` on the border.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match RANKS_BRD[self.0 as usize] {
            NO_FILE_RANK => None,
            r => Some(r),
        }
    }

    #[inline]
    pub(crate) const fn rank_unchecked(self) -> u8 {
        RANKS_BRD[self.0 as usize]
    }

    /// Step by a mailbox offset.
    ///
    /// Every offset used by move generation is at most 21, so stepping from a
    /// playable square always lands inside the 120 cells.
    #[inline]
    #[must_use]
    pub(crate) const fn offset(self, delta: i8) -> Self {
        Square((self.0 as i16 + delta as i16) as u8)
    }

    /// All 64 playable squares, a1 first and h8 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_sq64)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file(), self.rank()) {
            (Some(file), Some(rank)) => write!(f, "{}{}", (b'a' + file) as char, rank + 1),
            _ => write!(f, "--"),
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self}/{})", self.0)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a',
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            b @ b'1'..=b'8' => b - b'1',
            _ => return Err(invalid()),
        };
        Ok(Square(file_rank_to_index(file, rank)))
    }
}
