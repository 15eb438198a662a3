//! Piece, color, and cell types with their static metadata.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side to move / piece owner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Colorless piece kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion targets in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase letter used in move text and position text.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

pub const KNIGHT_DIRS: [i8; 8] = [-8, -19, -21, -12, 8, 19, 21, 12];
pub const ROOK_DIRS: [i8; 4] = [-1, -10, 1, 10];
pub const BISHOP_DIRS: [i8; 4] = [-9, -11, 11, 9];
pub const KING_DIRS: [i8; 8] = [-1, -10, 1, 10, -9, -11, 11, 9];

/// A colored piece. The discriminant (1..=12) is the value packed into moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    WhitePawn = 1,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,
    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,
}

struct PieceInfo {
    value: i32,
    big: bool,
    major: bool,
    minor: bool,
    slides: bool,
    dirs: &'static [i8],
}

// Indexed by kind.
const KIND_INFO: [PieceInfo; 6] = [
    PieceInfo { value: 100, big: false, major: false, minor: false, slides: false, dirs: &[] },
    PieceInfo { value: 325, big: true, major: false, minor: true, slides: false, dirs: &KNIGHT_DIRS },
    PieceInfo { value: 330, big: true, major: false, minor: true, slides: true, dirs: &BISHOP_DIRS },
    PieceInfo { value: 550, big: true, major: true, minor: false, slides: true, dirs: &ROOK_DIRS },
    PieceInfo { value: 1000, big: true, major: true, minor: false, slides: true, dirs: &KING_DIRS },
    PieceInfo { value: 50000, big: true, major: true, minor: false, slides: false, dirs: &KING_DIRS },
];

impl Piece {
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    #[inline]
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece::ALL[color.index() * 6 + kind.index()]
    }

    /// Decode the 4-bit value stored in a move; 0 and 13..=15 mean no piece.
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Piece> {
        match value {
            1..=12 => Some(Piece::ALL[value as usize - 1]),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Dense 0..12 index for per-piece tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        if (self as u8) <= 6 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        PieceKind::ALL[(self as usize - 1) % 6]
    }

    #[inline]
    const fn info(self) -> &'static PieceInfo {
        &KIND_INFO[self.kind().index()]
    }

    /// Material value in centipawns.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.info().value
    }

    /// Any non-pawn.
    #[inline]
    #[must_use]
    pub const fn is_big(self) -> bool {
        self.info().big
    }

    /// Rook, queen or king.
    #[inline]
    #[must_use]
    pub const fn is_major(self) -> bool {
        self.info().major
    }

    /// Bishop or knight.
    #[inline]
    #[must_use]
    pub const fn is_minor(self) -> bool {
        self.info().minor
    }

    #[inline]
    #[must_use]
    pub const fn slides(self) -> bool {
        self.info().slides
    }

    /// Mailbox offsets this piece steps or slides along. Empty for pawns.
    #[inline]
    #[must_use]
    pub const fn directions(self) -> &'static [i8] {
        self.info().dirs
    }

    #[inline]
    #[must_use]
    pub const fn is_pawn(self) -> bool {
        matches!(self.kind(), PieceKind::Pawn)
    }

    #[inline]
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self.kind(), PieceKind::King)
    }

    /// Letter as written in position text: uppercase for white.
    #[must_use]
    pub const fn to_char(self) -> char {
        let c = self.kind().to_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Content of one mailbox cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    OffBoard,
    Empty,
    Occupied(Piece),
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    #[must_use]
    pub const fn is_off_board(self) -> bool {
        matches!(self, Cell::OffBoard)
    }
}
