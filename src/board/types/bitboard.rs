//! Bitboard type over the dense 64-square index.

use std::fmt;

use super::square::Square;

/// A 64-bit set of squares, bit `i` standing for dense index `i` (a1 = 0).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Set the bit for `sq`. Border squares are ignored.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        if let Some(idx) = sq.sq64() {
            self.0 |= 1u64 << idx;
        }
    }

    /// Clear the bit for `sq`. Border squares are ignored.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        if let Some(idx) = sq.sq64() {
            self.0 &= !(1u64 << idx);
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(self, sq: Square) -> bool {
        sq.sq64().is_some_and(|idx| self.0 & (1u64 << idx) != 0)
    }

    /// Number of set bits.
    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Remove and return the lowest set square.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Square::from_sq64(idx))
    }

    #[inline]
    #[must_use]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}

/// Rank 8 first, `X` for set squares.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let set = Square::from_file_rank(file, rank).is_some_and(|sq| self.contains(sq));
                write!(f, "{}", if set { 'X' } else { '-' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over set squares, lowest dense index first.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_count() {
        let mut bb = Bitboard::EMPTY;
        let e4: Square = "e4".parse().unwrap();
        bb.set(Square::A1);
        bb.set(e4);
        bb.set(Square::H8);
        assert_eq!(bb.popcount(), 3);
        assert!(bb.contains(e4));
        bb.clear(e4);
        assert!(!bb.contains(e4));
        assert_eq!(bb.popcount(), 2);
    }

    #[test]
    fn border_squares_are_ignored() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square::OFFBOARD);
        assert!(bb.is_empty());
        assert!(!bb.contains(Square::OFFBOARD));
    }

    #[test]
    fn pop_in_ascending_order() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square::H8);
        bb.set(Square::A1);
        let squares: Vec<Square> = bb.iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::H8]);
        assert_eq!(bb.pop_lsb(), Some(Square::A1));
        assert_eq!(bb.pop_lsb(), Some(Square::H8));
        assert_eq!(bb.pop_lsb(), None);
    }
}
