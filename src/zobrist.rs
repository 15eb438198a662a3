//! Zobrist hashing for chess positions.
//!
//! Keys live in an immutable [`ZobristKeys`] table that a [`Position`] holds
//! through an `Arc`. Positions that are compared by hash must share a table.
//!
//! [`Position`]: crate::board::Position

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Piece, Square, BOARD_SQ_NUM};

/// Seed of the process-wide default table.
pub const DEFAULT_SEED: u64 = 1_234_567_890;

#[derive(Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    // piece_keys[piece.index()][square 120-index]
    piece_keys: [[u64; BOARD_SQ_NUM]; 12],
    white_to_move_key: u64,
    // en_passant_keys[target square 120-index]
    en_passant_keys: [u64; BOARD_SQ_NUM],
    castling_keys: [u64; 16],
    seed: Option<u64>,
}

impl ZobristKeys {
    /// Reproducible table from a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut keys = Self::generate(&mut rng);
        keys.seed = Some(seed);
        keys
    }

    /// Table seeded from OS entropy.
    #[must_use]
    pub fn random() -> Self {
        Self::generate(&mut StdRng::from_entropy())
    }

    /// The fixed-seed table shared by every position built without explicit keys.
    #[must_use]
    pub fn shared() -> Arc<ZobristKeys> {
        Arc::clone(&SHARED_KEYS)
    }

    fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut piece_keys = [[0u64; BOARD_SQ_NUM]; 12];
        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }

        let white_to_move_key = rng.gen();

        let mut en_passant_keys = [0u64; BOARD_SQ_NUM];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        let mut castling_keys = [0u64; 16];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            white_to_move_key,
            en_passant_keys,
            castling_keys,
            seed: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.index()][sq.index()]
    }

    /// XORed in while white is to move.
    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> u64 {
        self.white_to_move_key
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant_keys[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.as_u8() as usize]
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl fmt::Debug for ZobristKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZobristKeys").field("seed", &self.seed).finish_non_exhaustive()
    }
}

static SHARED_KEYS: Lazy<Arc<ZobristKeys>> =
    Lazy::new(|| Arc::new(ZobristKeys::from_seed(DEFAULT_SEED)));

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_table() {
        assert_eq!(ZobristKeys::from_seed(7), ZobristKeys::from_seed(7));
        assert_ne!(ZobristKeys::from_seed(7), ZobristKeys::from_seed(8));
        assert_eq!(*ZobristKeys::shared(), ZobristKeys::from_seed(DEFAULT_SEED));
    }

    #[test]
    fn shared_table_is_one_allocation() {
        assert!(Arc::ptr_eq(&ZobristKeys::shared(), &ZobristKeys::shared()));
    }

    #[test]
    fn piece_keys_distinct_over_all_cells() {
        let keys = ZobristKeys::shared();
        for piece in Piece::ALL {
            let distinct: HashSet<u64> = (0..BOARD_SQ_NUM)
                .filter_map(Square::from_index)
                .map(|sq| keys.piece(piece, sq))
                .collect();
            assert_eq!(distinct.len(), BOARD_SQ_NUM);
        }
    }

    #[test]
    fn castle_keys_distinct() {
        let keys = ZobristKeys::shared();
        let distinct: HashSet<u64> = (0..16u8)
            .map(|v| keys.castling(CastlingRights::from_u8(v)))
            .collect();
        assert_eq!(distinct.len(), 16);
    }
}
