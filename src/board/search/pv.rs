use std::collections::HashMap;

use crate::board::error::InternalError;
use crate::board::{Move, Position};

/// Best move found per position hash.
#[derive(Clone, Debug, Default)]
pub struct PvTable {
    entries: HashMap<u64, Move>,
}

impl PvTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, hash: u64, mv: Move) {
        self.entries.insert(hash, mv);
    }

    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<Move> {
        self.entries.get(&hash).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follow stored moves from `pos`, at most `max_len` of them.
    ///
    /// Each entry is checked against the generated moves before it is made,
    /// so a colliding hash cannot apply a foreign move. `pos` is restored.
    pub fn line(&self, pos: &mut Position, max_len: usize) -> Result<Vec<Move>, InternalError> {
        let mut line = Vec::with_capacity(max_len);
        while line.len() < max_len {
            let Some(mv) = self.probe(pos.hash()) else {
                break;
            };
            if !pos.move_exists(mv) {
                log::warn!("pv entry {mv} not playable at {:#018x}", pos.hash());
                break;
            }
            if !pos.make_move(mv)? {
                break;
            }
            line.push(mv);
        }
        for _ in 0..line.len() {
            pos.unmake_move()?;
        }
        Ok(line)
    }
}
