//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts against known reference positions
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `movegen.rs` - Pseudo-legal generation edge cases
//! - `hash.rs` - Incremental Zobrist hashing
//! - `search.rs` - Negamax scores, mates, and draws
//! - `proptest.rs` - Property-based tests

mod proptest;
mod search;

use crate::board::Square;

pub(super) fn sq(text: &str) -> Square {
    text.parse().unwrap()
}
