//! Property-based tests using proptest.

use crate::board::{Move, Position};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

const START_FENS: &[&str] = &[
    crate::board::START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
];

/// Play up to `num_moves` random legal moves; returns how many were made.
fn random_walk(pos: &mut Position, rng: &mut StdRng, num_moves: usize) -> usize {
    let mut made = 0;
    for _ in 0..num_moves {
        let legal = pos.legal_moves().unwrap();
        if legal.is_empty() {
            break;
        }
        let mv: Move = legal[rng.gen_range(0..legal.len())];
        assert!(pos.make_move(mv).unwrap());
        made += 1;
    }
    made
}

proptest! {
    /// Property: unmaking every move restores the position exactly
    #[test]
    fn prop_make_unmake_restores_state(
        seed in any::<u64>(),
        fen_idx in 0..START_FENS.len(),
        num_moves in 1..=30usize,
    ) {
        let mut pos = Position::from_fen(START_FENS[fen_idx]).unwrap();
        let initial = pos.clone();
        let mut rng = StdRng::seed_from_u64(seed);

        let made = random_walk(&mut pos, &mut rng, num_moves);
        prop_assert_eq!(pos.history().len(), made);

        for _ in 0..made {
            pos.unmake_move().unwrap();
        }
        prop_assert_eq!(pos, initial);
    }

    /// Property: every cache agrees with a recount after each move
    #[test]
    fn prop_caches_stay_consistent(seed in any::<u64>(), num_moves in 1..=40usize) {
        let mut pos = Position::new();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..num_moves {
            if random_walk(&mut pos, &mut rng, 1) == 0 {
                break;
            }
            prop_assert!(pos.assert_consistency().is_ok());
            prop_assert_eq!(pos.hash(), pos.compute_hash());
        }
    }

    /// Property: FEN output parses back to an equal position
    #[test]
    fn prop_fen_round_trip(seed in any::<u64>(), num_moves in 0..=20usize) {
        let mut pos = Position::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_walk(&mut pos, &mut rng, num_moves);
        let reparsed = Position::from_fen(&pos.to_fen()).unwrap();
        prop_assert_eq!(reparsed.to_fen(), pos.to_fen());
        prop_assert_eq!(reparsed.hash(), pos.hash());
    }
}
