//! Negamax scores, mates, and draws.

use crate::board::search::{SearchLimits, Searcher, MATE};
use crate::board::{search, Position};

#[test]
fn test_mated_in_two_plies() {
    let mut pos = Position::from_fen("k7/7Q/K7/8/8/8/8/8 b - - 0 1").unwrap();
    let result = search(&mut pos, 3).unwrap();
    assert_eq!(result.score, -29000);
    assert_eq!(result.mate_in, Some(2));
    assert_eq!(result.pv_string(), "a8b8 h7b7");
    assert_eq!(result.best_move.map(|m| m.to_string()), Some("a8b8".to_string()));
    assert_eq!(result.score_string(), "mate -1");
    assert_eq!(result.depth, 3);
}

#[test]
fn test_mate_in_one() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let result = search(&mut pos, 4).unwrap();
    assert_eq!(result.score, MATE);
    assert_eq!(result.mate_in, Some(1));
    assert_eq!(result.pv_string(), "a1a8");
    assert_eq!(result.score_string(), "mate 1");
    // Mate ends deepening early.
    assert_eq!(result.depth, 2);
}

#[test]
fn test_stalemate_root() {
    let mut pos = Position::from_fen("k7/1R6/1K6/8/8/8/8/8 b - - 0 1").unwrap();
    let result = search(&mut pos, 3).unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.best_move, None);
    assert!(result.pv.is_empty());
}

#[test]
fn test_checkmated_root() {
    let mut pos =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    let result = search(&mut pos, 2).unwrap();
    assert_eq!(result.score, -MATE);
    assert_eq!(result.mate_in, Some(0));
    assert_eq!(result.best_move, None);
}

#[test]
fn test_fifty_move_rule_scores_draw() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 99 60").unwrap();
    let result = search(&mut pos, 2).unwrap();
    assert_eq!(result.score, 0);
    assert!(result.best_move.is_some());
}

#[test]
fn test_search_restores_position() {
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let before = pos.clone();
    let result = search(&mut pos, 3).unwrap();
    assert_eq!(pos, before);
    assert!(result.best_move.is_some());
    assert_eq!(result.pv.first().copied(), result.best_move);
}

#[test]
fn test_pv_table_holds_root_move() {
    let mut pos = Position::new();
    let mut searcher = Searcher::new();
    let result = searcher.search(&mut pos, SearchLimits::depth(3)).unwrap();
    assert_eq!(searcher.pv_table().probe(pos.hash()), result.best_move);
    assert!(searcher.nodes() > 0);
    assert_eq!(searcher.nodes(), result.nodes);

    searcher.clear();
    assert!(searcher.pv_table().is_empty());
}

#[test]
fn test_node_limit_keeps_last_full_iteration() {
    let mut pos = Position::new();
    let mut searcher = Searcher::new();
    let result = searcher
        .search(&mut pos, SearchLimits::depth(10).with_nodes(2000))
        .unwrap();
    assert!(result.depth >= 1 && result.depth < 10);
    assert!(result.best_move.is_some());
    assert_eq!(pos, Position::new());
}

#[test]
fn test_wins_hanging_queen() {
    let mut pos = Position::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
    let result = search(&mut pos, 2).unwrap();
    assert_eq!(result.pv_string().split(' ').next(), Some("d2d5"));
    assert!(result.score > 400);
}

#[test]
fn test_missing_king_is_not_a_mate() {
    let mut pos = Position::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let result = search(&mut pos, 2).unwrap();
    assert_eq!(result.mate_in, None);
    assert_eq!(result.score, 0);
    assert_eq!(result.depth, 2);
    assert!(result.best_move.is_some());
}

struct HugeScorer;

impl crate::eval::Scorer for HugeScorer {
    fn evaluate(&self, _pos: &Position) -> i32 {
        1_000_000
    }
}

#[test]
fn test_oversized_evaluation_stays_out_of_mate_band() {
    let mut pos = Position::new();
    let result = Searcher::with_scorer(HugeScorer)
        .search(&mut pos, SearchLimits::depth(2))
        .unwrap();
    assert_eq!(result.mate_in, None);
    assert!(result.score.abs() < crate::board::search::MATE_THRESHOLD);
    assert!(result.best_move.is_some());
    assert_eq!(result.depth, 2);
}

#[test]
fn test_repeated_node_scores_draw() {
    use super::sq;
    use crate::board::search::INFINITY;
    use crate::board::Move;

    let fen = "4k3/8/8/8/8/8/8/Q3K3 w - - 0 1";
    let mut fresh = Position::from_fen(fen).unwrap();
    let baseline = Searcher::new()
        .negamax(&mut fresh, -INFINITY, INFINITY, 2)
        .unwrap();
    assert!(baseline > 500);

    let mut pos = Position::from_fen(fen).unwrap();
    for (from, to) in [("e1", "d1"), ("e8", "d8"), ("d1", "e1"), ("d8", "e8")] {
        assert!(pos.make_move(Move::quiet(sq(from), sq(to))).unwrap());
    }
    assert!(pos.is_repetition());
    assert_eq!(pos.search_ply(), 4);
    let score = Searcher::new()
        .negamax(&mut pos, -INFINITY, INFINITY, 2)
        .unwrap();
    assert_eq!(score, 0);
}
