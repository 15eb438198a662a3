//! Negamax search with alpha-beta pruning.
//!
//! Features:
//! - Iterative deepening from depth 1 to the limit
//! - Principal-variation table keyed by position hash, tried first at each node
//! - Mate scores offset by ply so shorter mates rank higher
//! - Repetition and fifty-move draws
//! - Node and time budgets polled between root moves

mod constants;
mod log;
mod params;
mod pv;

use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::InternalError;
use super::{Move, Position};
use crate::eval::{PieceSquareScorer, Scorer};

pub use self::log::{SearchInfo, SearchLogger, SilentLogger, StdoutLogger};
pub use constants::{
    DEFAULT_DEPTH, FIFTY_MOVE_LIMIT, INFINITY, MATE, MATE_THRESHOLD, MAX_DEPTH, MAX_SEARCH_PLY,
};
pub use params::SearchLimits;
pub use pv::PvTable;

/// Outcome of one search.
///
/// `score` is from the root mover's point of view. A forced mate reports
/// exactly `MATE` or `-MATE`, with its distance in plies in `mate_in`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    pub score: i32,
    pub mate_in: Option<u32>,
    pub best_move: Option<Move>,
    pub pv: Vec<Move>,
    pub depth: u32,
    pub nodes: u64,
}

impl SearchResult {
    fn from_root_score(raw: i32, pv: Vec<Move>, depth: u32, nodes: u64) -> Self {
        let (score, mate_in) = if (MATE_THRESHOLD..=MATE).contains(&raw.abs()) {
            (raw.signum() * MATE, Some((MATE - raw.abs()) as u32))
        } else {
            (raw, None)
        };
        SearchResult {
            score,
            mate_in,
            best_move: pv.first().copied(),
            pv,
            depth,
            nodes,
        }
    }

    /// `cp N`, or `mate N` in full moves (negative when the mover is mated).
    #[must_use]
    pub fn score_string(&self) -> String {
        match self.mate_in {
            Some(plies) => {
                let moves = (plies as i64 + 1) / 2;
                if self.score > 0 {
                    format!("mate {moves}")
                } else {
                    format!("mate -{moves}")
                }
            }
            None => format!("cp {}", self.score),
        }
    }

    /// Space separated move text.
    #[must_use]
    pub fn pv_string(&self) -> String {
        self.pv
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn info(&self, elapsed: Duration) -> SearchInfo {
        let time_ms = elapsed.as_millis();
        SearchInfo {
            depth: self.depth,
            score: self.score_string(),
            nodes: self.nodes,
            nps: (u128::from(self.nodes) * 1000 / time_ms.max(1)) as u64,
            time_ms,
            pv: self.pv_string(),
        }
    }
}

/// Search state that outlives one call: the PV table and the scorer.
pub struct Searcher<S = PieceSquareScorer> {
    scorer: S,
    pv: PvTable,
    logger: Box<dyn SearchLogger>,
    limits: SearchLimits,
    nodes: u64,
    started: Instant,
    iteration: u32,
    stopped: bool,
}

impl Searcher<PieceSquareScorer> {
    #[must_use]
    pub fn new() -> Self {
        Searcher::with_scorer(PieceSquareScorer)
    }
}

impl Default for Searcher<PieceSquareScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scorer> Searcher<S> {
    #[must_use]
    pub fn with_scorer(scorer: S) -> Self {
        Searcher {
            scorer,
            pv: PvTable::new(),
            logger: Box::new(SilentLogger),
            limits: SearchLimits::default(),
            nodes: 0,
            started: Instant::now(),
            iteration: 0,
            stopped: false,
        }
    }

    /// Report each finished iteration to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Box<dyn SearchLogger>) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn pv_table(&self) -> &PvTable {
        &self.pv
    }

    /// Forget every stored best move.
    pub fn clear(&mut self) {
        self.pv.clear();
    }

    /// Nodes visited by the last search.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Iteratively deepen from `pos` up to `limits.depth`.
    ///
    /// `pos` is restored before returning. If a budget runs out mid
    /// iteration, that iteration is dropped and the previous one returned.
    pub fn search(
        &mut self,
        pos: &mut Position,
        limits: SearchLimits,
    ) -> Result<SearchResult, InternalError> {
        self.limits = limits;
        self.nodes = 0;
        self.started = Instant::now();
        self.stopped = false;
        pos.reset_search_ply();

        let mut best = SearchResult::from_root_score(0, Vec::new(), 0, 0);
        for depth in 1..=limits.depth.max(1) {
            self.iteration = depth;
            let raw = self.negamax(pos, -INFINITY, INFINITY, depth)?;
            if self.stopped {
                ::log::debug!("depth {depth} interrupted, keeping depth {}", best.depth);
                break;
            }
            let line = self.pv.line(pos, depth as usize)?;
            best = SearchResult::from_root_score(raw, line, depth, self.nodes);

            let elapsed = self.started.elapsed();
            ::log::debug!(
                "depth {} score {} nodes {} time {:?} pv {}",
                depth,
                best.score_string(),
                self.nodes,
                elapsed,
                best.pv_string()
            );
            self.logger.info(&best.info(elapsed));

            // Deeper iterations find the same forced mate.
            if best.mate_in.is_some() {
                break;
            }
        }
        Ok(best)
    }

    /// Score of `pos` for the side to move, searched `depth` plies deep.
    pub fn negamax(
        &mut self,
        pos: &mut Position,
        mut alpha: i32,
        beta: i32,
        depth: u32,
    ) -> Result<i32, InternalError> {
        self.nodes += 1;
        if depth == 0 {
            return Ok(self.static_score(pos));
        }

        let ply = pos.search_ply();
        // The root never shortcuts, so it always yields a move.
        if ply > 0 && (pos.is_repetition() || pos.halfmove_clock() >= FIFTY_MOVE_LIMIT) {
            return Ok(0);
        }
        if ply > MAX_SEARCH_PLY {
            return Ok(self.static_score(pos));
        }

        let mut moves = pos.generate_moves();
        if let Some(pv_move) = self.pv.probe(pos.hash()) {
            moves.move_to_front(pv_move);
        }

        let old_alpha = alpha;
        let mut best_move = None;
        let mut legal = 0;
        for mv in moves {
            if ply == 0 && legal > 0 && self.limit_reached() {
                self.stopped = true;
                break;
            }
            if !pos.make_move(mv)? {
                continue;
            }
            legal += 1;
            let score = -self.negamax(pos, -beta, -alpha, depth - 1)?;
            pos.unmake_move()?;

            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
        }

        if legal == 0 {
            return Ok(if pos.is_king_attacked() {
                -MATE + ply as i32
            } else {
                0
            });
        }

        if alpha != old_alpha {
            if let Some(mv) = best_move {
                self.pv.store(pos.hash(), mv);
            }
        }
        Ok(alpha)
    }

    /// Scorer output kept clear of the mate band.
    fn static_score(&self, pos: &Position) -> i32 {
        let bound = MATE_THRESHOLD - 1;
        self.scorer.evaluate_absolute(pos).clamp(-bound, bound)
    }

    fn limit_reached(&self) -> bool {
        if self.iteration <= 1 {
            return false;
        }
        self.limits.nodes.is_some_and(|max| self.nodes >= max)
            || self
                .limits
                .move_time
                .is_some_and(|time| self.started.elapsed() >= time)
    }
}

/// Fixed-depth search with the default scorer and a fresh PV table.
pub fn search(pos: &mut Position, depth: u32) -> Result<SearchResult, InternalError> {
    Searcher::new().search(pos, SearchLimits::depth(depth))
}
