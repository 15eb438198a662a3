//! Search constants.

/// Score of being mated at the root; a mate `n` plies down scores `MATE - n`.
pub const MATE: i32 = 29_000;

/// Bound wider than any reachable score.
pub const INFINITY: i32 = 30_000;

/// Nodes deeper than this return the static score.
pub const MAX_SEARCH_PLY: usize = 128;

/// Scores at least this large in magnitude are mate scores.
pub const MATE_THRESHOLD: i32 = MATE - MAX_SEARCH_PLY as i32 - 1;

/// Depth used when a `go` command names no limit.
pub const DEFAULT_DEPTH: u32 = 5;

/// Depth used for `go infinite`.
pub const MAX_DEPTH: u32 = 64;

/// Fifty-move rule, in half-moves.
pub const FIFTY_MOVE_LIMIT: u32 = 100;
