use std::time::Duration;

use super::constants::DEFAULT_DEPTH;

/// How far and how long one search may run.
///
/// Node and time budgets are polled between root moves only, so the current
/// root move always finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: u32,
    pub nodes: Option<u64>,
    pub move_time: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            depth: DEFAULT_DEPTH,
            nodes: None,
            move_time: None,
        }
    }
}

impl SearchLimits {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: depth.max(1),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nodes(mut self, nodes: u64) -> Self {
        self.nodes = Some(nodes);
        self
    }

    #[must_use]
    pub fn with_move_time(mut self, time: Duration) -> Self {
        self.move_time = Some(time);
        self
    }
}
