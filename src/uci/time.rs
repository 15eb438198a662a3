//! `go` arguments and their conversion to search limits.

use std::time::Duration;

use super::UciError;
use crate::board::search::{MAX_DEPTH, SearchLimits};
use crate::board::Color;

/// Moves-to-go estimate when a clock is given without `movestogo`.
pub const DEFAULT_MOVES_TO_GO: u64 = 30;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoArgs {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub move_time: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub moves_to_go: Option<u64>,
    pub infinite: bool,
}

impl GoArgs {
    /// Parse the words after `go`. Unknown words are skipped.
    pub fn parse(parts: &[&str]) -> Result<Self, UciError> {
        let mut args = GoArgs::default();
        let mut iter = parts.iter().copied().skip_while(|&p| p == "go");
        while let Some(name) = iter.next() {
            if name == "infinite" {
                args.infinite = true;
                continue;
            }
            let slot = match name {
                "depth" | "nodes" | "movetime" | "wtime" | "btime" | "winc" | "binc"
                | "movestogo" => name,
                _ => continue,
            };
            let text = iter.next().ok_or(UciError::MissingParts)?;
            let value: u64 = text.parse().map_err(|_| UciError::InvalidArgument {
                name: slot.to_string(),
                value: text.to_string(),
            })?;
            match slot {
                "depth" => args.depth = Some(value.min(u64::from(MAX_DEPTH)) as u32),
                "nodes" => args.nodes = Some(value),
                "movetime" => args.move_time = Some(value),
                "wtime" => args.wtime = Some(value),
                "btime" => args.btime = Some(value),
                "winc" => args.winc = Some(value),
                "binc" => args.binc = Some(value),
                _ => args.moves_to_go = Some(value),
            }
        }
        Ok(args)
    }

    /// Limits for `side` to move. A clock becomes a move time of
    /// remaining / moves-to-go + increment.
    #[must_use]
    pub fn to_limits(&self, side: Color) -> SearchLimits {
        let timed = self.move_time.is_some() || self.wtime.is_some() || self.btime.is_some();
        let depth = match (self.depth, self.infinite) {
            (Some(depth), _) => depth,
            (None, true) => MAX_DEPTH,
            (None, false) if timed || self.nodes.is_some() => MAX_DEPTH,
            (None, false) => SearchLimits::default().depth,
        };
        let mut limits = SearchLimits::depth(depth);
        if let Some(nodes) = self.nodes {
            limits = limits.with_nodes(nodes);
        }

        let (remaining, inc) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        let budget = self.move_time.or_else(|| {
            remaining.map(|time| {
                let moves = self.moves_to_go.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
                (time / moves + inc.unwrap_or(0)).min(time)
            })
        });
        if let (Some(ms), false) = (budget, self.infinite) {
            limits = limits.with_move_time(Duration::from_millis(ms));
        }
        limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_go_uses_default_depth() {
        let args = GoArgs::parse(&["go"]).unwrap();
        assert_eq!(args.to_limits(Color::White), SearchLimits::default());
    }

    #[test]
    fn depth_and_nodes() {
        let args = GoArgs::parse(&["go", "depth", "3", "nodes", "1000"]).unwrap();
        let limits = args.to_limits(Color::White);
        assert_eq!(limits.depth, 3);
        assert_eq!(limits.nodes, Some(1000));
        assert_eq!(limits.move_time, None);
    }

    #[test]
    fn clock_becomes_move_time() {
        let args =
            GoArgs::parse(&["go", "wtime", "60000", "btime", "30000", "binc", "500", "movestogo", "10"])
                .unwrap();
        assert_eq!(
            args.to_limits(Color::Black).move_time,
            Some(Duration::from_millis(3500))
        );
        assert_eq!(
            args.to_limits(Color::White).move_time,
            Some(Duration::from_millis(6000))
        );
        assert_eq!(args.to_limits(Color::White).depth, MAX_DEPTH);
    }

    #[test]
    fn infinite_has_no_budget() {
        let args = GoArgs::parse(&["go", "infinite"]).unwrap();
        let limits = args.to_limits(Color::White);
        assert_eq!(limits.depth, MAX_DEPTH);
        assert_eq!(limits.move_time, None);
    }

    #[test]
    fn bad_numbers_are_errors() {
        assert!(matches!(
            GoArgs::parse(&["go", "depth", "x"]),
            Err(UciError::InvalidArgument { .. })
        ));
        assert!(matches!(GoArgs::parse(&["go", "depth"]), Err(UciError::MissingParts)));
    }
}
