use std::io::Write;

/// One completed iteration, in protocol terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u32,
    /// `cp N` or `mate N`
    pub score: String,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u128,
    pub pv: String,
}

pub trait SearchLogger {
    fn info(&self, info: &SearchInfo);
}

impl SearchInfo {
    #[must_use]
    pub fn to_uci_line(&self) -> String {
        format!(
            "info depth {} score {} nodes {} nps {} time {} pv {}",
            self.depth, self.score, self.nodes, self.nps, self.time_ms, self.pv
        )
    }
}

pub struct StdoutLogger;

impl SearchLogger for StdoutLogger {
    fn info(&self, info: &SearchInfo) {
        let mut out = std::io::stdout().lock();
        // A closed stdout only loses the report.
        let _ = writeln!(out, "{}", info.to_uci_line()).and_then(|()| out.flush());
    }
}

/// Drops every report.
pub struct SilentLogger;

impl SearchLogger for SilentLogger {
    fn info(&self, _info: &SearchInfo) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_line_format() {
        let info = SearchInfo {
            depth: 3,
            score: "mate -1".to_string(),
            nodes: 42,
            nps: 1000,
            time_ms: 12,
            pv: "a8b8 h7b7".to_string(),
        };
        assert_eq!(
            info.to_uci_line(),
            "info depth 3 score mate -1 nodes 42 nps 1000 time 12 pv a8b8 h7b7"
        );
    }
}
