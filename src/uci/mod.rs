//! Universal Chess Interface (UCI) protocol implementation.
//!
//! A line-oriented driver over [`Position`] and [`Searcher`]. Malformed
//! commands are reported as `info string error ...` and never end the loop.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::board::search::SearchLogger;
use crate::board::{FenError, InternalError, MoveParseError, Position, Searcher};

pub mod command;
pub mod report;
pub mod time;

use command::{parse_uci_command, UciCommand};
use time::GoArgs;

pub const ENGINE_NAME: &str = "mailbox-chess";
pub const ENGINE_AUTHOR: &str = "the mailbox-chess developers";

/// Error type for UCI command handling
#[derive(Debug)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Malformed move text in the move list
    InvalidMove { move_str: String, error: MoveParseError },
    /// Well-formed move text that is not legal in the position
    IllegalMove { move_str: String },
    /// A numeric argument that did not parse
    InvalidArgument { name: String, value: String },
    /// Missing required parts in the command
    MissingParts,
    /// The position's caches disagreed during make/unmake
    Internal(InternalError),
    Io(io::Error),
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::IllegalMove { move_str } => write!(f, "Illegal move '{move_str}'"),
            UciError::InvalidArgument { name, value } => {
                write!(f, "Invalid value '{value}' for '{name}'")
            }
            UciError::MissingParts => write!(f, "Missing required parts in command"),
            UciError::Internal(e) => write!(f, "Internal error: {e}"),
            UciError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::InvalidFen(e) => Some(e),
            UciError::InvalidMove { error, .. } => Some(error),
            UciError::Internal(e) => Some(e),
            UciError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

impl From<InternalError> for UciError {
    fn from(e: InternalError) -> Self {
        UciError::Internal(e)
    }
}

impl From<io::Error> for UciError {
    fn from(e: io::Error) -> Self {
        UciError::Io(e)
    }
}

/// Build the position a `position` command describes.
///
/// Supports "position startpos" and "position fen <4 to 6 fields>",
/// optionally followed by "moves <move1> <move2> ...". Nothing is returned
/// unless every move applies.
pub fn try_parse_position_command(parts: &[&str]) -> Result<Position, UciError> {
    let mut i = 1;
    let mut pos = match parts.get(i) {
        Some(&"startpos") => {
            i += 1;
            Position::new()
        }
        Some(&"fen") => {
            i += 1;
            let end = parts[i..]
                .iter()
                .position(|&p| p == "moves")
                .map_or(parts.len(), |offset| i + offset);
            if end == i {
                return Err(UciError::MissingParts);
            }
            let fen = parts[i..end].join(" ");
            i = end;
            Position::from_fen(&fen)?
        }
        _ => return Err(UciError::MissingParts),
    };

    if parts.get(i) == Some(&"moves") {
        for &text in &parts[i + 1..] {
            let mv = pos
                .parse_move_text(text)
                .map_err(|error| UciError::InvalidMove {
                    move_str: text.to_string(),
                    error,
                })?
                .ok_or_else(|| UciError::IllegalMove {
                    move_str: text.to_string(),
                })?;
            if !pos.make_move(mv)? {
                return Err(UciError::IllegalMove {
                    move_str: text.to_string(),
                });
            }
        }
    }
    // Moves before `go` are game history, not search depth.
    pos.reset_search_ply();
    Ok(pos)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Engine state between commands.
pub struct UciSession {
    position: Position,
    searcher: Searcher,
}

impl UciSession {
    /// Search progress goes to `logger`; replies go to the writer given to
    /// [`UciSession::handle_line`].
    #[must_use]
    pub fn new(logger: Box<dyn SearchLogger>) -> Self {
        UciSession {
            position: Position::new(),
            searcher: Searcher::new().with_logger(logger),
        }
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Control, UciError> {
        let Some(cmd) = parse_uci_command(line) else {
            return Ok(Control::Continue);
        };
        log::debug!("command {cmd:?}");

        match cmd {
            UciCommand::Uci => {
                writeln!(out, "id name {ENGINE_NAME}")?;
                writeln!(out, "id author {ENGINE_AUTHOR}")?;
                writeln!(out, "uciok")?;
            }
            UciCommand::IsReady => report::write_ready(out)?,
            UciCommand::UciNewGame => {
                self.position = Position::new();
                self.searcher.clear();
            }
            UciCommand::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                self.position = try_parse_position_command(&parts)?;
            }
            UciCommand::Go(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let args = GoArgs::parse(&parts)?;
                let side = self
                    .position
                    .side_to_move()
                    .ok_or(UciError::Internal(InternalError::NoSideToMove))?;
                let limits = args.to_limits(side);
                log::info!("go {limits:?} on {}", self.position.to_fen());
                let result = self.searcher.search(&mut self.position, limits)?;
                log::info!(
                    "best {} score {} depth {} nodes {}",
                    result.pv_string(),
                    result.score_string(),
                    result.depth,
                    result.nodes
                );
                report::write_bestmove(out, result.best_move)?;
            }
            UciCommand::Perft(depth) => {
                let divide = self.position.perft_divide(depth)?;
                report::write_perft(out, &divide)?;
            }
            UciCommand::Display => {
                write!(out, "{}", self.position.board_string())?;
                writeln!(out, "Fen: {}", self.position.to_fen())?;
                writeln!(out, "Key: {:016x}", self.position.hash())?;
            }
            UciCommand::Quit => return Ok(Control::Quit),
            UciCommand::Unknown(text) => {
                log::debug!("ignoring unknown command '{text}'");
            }
        }
        out.flush()?;
        Ok(Control::Continue)
    }
}

/// Read commands until `quit` or end of input.
///
/// Command errors are logged and reported to the GUI; only a failed read or
/// write ends the loop early.
pub fn run_uci_loop(
    input: impl BufRead,
    mut output: impl Write,
    logger: Box<dyn SearchLogger>,
) -> io::Result<()> {
    let mut session = UciSession::new(logger);
    for line in input.lines() {
        let line = line?;
        match session.handle_line(&line, &mut output) {
            Ok(Control::Quit) => break,
            Ok(Control::Continue) => {}
            Err(UciError::Io(e)) => return Err(e),
            Err(e) => {
                log::warn!("'{}': {e}", line.trim());
                report::write_error(&mut output, &e.to_string())?;
                output.flush()?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::search::SilentLogger;

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_uci_loop(script.as_bytes(), &mut out, Box::new(SilentLogger)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn handshake() {
        let out = run("uci\nisready\nquit\n");
        assert!(out.contains("id name mailbox-chess"));
        assert!(out.contains("uciok"));
        assert!(out.ends_with("readyok\n"));
    }

    #[test]
    fn position_with_moves() {
        let parts = ["position", "startpos", "moves", "e2e4", "e7e5"];
        let pos = try_parse_position_command(&parts).unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
        assert_eq!(pos.search_ply(), 0);
        assert_eq!(pos.game_ply(), 2);
    }

    #[test]
    fn position_fen_with_four_fields() {
        let parts = ["position", "fen", "4k3/8/8/8/8/8/8/4K2R", "w", "K", "-", "moves", "e1g1"];
        let pos = try_parse_position_command(&parts).unwrap();
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/5RK1 b - - 1 1");
    }

    #[test]
    fn bad_position_commands() {
        assert!(matches!(
            try_parse_position_command(&["position"]),
            Err(UciError::MissingParts)
        ));
        assert!(matches!(
            try_parse_position_command(&["position", "fen", "moves"]),
            Err(UciError::MissingParts)
        ));
        assert!(matches!(
            try_parse_position_command(&["position", "fen", "8/8", "w", "-", "-"]),
            Err(UciError::InvalidFen(_))
        ));
        assert!(matches!(
            try_parse_position_command(&["position", "startpos", "moves", "e2e5"]),
            Err(UciError::IllegalMove { .. })
        ));
        assert!(matches!(
            try_parse_position_command(&["position", "startpos", "moves", "e2"]),
            Err(UciError::InvalidMove { .. })
        ));
    }

    #[test]
    fn failed_position_keeps_previous() {
        let out = run("position startpos moves e2e4\nposition startpos moves e7e5\nd\n");
        assert!(out.contains("info string error"));
        assert!(out.contains(
            "Fen: rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        ));
    }

    #[test]
    fn go_finds_mate_in_one() {
        let out = run("position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1\ngo depth 2\n");
        assert_eq!(out, "bestmove a1a8\n");
    }

    #[test]
    fn go_without_moves() {
        let out = run("position fen k7/1R6/1K6/8/8/8/8/8 b - - 0 1\ngo depth 2\n");
        assert_eq!(out, "bestmove 0000\n");
    }

    #[test]
    fn perft_divide_output() {
        let out = run("perft 2\n");
        assert!(out.contains("e2e4: 20\n"));
        assert!(out.ends_with("Nodes searched: 400\n"));
    }

    #[test]
    fn unknown_and_blank_lines_are_ignored() {
        assert_eq!(run("\nfoo bar\nisready\n"), "readyok\n");
    }
}
