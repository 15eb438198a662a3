use std::io::{self, Write};

use crate::board::Move;

pub fn write_ready(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "readyok")
}

/// `bestmove 0000` when there is nothing to play.
pub fn write_bestmove(out: &mut impl Write, best_move: Option<Move>) -> io::Result<()> {
    match best_move {
        Some(mv) => writeln!(out, "bestmove {mv}"),
        None => writeln!(out, "bestmove 0000"),
    }
}

pub fn write_perft(out: &mut impl Write, divide: &[(Move, u64)]) -> io::Result<()> {
    for (mv, nodes) in divide {
        writeln!(out, "{mv}: {nodes}")?;
    }
    let total: u64 = divide.iter().map(|(_, nodes)| nodes).sum();
    writeln!(out)?;
    writeln!(out, "Nodes searched: {total}")
}

pub fn write_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "info string error {message}")
}
