#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    Perft(usize),
    /// `d`: print the board
    Display,
    Quit,
    Unknown(String),
}

pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let first = *parts.first()?;

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();

    let cmd = match first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<usize>().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "d" => UciCommand::Display,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(line.trim().to_string()),
    };

    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_uci_command("uci"), Some(UciCommand::Uci));
        assert_eq!(parse_uci_command("  isready \n"), Some(UciCommand::IsReady));
        assert_eq!(parse_uci_command("perft 3"), Some(UciCommand::Perft(3)));
        assert_eq!(parse_uci_command("perft"), Some(UciCommand::Perft(1)));
        assert_eq!(parse_uci_command("d"), Some(UciCommand::Display));
        assert_eq!(
            parse_uci_command("go depth 2"),
            Some(UciCommand::Go(vec!["go".into(), "depth".into(), "2".into()]))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_uci_command("   "), None);
        assert_eq!(
            parse_uci_command("xyzzy 1"),
            Some(UciCommand::Unknown("xyzzy 1".to_string()))
        );
    }
}
