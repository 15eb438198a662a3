use std::io;

use mailbox_chess::board::search::StdoutLogger;
use mailbox_chess::logging::init_logging;
use mailbox_chess::uci::run_uci_loop;

fn main() {
    init_logging();
    let stdin = io::stdin();
    if let Err(e) = run_uci_loop(stdin.lock(), io::stdout().lock(), Box::new(StdoutLogger)) {
        log::error!("uci loop stopped: {e}");
    }
}
