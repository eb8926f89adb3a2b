use pagesig_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log file when possible; stdout is reserved for results.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("pagesig error: {:#}", err);
        std::process::exit(1);
    }
}
