//! CLI command handlers, one file per subcommand.

mod completions;
mod fingerprint;
mod run;

pub use completions::run_completions;
pub use fingerprint::run_fingerprint;
pub use run::run_pages;

#[cfg(test)]
pub(crate) use fingerprint::{guess_kind, write_extracted};
#[cfg(test)]
pub(crate) use run::open_input;
