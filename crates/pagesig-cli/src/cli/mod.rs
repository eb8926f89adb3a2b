//! CLI for pagesig.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use pagesig_core::config::{self, PagesigConfig};
use pagesig_core::fingerprint::HtmlStrategy;
use std::path::PathBuf;

use commands::{run_completions, run_fingerprint, run_pages};

/// Top-level CLI for pagesig.
#[derive(Debug, Parser)]
#[command(name = "pagesig")]
#[command(
    about = "pagesig: report one URL per distinct page template (script sources / JSON keys)",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch URLs (one per line) and print the first URL of every distinct fingerprint.
    Run(RunArgs),

    /// Print the signature and fingerprint of a local response body.
    Fingerprint {
        /// Path to the saved body.
        path: PathBuf,
        /// Content type to classify the body as (default: guessed from the extension).
        #[arg(long, value_name = "CT")]
        content_type: Option<String>,
        /// Also count inline script lengths in HTML signatures.
        #[arg(long)]
        inline_lengths: bool,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Number of concurrent fetch workers (default from config, 5).
    #[arg(short = 't', long, value_name = "N")]
    pub threads: Option<usize>,
    /// Cookie file: JSON object of URL -> "name=value; name2=value2".
    #[arg(short = 'C', long, value_name = "COOKIES.json")]
    pub cookies: Option<PathBuf>,
    /// Write the reported URLs and their content types as JSON.
    #[arg(short = 'o', long, value_name = "EXPORT.json")]
    pub export: Option<PathBuf>,
    /// Read URLs from this file instead of stdin.
    #[arg(short = 'i', long, value_name = "INPUT")]
    pub input: Option<PathBuf>,
    /// Also count inline script lengths in HTML signatures.
    #[arg(long)]
    pub inline_lengths: bool,
    /// Pause between dispatching two URLs.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
    /// Total per-request timeout in seconds (also caps the connect phase).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Print the run summary to stderr when done.
    #[arg(long)]
    pub stats: bool,
}

impl RunArgs {
    /// Command-line flags win over the config file.
    pub fn apply_to(&self, cfg: &mut PagesigConfig) {
        if let Some(threads) = self.threads {
            cfg.threads = threads;
        }
        if let Some(ms) = self.delay_ms {
            cfg.dispatch_delay_ms = ms;
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
            cfg.connect_timeout_secs = cfg.connect_timeout_secs.min(secs);
        }
        if self.inline_lengths {
            cfg.html_strategy = HtmlStrategy::SourcesAndInlineLengths;
        }
    }
}

fn strategy(inline_lengths: bool) -> HtmlStrategy {
    if inline_lengths {
        HtmlStrategy::SourcesAndInlineLengths
    } else {
        HtmlStrategy::Sources
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run(args) => {
                let mut cfg = config::load_or_init()?;
                args.apply_to(&mut cfg);
                tracing::debug!("effective config: {:?}", cfg);
                run_pages(&cfg, &args)?;
            }
            CliCommand::Fingerprint {
                path,
                content_type,
                inline_lengths,
            } => run_fingerprint(&path, content_type.as_deref(), strategy(inline_lengths))?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
