//! Tests for the run subcommand: flags, config overrides and input.

use super::parse;
use crate::cli::commands::{open_input, run_pages};
use crate::cli::{Cli, CliCommand, RunArgs};
use clap::Parser;
use pagesig_core::config::PagesigConfig;
use pagesig_core::fingerprint::HtmlStrategy;
use std::io::Write;
use std::path::Path;

fn run_args(args: &[&str]) -> RunArgs {
    match parse(args) {
        CliCommand::Run(run) => run,
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_defaults() {
    let args = run_args(&["pagesig", "run"]);
    assert!(args.threads.is_none());
    assert!(args.cookies.is_none());
    assert!(args.export.is_none());
    assert!(args.input.is_none());
    assert!(!args.inline_lengths);
    assert!(args.delay_ms.is_none());
    assert!(args.timeout.is_none());
    assert!(!args.stats);
}

#[test]
fn cli_parse_run_short_flags() {
    let args = run_args(&[
        "pagesig", "run", "-t", "12", "-C", "cookies.json", "-o", "out.json", "-i", "urls.txt",
    ]);
    assert_eq!(args.threads, Some(12));
    assert_eq!(args.cookies.as_deref(), Some(Path::new("cookies.json")));
    assert_eq!(args.export.as_deref(), Some(Path::new("out.json")));
    assert_eq!(args.input.as_deref(), Some(Path::new("urls.txt")));
}

#[test]
fn cli_parse_run_long_flags() {
    let args = run_args(&[
        "pagesig",
        "run",
        "--threads",
        "3",
        "--inline-lengths",
        "--delay-ms",
        "250",
        "--timeout",
        "7",
        "--stats",
    ]);
    assert_eq!(args.threads, Some(3));
    assert!(args.inline_lengths);
    assert_eq!(args.delay_ms, Some(250));
    assert_eq!(args.timeout, Some(7));
    assert!(args.stats);
}

#[test]
fn cli_parse_run_rejects_non_numeric_threads() {
    assert!(Cli::try_parse_from(["pagesig", "run", "-t", "many"]).is_err());
}

#[test]
fn flags_override_config() {
    let mut cfg = PagesigConfig::default();
    run_args(&[
        "pagesig",
        "run",
        "-t",
        "9",
        "--delay-ms",
        "40",
        "--timeout",
        "1",
        "--inline-lengths",
    ])
    .apply_to(&mut cfg);
    assert_eq!(cfg.threads, 9);
    assert_eq!(cfg.dispatch_delay_ms, 40);
    assert_eq!(cfg.timeout_secs, 1);
    assert_eq!(cfg.connect_timeout_secs, 1);
    assert_eq!(cfg.html_strategy, HtmlStrategy::SourcesAndInlineLengths);
}

#[test]
fn absent_flags_keep_config() {
    let mut cfg = PagesigConfig {
        threads: 11,
        timeout_secs: 8,
        ..PagesigConfig::default()
    };
    run_args(&["pagesig", "run"]).apply_to(&mut cfg);
    assert_eq!(cfg.threads, 11);
    assert_eq!(cfg.timeout_secs, 8);
    assert_eq!(cfg.html_strategy, HtmlStrategy::Sources);
}

#[test]
fn zero_threads_flag_fails_validation() {
    let mut cfg = PagesigConfig::default();
    run_args(&["pagesig", "run", "-t", "0"]).apply_to(&mut cfg);
    assert!(cfg.validate().is_err());
}

#[test]
fn input_file_lines_in_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "http://a.test/\n\nhttp://b.test/\r\nhttp://c.test/").unwrap();
    let lines: Vec<String> = open_input(Some(file.path())).unwrap().collect();
    assert_eq!(
        lines,
        vec!["http://a.test/", "", "http://b.test/", "http://c.test/"]
    );
}

#[test]
fn missing_input_file_is_an_error() {
    assert!(open_input(Some(Path::new("/nonexistent/urls.txt"))).is_err());
}

#[test]
fn invalid_utf8_line_does_not_end_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"http://a.test/\n\xff\xfe junk\nhttp://b.test/\r\nhttp://c.test/\n")
        .unwrap();
    let lines: Vec<String> = open_input(Some(file.path())).unwrap().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "http://a.test/");
    assert_eq!(lines[1], "\u{FFFD}\u{FFFD} junk");
    assert_eq!(lines[2], "http://b.test/");
    assert_eq!(lines[3], "http://c.test/");
}

#[test]
fn failed_export_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("urls.txt");
    std::fs::write(&input, "not a url\n\nftp://files.test/x\n").unwrap();
    let export = dir.path().join("missing-dir").join("export.json");

    let input_arg = input.to_str().unwrap();
    let export_arg = export.to_str().unwrap();
    let args = run_args(&["pagesig", "run", "-i", input_arg, "-o", export_arg, "--stats"]);
    let mut cfg = PagesigConfig::default();
    args.apply_to(&mut cfg);

    assert!(run_pages(&cfg, &args).is_ok());
    assert!(!export.exists());
}

#[test]
fn unreadable_cookie_file_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("urls.txt");
    std::fs::write(&input, "not a url\n").unwrap();
    let cookies = dir.path().join("cookies.json");
    std::fs::write(&cookies, "[1, 2]").unwrap();

    let args = run_args(&[
        "pagesig",
        "run",
        "-i",
        input.to_str().unwrap(),
        "-C",
        cookies.to_str().unwrap(),
    ]);
    assert!(run_pages(&PagesigConfig::default(), &args).is_err());
}
