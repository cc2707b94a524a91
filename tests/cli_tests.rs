use blueprint_copy::cli::{Args, Command};
use blueprint_copy::config::types::{Config, LogLevel};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn replicate_subcommand_parses_roots() {
    let args = Args::parse_from([
        "blueprint_copy",
        "replicate",
        "-b",
        "/bp",
        "--source",
        "/src",
        "-o",
        "/out",
        "--direct",
    ]);
    match args.command {
        Some(Command::Replicate { blueprint, source, dest, direct }) => {
            assert_eq!(blueprint, PathBuf::from("/bp"));
            assert_eq!(source, PathBuf::from("/src"));
            assert_eq!(dest, PathBuf::from("/out"));
            assert!(direct);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn collect_accepts_repeated_names_without_file() {
    let args = Args::parse_from([
        "blueprint_copy",
        "collect",
        "-s",
        "/src",
        "-o",
        "/out",
        "--name",
        "a.png",
        "--name",
        "b.png",
    ]);
    match args.command {
        Some(Command::Collect { names, names_file, no_header, .. }) => {
            assert_eq!(names, vec!["a.png", "b.png"]);
            assert!(names_file.is_none());
            assert!(!no_header);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn collect_requires_some_names() {
    let res = Args::try_parse_from(["blueprint_copy", "collect", "-s", "/src", "-o", "/out"]);
    assert!(res.is_err());
}

#[test]
fn replicate_requires_all_roots() {
    let res = Args::try_parse_from(["blueprint_copy", "replicate", "-b", "/bp", "-s", "/src"]);
    assert!(res.is_err());
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["blueprint_copy", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["blueprint_copy", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["blueprint_copy"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn global_flags_after_subcommand_override_config() {
    let args = Args::parse_from([
        "blueprint_copy",
        "replicate",
        "-b",
        "/bp",
        "-s",
        "/src",
        "-o",
        "/out",
        "--log-level",
        "info",
        "--dry-run",
        "--preserve-times",
        "--fsync",
        "--log-file",
        "\"/tmp/bc.log\"",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.dry_run);
    assert!(cfg.preserve_times);
    assert!(cfg.fsync);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/bc.log")));
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["blueprint_copy"]);
    let mut cfg = Config {
        preserve_times: true,
        log_level: LogLevel::Quiet,
        ..Config::default()
    };
    let before = cfg.clone();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg, before);
}
