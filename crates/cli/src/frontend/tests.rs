use std::path::PathBuf;

use logging::LogLevel;
use settings::TraversalPolicy;

use super::arguments::parse_args;
use super::{EXIT_CONFIG, EXIT_OK, run};

fn parse(args: &[&str]) -> super::arguments::ParsedArgs {
    parse_args(args.iter().copied()).expect("arguments parse")
}

// ==================== Parsing ====================

#[test]
fn positional_roots_are_required() {
    assert!(parse_args(["gcp"]).is_err());
    assert!(parse_args(["gcp", "only-source"]).is_err());

    let parsed = parse(&["gcp", "src", "dst"]);
    assert_eq!(parsed.source, PathBuf::from("src"));
    assert_eq!(parsed.destination, PathBuf::from("dst"));
}

#[test]
fn defaults_leave_configuration_untouched() {
    let parsed = parse(&["gcp", "src", "dst"]);
    assert!(!parsed.dry_run);
    assert_eq!(parsed.concurrency, None);
    assert_eq!(parsed.encrypt, None);
    assert!(!parsed.disable_compression);
    assert_eq!(parsed.log_level, LogLevel::Info);
    assert_eq!(parsed.traversal_policy, None);
    assert!(parsed.includes.is_empty());
}

#[test]
fn repeated_patterns_accumulate_in_order() {
    let parsed = parse(&[
        "gcp",
        "--exclude",
        ".git",
        "--exclude=target",
        "--include",
        "keep.log",
        "src",
        "dst",
    ]);
    assert_eq!(parsed.excludes, [".git", "target"]);
    assert_eq!(parsed.includes, ["keep.log"]);
}

#[test]
fn last_encryption_switch_wins() {
    assert_eq!(
        parse(&["gcp", "--encrypt", "--disable-encryption", "s", "d"]).encrypt,
        Some(false)
    );
    assert_eq!(
        parse(&["gcp", "--disable-encryption", "--encrypt", "s", "d"]).encrypt,
        Some(true)
    );
}

#[test]
fn typed_values_are_parsed() {
    let parsed = parse(&[
        "gcp",
        "-j",
        "4",
        "--log",
        "WARN",
        "--on-traversal-error",
        "skip",
        "--key",
        "secret",
        "--config",
        "/etc/gcp.toml",
        "--dry-run",
        "--disable-compression",
        "--ignore-relative-check",
        "s",
        "d",
    ]);
    assert_eq!(parsed.concurrency, Some(4));
    assert_eq!(parsed.log_level, LogLevel::Warning);
    assert_eq!(parsed.traversal_policy, Some(TraversalPolicy::Skip));
    assert_eq!(parsed.key.as_deref(), Some("secret"));
    assert_eq!(parsed.config, Some(PathBuf::from("/etc/gcp.toml")));
    assert!(parsed.dry_run);
    assert!(parsed.disable_compression);
    assert!(parsed.ignore_relative_check);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(parse_args(["gcp", "--log", "loud", "s", "d"]).is_err());
    assert!(parse_args(["gcp", "--concurrency", "many", "s", "d"]).is_err());
    assert!(parse_args(["gcp", "--on-traversal-error", "ignore", "s", "d"]).is_err());
}

// ==================== Entry point ====================

#[test]
fn help_goes_to_stdout() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(["gcp", "--help"], &mut stdout, &mut stderr);
    assert_eq!(code, EXIT_OK);
    let help = String::from_utf8_lossy(&stdout);
    assert!(help.contains("--disable-compression"));
    assert!(help.contains("--on-traversal-error"));
    assert!(stderr.is_empty());
}

#[test]
fn usage_errors_go_to_stderr() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(["gcp", "--bogus"], &mut stdout, &mut stderr);
    assert_eq!(code, EXIT_CONFIG);
    assert!(stdout.is_empty());
    assert!(!stderr.is_empty());
}
