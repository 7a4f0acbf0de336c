// Drives `cli::run` in-process against scratch trees.

use std::fs;

use cli::{EXIT_CONFIG, EXIT_OK, EXIT_PARTIAL, run};
use test_support::Sandbox;

fn run_with(args: &[&str]) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(args.iter().copied(), &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8_lossy(&stdout).into_owned(),
        String::from_utf8_lossy(&stderr).into_owned(),
    )
}

fn path(p: &std::path::Path) -> &str {
    p.to_str().expect("utf-8 path")
}

// ==================== Successful runs ====================

#[test]
fn mirrors_tree_and_prints_summary() {
    let sandbox = Sandbox::new().expect("sandbox");
    sandbox.write("a.txt", b"0123456789").expect("write");
    sandbox.write("sub/b.iso", b"not really an image").expect("write");
    sandbox.write(".git/config", b"[core]").expect("write");

    let (code, stdout, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--exclude",
        ".git",
        "-j",
        "2",
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);

    assert_eq!(code, EXIT_OK, "stderr: {stderr}");
    assert!(stdout.contains("Files transferred: 2"));
    let encoded = fs::read(sandbox.destination().join("a.txt.lzma")).expect("a.txt.lzma");
    assert_eq!(
        compress::lzma::decompress_to_vec(&encoded).expect("decode"),
        b"0123456789"
    );
    assert_eq!(
        fs::read(sandbox.destination().join("sub/b.iso")).expect("b.iso"),
        b"not really an image"
    );
    assert!(!sandbox.destination().join(".git").exists());
}

#[test]
fn disable_compression_copies_verbatim() {
    let sandbox = Sandbox::new().expect("sandbox");
    sandbox.write("plain.txt", b"verbatim").expect("write");

    let (code, _, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--disable-compression",
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);

    assert_eq!(code, EXIT_OK, "stderr: {stderr}");
    assert_eq!(
        fs::read(sandbox.destination().join("plain.txt")).expect("read"),
        b"verbatim"
    );
}

#[test]
fn encryption_with_literal_key_appends_suffix() {
    let sandbox = Sandbox::new().expect("sandbox");
    sandbox.write("doc.txt", b"secret-ish").expect("write");

    let (code, _, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--encrypt",
        "--key",
        "literal key material",
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);

    assert_eq!(code, EXIT_OK, "stderr: {stderr}");
    assert!(sandbox.destination().join("doc.txt.lzma.aes").exists());
}

#[test]
fn dry_run_leaves_destination_absent() {
    let sandbox = Sandbox::new().expect("sandbox");
    sandbox.write("a.txt", b"data").expect("write");

    let (code, stdout, _) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--dry-run",
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);

    assert_eq!(code, EXIT_OK);
    assert!(stdout.contains("Files pending (dry run): 1"));
    assert!(!sandbox.destination().exists());
}

// ==================== Configuration errors ====================

#[test]
fn nested_destination_is_refused() {
    let sandbox = Sandbox::new().expect("sandbox");
    sandbox.write("a.txt", b"data").expect("write");
    let nested = sandbox.source().join("mirror");

    let (code, _, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        path(sandbox.source()),
        path(&nested),
    ]);
    assert_eq!(code, EXIT_CONFIG);
    assert!(stderr.contains("appear to be relative to one another"));
    assert!(!nested.exists());
}

#[test]
fn encryption_without_key_is_refused() {
    let sandbox = Sandbox::new().expect("sandbox");
    let (code, _, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--encrypt",
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);
    assert_eq!(code, EXIT_CONFIG);
    assert!(stderr.contains("no encryption key"));
}

#[test]
fn recursive_wildcard_is_refused() {
    let sandbox = Sandbox::new().expect("sandbox");
    let (code, _, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--exclude",
        "build/**",
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);
    assert_eq!(code, EXIT_CONFIG);
    assert!(stderr.contains("build/**"));
}

#[test]
fn missing_explicit_config_is_refused() {
    let sandbox = Sandbox::new().expect("sandbox");
    let missing = sandbox.root().join("missing.toml");
    let (code, _, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--config",
        path(&missing),
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);
    assert_eq!(code, EXIT_CONFIG);
    assert!(stderr.contains("missing.toml"));
}

#[test]
fn explicit_config_is_applied_before_flags() {
    let sandbox = Sandbox::new().expect("sandbox");
    sandbox.write("a.txt", b"data").expect("write");
    sandbox.write("skip/b.txt", b"data").expect("write");
    let config = sandbox.root().join("gcp.toml");
    fs::write(&config, "exclude = [\"skip\"]\ncompress = false\n").expect("config");

    let (code, _, stderr) = run_with(&[
        "gcp",
        "--log",
        "error",
        "--config",
        path(&config),
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);
    assert_eq!(code, EXIT_OK, "stderr: {stderr}");
    assert!(sandbox.destination().join("a.txt").exists());
    assert!(!sandbox.destination().join("skip").exists());
}

// ==================== Partial failure ====================

#[cfg(unix)]
#[test]
fn unreadable_file_yields_partial_status() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new().expect("sandbox");
    sandbox.write("ok.txt", b"ok").expect("write");
    let locked = sandbox.write("locked.txt", b"locked").expect("write");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");
    if fs::File::open(&locked).is_ok() {
        // Privileged users can read the file regardless of its mode.
        return;
    }

    let (code, stdout, stderr) = run_with(&[
        "gcp",
        "--log",
        "critical",
        "--disable-compression",
        path(sandbox.source()),
        path(sandbox.destination()),
    ]);
    assert_eq!(code, EXIT_PARTIAL);
    assert!(stdout.contains("Files failed: 1"));
    assert!(stderr.contains("1 file(s) could not be copied"));
    assert!(sandbox.destination().join("ok.txt").exists());
}
