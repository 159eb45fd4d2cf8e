//! Integration tests for the command-line interface
//!
//! Runs the built binary inside a temporary site root containing
//! `app/page.tsx`.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use text_patcher::builtin::{ABOUT_PATTERN, ABOUT_REPLACEMENT};

const PAGE_PREFIX: &str = "<section id=\"about\">\n  <p className=\"text-gray-300 leading-relaxed\">\n    ";
const PAGE_SUFFIX: &str = "\n  </p>\n</section>\n";

/// Helper to create a site root whose page still has the old paragraph
fn setup_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("app")).unwrap();
    fs::write(
        dir.path().join("app/page.tsx"),
        format!("{PAGE_PREFIX}{ABOUT_PATTERN}{PAGE_SUFFIX}"),
    )
    .unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_text-patcher"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn page(dir: &Path) -> String {
    fs::read_to_string(dir.join("app/page.tsx")).unwrap()
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--patch"));
}

#[test]
fn test_no_arguments_patches_about_section() {
    let site = setup_site();

    let output = run(site.path(), &[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Successfully replaced About section"));

    assert_eq!(
        page(site.path()),
        format!("{PAGE_PREFIX}{ABOUT_REPLACEMENT}{PAGE_SUFFIX}")
    );
}

#[test]
fn test_second_run_reports_not_found_and_exits_cleanly() {
    let site = setup_site();
    assert!(run(site.path(), &[]).status.success());
    let after_first = page(site.path());

    let output = run(site.path(), &[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Old paragraph not found"));
    assert_eq!(page(site.path()), after_first);
}

#[test]
fn test_missing_page_fails() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page.tsx"));
    assert!(!dir.path().join("app/page.tsx").exists());
}

#[test]
fn test_dry_run_shows_diff_without_writing() {
    let site = setup_site();
    let before = page(site.path());

    let output = run(site.path(), &["--dry-run"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DRY RUN"));
    assert!(stdout.contains("+++ app/page.tsx (patched)"));
    assert!(stdout.contains("-    I'm a results-driven"));
    assert!(stdout.contains("+    I'm a Software Engineer"));

    assert_eq!(page(site.path()), before);
}

#[test]
fn test_diff_applies_and_prints_changes() {
    let site = setup_site();

    let output = run(site.path(), &["--diff"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Successfully replaced About section"));
    assert!(stdout.contains("--- app/page.tsx (original)"));
    assert!(page(site.path()).contains(ABOUT_REPLACEMENT));
}

#[test]
fn test_check_reports_status() {
    let site = setup_site();

    let output = run(site.path(), &["--check"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("pending"));

    run(site.path(), &[]);
    let output = run(site.path(), &["--check"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("applied"));

    fs::write(site.path().join("app/page.tsx"), "<p>rewritten by hand</p>").unwrap();
    let output = run(site.path(), &["--check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("missing"));
}

#[test]
fn test_patch_definition_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("patches")).unwrap();
    fs::write(dir.path().join("hero.txt"), "Hello, world!\n").unwrap();
    fs::write(
        dir.path().join("patches/hero.toml"),
        r#"[meta]
name = "hero greeting"

[patch]
file = "../hero.txt"
search = "world"
replace = "portfolio"
"#,
    )
    .unwrap();

    let output = run(dir.path(), &["--patch", "patches/hero.toml"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Successfully replaced hero greeting"));
    assert_eq!(
        fs::read_to_string(dir.path().join("hero.txt")).unwrap(),
        "Hello, portfolio!\n"
    );

    let output = run(dir.path(), &["--patch", "patches/hero.toml"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("hero greeting: pattern not found"));
}

#[test]
fn test_invalid_patch_definition_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.toml"),
        "[patch]\nfile = \"x.txt\"\nsearch = \"same\"\nreplace = \"same\"\n",
    )
    .unwrap();

    let output = run(dir.path(), &["--patch", "bad.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("replace contains the search text"));
}

#[test]
fn test_file_override() {
    let dir = TempDir::new().unwrap();
    let other = dir.path().join("about.tsx");
    fs::write(&other, format!("<p>{ABOUT_PATTERN}</p>")).unwrap();

    let output = run(dir.path(), &["--file", "about.tsx"]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&other).unwrap(),
        format!("<p>{ABOUT_REPLACEMENT}</p>")
    );
}

#[test]
fn test_check_after_deletion_patch_reports_applied() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "keep REMOVE keep").unwrap();
    fs::write(
        dir.path().join("drop.toml"),
        "[patch]\nfile = \"notes.txt\"\nsearch = \"REMOVE \"\nreplace = \"\"\n",
    )
    .unwrap();

    assert!(run(dir.path(), &["--patch", "drop.toml"]).status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
        "keep keep"
    );

    let output = run(dir.path(), &["--patch", "drop.toml", "--check"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("applied"));
}
