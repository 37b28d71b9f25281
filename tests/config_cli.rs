//! Settings editor round-trips through the compiled binary

use std::path::Path;
use std::process::Output;

use assert_cmd::Command;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::cargo_bin("portal-autologin")
        .unwrap()
        .args(args)
        .args(["--config-dir", dir.to_str().unwrap()])
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn set_show_clear_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let set = run(
        dir.path(),
        &[
            "config",
            "set",
            "--reg-number",
            "12345678",
            "--password",
            "Secret#1",
            "--submit-selector",
            "#loginBtn",
        ],
    );
    assert!(set.status.success(), "{set:?}");
    assert!(stdout(&set).contains("Credentials saved."));

    // Password is obfuscated at rest, never stored in plain text.
    let record = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(record.contains("\"regNumber\": \"12345678\""));
    assert!(!record.contains("Secret#1"));

    let show = run(dir.path(), &["config", "show"]);
    assert!(show.status.success());
    let text = stdout(&show);
    assert!(text.contains("12345678"));
    assert!(text.contains("********"));
    assert!(!text.contains("Secret#1"));
    assert!(text.contains("#loginBtn"));

    let reveal = run(dir.path(), &["config", "show", "--reveal"]);
    assert!(stdout(&reveal).contains("Secret#1"));

    let clear = run(dir.path(), &["config", "clear"]);
    assert!(clear.status.success());
    assert!(stdout(&clear).contains("All data cleared."));

    let empty = run(dir.path(), &["config", "show"]);
    assert!(stdout(&empty).contains("No configuration saved."));
}

#[test]
fn set_rejects_missing_required_fields() {
    let dir = tempfile::tempdir().unwrap();

    let no_password = run(dir.path(), &["config", "set", "--reg-number", "12345678"]);
    assert!(!no_password.status.success());
    assert!(!dir.path().join("config.json").exists(), "no store write on rejection");

    let empty_reg = run(
        dir.path(),
        &["config", "set", "--reg-number", "  ", "--password", "pw"],
    );
    assert!(!empty_reg.status.success());
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn set_preserves_unspecified_fields() {
    let dir = tempfile::tempdir().unwrap();

    run(
        dir.path(),
        &[
            "config",
            "set",
            "--reg-number",
            "12345678",
            "--password",
            "Secret#1",
            "--username-selector",
            "#user",
        ],
    );
    // Re-save with only a new selector; credentials must survive.
    let update = run(
        dir.path(),
        &["config", "set", "--password-selector", "#pass"],
    );
    assert!(update.status.success(), "{update:?}");

    let reveal = run(dir.path(), &["config", "show", "--reveal"]);
    let text = stdout(&reveal);
    assert!(text.contains("12345678"));
    assert!(text.contains("Secret#1"));
    assert!(text.contains("#user"));
    assert!(text.contains("#pass"));

    // An explicit empty string removes an override.
    run(dir.path(), &["config", "set", "--username-selector", ""]);
    let text = stdout(&run(dir.path(), &["config", "show"]));
    assert!(!text.contains("#user"));
    assert!(text.contains("(built-in)"));
}
