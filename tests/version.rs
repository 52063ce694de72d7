//! Integration test: Verify binary prints correct version

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_propfinder"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected output to contain version '{}', but got: {}",
        env!("CARGO_PKG_VERSION"),
        stdout
    );
}

#[test]
fn invalid_config_file_fails_before_terminal_setup() {
    let path = std::env::temp_dir().join("propfinder_version_test_bad.toml");
    std::fs::write(&path, "colour = \"blue\"\n").expect("Failed to write config");

    let output = Command::new(env!("CARGO_BIN_EXE_propfinder"))
        .arg("--config")
        .arg(&path)
        .output()
        .expect("Failed to execute binary");

    std::fs::remove_file(&path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ParseError"), "stderr was: {stderr}");
}
