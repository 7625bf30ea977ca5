//! Integration tests for the github-mcp-server binary

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

const TOKEN: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";

fn binary() -> Command {
    let mut cmd = Command::cargo_bin("github-mcp-server").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("GH_HOST");
    cmd
}

#[test]
fn test_help_lists_stdio_subcommand() {
    binary()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stdio"))
        .stdout(predicate::str::contains(TOKEN));
}

#[test]
fn test_version() {
    binary()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_stdio_help_describes_flags() {
    binary()
        .args(["stdio", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--read-only"))
        .stdout(predicate::str::contains("--gh-host"))
        .stdout(predicate::str::contains("--enable-command-logging"));
}

#[test]
fn test_missing_token_exits_with_error() {
    binary()
        .env_remove(TOKEN)
        .arg("stdio")
        .stdin(Stdio::null())
        .assert()
        .code(2)
        .stderr(predicate::str::contains(TOKEN));
}

#[test]
fn test_unknown_subcommand_fails() {
    binary().arg("frobnicate").assert().failure();
}

#[test]
fn test_initialize_handshake_over_stdio() {
    let mut server = binary()
        .env(TOKEN, "ghp_not_a_real_token")
        .args(["stdio", "--read-only"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start MCP server");

    let stdin = server.stdin.as_mut().expect("Failed to get stdin");
    let init_msg = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"1.0.0"}}}"#;
    writeln!(stdin, "{init_msg}").expect("Failed to write initialization");
    stdin.flush().expect("Failed to flush stdin");

    std::thread::sleep(Duration::from_millis(500));

    let initialized_msg = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
    writeln!(stdin, "{initialized_msg}").expect("Failed to write initialized notification");
    stdin.flush().expect("Failed to flush stdin");

    std::thread::sleep(Duration::from_millis(500));

    // Closing stdin ends the session
    drop(server.stdin.take());

    let output = server.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stdout.contains("github-mcp-server"),
        "initialize response should name the server.\nstdout: {stdout}\nstderr: {stderr}"
    );
    assert!(!stdout.contains("ghp_not_a_real_token"));
    assert!(
        output.status.success(),
        "server should exit cleanly when the client disconnects: {:?}",
        output.status.code()
    );
}
