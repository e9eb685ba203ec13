//! CLI wiring integration tests
//!
//! Tests end-to-end CLI behavior:
//! - Exit codes (0 success, 1 failed attempt, 2 setup error)
//! - Config file and flag resolution
//! - Output formats (human, --json, --mermaid-out, rendered HTML)
//!
//! All tests use real binary execution via std::process::Command.
//! Generation goes to a loopback server, never to the real API.

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::thread;
use tempfile::TempDir;

const FENCED_REPLY: &str = r#"{"candidates":[{"content":{"parts":[{"text":"```mermaid\ngraph TD;\n    L1[\"Lemma 1\"] --> T1[\"Theorem 1\"];\n```"}]},"finishReason":"STOP"}]}"#;

// Test helper: the binary built for this test run
fn lemmatree_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lemmatree"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Empty config file so the user's own config never leaks into a test
fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(lemmatree_binary())
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute lemmatree")
}

/// One-shot HTTP server answering a single request with `body`
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            if line == "\r\n" {
                break;
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
        .unwrap();
        stream.flush().unwrap();
    });

    format!("http://{}/v1beta", addr)
}

// =============================================================================
// Help and argument errors
// =============================================================================

#[test]
fn test_help_lists_flags() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--api-key", "--model", "--renderer", "--mermaid-out", "--json"] {
        assert!(stdout.contains(flag), "help should mention {}", flag);
    }
}

#[test]
fn test_unknown_renderer_is_usage_error() {
    let output = run(&["--renderer", "png", "paper.tex"]);
    assert_eq!(output.status.code(), Some(2));
}

// =============================================================================
// Setup errors (exit 2)
// =============================================================================

#[test]
fn test_missing_config_file_exits_2() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let output = run(&["--config", missing.to_str().unwrap(), "--renderer", "none"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.toml"), "stderr: {}", stderr);
}

#[test]
fn test_malformed_config_exits_2() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "model = [not toml").unwrap();
    let output = run(&["--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unreadable_document_exits_2() {
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);
    let absent = dir.path().join("absent.tex");
    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--api-key",
        "k",
        absent.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
}

// =============================================================================
// Failed attempts (exit 1)
// =============================================================================

#[test]
fn test_missing_api_key_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);
    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--renderer",
        "none",
        fixture("paper.tex").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing API key"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_empty_document_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);
    let blank = dir.path().join("blank.tex");
    fs::write(&blank, "\n   \n").unwrap();

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--api-key",
        "k",
        "--renderer",
        "none",
        blank.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("The uploaded .tex file appears to be empty"));
}

#[test]
fn test_api_error_exits_1() {
    let base = serve_once(
        "404 Not Found",
        r#"{"error":{"code":404,"message":"models/nope is not found","status":"NOT_FOUND"}}"#,
    );
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--api-key",
        "k",
        "--base-url",
        &base,
        "--model",
        "nope",
        "--renderer",
        "none",
        fixture("paper.tex").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error calling Gemini API (nope)"), "stderr: {}", stderr);
}

// =============================================================================
// Success (exit 0)
// =============================================================================

#[test]
fn test_success_prints_code_and_renders_html() {
    let base = serve_once("200 OK", FENCED_REPLY);
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("api_key = \"from-config\"\nbase_url = \"{}\"\n", base),
    )
    .unwrap();
    let html = dir.path().join("deps.html");
    let mmd = dir.path().join("deps.mmd");

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "-o",
        html.to_str().unwrap(),
        "--mermaid-out",
        mmd.to_str().unwrap(),
        fixture("paper.tex").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated Mermaid code:"));
    assert!(stdout.contains("graph TD;"));
    assert!(stdout.contains("Rendered flowchart:"));

    assert_eq!(
        fs::read_to_string(&mmd).unwrap(),
        "graph TD;\n    L1[\"Lemma 1\"] --> T1[\"Theorem 1\"];\n"
    );
    let page = fs::read_to_string(&html).unwrap();
    assert!(page.contains("class=\"mermaid\""));
    assert!(page.contains("L1[&quot;Lemma 1&quot;] --&gt; T1"));
}

#[test]
fn test_json_report() {
    let base = serve_once("200 OK", FENCED_REPLY);
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--api-key",
        "k",
        "--base-url",
        &base,
        "--renderer",
        "none",
        "--json",
        fixture("paper.tex").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["mermaid"].as_str().unwrap().starts_with("graph TD;"));
    assert!(report["error"].is_null());
    assert!(report["rendered"].is_null());
}

#[test]
fn test_failed_mermaid_out_still_prints_diagram() {
    let base = serve_once("200 OK", FENCED_REPLY);
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);
    let unwritable = dir.path().join("missing-dir").join("deps.mmd");

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--api-key",
        "k",
        "--base-url",
        &base,
        "--renderer",
        "none",
        "--mermaid-out",
        unwritable.to_str().unwrap(),
        fixture("paper.tex").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("L1[\"Lemma 1\"] --> T1[\"Theorem 1\"];"), "stdout: {}", stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("deps.mmd"), "stderr: {}", stderr);
}
