//! Reqwest transport tests against a loopback server
//!
//! A one-shot TCP listener answers a single request with a canned HTTP
//! response, so the real transport runs without leaving the machine.

use lemmatree::llm::gemini::parse_generate_content;
use lemmatree::llm::transport::ReqwestTransport;
use lemmatree::llm::{GeminiClient, GenerationClient, GenerationError, SyncTransport, Transport};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

/// Serve one request; returns the base URL and a receiver for the raw request
fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            let end = line == "\r\n";
            head.push_str(&line);
            if end {
                break;
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        head.push_str(&String::from_utf8_lossy(&body));

        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        let _ = tx.send(head);
    });

    (format!("http://{}", addr), rx)
}

#[test]
fn test_post_json_returns_body_on_success() {
    let (base, rx) = serve_once("200 OK", r#"{"ok":true}"#);
    let transport = ReqwestTransport::with_timeout(5).unwrap();

    let body = transport
        .post_json(
            &format!("{}/echo", base),
            &[("Content-Type", "application/json")],
            r#"{"ping":1}"#,
        )
        .unwrap();
    assert_eq!(body, r#"{"ok":true}"#);

    let request = rx.recv().unwrap();
    assert!(request.starts_with("POST /echo HTTP/1.1\r\n"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"ping":1}"#));
}

#[test]
fn test_post_json_non_success_status_is_http_error() {
    let (base, _rx) = serve_once("503 Service Unavailable", "upstream overloaded");
    let transport = ReqwestTransport::with_timeout(5).unwrap();

    match transport.post_json(&base, &[], "{}") {
        Err(GenerationError::Http { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream overloaded");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[test]
fn test_connection_refused_is_network_error() {
    // Bind then drop to get a port with nothing listening
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let transport = ReqwestTransport::with_timeout(5).unwrap();
    let err = transport
        .post_json(&format!("http://127.0.0.1:{}/", port), &[], "{}")
        .unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}

#[test]
fn test_gemini_client_over_loopback() {
    let reply = r#"{"candidates":[{"content":{"parts":[{"text":"```mermaid\ngraph TD;\nA-->B\n```"}]},"finishReason":"STOP"}]}"#;
    let (base, rx) = serve_once("200 OK", reply);
    let client = GeminiClient::with_transport(
        "loopback-key",
        &format!("{}/v1beta", base),
        Transport::real(5).unwrap(),
    )
    .unwrap();

    let text = client.generate("gemini-2.0-flash", "hello").unwrap();
    assert_eq!(text, parse_generate_content(reply).unwrap());

    let request = rx.recv().unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent HTTP/1.1\r\n"));
    assert!(request.contains("x-goog-api-key: loopback-key\r\n"));
}

#[test]
fn test_gemini_client_over_loopback_invalid_key() {
    let reply = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#;
    let (base, _rx) = serve_once("400 Bad Request", reply);
    let client = GeminiClient::with_transport("wrong", &base, Transport::real(5).unwrap()).unwrap();

    let err = client.generate("gemini-2.0-flash", "hello").unwrap_err();
    assert!(matches!(err, GenerationError::Authentication(_)));
}
