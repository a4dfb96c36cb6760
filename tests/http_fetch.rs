use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use ffstat_terminal::provider::StatsSource;
use ffstat_terminal::stats_fetch::fetch_player_stats;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Answers exactly one request on a loopback port and returns its stats URL.
fn serve_once(status: &str, content_type: &str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });
    format!("http://{addr}/api/statistics")
}

#[test]
fn server_error_status_is_reported_with_body() {
    let url = serve_once(
        "500 Internal Server Error",
        "text/plain",
        "Error: database unavailable".to_string(),
    );
    let err = fetch_player_stats(&url).expect_err("500 should fail");
    let msg = format!("{err:#}");
    assert!(msg.contains("http 500"), "unexpected error: {msg}");
    assert!(msg.contains("database unavailable"), "unexpected error: {msg}");
}

#[test]
fn ok_json_array_parses_into_records() {
    let url = serve_once("200 OK", "application/json", read_fixture("statistics.json"));
    let records = fetch_player_stats(&url).expect("200 should parse");
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].player, "Patrick Mahomes");
}

#[test]
fn ok_plain_text_body_is_a_parse_failure() {
    let url = serve_once("200 OK", "text/plain", "Error: no such table".to_string());
    let source = StatsSource::Api { url };
    let err = source.load().expect_err("text body should not parse");
    assert!(format!("{err:#}").contains("invalid statistics json"));
}
