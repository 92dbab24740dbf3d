#![allow(clippy::unwrap_used)]
use std::io::Read;
use std::io::Write;
use std::net::SocketAddr;
use std::net::TcpStream;
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use folio_relay::MemoryMailTransport;
use folio_relay::RelayOptions;
use folio_relay::RelayServer;
use folio_relay::ShutdownHandle;
use pretty_assertions::assert_eq;

struct Running {
    addr: SocketAddr,
    shutdown: ShutdownHandle,
    thread: Option<JoinHandle<()>>,
}

impl Drop for Running {
    fn drop(&mut self) {
        self.shutdown.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn start(resume_path: PathBuf, transport: MemoryMailTransport) -> Running {
    let options = RelayOptions {
        bind: "127.0.0.1:0".to_string(),
        allowed_origin: "https://portfolio.example".to_string(),
        resume_path,
        resume_download_name: "Resume.pdf".to_string(),
        sender: "site@example.com".to_string(),
        recipient: "owner@example.com".to_string(),
    };
    let server = RelayServer::bind(options, transport).unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let thread = std::thread::spawn(move || server.serve());
    Running {
        addr,
        shutdown,
        thread: Some(thread),
    }
}

fn send(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(raw.as_bytes()).unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn post_contact(addr: SocketAddr, body: &str) -> String {
    send(
        addr,
        &format!(
            "POST /api/contact HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    )
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap_or_default()
}

fn body(response: &str) -> &str {
    response.split_once("\r\n\r\n").map_or("", |(_, body)| body)
}

#[test]
fn contact_round_trip_over_tcp() {
    let transport = MemoryMailTransport::new();
    let running = start(PathBuf::from("missing.pdf"), transport.clone());

    let response = post_contact(
        running.addr,
        r#"{"name":"Grace","email":"grace@example.com","message":"Let's talk"}"#,
    );
    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert!(response.contains("Access-Control-Allow-Origin: https://portfolio.example"));
    assert_eq!(
        body(&response),
        r#"{"success":true,"message":"Message sent successfully!"}"#
    );

    let sent = transport.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Inquiry from Grace");
}

#[test]
fn validation_failures_over_tcp() {
    let transport = MemoryMailTransport::new();
    let running = start(PathBuf::from("missing.pdf"), transport.clone());

    let response = post_contact(running.addr, r#"{"name":"","email":"x@y.io","message":"m"}"#);
    assert!(status_line(&response).starts_with("HTTP/1.1 400"));
    assert_eq!(
        body(&response),
        r#"{"success":false,"message":"All fields are required"}"#
    );
    assert!(transport.messages().is_empty());
}

#[test]
fn resume_download_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Resume.pdf");
    std::fs::write(&path, "%PDF-1.7 test").unwrap();
    let running = start(path, MemoryMailTransport::new());

    let response = send(
        running.addr,
        "GET /api/resume HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert!(response.contains("Content-Disposition: attachment; filename=\"Resume.pdf\""));
    assert_eq!(body(&response), "%PDF-1.7 test");
}

#[test]
fn root_and_unknown_over_tcp() {
    let running = start(PathBuf::from("missing.pdf"), MemoryMailTransport::new());

    let root = send(running.addr, "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    assert_eq!(body(&root), "API is running...");

    let missing = send(
        running.addr,
        "GET /nowhere HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert!(status_line(&missing).starts_with("HTTP/1.1 404"));
}
