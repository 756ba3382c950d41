//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio `Server` en 127.0.0.1 con puerto 0 sobre
//! un static root temporal, y habla con él por TCP.

use static_http::client::{self, ParsedResponse};
use static_http::config::{ClientConfig, ServerConfig};
use static_http::server::{Server, ShutdownHandle};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;

const INDEX_HTML: &str = "<html><body><h1>Hola</h1></body></html>";
const LOGO_PNG: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0x00, 0xff, 0x10];

/// Servidor de prueba corriendo en un thread aparte
struct TestServer {
    addr: SocketAddr,
    handle: ShutdownHandle,
    thread: Option<JoinHandle<()>>,
    root: TempDir,
}

impl TestServer {
    fn start() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(root.path().join("logo.png"), LOGO_PNG).unwrap();
        std::fs::write(root.path().join("style.css"), "body { color: red; }").unwrap();
        std::fs::create_dir(root.path().join("docs")).unwrap();
        std::fs::write(root.path().join("docs").join("notes.txt"), "plain notes").unwrap();

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir: root.path().to_path_buf(),
            io_timeout_ms: 5000,
            ..ServerConfig::default()
        };

        let server = Server::bind(&config).unwrap();
        let addr = server.local_addr();
        let handle = server.shutdown_handle();
        let thread = thread::spawn(move || server.run().unwrap());

        Self {
            addr,
            handle,
            thread: Some(thread),
            root,
        }
    }

    fn client_config(&self, resource: &str) -> ClientConfig {
        ClientConfig {
            server: "127.0.0.1".to_string(),
            server_port: self.addr.port(),
            resource: resource.to_string(),
            ..ClientConfig::default()
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Helper: envía un request crudo y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &str) -> Vec<u8> {
    send_bytes(addr, raw.as_bytes())
}

/// Helper: como `send_raw`, para requests que no son UTF-8
fn send_bytes(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("Failed to connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

fn get(addr: SocketAddr, path: &str) -> ParsedResponse {
    let raw = format!("GET {} HTTP/1.1\r\nHost: {}\r\n\r\n", path, addr);
    ParsedResponse::parse(send_raw(addr, &raw)).expect("Malformed response")
}

#[test]
fn test_root_serves_index() {
    let server = TestServer::start();
    let response = get(server.addr, "/");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.header("Content-Length"), Some(INDEX_HTML.len().to_string().as_str()));
    assert_eq!(response.header("Connection"), Some("close"));
    assert!(response.header("Date").is_some());
    assert_eq!(response.body(), INDEX_HTML.as_bytes());
}

#[test]
fn test_png_bytes_are_exact() {
    let server = TestServer::start();
    let response = get(server.addr, "/logo.png");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Type"), Some("image/png"));
    assert_eq!(response.body(), LOGO_PNG);
}

#[test]
fn test_mime_types() {
    let server = TestServer::start();

    assert_eq!(get(server.addr, "/style.css").header("Content-Type"), Some("text/css"));
    assert_eq!(
        get(server.addr, "/docs/notes.txt").header("Content-Type"),
        Some("application/octet-stream")
    );
}

#[test]
fn test_query_string_ignored() {
    let server = TestServer::start();
    let response = get(server.addr, "/index.html?v=2#top");

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), INDEX_HTML.as_bytes());
}

#[test]
fn test_missing_file_is_404() {
    let server = TestServer::start();
    let response = get(server.addr, "/missing.txt");

    assert_eq!(response.status(), 404);
    assert_eq!(response.reason(), "File Not Found");
}

#[test]
fn test_directory_is_404() {
    let server = TestServer::start();
    assert_eq!(get(server.addr, "/docs").status(), 404);
}

#[test]
fn test_write_methods_are_405() {
    let server = TestServer::start();

    for method in ["POST", "PUT", "DELETE"] {
        let raw = format!("{} /index.html HTTP/1.1\r\nContent-Length: 0\r\n\r\n", method);
        let response = ParsedResponse::parse(send_raw(server.addr, &raw)).unwrap();
        assert_eq!(response.status(), 405, "{} should be rejected", method);
    }
}

#[test]
fn test_post_with_binary_body_is_405() {
    let server = TestServer::start();
    let raw = send_bytes(
        server.addr,
        b"POST /index.html HTTP/1.1\r\nContent-Length: 4\r\n\r\n\xff\xfe\x00\x01",
    );
    let response = ParsedResponse::parse(raw).unwrap();

    assert_eq!(response.status(), 405);
}

#[test]
fn test_latin1_header_value_is_accepted() {
    let server = TestServer::start();
    let raw = send_bytes(server.addr, b"GET /index.html HTTP/1.1\r\nX-Name: Jos\xe9\r\n\r\n");
    let response = ParsedResponse::parse(raw).unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), INDEX_HTML.as_bytes());
}

#[test]
fn test_bare_lf_request_without_half_close() {
    let server = TestServer::start();

    // Como `nc`: líneas con "\n" y el lado de escritura queda abierto
    let mut stream = TcpStream::connect(server.addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    stream.write_all(b"GET /index.html HTTP/1.1\n\n").unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).unwrap();
    let response = ParsedResponse::parse(raw).unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), INDEX_HTML.as_bytes());
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_500() {
    use std::os::unix::fs::symlink;

    let server = TestServer::start();
    let root = server.root.path();
    symlink(root.join("loop-b.html"), root.join("loop-a.html")).unwrap();
    symlink(root.join("loop-a.html"), root.join("loop-b.html")).unwrap();

    let response = get(server.addr, "/loop-a.html");
    assert_eq!(response.status(), 500);
    assert!(response.reason().starts_with("Internal Server Error: "));
    assert!(String::from_utf8_lossy(response.body()).contains("Internal Server Error: "));
}

#[test]
fn test_head_has_no_body() {
    let server = TestServer::start();
    let raw = send_raw(server.addr, "HEAD /index.html HTTP/1.1\r\n\r\n");
    let response = ParsedResponse::parse(raw).unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Length"), Some(INDEX_HTML.len().to_string().as_str()));
    assert!(response.body().is_empty());
}

#[test]
fn test_malformed_requests() {
    let server = TestServer::start();

    let bad = ParsedResponse::parse(send_raw(server.addr, "garbage\r\n\r\n")).unwrap();
    assert_eq!(bad.status(), 400);

    let unsupported = ParsedResponse::parse(send_raw(server.addr, "PATCH / HTTP/1.1\r\n\r\n")).unwrap();
    assert_eq!(unsupported.status(), 501);

    let version = ParsedResponse::parse(send_raw(server.addr, "GET / HTTP/2.0\r\n\r\n")).unwrap();
    assert_eq!(version.status(), 505);
}

#[test]
fn test_traversal_is_confined() {
    let server = TestServer::start();
    let response = get(server.addr, "/../../../../etc/passwd");
    assert_eq!(response.status(), 404);
}

#[test]
fn test_concurrent_requests() {
    let server = TestServer::start();
    let addr = server.addr;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || {
                let path = if i % 2 == 0 { "/index.html" } else { "/logo.png" };
                let response = get(addr, path);
                (i, response.status(), response.body().to_vec())
            })
        })
        .collect();

    for handle in handles {
        let (i, status, body) = handle.join().expect("Thread panicked");
        assert_eq!(status, 200);
        if i % 2 == 0 {
            assert_eq!(body, INDEX_HTML.as_bytes());
        } else {
            assert_eq!(body, LOGO_PNG);
        }
    }
}

#[test]
fn test_slow_client_does_not_block_others() {
    let server = TestServer::start();

    // Conexión abierta sin enviar nada
    let _idle = TcpStream::connect(server.addr).unwrap();

    let response = get(server.addr, "/");
    assert_eq!(response.status(), 200);
}

#[test]
fn test_client_saves_image() {
    let server = TestServer::start();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("saved.png");

    let config = ClientConfig {
        output: output.clone(),
        ..server.client_config("/logo.png")
    };
    let mut stdout = Vec::new();
    client::run(&config, &mut stdout).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), LOGO_PNG);
    let printed = String::from_utf8(stdout).unwrap();
    assert!(printed.contains("Image saved as"));
    assert!(printed.contains("saved.png"));
}

#[test]
fn test_client_prints_text_and_not_found() {
    let server = TestServer::start();

    let mut stdout = Vec::new();
    client::run(&server.client_config("/"), &mut stdout).unwrap();
    let printed = String::from_utf8(stdout).unwrap();
    assert!(printed.starts_with("HTTP/1.1 200 OK"));
    assert!(printed.contains(INDEX_HTML));

    let mut stdout = Vec::new();
    client::run(&server.client_config("/nope.html"), &mut stdout).unwrap();
    assert_eq!(String::from_utf8(stdout).unwrap(), "Resource Not Found\n");
}

#[test]
fn test_client_json_summary() {
    let server = TestServer::start();
    let config = ClientConfig {
        json: true,
        ..server.client_config("/style.css")
    };

    let mut stdout = Vec::new();
    client::run(&config, &mut stdout).unwrap();
    let summary: serde_json::Value = serde_json::from_slice(&stdout).unwrap();

    assert_eq!(summary["status"], serde_json::json!(200));
    assert_eq!(summary["headers"]["Content-Type"], "text/css");
}

#[test]
fn test_shutdown_stops_accepting() {
    let mut server = TestServer::start();
    let addr = server.addr;

    server.handle.shutdown();
    server.thread.take().unwrap().join().unwrap();

    // El listener se cerró junto con `run`
    assert!(TcpStream::connect_timeout(&addr, Duration::from_millis(500)).is_err());
}
