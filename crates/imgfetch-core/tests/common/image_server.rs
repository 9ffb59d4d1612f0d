//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of routes, each with a status, optional
//! Content-Type and body. Unknown paths get 404. Supports one redirect kind
//! so redirect handling can be exercised.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub enum Route {
    Body {
        status: u16,
        content_type: Option<&'static str>,
        body: Vec<u8>,
    },
    /// 302 to another path on the same server.
    Redirect(&'static str),
}

impl Route {
    pub fn image(content_type: &'static str, body: &[u8]) -> Self {
        Route::Body {
            status: 200,
            content_type: Some(content_type),
            body: body.to_vec(),
        }
    }

    pub fn untyped(body: &[u8]) -> Self {
        Route::Body {
            status: 200,
            content_type: None,
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Route::Body {
            status,
            content_type: Some("text/html"),
            body: b"<h1>error</h1>".to_vec(),
        }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&'static str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<&'static str, Route>> = Arc::new(routes.into_iter().collect());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on a port nothing listens on (bound, then released).
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/lost.jpg", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<&'static str, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }
    let path = path.split('?').next().unwrap_or("");

    match routes.get(path) {
        Some(Route::Redirect(to)) => {
            let response = format!(
                "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Type: text/html\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                to
            );
            let _ = stream.write_all(response.as_bytes());
        }
        Some(Route::Body {
            status,
            content_type,
            body,
        }) => write_body(&mut stream, *status, *content_type, body),
        None => write_body(&mut stream, 404, Some("text/html"), b"not found"),
    }
}

fn write_body(
    stream: &mut std::net::TcpStream,
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
) {
    let content_type = content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} {}\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        content_type,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Returns (method, request target) from the first request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    (method, target)
}
