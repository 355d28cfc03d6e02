//! Minimal HTTP/1.1 server for scrape and download-loop integration tests.
//!
//! Serves a fixed set of routes. A route can be told to fail its first N
//! GETs before succeeding, and every request path is recorded so tests can
//! assert ordering and retry behavior.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// One servable route.
#[derive(Debug, Clone)]
pub struct Route {
    pub body: Vec<u8>,
    /// Status returned once `fail_first` is exhausted.
    pub status: u32,
    /// Number of initial GETs answered with 500 before `status` applies.
    pub fail_first: u32,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            status: 200,
            fail_first: 0,
        }
    }

    pub fn with_status(status: u32, body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            status,
            fail_first: 0,
        }
    }

    pub fn failing_first(mut self, n: u32) -> Self {
        self.fail_first = n;
        self
    }
}

#[derive(Default)]
struct ServerState {
    routes: HashMap<String, Route>,
    failures_left: HashMap<String, u32>,
    request_log: Vec<String>,
}

/// Handle to a running test server.
pub struct GalleryServer {
    base_url: String,
    state: Arc<Mutex<ServerState>>,
}

impl GalleryServer {
    /// Absolute URL for `path` (must start with `/`).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Paths of all GET requests received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().request_log.clone()
    }
}

/// Starts a server in a background thread serving `routes` (path -> route).
/// The server runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> GalleryServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();

    let mut state = ServerState::default();
    for (path, route) in routes {
        state
            .failures_left
            .insert(path.to_string(), route.fail_first);
        state.routes.insert(path.to_string(), route);
    }
    let state = Arc::new(Mutex::new(state));

    let accept_state = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&accept_state);
            thread::spawn(move || handle(stream, &state));
        }
    });

    GalleryServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        state,
    }
}

fn handle(mut stream: std::net::TcpStream, state: &Mutex<ServerState>) {
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
    let Some((method, path)) = parse_request(request) else {
        return;
    };
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
        return;
    }

    let (status, body) = {
        let mut guard = state.lock().unwrap();
        let st = &mut *guard;
        st.request_log.push(path.to_string());

        match st.routes.get(path) {
            None => (404, b"not found".to_vec()),
            Some(route) => {
                let failures = st.failures_left.entry(path.to_string()).or_insert(0);
                if *failures > 0 {
                    *failures -= 1;
                    (500, b"try again".to_vec())
                } else {
                    (route.status, route.body.clone())
                }
            }
        }
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&body);
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Returns (method, path) from the request line.
fn parse_request(request: &str) -> Option<(&str, &str)> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let path = parts.next()?;
    Some((method, path))
}
