//! End-to-end tests: the greeting app over a real socket, spoken to in raw
//! HTTP/1.1.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use onion::app::{self, DEFAULT_AUTH_TOKEN, PROCESSING_DELAY};
use onion::{Config, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), onion::Error>>,
}

impl TestServer {
    async fn start() -> Self {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let router = app::router(Config::new("Integration"), DEFAULT_AUTH_TOKEN);

        let handle = tokio::spawn(server.serve_with_shutdown(router, async {
            let _ = stopped.await;
        }));

        Self { addr, stop, handle }
    }

    async fn shutdown(self) {
        self.stop.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

struct RawResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn assert_cors(&self) {
        assert_eq!(self.header("access-control-allow-origin"), Some("*"));
        assert_eq!(
            self.header("access-control-allow-methods"),
            Some("GET, POST, PUT, DELETE, OPTIONS"),
        );
        assert_eq!(
            self.header("access-control-allow-headers"),
            Some("Content-Type, Authorization"),
        );
    }
}

async fn send(addr: SocketAddr, method: &str, path: &str, token: Option<&str>) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut head = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(token) = token {
        head.push_str(&format!("X-Auth-Token: {token}\r\n"));
    }
    head.push_str("\r\n");
    stream.write_all(head.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    parse(&String::from_utf8(raw).unwrap())
}

fn parse(raw: &str) -> RawResponse {
    let (head, body) = raw.split_once("\r\n\r\n").expect("no header terminator");
    let mut lines = head.split("\r\n");

    let status = lines.next().unwrap()
        .split(' ')
        .nth(1).unwrap()
        .parse().unwrap();
    let headers = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect();

    RawResponse { status, headers, body: body.to_owned() }
}

#[tokio::test]
async fn greets_authenticated_clients() {
    let server = TestServer::start().await;

    let started = Instant::now();
    let res = send(server.addr, "GET", "/", Some(DEFAULT_AUTH_TOKEN)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body, "Hello, I'm Integration");
    assert_eq!(res.header("content-type"), Some("application/json"));
    res.assert_cors();
    assert!(started.elapsed() >= PROCESSING_DELAY);

    server.shutdown().await;
}

#[tokio::test]
async fn rejects_missing_and_wrong_tokens() {
    let server = TestServer::start().await;

    for token in [None, Some("nope")] {
        let started = Instant::now();
        let res = send(server.addr, "GET", "/", token).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body, "Unauthorized\n");
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.header("x-content-type-options"), Some("nosniff"));
        res.assert_cors();
        // Rejected before the handler, so no processing delay.
        assert!(started.elapsed() < PROCESSING_DELAY);
    }

    server.shutdown().await;
}

#[tokio::test]
async fn preflight_on_any_path_is_no_content() {
    let server = TestServer::start().await;

    for path in ["/", "/does/not/exist"] {
        let res = send(server.addr, "OPTIONS", path, None).await;

        assert_eq!(res.status, 204);
        assert!(res.body.is_empty());
        assert_eq!(res.header("content-type"), None);
        res.assert_cors();
    }

    server.shutdown().await;
}

#[tokio::test]
async fn unknown_routes_and_methods() {
    let server = TestServer::start().await;

    let res = send(server.addr, "GET", "/missing", Some(DEFAULT_AUTH_TOKEN)).await;
    assert_eq!(res.status, 404);
    res.assert_cors();

    let res = send(server.addr, "POST", "/", Some(DEFAULT_AUTH_TOKEN)).await;
    assert_eq!(res.status, 405);
    res.assert_cors();

    server.shutdown().await;
}

#[tokio::test]
async fn extension_methods_go_through_the_whole_chain() {
    let server = TestServer::start().await;

    for method in ["PURGE", "PROPFIND"] {
        let res = send(server.addr, method, "/", Some(DEFAULT_AUTH_TOKEN)).await;
        assert_eq!(res.status, 405, "{method}");
        assert_eq!(res.header("content-type"), Some("application/json"), "{method}");
        res.assert_cors();

        let res = send(server.addr, method, "/", None).await;
        assert_eq!(res.status, 401, "{method}");
        res.assert_cors();
    }

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fifty_concurrent_requests_share_one_delay() {
    let server = TestServer::start().await;
    let started = Instant::now();

    let mut clients = JoinSet::new();
    for _ in 0..50 {
        let addr = server.addr;
        clients.spawn(async move { send(addr, "GET", "/", Some(DEFAULT_AUTH_TOKEN)).await });
    }

    let mut ok = 0;
    while let Some(res) = clients.join_next().await {
        let res = res.unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.body, "Hello, I'm Integration");
        ok += 1;
    }

    assert_eq!(ok, 50);
    assert!(started.elapsed() < PROCESSING_DELAY + Duration::from_secs(3), "took {:?}", started.elapsed());

    server.shutdown().await;
}

#[tokio::test]
async fn bind_rejects_malformed_addresses() {
    let err = Server::bind("not an address").await.err().unwrap();
    assert!(matches!(err, onion::Error::Addr(_)));
}
