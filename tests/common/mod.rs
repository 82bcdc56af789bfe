//! Shared utilities for integration testing.
//!
//! Provides a minimal in-process Redis stand-in (just enough of the wire
//! protocol for the tracker: PING, INCRBY on the visits key) and a helper
//! that boots the full application against it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};

use visit_tracker::config::AppConfig;
use visit_tracker::http::HttpServer;
use visit_tracker::lifecycle::Shutdown;
use visit_tracker::quotes::QuotePicker;
use visit_tracker::render::Pages;
use visit_tracker::store::CounterStore;

/// Handle to a running mock store.
pub struct MockRedis {
    pub addr: SocketAddr,
    counter: Arc<AtomicI64>,
}

impl MockRedis {
    /// Current counter value as the mock sees it.
    #[allow(dead_code)]
    pub fn count(&self) -> i64 {
        self.counter.load(Ordering::SeqCst)
    }
}

/// Start a mock store with the counter at zero.
#[allow(dead_code)]
pub async fn start_mock_redis() -> MockRedis {
    start_mock_redis_with(0).await
}

/// Start a mock store with the counter pre-seeded.
pub async fn start_mock_redis_with(initial: i64) -> MockRedis {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let counter = Arc::new(AtomicI64::new(initial));
    let shared = counter.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let counter = shared.clone();
                    tokio::spawn(handle_client(socket, counter));
                }
                Err(_) => break,
            }
        }
    });

    MockRedis { addr, counter }
}

async fn handle_client(socket: TcpStream, counter: Arc<AtomicI64>) {
    let (read, mut write) = socket.into_split();
    let mut reader = BufReader::new(read);

    while let Some(parts) = read_command(&mut reader).await {
        let reply = respond(&parts, &counter);
        if write.write_all(reply.as_bytes()).await.is_err() {
            break;
        }
    }
}

/// Read one client command: an array of bulk strings.
async fn read_command(reader: &mut BufReader<OwnedReadHalf>) -> Option<Vec<String>> {
    let header = read_line(reader).await?;
    let count: usize = header.strip_prefix('*')?.parse().ok()?;

    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        let len_line = read_line(reader).await?;
        let len: usize = len_line.strip_prefix('$')?.parse().ok()?;

        let mut buf = vec![0u8; len + 2];
        reader.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        parts.push(String::from_utf8(buf).ok()?);
    }
    Some(parts)
}

async fn read_line(reader: &mut BufReader<OwnedReadHalf>) -> Option<String> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    Some(line.trim_end().to_string())
}

fn respond(parts: &[String], counter: &AtomicI64) -> String {
    let command = parts
        .first()
        .map(|p| p.to_ascii_uppercase())
        .unwrap_or_default();

    match command.as_str() {
        // A bare PING answers PONG; PING with an argument echoes it back
        // as a bulk string, which the pool's recycle check relies on.
        "PING" => match parts.get(1) {
            Some(echo) => format!("${}\r\n{}\r\n", echo.len(), echo),
            None => "+PONG\r\n".to_string(),
        },
        "INCR" | "INCRBY" if parts.get(1).map(String::as_str) == Some("visits") => {
            let by: i64 = parts.get(2).and_then(|v| v.parse().ok()).unwrap_or(1);
            let value = counter.fetch_add(by, Ordering::SeqCst) + by;
            format!(":{value}\r\n")
        }
        "INCR" | "INCRBY" => "-ERR unexpected key\r\n".to_string(),
        "CLIENT" | "SELECT" | "AUTH" => "+OK\r\n".to_string(),
        _ => format!("-ERR unknown command `{command}`\r\n"),
    }
}

/// Start a store stand-in that accepts connections but rejects every
/// command. Distinguishes "store answers garbage" from "store is down".
#[allow(dead_code)]
pub async fn start_broken_redis() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        let (read, mut write) = socket.into_split();
                        let mut reader = BufReader::new(read);
                        while read_command(&mut reader).await.is_some() {
                            if write.write_all(b"-ERR store on fire\r\n").await.is_err() {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Handle to a running application instance. Dropping it triggers
/// shutdown.
pub struct TestApp {
    pub addr: SocketAddr,
    shutdown: Arc<Shutdown>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Boot the full application on an ephemeral port, pointed at the given
/// store address.
#[allow(dead_code)]
pub async fn spawn_app(store_addr: SocketAddr) -> TestApp {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.store.host = store_addr.ip().to_string();
    config.store.port = store_addr.port();

    let store = CounterStore::connect(&config.store).unwrap();
    let pages = Pages::new(config.app_name.as_str()).unwrap();
    let quotes = QuotePicker::new();

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Arc::new(Shutdown::new());
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(store, pages, quotes);
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    TestApp { addr, shutdown }
}

/// An address nothing is listening on; connecting to it is refused.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
