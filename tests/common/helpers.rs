use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use volley::progress::{BoxedReader, ProgressSink, ProgressSinkFactory};
use volley::{DownloaderBuilder, NoProgress, Summary};

// Common test constants
pub const TEST_USER_AGENT: &str = "volley-test-agent";

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Names of the files directly inside `dir`, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content, expected, "File content mismatch at path: {:?}", path);
}

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates test headers with custom user agent
pub fn create_test_headers_with_agent(agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(agent).expect("Invalid header value"));
    headers
}

// === Downloader Helpers ===

/// Summaries collected by the `on_complete` callback.
pub type Collected = Arc<Mutex<Vec<Summary>>>;

/// A quiet downloader builder writing into `dir` and collecting summaries.
pub fn collecting_builder(dir: &Path) -> (DownloaderBuilder, Collected) {
    let collected: Collected = Arc::new(Mutex::new(Vec::new()));
    let sink = collected.clone();
    let builder = DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .progress(Arc::new(NoProgress))
        .on_complete(move |summary| sink.lock().unwrap().push(summary.clone()));
    (builder, collected)
}

/// Take a snapshot of the collected summaries.
pub fn summaries(collected: &Collected) -> Vec<Summary> {
    collected.lock().unwrap().clone()
}

// === Progress Helpers ===

/// What a [`RecordingProgress`] saw for one download.
#[derive(Debug, Clone, Default)]
pub struct SinkRecord {
    pub total: u64,
    pub label: String,
    pub finished: Option<bool>,
}

/// Progress factory remembering every sink it created.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub records: Arc<Mutex<Vec<SinkRecord>>>,
}

impl RecordingProgress {
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ProgressSinkFactory for RecordingProgress {
    fn create_sink(&self, total: u64, label: &str) -> Box<dyn ProgressSink> {
        let mut records = self.records.lock().unwrap();
        records.push(SinkRecord {
            total,
            label: label.to_string(),
            finished: None,
        });
        Box::new(RecordingSink {
            records: self.records.clone(),
            index: records.len() - 1,
        })
    }
}

struct RecordingSink {
    records: Arc<Mutex<Vec<SinkRecord>>>,
    index: usize,
}

impl ProgressSink for RecordingSink {
    fn wrap_reader(&self, reader: BoxedReader) -> BoxedReader {
        reader
    }

    fn finish(&self, _total: Option<u64>, complete: bool) {
        self.records.lock().unwrap()[self.index].finished = Some(complete);
    }
}

// === Raw Server Helpers ===

/// Start a server that announces `content_length` bytes, sends `sent` of
/// them, then stalls forever without closing the connection.
pub async fn stalling_server(content_length: u64, sent: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {content_length}\r\nContent-Type: application/octet-stream\r\n\r\n"
                );
                if socket.write_all(head.as_bytes()).await.is_err() {
                    return;
                }
                let _ = socket.write_all(&create_test_content(sent)).await;
                let _ = socket.flush().await;
                // Keep the socket open until the client goes away.
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(Duration::from_secs(3600)).await;
            });
        }
    });

    addr
}

/// Start a server that announces `content_length` bytes, sends `sent` of
/// them, then closes the connection.
pub async fn truncating_server(content_length: u64, sent: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {content_length}\r\nConnection: close\r\n\r\n"
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&create_test_content(sent)).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// Start a server that accepts connections but never answers.
pub async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}
