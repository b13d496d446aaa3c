//! Tests for the download module functionality.
//!
//! This file contains tests for the download module, including:
//! - Filename resolution from response metadata
//! - Running a single HTTP download task
//! - Summary and Status functionality

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use tokio_util::sync::CancellationToken;
use volley::download::filename::{resolve_filename, DEFAULT_FILENAME};
use volley::download::{HttpDownloadTask, Status, Summary, Task};
use volley::http::{create_http_client, HttpClientConfig};
use volley::storage::FsWriterFactory;
use volley::{ErrorKind, NoProgress};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

fn headers(pairs: &[(reqwest::header::HeaderName, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(name.clone(), HeaderValue::from_static(value));
    }
    map
}

fn task_for(url: &str, dir: &std::path::Path) -> HttpDownloadTask {
    HttpDownloadTask::new(
        Url::parse(url).unwrap(),
        create_http_client(HttpClientConfig::default()).unwrap(),
        Arc::new(FsWriterFactory::new(dir)),
        Arc::new(NoProgress),
    )
}

#[test]
fn test_resolve_from_url() {
    let url = Url::parse("https://example.com/releases/v1.2/app.tar.gz?token=abc").unwrap();
    assert_eq!(resolve_filename(&url, &HeaderMap::new()), "app.tar.gz");
}

#[test]
fn test_resolve_percent_encoded_url() {
    let url = Url::parse("https://example.com/files/annual%20report.pdf").unwrap();
    assert_eq!(resolve_filename(&url, &HeaderMap::new()), "annual report.pdf");
}

#[test]
fn test_resolve_prefers_content_disposition() {
    let url = Url::parse("https://example.com/download.php?id=7").unwrap();
    let map = headers(&[(CONTENT_DISPOSITION, "attachment; filename=\"invoice-7.pdf\"")]);
    assert_eq!(resolve_filename(&url, &map), "invoice-7.pdf");
}

#[test]
fn test_resolve_extended_filename() {
    let url = Url::parse("https://example.com/get").unwrap();
    let map = headers(&[(
        CONTENT_DISPOSITION,
        "attachment; filename=\"fallback.txt\"; filename*=UTF-8''r%C3%A9sum%C3%A9.txt",
    )]);
    assert_eq!(resolve_filename(&url, &map), "résumé.txt");
}

#[test]
fn test_resolve_malformed_disposition_falls_back_to_url() {
    let url = Url::parse("https://example.com/data.csv").unwrap();
    let map = headers(&[(CONTENT_DISPOSITION, "attachment; filename=\"unterminated")]);
    assert_eq!(resolve_filename(&url, &map), "data.csv");
}

#[test]
fn test_resolve_strips_directories() {
    let url = Url::parse("https://example.com/get").unwrap();
    let map = headers(&[(CONTENT_DISPOSITION, "attachment; filename=\"../../etc/passwd\"")]);
    assert_eq!(resolve_filename(&url, &map), "passwd");
}

#[test]
fn test_resolve_default_with_extension() {
    let url = Url::parse("https://example.com/").unwrap();
    assert_eq!(resolve_filename(&url, &HeaderMap::new()), DEFAULT_FILENAME);

    let map = headers(&[(CONTENT_TYPE, "application/pdf")]);
    assert_eq!(resolve_filename(&url, &map), "download.pdf");
}

#[test]
fn test_resolve_keeps_existing_extension() {
    let url = Url::parse("https://example.com/page.php").unwrap();
    let map = headers(&[(CONTENT_TYPE, "text/html; charset=utf-8")]);
    assert_eq!(resolve_filename(&url, &map), "page.php");

    let url = Url::parse("https://example.com/page").unwrap();
    assert_eq!(resolve_filename(&url, &map), "page.html");
}

#[tokio::test]
async fn test_task_execute_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let task = task_for(&format!("{}/report.pdf", server.uri()), temp_dir.path());
    assert_eq!(task.url().path(), "/report.pdf");

    let summary = task.execute(CancellationToken::new()).await;

    assert_eq!(summary.status(), &Status::Success);
    assert_eq!(summary.statuscode(), Some(StatusCode::OK));
    assert_eq!(summary.filename(), Some("report.pdf"));
    assert_eq!(summary.size(), 5);
    assert_file_content(&temp_dir.path().join("report.pdf"), b"hello");
}

#[tokio::test]
async fn test_task_execute_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let task = task_for(&format!("{}/broken.zip", server.uri()), temp_dir.path());
    let summary = task.execute(CancellationToken::new()).await;

    assert!(matches!(summary.status(), Status::Fail(msg) if msg.contains("500")));
    assert_eq!(summary.error_kind(), Some(ErrorKind::Transport));
    assert!(list_files(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_task_execute_connection_refused() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let temp_dir = create_temp_dir();
    let task = task_for(&format!("http://{addr}/file.bin"), temp_dir.path());
    let summary = task.execute(CancellationToken::new()).await;

    assert_eq!(summary.error_kind(), Some(ErrorKind::Transport));
    assert_eq!(summary.statuscode(), None);
    assert!(list_files(temp_dir.path()).is_empty());
}

#[test]
fn test_summary_not_started() {
    let summary = Summary::new(Url::parse("https://example.com/a.bin").unwrap());
    assert_eq!(summary.status(), &Status::NotStarted);
    assert!(!summary.is_success());
}
