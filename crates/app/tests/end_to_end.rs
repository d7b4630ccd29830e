//! End-to-end route tests against a local HTTP stub.
//!
//! These tests drive the batch runner with the real reqwest executor
//! against a throwaway server listening on a random port.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use routecheck_application::{BatchRunner, TestFailure, TestRunner};
use routecheck_domain::{Expectation, ExpectedShape, HttpMethod, RouteTest, UrlResolver};
use routecheck_infrastructure::{ReqwestExecutor, Suite, SuiteFormat};

/// Reads one request, body included, so the socket closes cleanly.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < end + 4 + length {
                let n = stream.read(&mut chunk).await.expect("read body");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            break;
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn reply(status: &str, extra_headers: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n{extra_headers}\r\n{body}",
        body.len()
    )
}

/// Routes on the request line; unknown paths get a 404.
fn route(request_line: &str) -> String {
    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    match path {
        "/health" => reply("200 OK", "", ""),
        "/releases/1" => reply(
            "200 OK",
            "Content-Type: application/json\r\n",
            r#"{"id": 1, "title": "Night Drive", "tracks": ["a", "b"]}"#,
        ),
        "/signin" => reply(
            "200 OK",
            "Set-Cookie: sid=first\r\nSet-Cookie: sid=second; HttpOnly\r\n",
            "welcome",
        ),
        _ => reply("404 Not Found", "", "not found"),
    }
}

async fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let request = read_request(&mut stream).await;
            let response = route(request.lines().next().unwrap_or_default());
            stream.write_all(response.as_bytes()).await.expect("write");
            stream.shutdown().await.ok();
        }
    });
    format!("http://{addr}")
}

fn executor() -> Arc<ReqwestExecutor> {
    Arc::new(ReqwestExecutor::new().expect("client"))
}

#[tokio::test]
async fn test_health_check_passes() {
    let base = serve().await;
    let test = RouteTest::new("health")
        .with_method(HttpMethod::Get)
        .with_path("/health")
        .with_get_url(UrlResolver::with_base(base))
        .expect_status(200);

    let outcome = TestRunner::new(executor()).run(&test).await.unwrap();

    assert_eq!(outcome.status, Some(200));
    assert!(outcome.body.is_empty());
}

#[tokio::test]
async fn test_unexpected_status_fails_with_context() {
    let base = serve().await;
    let test = RouteTest::new("gone")
        .with_url(format!("{base}/nothing"))
        .expect_status(200);

    let err = TestRunner::new(executor()).run(&test).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Expected status 200 but got 404"));
    assert!(message.contains("Response: not found"));
    assert!(message.contains(&format!("URL: {base}/nothing")));
}

#[tokio::test]
async fn test_connection_refused_tolerated_with_nil_response() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let test = RouteTest::new("offline")
        .with_url(format!("http://{addr}/"))
        .expect_status(0)
        .nil_response();

    let outcome = TestRunner::new(executor()).run(&test).await.unwrap();

    assert_eq!(outcome.status, None);
}

#[tokio::test]
async fn test_shape_mismatch_shows_request() {
    let base = serve().await;
    let test = RouteTest::new("release")
        .with_url(format!("{base}/releases/1"))
        .with_method(HttpMethod::Post)
        .with_body(json!({"fields": ["title"]}))
        .expect_status(200)
        .expect_shape(
            ExpectedShape::new()
                .with("title", Expectation::equals("Day Drive"))
                .with("tracks", Expectation::Length(2)),
        );

    let err = TestRunner::new(executor()).run(&test).await.unwrap_err();

    let TestFailure::BodyShape { source, context } = &err else {
        panic!("unexpected failure: {err}");
    };
    assert_eq!(source.mismatches.len(), 1);
    assert_eq!(source.mismatches[0].path, "title");
    assert_eq!(context.method, "POST");
    assert_eq!(context.payload, r#"{"fields":["title"]}"#);
    assert!(err.to_string().contains(&format!("URL: {base}/releases/1")));
}

#[tokio::test]
async fn test_cookies_collapse_last_write_wins() {
    let base = serve().await;
    let test = RouteTest::new("signin")
        .with_url(format!("{base}/signin"))
        .expect_status(200)
        .body_should_have(["welcome"])
        .expect_cookies(ExpectedShape::new().with("sid", Expectation::equals("second")));

    let outcome = TestRunner::new(executor()).run(&test).await.unwrap();

    assert_eq!(outcome.cookie("sid"), Some("second"));
}

#[tokio::test]
async fn test_suite_runs_end_to_end() {
    let base = serve().await;
    let suite = Suite::parse(
        r"
defaults:
  expected_status: 200
tests:
  - name: health
    path: /health
  - name: release
    path: /releases/1
    expected_shape:
      id: 1
      tracks: {'$len': 2}
  - name: missing
    path: /releases/999
    expected_status: 404
    body_should_have: [not found]
",
        SuiteFormat::Yaml,
    )
    .unwrap()
    .with_base_url(base);

    let report = BatchRunner::new(executor())
        .run(&suite.into_tests())
        .await
        .unwrap();

    assert_eq!(report.executed(), 3);
    assert_eq!(report.outcomes[1].response.as_ref().unwrap()["title"], "Night Drive");
}

#[tokio::test]
async fn test_batch_reports_failing_test_name() {
    let base = serve().await;
    let resolver = UrlResolver::with_base(base);
    let mut tests = vec![
        RouteTest::new("health").with_path("/health"),
        RouteTest::new("broken").with_path("/missing"),
    ];
    RouteTest::template().expect_status(200).apply(&mut tests);
    for test in &mut tests {
        test.get_url = Some(resolver.clone());
    }

    let err = BatchRunner::new(executor()).run(&tests).await.unwrap_err();

    assert_eq!(err.index, 1);
    assert!(err.to_string().starts_with("[1] broken Expected status 200 but got 404"));
}
