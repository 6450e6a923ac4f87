//! Integration tests for dropsearch
//!
//! These tests run the real HTTP client against a throwaway local server and
//! exercise configuration persistence through temporary directories.

use dropsearch::api::{
    ArticleSource, FETCH_FAILED_MESSAGE, FetchError, RaindropClient, fetch_articles,
};
use dropsearch::config::{ApiToken, AppConfig};
use dropsearch::search::{Phase, SearchSession};
use dropsearch::ui::{MessageLevel, OutputWriter, ToastWriter};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const TOKEN: &str = "secret-token";

const ONE_ARTICLE: &str = r#"{
    "result": true,
    "items": [
        {
            "_id": 101,
            "title": "Tokio tutorial",
            "link": "https://tokio.rs/tokio/tutorial",
            "type": "article",
            "tags": ["rust", "async"],
            "domain": "tokio.rs",
            "excerpt": "ignored"
        }
    ]
}"#;

/// Serve exactly one HTTP response, returning the API root and the raw request
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/rest/v1"), handle)
}

fn client(api_url: &str) -> RaindropClient {
    RaindropClient::new(api_url, ApiToken::new(TOKEN), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_search_well_formed_response() {
    let (api_url, server) = serve_once("200 OK", ONE_ARTICLE).await;

    let articles = client(&api_url).search("async rust").await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(articles.len(), 1);
    let article = &articles[0];
    assert_eq!(article.id, "101");
    assert_eq!(article.title, "Tokio tutorial");
    assert_eq!(article.kind, "article");
    assert_eq!(article.tags, vec!["rust", "async"]);
    assert_eq!(article.domain, "tokio.rs");

    assert!(request.starts_with("GET /rest/v1/raindrops/0?search=async%20rust "));
    assert!(request
        .to_lowercase()
        .contains(&format!("authorization: bearer {TOKEN}")));
}

#[tokio::test]
async fn test_search_empty_query_requests_everything() {
    let (api_url, server) = serve_once("200 OK", r#"{"items": []}"#).await;

    let articles = client(&api_url).search("").await.unwrap();
    let request = server.await.unwrap();

    assert!(articles.is_empty());
    assert!(request.starts_with("GET /rest/v1/raindrops/0?search= "));
}

#[tokio::test]
async fn test_missing_items_is_an_error() {
    let (api_url, _server) = serve_once("200 OK", r#"{"result": true}"#).await;

    let err = client(&api_url).search("rust").await.unwrap_err();

    assert!(matches!(err, FetchError::MissingItems));
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    let (api_url, _server) = serve_once("200 OK", "<html>maintenance</html>").await;

    let err = client(&api_url).search("rust").await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_unauthorized_is_an_error() {
    let (api_url, _server) = serve_once("401 Unauthorized", r#"{"error": "unauthorized"}"#).await;

    let err = client(&api_url).search("rust").await.unwrap_err();

    assert!(matches!(err, FetchError::Status(s) if s == reqwest::StatusCode::UNAUTHORIZED));
    assert!(!err.to_string().contains(TOKEN));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/rest/v1"))
        .search("rust")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn test_fetch_articles_collapses_failures_into_one_toast() {
    let (api_url, _server) = serve_once("500 Internal Server Error", "{}").await;
    let toasts = ToastWriter::new();

    let articles = fetch_articles(&client(&api_url), "rust", &toasts).await;

    assert!(articles.is_empty());
    let active = toasts.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].level, MessageLevel::Error);
    assert_eq!(active[0].text, FETCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_fetch_articles_success_is_silent() {
    let (api_url, _server) = serve_once("200 OK", ONE_ARTICLE).await;
    let toasts = ToastWriter::new();

    let articles = fetch_articles(&client(&api_url), "tokio", &toasts).await;

    assert_eq!(articles.len(), 1);
    assert!(toasts.latest().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_against_http_server() {
    let (api_url, server) = serve_once("200 OK", ONE_ARTICLE).await;
    let toasts = Arc::new(ToastWriter::new());
    let output: Arc<dyn OutputWriter> = toasts.clone();

    let mut session = SearchSession::new(
        Arc::new(client(&api_url)),
        output,
        Duration::from_millis(20),
        tokio::runtime::Handle::current(),
    );
    session.set_query("tokio");
    session.start();
    session.settle().await;

    let request = server.await.unwrap();
    assert!(request.contains("search=tokio"));
    assert_eq!(session.phase(), Phase::Displaying);
    assert_eq!(session.articles().len(), 1);
    assert_eq!(session.articles()[0].link, "https://tokio.rs/tokio/tutorial");
    assert!(toasts.latest().is_none());
}

#[test]
fn test_config_persists_through_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dropsearch").join("config.toml");

    let mut config = AppConfig::default();
    config.set("token", TOKEN).unwrap();
    config.set("debounce_ms", "350").unwrap();
    config.set("app_url", "https://example.test/").unwrap();
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.require_token().unwrap().expose(), TOKEN);
    assert_eq!(loaded.debounce(), Duration::from_millis(350));
    assert_eq!(loaded.app_url, "https://example.test");
    assert_eq!(loaded.get("token").unwrap(), "********");
    assert!(!format!("{loaded:?}").contains(TOKEN));
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let temp = TempDir::new().unwrap();

    let config = AppConfig::load_from(&temp.path().join("absent.toml")).unwrap();

    assert_eq!(config.debounce_ms, 200);
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.app_url, "https://app.raindrop.io");
}
