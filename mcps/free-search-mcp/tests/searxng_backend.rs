//! SearXNG backend tests against a mock HTTP server

use free_search_mcp::backends::{searxng::SearXNGBackend, SearchBackend};
use free_search_mcp::config::{ResponseFormat, SearXNGConfig, SearchConfig};
use free_search_mcp::request::SearchRequest;
use free_search_mcp::types::{EmptyReason, RecordKind, SearchOutcome};
use free_search_mcp::{Category, SearchError, SearchParams};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer, configure: impl FnOnce(&mut SearXNGConfig)) -> SearXNGBackend {
    let mut config = SearXNGConfig {
        url: format!("{}/", server.uri()),
        ..Default::default()
    };
    configure(&mut config);
    SearXNGBackend::new(config).unwrap()
}

fn request(category: Category, query: &str) -> SearchRequest {
    SearchRequest::from_params(category, SearchParams::new(query), &SearchConfig::default())
        .unwrap()
}

#[tokio::test]
async fn test_json_search_posts_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("q=rust+async"))
        .and(body_string_contains("categories=general"))
        .and(body_string_contains("safesearch=1"))
        .and(body_string_contains("format=json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "rust async",
            "results": [
                {"title": "Async Book", "url": "https://rust-lang.github.io/async-book/", "content": "Asynchronous Programming in Rust", "engines": ["duckduckgo"]},
                {"title": "Tokio", "url": "https://tokio.rs", "content": "An asynchronous runtime", "engine": "brave"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, |_| {});
    let outcome = backend
        .search(&request(Category::General, "rust async"))
        .await
        .unwrap();

    match outcome {
        SearchOutcome::Results(records) => {
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].title, "Async Book");
            assert_eq!(records[1].engines, vec!["brave"]);
        }
        other => panic!("expected results, got {other:?}"),
    }
}

#[tokio::test]
async fn test_results_truncated_to_limit() {
    let server = MockServer::start().await;
    let results: Vec<_> = (0..8)
        .map(|i| json!({"title": format!("r{i}"), "url": format!("https://e.org/{i}")}))
        .collect();
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(&server)
        .await;

    let backend = backend_for(&server, |_| {});
    let mut params = SearchParams::new("many");
    params.limit = Some(3);
    let request =
        SearchRequest::from_params(Category::Science, params, &SearchConfig::default()).unwrap();

    assert_eq!(backend.search(&request).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_cookie_and_engines_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("cookie", "categories=general; language=en"))
        .and(body_string_contains("engines=wikipedia"))
        .and(body_string_contains("categories=social+media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, |c| {
        c.cookie = "categories=general; language=en".to_string();
        c.engines = "wikipedia".to_string();
    });
    let outcome = backend
        .search(&request(Category::SocialMedia, "#rustlang"))
        .await
        .unwrap();

    assert_eq!(outcome, SearchOutcome::Empty(EmptyReason::NoResults));
}

#[tokio::test]
async fn test_html_mode_parses_results_page() {
    let server = MockServer::start().await;
    let page = r#"<!DOCTYPE html><html><body><div id="urls">
        <article class="result result-torrent">
          <h3><a href="https://files.example.org/ubuntu">ubuntu-24.04-desktop-amd64.iso</a></h3>
          <p class="content">Ubuntu desktop image</p>
          <a href="magnet:?xt=urn:btih:abc" class="magnetlink">magnet link</a>
        </article>
        </div></body></html>"#;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("format=html"))
        .and(body_string_contains("theme=simple"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, |c| c.response_format = ResponseFormat::Html);
    let outcome = backend
        .search(&request(Category::Files, "ubuntu iso"))
        .await
        .unwrap();

    match outcome {
        SearchOutcome::Results(records) => {
            assert_eq!(records[0].url, "https://files.example.org/ubuntu");
            match &records[0].kind {
                RecordKind::File { has_magnet, .. } => assert!(*has_magnet),
                other => panic!("unexpected kind {other:?}"),
            }
        }
        other => panic!("expected results, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("x".repeat(1000)))
        .mount(&server)
        .await;

    let backend = backend_for(&server, |_| {});
    let err = backend
        .search(&request(Category::News, "anything"))
        .await
        .unwrap_err();

    match err {
        SearchError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body.len(), 200);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let backend = backend_for(&server, |_| {});
    let err = backend
        .search(&request(Category::Videos, "talks"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Json(_)));
}
