// src/github/search.rs
// =============================================================================
// This module asks the GitHub search API for the most-starred repositories
// in one language.
//
// Request:
//   GET {api}/search/repositories?q=language:{code}&sort=stars&order=desc
//
// Only the first page is ever requested. Every failure is reported as one of
// three SearchError variants and never retried here: the session decides
// what happens next.
//
// Rust concepts:
// - Traits: RepositorySearch lets tests swap in a scripted client
// - thiserror: Derives Display/Error for our error enum
// - serde: Maps the API's JSON onto private "wire" structs
// =============================================================================

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::model::{LanguageCode, RepositoryRecord};

/// Default API root, overridable with --api-url
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const SEARCH_PATH: &str = "search/repositories";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Why a search failed
///
/// Clone + PartialEq so a failure can be stored in the session state and
/// compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SearchError {
    /// No response was received (connection, DNS, TLS, timeout)
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success status code
    #[error("HTTP error! status: {0}")]
    Http(u16),
    /// The body did not have the expected shape
    #[error("could not parse search response: {0}")]
    Parse(String),
}

/// Anything that can search repositories by language
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    /// Returns the first page of results, most-starred first
    async fn search(&self, code: &LanguageCode) -> Result<Vec<RepositoryRecord>, SearchError>;
}

// Settings for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    // Parses and normalizes the API root
    //
    // The root always ends in '/', otherwise Url::join would replace the last
    // path segment ("https://ghe.local/api/v3" would lose "v3").
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let mut api_url = Url::parse(api_url)
            .map_err(|e| anyhow!("Invalid API URL '{}': {}", api_url, e))?;

        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(anyhow!("API URL must be http or https: {}", api_url));
        }

        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        Ok(Self { api_url, timeout })
    }
}

/// Search client backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubSearchClient {
    client: Client,
    endpoint: Url,
}

impl GithubSearchClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        // The client is built once and reused for every search
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = config
            .api_url
            .join(SEARCH_PATH)
            .context("Failed to build search endpoint")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RepositorySearch for GithubSearchClient {
    async fn search(&self, code: &LanguageCode) -> Result<Vec<RepositoryRecord>, SearchError> {
        tracing::debug!(endpoint = %self.endpoint, language = %code, "sending search request");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&search_params(code))
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http(status.as_u16()));
        }

        let body = response.text().await.map_err(categorize_error)?;
        parse_search_body(&body)
    }
}

// Query parameters for one language
//
// reqwest URL-encodes these, so "c++" goes out as "language%3Ac%2B%2B"
// instead of turning into spaces.
pub fn search_params(code: &LanguageCode) -> Vec<(&'static str, String)> {
    vec![
        ("q", format!("language:{}", code)),
        ("sort", "stars".to_string()),
        ("order", "desc".to_string()),
    ]
}

// Raw response shape. Only the fields we use are listed; serde ignores
// the rest.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    // A missing list is treated like an empty one
    #[serde(default)]
    items: Vec<SearchItem>,
    #[serde(default)]
    incomplete_results: bool,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    language: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
    #[serde(default)]
    html_url: Option<String>,
}

impl From<SearchItem> for RepositoryRecord {
    fn from(raw: SearchItem) -> Self {
        RepositoryRecord {
            name: raw.name,
            description: raw.description,
            language: raw.language,
            stars: raw.stargazers_count,
            forks: raw.forks_count,
            open_issues: raw.open_issues_count,
            html_url: raw.html_url,
        }
    }
}

// Turns a response body into records, keeping the service's order
pub fn parse_search_body(body: &str) -> Result<Vec<RepositoryRecord>, SearchError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    if parsed.incomplete_results {
        tracing::warn!("search service reported incomplete results");
    }

    Ok(parsed.items.into_iter().map(RepositoryRecord::from).collect())
}

// Every reqwest error here means no usable response arrived
fn categorize_error(error: reqwest::Error) -> SearchError {
    if error.is_timeout() {
        SearchError::Network("request timed out".to_string())
    } else if error.is_connect() {
        SearchError::Network(format!("connection failed: {}", error))
    } else {
        SearchError::Network(error.to_string())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why read the body as text and parse it ourselves?
//    - response.json() would report a broken body as a reqwest error
//    - Parsing with serde_json keeps "bad JSON" (ParseError) apart from
//      "connection dropped" (NetworkError)
//
// 2. What does #[serde(default)] do?
//    - If the field is missing, use Default::default() (None, false, vec![])
//    - Fields WITHOUT it are required; missing ones fail the parse
//
// 3. Why #[async_trait]?
//    - It lets a trait have async methods that work with Arc<dyn ...>-style
//      generic code and Send futures
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // Serves exactly one canned HTTP response and hands back the raw request
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    fn client_for(base: &str) -> GithubSearchClient {
        let config = ClientConfig::new(base, Duration::from_secs(5)).unwrap();
        GithubSearchClient::new(&config).unwrap()
    }

    fn code(s: &str) -> LanguageCode {
        LanguageCode::new(s).unwrap()
    }

    const THREE_ITEMS: &str = r#"{
        "total_count": 3,
        "incomplete_results": false,
        "items": [
            {"name": "alpha", "description": "first", "language": "Go",
             "stargazers_count": 500, "forks_count": 50, "open_issues_count": 5,
             "html_url": "https://github.com/acme/alpha"},
            {"name": "beta", "description": null, "language": "Go",
             "stargazers_count": 300, "forks_count": 30, "open_issues_count": 3},
            {"name": "gamma", "language": null,
             "stargazers_count": 100, "forks_count": 10, "open_issues_count": 1}
        ]
    }"#;

    #[test]
    fn test_search_params() {
        let params = search_params(&code("go"));
        assert_eq!(params[0], ("q", "language:go".to_string()));
        assert_eq!(params[1], ("sort", "stars".to_string()));
        assert_eq!(params[2], ("order", "desc".to_string()));
    }

    #[test]
    fn test_config_keeps_api_path() {
        let config = ClientConfig::new("https://ghe.example.com/api/v3", Duration::from_secs(1)).unwrap();
        let client = GithubSearchClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://ghe.example.com/api/v3/search/repositories"
        );
    }

    #[test]
    fn test_config_rejects_bad_url() {
        assert!(ClientConfig::new("not a url", Duration::from_secs(1)).is_err());
        assert!(ClientConfig::new("ftp://example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_parse_keeps_order_and_optional_fields() {
        let records = parse_search_body(THREE_ITEMS).unwrap();
        let stars: Vec<u64> = records.iter().map(|r| r.stars).collect();
        assert_eq!(stars, vec![500, 300, 100]);

        assert_eq!(records[0].description.as_deref(), Some("first"));
        assert_eq!(records[0].html_url.as_deref(), Some("https://github.com/acme/alpha"));
        assert_eq!(records[1].description, None);
        assert_eq!(records[2].language, None);
        assert_eq!(records[2].forks, 10);
        assert_eq!(records[2].open_issues, 1);
    }

    #[test]
    fn test_parse_empty_items() {
        assert!(parse_search_body(r#"{"total_count": 0, "items": []}"#).unwrap().is_empty());
        assert!(parse_search_body(r#"{"total_count": 0}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_search_body("<html>"), Err(SearchError::Parse(_))));
        assert!(matches!(parse_search_body("[1, 2]"), Err(SearchError::Parse(_))));
        // Missing required count
        let missing = r#"{"items": [{"name": "x", "forks_count": 1, "open_issues_count": 1}]}"#;
        assert!(matches!(parse_search_body(missing), Err(SearchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_search_sends_expected_query() {
        let (base, server) = serve_once(http_response("200 OK", THREE_ITEMS)).await;

        let records = client_for(&base).search(&code("go")).await.unwrap();
        assert_eq!(records.len(), 3);

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert_eq!(
            request_line,
            "GET /search/repositories?q=language%3Ago&sort=stars&order=desc HTTP/1.1"
        );
        assert!(request.to_lowercase().contains("user-agent: repo-finder/"));
    }

    #[tokio::test]
    async fn test_search_encodes_special_characters() {
        let (base, server) = serve_once(http_response("200 OK", r#"{"items": []}"#)).await;

        let records = client_for(&base).search(&code("c++")).await.unwrap();
        assert!(records.is_empty());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /search/repositories?q=language%3Ac%2B%2B&sort=stars"));
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let (base, _server) = serve_once(http_response("503 Service Unavailable", "")).await;

        let err = client_for(&base).search(&code("ruby")).await.unwrap_err();
        assert_eq!(err, SearchError::Http(503));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_search_parse_error() {
        let (base, _server) = serve_once(http_response("200 OK", "not json")).await;

        let err = client_for(&base).search(&code("php")).await.unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_search_network_error() {
        // Grab a free port, then close it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .search(&code("swift"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Network(_)));
    }

    #[tokio::test]
    async fn test_search_timeout_is_network_error() {
        // Accepts the connection but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let config =
            ClientConfig::new(&format!("http://{}", addr), Duration::from_millis(300)).unwrap();
        let err = GithubSearchClient::new(&config)
            .unwrap()
            .search(&code("go"))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Network("request timed out".into()));
    }
}
