use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::app::{ReelError, Result};
use crate::client::{normalize_query, CatalogClient, ClientConfig, SearchResults};
use crate::domain::{Movie, MovieSummary};

#[derive(Deserialize)]
struct ResultsPage {
    results: Vec<MovieSummary>,
}

/// Error body the API sends alongside non-success statuses.
#[derive(Deserialize)]
struct ApiStatus {
    status_message: String,
}

pub struct HttpCatalogClient {
    client: Client,
    config: ClientConfig,
}

impl HttpCatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("reelview/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ReelError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ReelError::Config(format!("Base URL {} cannot carry a path", self.config.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// GET `url` and decode the body. A 404 becomes
    /// [`ReelError::NotFound`] only when `missing` names what was looked up.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, missing: Option<&str>) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(self.config.access_key())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = api_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            tracing::debug!("Request failed with {}: {}", status, detail);

            return Err(match (status, missing) {
                (StatusCode::NOT_FOUND, Some(what)) => {
                    ReelError::NotFound(format!("{} ({})", what, detail))
                }
                _ => ReelError::HttpStatus {
                    status: status.as_u16(),
                    message: detail,
                },
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

fn api_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiStatus>(body)
        .ok()
        .map(|s| s.status_message)
        .filter(|m| !m.is_empty())
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &str) -> Result<SearchResults> {
        let query = normalize_query(query)?;

        let mut url = self.endpoint(&["search", "movie"])?;
        url.query_pairs_mut().append_pair("query", query);

        let page: ResultsPage = self.get_json(url, None).await?;
        tracing::debug!("Search {:?} returned {} results", query, page.results.len());
        Ok(SearchResults::new(page.results))
    }

    async fn popular(&self) -> Result<SearchResults> {
        let mut url = self.endpoint(&["discover", "movie"])?;
        url.query_pairs_mut()
            .append_pair("sort_by", "popularity.desc");

        let page: ResultsPage = self.get_json(url, None).await?;
        Ok(SearchResults::new(page.results))
    }

    async fn get_by_id(&self, id: &str) -> Result<Movie> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ReelError::InvalidArgument("movie id must not be empty".into()));
        }

        let url = self.endpoint(&["movie", id])?;
        let what = format!("movie {}", id);
        self.get_json(url, Some(&what)).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::{Path, Query, State};
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;
    use crate::app::ErrorKind;

    const TOKEN: &str = "test-token";

    #[derive(Clone, Default)]
    struct MockApi {
        hits: Arc<AtomicUsize>,
        last_auth: Arc<Mutex<Option<String>>>,
        last_query: Arc<Mutex<Option<String>>>,
    }

    impl MockApi {
        fn record(&self, headers: &HeaderMap) {
            self.hits.fetch_add(1, Ordering::SeqCst);
            *self.last_auth.lock().unwrap() = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
        }

        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    async fn search_movies(
        State(api): State<MockApi>,
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        api.record(&headers);
        let query = params.get("query").cloned().unwrap_or_default();
        *api.last_query.lock().unwrap() = Some(query.clone());

        Json(json!({
            "page": 1,
            "results": [
                {"id": 30, "title": format!("{} III", query), "vote_average": 6.1},
                {"id": 10, "title": format!("{} I", query), "vote_average": 7.9},
                {"id": 20, "title": format!("{} II", query), "vote_average": 7.2}
            ],
            "total_pages": 1,
            "total_results": 3
        }))
        .into_response()
    }

    async fn discover_movies(
        State(api): State<MockApi>,
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        api.record(&headers);
        if params.get("sort_by").map(String::as_str) != Some("popularity.desc") {
            return StatusCode::BAD_REQUEST.into_response();
        }
        Json(json!({"results": [{"id": 1, "title": "Most Popular"}]})).into_response()
    }

    async fn movie_detail(
        State(api): State<MockApi>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Response {
        api.record(&headers);
        match id.as_str() {
            "42" => Json(json!({"id": 42, "title": "Example", "runtime": 101})).into_response(),
            "broken" => (StatusCode::OK, "<html>not json</html>").into_response(),
            "garbled" => (
                StatusCode::OK,
                [
                    (header::CONTENT_ENCODING, "gzip"),
                    (header::CONTENT_TYPE, "application/json"),
                ],
                "this body was never gzipped",
            )
                .into_response(),
            "boom" => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status_code": 11, "status_message": "Internal error."})),
            )
                .into_response(),
            "slow" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"id": 1, "title": "Late"})).into_response()
            }
            _ => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "status_code": 34,
                    "status_message": "The resource you requested could not be found."
                })),
            )
                .into_response(),
        }
    }

    async fn spawn_api() -> (String, MockApi) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let api = MockApi::default();
        let app = Router::new()
            .route("/3/search/movie", get(search_movies))
            .route("/3/discover/movie", get(discover_movies))
            .route("/3/movie/{id}", get(movie_detail))
            .with_state(api.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{}/3", addr), api)
    }

    fn client_for(base_url: &str) -> HttpCatalogClient {
        HttpCatalogClient::new(ClientConfig::new(base_url, TOKEN).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_search_preserves_server_order_with_one_call() {
        let (base, api) = spawn_api().await;
        let client = client_for(&base);

        let results = client.search("  star wars ").await.unwrap();
        let ids: Vec<String> = results.map(|m| m.id).collect();

        assert_eq!(ids, vec!["30", "10", "20"]);
        assert_eq!(api.hits(), 1);
        assert_eq!(api.last_query.lock().unwrap().as_deref(), Some("star wars"));
    }

    #[tokio::test]
    async fn test_blank_search_never_hits_network() {
        let (base, api) = spawn_api().await;
        let client = client_for(&base);

        for query in ["", "   "] {
            let err = client.search(query).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(api.hits(), 0);
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_token() {
        let (base, api) = spawn_api().await;
        let client = client_for(&base);

        client.popular().await.unwrap();
        assert_eq!(
            api.last_auth.lock().unwrap().as_deref(),
            Some("Bearer test-token")
        );
    }

    #[tokio::test]
    async fn test_popular_lists_discover_results() {
        let (base, _api) = spawn_api().await;
        let client = client_for(&base);

        let titles: Vec<String> = client.popular().await.unwrap().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Most Popular"]);
    }

    #[tokio::test]
    async fn test_get_by_id_decodes_record() {
        let (base, _api) = spawn_api().await;
        let client = client_for(&base);

        let movie = client.get_by_id("42").await.unwrap();
        assert_eq!(movie.id, "42");
        assert_eq!(movie.title, "Example");
        assert_eq!(movie.runtime, Some(101));
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let (base, _api) = spawn_api().await;
        let client = client_for(&base);

        let err = client.get_by_id("999999").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("could not be found"));
    }

    #[tokio::test]
    async fn test_server_failure_is_http_status() {
        let (base, _api) = spawn_api().await;
        let client = client_for(&base);

        let err = client.get_by_id("boom").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HttpStatus(500));
        assert!(err.to_string().contains("Internal error."));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_parse_error() {
        let (base, _api) = spawn_api().await;
        let client = client_for(&base);

        let err = client.get_by_id("broken").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_undecompressable_body_is_parse_error() {
        let (base, api) = spawn_api().await;
        let client = client_for(&base);

        let err = client.get_by_id("garbled").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(api.hits(), 1);
    }

    #[tokio::test]
    async fn test_blank_id_is_invalid_argument() {
        let (base, api) = spawn_api().await;
        let client = client_for(&base);

        let err = client.get_by_id("  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(api.hits(), 0);
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let client = client_for(&format!("http://{}/3", addr));
        let err = client.get_by_id("42").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let (base, _api) = spawn_api().await;
        let config = ClientConfig::new(&base, TOKEN)
            .unwrap()
            .with_timeout(Duration::from_millis(100));
        let client = HttpCatalogClient::new(config).unwrap();

        let err = client.get_by_id("slow").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let client = client_for("https://api.example.com/3/");
        let url = client.endpoint(&["movie", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/3/movie/a%20b%2Fc");
    }
}
