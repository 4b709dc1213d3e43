//! Tours and festivities API client.
//!
//! Every public `fetch_*` call degrades to seed data instead of failing; the
//! `try_fetch_*` variants expose the underlying error for callers that want it.

use std::sync::Arc;
use std::time::Duration;

use pomabamba_core::{ContentConfig, NetworkError, ReqwestErrorExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::instrument;

use crate::cache::ContentCache;
use crate::error::ContentError;
use crate::seed::SeedData;
use crate::types::{find_by_id, find_by_slug, validate_collection, ContentRecord, Festivity, Tour};

const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct ContentClient {
    http: Client,
    base_url: String,
    cache: Arc<ContentCache>,
    seed: Arc<SeedData>,
}

impl ContentClient {
    pub fn new(
        base_url: &str,
        cache: Arc<ContentCache>,
        seed: Arc<SeedData>,
    ) -> Result<Self, ContentError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self::with_http_client(http, base_url, cache, seed))
    }

    pub fn from_config(
        config: &ContentConfig,
        cache: Arc<ContentCache>,
        seed: Arc<SeedData>,
    ) -> Result<Self, ContentError> {
        Self::new(&config.api_base_url, cache, seed)
    }

    pub fn with_http_client(
        http: Client,
        base_url: &str,
        cache: Arc<ContentCache>,
        seed: Arc<SeedData>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
            seed,
        }
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// All tours: cached, freshly fetched, or the seed tours on failure.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_tours(&self) -> Arc<[Tour]> {
        self.collection().await
    }

    /// All festivities: cached, freshly fetched, or the seed festivities on failure.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_festivities(&self) -> Arc<[Festivity]> {
        self.collection().await
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_tour_by_id(&self, id: &str) -> Option<Tour> {
        find_by_id(&self.fetch_tours().await, id).cloned()
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_tour_by_slug(&self, slug: &str) -> Option<Tour> {
        find_by_slug(&self.fetch_tours().await, slug).cloned()
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_festivity_by_id(&self, id: &str) -> Option<Festivity> {
        find_by_id(&self.fetch_festivities().await, id).cloned()
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_festivity_by_slug(&self, slug: &str) -> Option<Festivity> {
        find_by_slug(&self.fetch_festivities().await, slug).cloned()
    }

    /// Like [`fetch_tours`](Self::fetch_tours) but reports the failure instead
    /// of substituting seed data. Still honours and fills the cache.
    pub async fn try_fetch_tours(&self) -> Result<Arc<[Tour]>, ContentError> {
        self.try_collection().await
    }

    /// Like [`fetch_festivities`](Self::fetch_festivities) but reports the failure.
    pub async fn try_fetch_festivities(&self) -> Result<Arc<[Festivity]>, ContentError> {
        self.try_collection().await
    }

    async fn collection<T: ContentRecord>(&self) -> Arc<[T]> {
        match self.try_collection::<T>().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error fetching {}: {}", T::RESOURCE, e);
                let fallback = Arc::clone(T::seed(&self.seed));
                tracing::warn!(
                    "Serving {} fallback {} (not cached)",
                    fallback.len(),
                    T::RESOURCE
                );
                fallback
            }
        }
    }

    async fn try_collection<T: ContentRecord>(&self) -> Result<Arc<[T]>, ContentError> {
        let slot = T::slot(&self.cache);
        if let Some(cached) = slot.get() {
            tracing::debug!("Using cached {} ({} records)", T::RESOURCE, cached.len());
            return Ok(cached);
        }

        let records = self.request::<T>().await?;
        tracing::info!("Fetched {} {}", records.len(), T::RESOURCE);
        Ok(slot.store(records))
    }

    async fn request<T: ContentRecord>(&self) -> Result<Vec<T>, ContentError> {
        let url = format!("{}/api/{}", self.base_url, T::RESOURCE);

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: format!("GET {}", url),
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let records: Vec<T> = serde_json::from_slice(&body)?;
        validate_collection(&records).map_err(ContentError::InvalidPayload)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ContentClient {
        ContentClient::new(
            &server.uri(),
            Arc::new(ContentCache::new()),
            Arc::new(SeedData::builtin().unwrap()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_request_sends_json_content_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tours"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tours = client.try_fetch_tours().await.unwrap();
        assert!(tours.is_empty());
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_ignored() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/festivities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ContentClient::new(
            &format!("{}/", mock_server.uri()),
            Arc::new(ContentCache::new()),
            Arc::new(SeedData::empty()),
        )
        .unwrap();
        assert!(client.try_fetch_festivities().await.is_ok());
    }

    #[tokio::test]
    async fn test_status_error_is_classified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tours"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.try_fetch_tours().await.unwrap_err();
        assert!(matches!(
            err,
            ContentError::Network(NetworkError::ServerError { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_decode_error_is_classified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tours"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.try_fetch_tours().await.unwrap_err();
        assert!(matches!(err, ContentError::Decode(_)));
    }
}
