//! Catalog client service.
//!
//! Executes paginated list fetches and single-item detail fetches against
//! the remote catalog API, decoding JSON into typed records and mapping
//! transport and decoding failures into the closed [`CatalogError`]
//! taxonomy. The client holds no cache and performs no retries; both are
//! view-model concerns.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::CatalogError;
use crate::models::catalog::{DetailResponse, PageResponse};
use crate::models::{ItemDetail, Page};

/// Remote catalog operations.
///
/// Object-safe so the view-model can hold an `Arc<dyn CatalogApi>` and tests
/// can script their own implementation.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of the list.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page, CatalogError>;

    /// Fetch the detail record for one item.
    async fn fetch_detail(&self, id: &str) -> Result<ItemDetail, CatalogError>;
}

/// HTTP-backed catalog client.
pub struct CatalogClient {
    http: reqwest::Client,
    api_base_url: String,
    sprite_base_url: String,
}

impl CatalogClient {
    /// Create a client for the endpoints named in `config`.
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        tracing::debug!(api = %config.api_base_url, "creating catalog client");
        let http = reqwest::Client::builder()
            .build()
            .map_err(|_| CatalogError::Unknown)?;
        Ok(Self {
            http,
            api_base_url: config.api_base_url.clone(),
            sprite_base_url: config.sprite_base_url.clone(),
        })
    }

    fn page_url(&self, offset: usize, limit: usize) -> String {
        format!("{}/pokemon?limit={limit}&offset={offset}", self.api_base_url)
    }

    fn detail_url(&self, id: &str) -> String {
        format!("{}/pokemon/{id}", self.api_base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let parsed = reqwest::Url::parse(url).map_err(|_| CatalogError::BadUrl)?;

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "catalog request rejected");
            return Err(CatalogError::ServerError(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|_| CatalogError::BadResponse)?;
        serde_json::from_str(&body).map_err(|error| {
            tracing::warn!(%url, %error, "catalog response failed to decode");
            CatalogError::DecodingError
        })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page, CatalogError> {
        let url = self.page_url(offset, limit);
        tracing::debug!(%url, "fetching catalog page");
        let response: PageResponse = self.get_json(&url).await?;
        Ok(response.into_page(&self.sprite_base_url))
    }

    async fn fetch_detail(&self, id: &str) -> Result<ItemDetail, CatalogError> {
        let url = self.detail_url(id);
        tracing::debug!(%url, "fetching item detail");
        let response: DetailResponse = self.get_json(&url).await?;
        Ok(response.into_detail(&self.sprite_base_url))
    }
}

fn map_transport_error(error: reqwest::Error) -> CatalogError {
    if error.is_connect() || error.is_timeout() {
        tracing::warn!(%error, "catalog request failed: no connectivity");
        CatalogError::NoInternetConnection
    } else {
        tracing::warn!(%error, "catalog request failed");
        CatalogError::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> CatalogClient {
        let config = Config {
            api_base_url: base.to_string(),
            ..Config::default()
        };
        CatalogClient::new(&config).unwrap()
    }

    #[test]
    fn page_url_should_carry_cursor() {
        let client = client_for("https://catalog.test/v2");
        assert_eq!(
            client.page_url(20, 10),
            "https://catalog.test/v2/pokemon?limit=10&offset=20"
        );
    }

    #[test]
    fn detail_url_should_address_one_item() {
        let client = client_for("https://catalog.test/v2");
        assert_eq!(client.detail_url("25"), "https://catalog.test/v2/pokemon/25");
    }

    #[tokio::test]
    async fn unparseable_base_url_should_map_to_bad_url() {
        let client = client_for("not a url at all");
        assert_eq!(client.fetch_page(0, 10).await, Err(CatalogError::BadUrl));
        assert_eq!(client.fetch_detail("25").await, Err(CatalogError::BadUrl));
    }
}
