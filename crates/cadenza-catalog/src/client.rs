// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{CatalogError, Result};
use crate::storefront::{StaticStorefront, StorefrontProvider};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, trace};
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_STOREFRONT: &str = "us";
const USER_AGENT: &str = concat!("Cadenza/", env!("CARGO_PKG_VERSION"));

/// Read-only client for the catalog backend.
///
/// Every accessor issues a single GET and hands back the decoded JSON body as-is.
/// Nothing is cached or retried; errors reach the caller unchanged.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    storefront: Arc<dyn StorefrontProvider>,
}

impl CatalogClient {
    /// Create a client for `base_url` that reads the region from `storefront`.
    pub fn new(base_url: &str, storefront: impl StorefrontProvider) -> Result<Self> {
        Self::builder()
            .base_url(base_url)
            .storefront(storefront)
            .build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Storefront that the next request will be scoped to.
    pub fn storefront(&self) -> String {
        self.storefront.storefront()
    }

    /// Artist artwork resolved by the backend from an iTunes artist page.
    ///
    /// # Example
    /// ```no_run
    /// # use cadenza_catalog::{CatalogClient, StaticStorefront};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = CatalogClient::new("http://127.0.0.1:3000", StaticStorefront::new("us"))?;
    /// let artwork = client
    ///     .artist_artwork("https://music.apple.com/us/artist/657515", "657515", "300")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn artist_artwork(&self, url: &str, artist_id: &str, size: &str) -> Result<Value> {
        self.get(
            &["api", "catalog", "artists", "artwork"],
            &[("url", url), ("artistId", artist_id), ("size", size)],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn artist_details(&self, url: &str, artist_id: &str, size: &str) -> Result<Value> {
        self.get(
            &["api", "catalog", "artists", "details"],
            &[("url", url), ("artistId", artist_id), ("size", size)],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn curator_banner(&self, url: &str, curator_id: &str, size: &str) -> Result<Value> {
        self.get(
            &["api", "catalog", "curators", "banner"],
            &[("url", url), ("curatorId", curator_id), ("size", size)],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn curators_by_genre(&self, genre_id: &str) -> Result<Value> {
        self.get(&["api", "catalog", "curators", "genre", genre_id], &[])
            .await
    }

    /// Extra album metadata scraped by the backend from the iTunes album page.
    #[instrument(skip(self))]
    pub async fn album_extra_info(&self, url: &str) -> Result<Value> {
        self.get(&["api", "catalog", "albums", "extraInfo"], &[("url", url)])
            .await
    }

    #[instrument(skip(self))]
    pub async fn grammy_results(&self) -> Result<Value> {
        let storefront = self.storefront();
        self.get(&["api", "grammyResults"], &[("storefront", storefront.as_str())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn featured_playlists(&self) -> Result<Value> {
        let country = self.storefront();
        self.get(
            &["api", "catalog", "playlists", "featured", "all"],
            &[("country", country.as_str())],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn main_featured_playlists(&self) -> Result<Value> {
        let country = self.storefront();
        self.get(
            &["api", "catalog", "playlists", "featured", "main"],
            &[("country", country.as_str())],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn genre_data(&self, id: &str, limit: u32) -> Result<Value> {
        let limit = limit.to_string();
        let country = self.storefront();
        self.get(
            &["api", "catalog", "genres", id],
            &[("limit", limit.as_str()), ("country", country.as_str())],
        )
        .await
    }

    /// A single named sub-resource of a genre (e.g. `"playlists"`).
    #[instrument(skip(self))]
    pub async fn genre_resource(&self, id: &str, resource: &str) -> Result<Value> {
        let country = self.storefront();
        self.get(
            &["api", "catalog", "genres", id, resource],
            &[("country", country.as_str())],
        )
        .await
    }

    /// Browse playlists under an arbitrary path suffix, e.g. `"charts/top"`.
    ///
    /// Empty segments are dropped; `.` and `..` segments are rejected.
    #[instrument(skip(self))]
    pub async fn browse_playlists(&self, path: &str) -> Result<Value> {
        let mut segments = vec!["api", "catalog", "browse"];
        segments.extend(split_path(path));
        self.get(&segments, &[]).await
    }

    /// GET any backend path relative to the base URL and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let segments: Vec<&str> = split_path(path).collect();
        self.get(&segments, query).await
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "." | ".."))
        {
            return Err(CatalogError::InvalidPathSegment(segment.to_string()));
        }

        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| CatalogError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint(segments, query)?;
        debug!(target: "catalog", url = %url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(target: "catalog", status = %status, "response status");

        let body = response.text().await?;
        trace!(target: "catalog", "response body: {}", body);

        if !status.is_success() {
            return Err(CatalogError::HttpStatus { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("storefront", &self.storefront.storefront())
            .finish()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Builder for configuring a catalog client.
pub struct CatalogClientBuilder {
    base_url: String,
    timeout: Duration,
    storefront: Arc<dyn StorefrontProvider>,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            storefront: Arc::new(StaticStorefront::new(DEFAULT_STOREFRONT)),
        }
    }
}

impl CatalogClientBuilder {
    /// Set the backend origin (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the whole-request timeout (connect through body). Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the storefront source for region-scoped endpoints.
    pub fn storefront(mut self, storefront: impl StorefrontProvider) -> Self {
        self.storefront = Arc::new(storefront);
        self
    }

    /// Build the catalog client.
    pub fn build(self) -> Result<CatalogClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| CatalogError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(CatalogClient {
            client,
            base_url,
            storefront: self.storefront,
        })
    }
}
