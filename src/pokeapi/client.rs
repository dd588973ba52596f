//! PokeAPI client
//!
//! Read-through fetches: every GET is keyed by its URL in the shared
//! [`Cache`], and only successful bodies are stored.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{LocationArea, LocationAreaPage, Pokemon};
use crate::cache::Cache;
use crate::config::Config;
use crate::error::{ClientError, Result};

/// Client for the PokeAPI REST service.
#[derive(Debug, Clone)]
pub struct PokeClient {
    http: Client,
    cache: Arc<Cache>,
    base_url: String,
}

impl PokeClient {
    /// Builds the HTTP client from `config` and attaches the shared cache.
    pub fn new(config: &Config, cache: Arc<Cache>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build().map_err(ClientError::Build)?,
            cache,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    /// URL of the first location-area page.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    /// Fetches a page of location areas, the first one when `url` is `None`.
    pub async fn location_areas(&self, url: Option<&str>) -> Result<LocationAreaPage> {
        match url {
            Some(url) => self.fetch(url).await,
            None => self.fetch(&self.location_areas_url()).await,
        }
    }

    /// Fetches one location area by name.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.fetch(&format!("{}/location-area/{}", self.base_url, name))
            .await
    }

    /// Fetches one Pokemon by name.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch(&format!("{}/pokemon/{}", self.base_url, name))
            .await
    }

    /// Fetches `url` through the cache and decodes the JSON body as `T`.
    ///
    /// On a miss, exactly one GET is sent. Bodies are cached only for
    /// statuses below 300, and are cached before decoding.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(cached) = self.cache.lookup(url).await {
            debug!(url, "cache hit");
            return decode(url, &cached);
        }

        debug!(url, "cache miss, sending request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.as_u16() >= 300 {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(url, status = status.as_u16(), "request failed");

            return Err(if status == StatusCode::NOT_FOUND {
                ClientError::NotFound {
                    url: url.to_string(),
                    body,
                }
            } else {
                ClientError::Status {
                    status: status.as_u16(),
                    body,
                }
            });
        }

        self.cache.store(url, body.to_vec()).await;
        decode(url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}
