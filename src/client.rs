//! Blocking HTTP client for the card catalog API.

use crate::config::ResourceKind;
use crate::error::{EtlError, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// The two catalog calls the fetch pipeline depends on.
///
/// [`CatalogClient`] is the production implementation; tests substitute a
/// scripted source.
pub trait CatalogSource {
    /// Fetch the complete list for a small reference resource.
    fn list_all(&self, kind: ResourceKind) -> Result<Vec<Value>>;

    /// Fetch one page of raw card records. An empty page signals the end of
    /// the data set.
    fn list_cards_page(&self, page: u32, page_size: usize) -> Result<Vec<Value>>;
}

/// HTTP client for the catalog API.
pub struct CatalogClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    /// Build a client against `base_url` with the given request timeout.
    ///
    /// The API works without a key but rate-limits harder; when one is
    /// supplied it is sent as `X-Api-Key` on every request.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and unwrap the API's `{"data": [...]}` envelope.
    fn get_data(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Value>> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }
        let resp = request.send()?.error_for_status()?;
        let body: Value = resp.json()?;
        match body.get("data").and_then(|d| d.as_array()) {
            Some(items) => Ok(items.clone()),
            None => Err(EtlError::Api(format!(
                "response from {} has no 'data' array",
                url
            ))),
        }
    }
}

impl CatalogSource for CatalogClient {
    fn list_all(&self, kind: ResourceKind) -> Result<Vec<Value>> {
        self.get_data(kind.endpoint(), &[])
    }

    fn list_cards_page(&self, page: u32, page_size: usize) -> Result<Vec<Value>> {
        self.get_data(
            "cards",
            &[
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )
    }
}
