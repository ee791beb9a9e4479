//! HTTP client for the Yelp `search` endpoint.
//!
//! Wraps `reqwest` with bearer-token auth, typed response deserialization,
//! and Yelp-specific error handling. Successful bodies are checked for the
//! `{"error": ...}` envelope before deserialization and API-level failures
//! surface as [`YelpError::Api`]. No retry, no caching: pagination policy
//! belongs to the caller.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use nearby_core::{Business, SearchBusinesses, SearchOptions, SortMode};

use crate::error::YelpError;
use crate::normalize::normalize_business;
use crate::types::SearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v2";

/// Client for the Yelp business-search API.
///
/// Manages the HTTP client, API key, and the resolved `search` endpoint URL.
/// Use [`YelpClient::new`] for production or [`YelpClient::with_base_url`] to
/// point at a mock server in tests.
pub struct YelpClient {
    client: Client,
    api_key: String,
    search_url: Url,
}

impl YelpClient {
    /// Creates a new client pointed at the production Yelp API.
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YelpError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YelpError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YelpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("nearby/0.1 (business-search)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining the endpoint appends a path segment rather than replacing
        // the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join("search"))
            .map_err(|e| YelpError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            search_url,
        })
    }

    /// Fetches one page of businesses matching `term`, starting at `offset`.
    ///
    /// `limit` is the page size. Optional refinements from [`SearchOptions`]
    /// are added as query parameters only when set, letting the remote API
    /// apply its own defaults. Wire records are normalized into display-ready
    /// [`Business`] values before returning.
    ///
    /// # Errors
    ///
    /// - [`YelpError::Api`] if the API returns an error envelope.
    /// - [`YelpError::Http`] on network failure or non-2xx HTTP status.
    /// - [`YelpError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search(
        &self,
        term: &str,
        offset: u32,
        limit: u32,
        options: &SearchOptions,
    ) -> Result<Vec<Business>, YelpError> {
        let url = self.build_url(term, offset, limit, options);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let envelope: SearchResponse =
            serde_json::from_value(body).map_err(|e| YelpError::Deserialize {
                context: format!("search(term={term}, offset={offset})"),
                source: e,
            })?;

        tracing::debug!(
            term,
            offset,
            returned = envelope.businesses.len(),
            total = ?envelope.total,
            "search page fetched"
        );

        Ok(envelope
            .businesses
            .into_iter()
            .map(normalize_business)
            .collect())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters. Unset options contribute no parameters at all.
    fn build_url(&self, term: &str, offset: u32, limit: u32, options: &SearchOptions) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("term", term);
            pairs.append_pair("offset", &offset.to_string());
            pairs.append_pair("limit", &limit.to_string());
            if let Some(mode) = options.sort_mode {
                pairs.append_pair("sort", sort_code(mode));
            }
            if !options.categories.is_empty() {
                pairs.append_pair("category_filter", &options.categories.join(","));
            }
            if options.deals_only {
                pairs.append_pair("deals_filter", "true");
            }
        }
        url
    }

    /// Sends a GET request with the bearer token, asserts a 2xx HTTP status,
    /// and parses the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::Http`] on network failure or a non-2xx status.
    /// Returns [`YelpError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YelpError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| YelpError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks for the top-level `"error"` envelope and returns an error if
    /// present.
    fn check_api_error(body: &serde_json::Value) -> Result<(), YelpError> {
        if let Some(err) = body.get("error") {
            let msg = err
                .get("text")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(YelpError::Api(msg));
        }
        Ok(())
    }
}

impl SearchBusinesses for YelpClient {
    type Error = YelpError;

    fn search(
        &self,
        term: &str,
        offset: u32,
        limit: u32,
        options: &SearchOptions,
    ) -> impl Future<Output = Result<Vec<Business>, Self::Error>> + Send {
        YelpClient::search(self, term, offset, limit, options)
    }
}

fn sort_code(mode: SortMode) -> &'static str {
    match mode {
        SortMode::BestMatched => "0",
        SortMode::Distance => "1",
        SortMode::HighestRated => "2",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YelpClient {
        YelpClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://api.yelp.com/v2");
        let url = client.build_url("Thai", 0, 20, &SearchOptions::default());
        assert_eq!(
            url.as_str(),
            "https://api.yelp.com/v2/search?term=Thai&offset=0&limit=20"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://api.yelp.com/v2/");
        let url = client.build_url("Thai", 20, 20, &SearchOptions::default());
        assert_eq!(
            url.as_str(),
            "https://api.yelp.com/v2/search?term=Thai&offset=20&limit=20"
        );
    }

    #[test]
    fn build_url_includes_set_options_only() {
        let client = test_client("https://api.yelp.com/v2");
        let options = SearchOptions {
            sort_mode: Some(SortMode::Distance),
            categories: vec!["asianfusion".to_owned(), "burgers".to_owned()],
            deals_only: true,
        };
        let url = client.build_url("Restaurants", 0, 20, &options);
        assert_eq!(
            url.as_str(),
            "https://api.yelp.com/v2/search?term=Restaurants&offset=0&limit=20\
             &sort=1&category_filter=asianfusion%2Cburgers&deals_filter=true"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://api.yelp.com/v2");
        let url = client.build_url("fish & chips", 0, 20, &SearchOptions::default());
        assert!(
            url.as_str().contains("fish+%26+chips") || url.as_str().contains("fish%20%26%20chips"),
            "term should be percent-encoded: {url}"
        );
    }
}
