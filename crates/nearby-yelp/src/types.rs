//! Yelp search API response types.
//!
//! These model the JSON returned by the `search` endpoint. Successful
//! responses carry a `businesses` array; API-level failures carry an
//! `{"error": {"id": ..., "text": ...}}` envelope instead, which the client
//! checks before deserializing.

use serde::Deserialize;

/// Top-level envelope for a successful search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub businesses: Vec<BusinessEntry>,
}

/// One business as it appears on the wire.
///
/// Only `id` and `name` are reliably present; everything else is optional
/// and defaulted so a sparse record still deserializes.
#[derive(Debug, Deserialize)]
pub struct BusinessEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating_img_url_large: Option<String>,
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Distance from the search origin, in meters.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Pairs of `[display name, category code]`.
    #[serde(default)]
    pub categories: Vec<(String, String)>,
    #[serde(default)]
    pub location: Option<WireLocation>,
}

/// Address block of a wire business record.
#[derive(Debug, Default, Deserialize)]
pub struct WireLocation {
    #[serde(default)]
    pub address: Vec<String>,
    #[serde(default)]
    pub neighborhoods: Vec<String>,
    #[serde(default)]
    pub coordinate: Option<WireCoordinate>,
}

#[derive(Debug, Deserialize)]
pub struct WireCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}
