//! Domain types for one business-directory search result.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair used by the map-annotation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Immutable snapshot of one search result.
///
/// A `Business` is never mutated after construction; list updates replace
/// the collection wholesale rather than editing individual records. The
/// display fields (`address`, `categories`, `distance`) are pre-formatted
/// strings and empty when the upstream record had nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Opaque identifier, unique per business and stable across requests.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating_image_url: Option<String>,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
}

impl Business {
    /// Convenience constructor for a record that only has an id and a name.
    /// All display fields start empty.
    #[must_use]
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            categories: String::new(),
            distance: String::new(),
            review_count: None,
            image_url: None,
            rating_image_url: None,
            coordinate: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_leaves_display_fields_empty() {
        let b = Business::named("abc", "Thai House");
        assert_eq!(b.id, "abc");
        assert_eq!(b.name, "Thai House");
        assert!(b.address.is_empty());
        assert!(b.categories.is_empty());
        assert!(b.distance.is_empty());
        assert!(b.review_count.is_none());
        assert!(b.coordinate.is_none());
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let b: Business = serde_json::from_str(r#"{"id":"x","name":"Noodle Bar"}"#)
            .expect("minimal record should deserialize");
        assert_eq!(b.name, "Noodle Bar");
        assert!(b.address.is_empty());
        assert!(b.rating_image_url.is_none());
    }
}
