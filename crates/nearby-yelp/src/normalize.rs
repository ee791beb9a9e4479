//! Normalization from wire records into display-ready [`Business`] values.

use nearby_core::{Business, Coordinate};

use crate::types::BusinessEntry;

const METERS_PER_MILE: f64 = 1_609.344;

/// Converts a wire [`BusinessEntry`] into an immutable [`Business`].
///
/// Display fields are pre-formatted here so the listing and any display
/// surface never touch the wire shape:
/// - address: first street line and first neighborhood joined by `", "`,
/// - categories: display names joined by `", "`,
/// - distance: meters converted to miles, rendered as `"0.42 mi"`.
///
/// Anything absent on the wire becomes an empty string or `None`.
#[must_use]
pub fn normalize_business(entry: BusinessEntry) -> Business {
    let location = entry.location.unwrap_or_default();

    let street = location.address.first().map(String::as_str);
    let neighborhood = location.neighborhoods.first().map(String::as_str);
    let address = match (street, neighborhood) {
        (Some(s), Some(n)) => format!("{s}, {n}"),
        (Some(s), None) => s.to_owned(),
        (None, Some(n)) => n.to_owned(),
        (None, None) => String::new(),
    };

    let categories = entry
        .categories
        .iter()
        .map(|(name, _code)| name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let distance = entry
        .distance
        .map(|meters| format!("{:.2} mi", meters / METERS_PER_MILE))
        .unwrap_or_default();

    let coordinate = location.coordinate.map(|c| Coordinate {
        latitude: c.latitude,
        longitude: c.longitude,
    });

    Business {
        id: entry.id,
        name: entry.name,
        address,
        categories,
        distance,
        review_count: entry.review_count,
        image_url: entry.image_url,
        rating_image_url: entry.rating_img_url_large,
        coordinate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{WireCoordinate, WireLocation};

    fn entry() -> BusinessEntry {
        BusinessEntry {
            id: "thai-house-sf".to_owned(),
            name: "Thai House".to_owned(),
            image_url: Some("https://img.example/thumb.jpg".to_owned()),
            rating_img_url_large: Some("https://img.example/stars.png".to_owned()),
            review_count: Some(128),
            distance: Some(1609.344),
            categories: vec![
                ("Thai".to_owned(), "thai".to_owned()),
                ("Asian Fusion".to_owned(), "asianfusion".to_owned()),
            ],
            location: Some(WireLocation {
                address: vec!["123 Main St".to_owned()],
                neighborhoods: vec!["SoMa".to_owned()],
                coordinate: Some(WireCoordinate {
                    latitude: 37.78,
                    longitude: -122.41,
                }),
            }),
        }
    }

    #[test]
    fn formats_all_display_fields() {
        let b = normalize_business(entry());
        assert_eq!(b.address, "123 Main St, SoMa");
        assert_eq!(b.categories, "Thai, Asian Fusion");
        assert_eq!(b.distance, "1.00 mi");
        assert_eq!(b.review_count, Some(128));
        let c = b.coordinate.expect("coordinate should survive");
        assert!((c.latitude - 37.78).abs() < f64::EPSILON);
    }

    #[test]
    fn address_falls_back_to_the_part_that_exists() {
        let mut e = entry();
        e.location = Some(WireLocation {
            address: vec!["9 Elm St".to_owned()],
            neighborhoods: Vec::new(),
            coordinate: None,
        });
        assert_eq!(normalize_business(e).address, "9 Elm St");

        let mut e = entry();
        e.location = Some(WireLocation {
            address: Vec::new(),
            neighborhoods: vec!["Mission".to_owned()],
            coordinate: None,
        });
        assert_eq!(normalize_business(e).address, "Mission");
    }

    #[test]
    fn sparse_record_yields_empty_display_fields() {
        let mut e = entry();
        e.location = None;
        e.distance = None;
        e.categories = Vec::new();
        e.review_count = None;
        let b = normalize_business(e);
        assert!(b.address.is_empty());
        assert!(b.categories.is_empty());
        assert!(b.distance.is_empty());
        assert!(b.coordinate.is_none());
    }

    #[test]
    fn fractional_distance_rounds_to_two_places() {
        let mut e = entry();
        e.distance = Some(402.336); // a quarter mile
        assert_eq!(normalize_business(e).distance, "0.25 mi");
    }
}
