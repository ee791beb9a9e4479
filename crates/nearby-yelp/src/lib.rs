//! HTTP client for the Yelp business-search API.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::YelpClient;
pub use error::YelpError;
pub use normalize::normalize_business;
pub use types::{BusinessEntry, SearchResponse};
