use thiserror::Error;

/// Errors returned by the Yelp search client.
///
/// All three variants are terminal for the request that produced them; the
/// client never retries on its own.
#[derive(Debug, Error)]
pub enum YelpError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request and returned an error envelope.
    #[error("Yelp API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
