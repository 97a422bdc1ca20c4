//! Feed URL construction.

use tickwire_types::{ApiKey, Endpoint};

/// Base URL for the vendor's streaming host.
pub const BASE_URL: &str = "wss://ws.eodhistoricaldata.com/ws";

/// Builds the WebSocket URL for an endpoint, with the API key as a
/// query parameter.
///
/// URL format: `{BASE_URL}/{ENDPOINT}?api_token={KEY}`
///
/// # Example
///
/// ```
/// use tickwire_stream::url::feed_url;
/// use tickwire_types::{ApiKey, Endpoint};
///
/// let url = feed_url(Endpoint::Crypto, &ApiKey::demo());
/// assert_eq!(url, "wss://ws.eodhistoricaldata.com/ws/crypto?api_token=demo");
/// ```
#[must_use]
pub fn feed_url(endpoint: Endpoint, api_key: &ApiKey) -> String {
    format!("{BASE_URL}/{}?api_token={}", endpoint.as_str(), api_key.as_str())
}
