//! Feed endpoint definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named feed channel on the vendor's streaming host.
///
/// The endpoint selects which push feed the WebSocket subscribes to and
/// appears verbatim in the connection URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// US stock trades.
    Us,
    /// US stock quotes (bid/ask updates).
    UsQuote,
    /// Foreign exchange rates.
    Forex,
    /// Cryptocurrency trades.
    Crypto,
}

impl Endpoint {
    /// Returns the wire spelling used in the feed URL path.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::UsQuote => "us-quote",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
        }
    }

    /// Returns all available endpoints.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Us, Self::UsQuote, Self::Forex, Self::Crypto]
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "us_quote" is the spelling used by older client generations.
        match s.to_lowercase().as_str() {
            "us" => Ok(Self::Us),
            "us-quote" | "us_quote" => Ok(Self::UsQuote),
            "forex" => Ok(Self::Forex),
            "crypto" => Ok(Self::Crypto),
            _ => Err(EndpointParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid endpoint string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointParseError(pub(crate) String);

impl std::fmt::Display for EndpointParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid endpoint '{}', expected one of: us, us-quote, forex, crypto",
            self.0
        )
    }
}

impl std::error::Error for EndpointParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_parse() {
        assert_eq!("us".parse::<Endpoint>().unwrap(), Endpoint::Us);
        assert_eq!("us-quote".parse::<Endpoint>().unwrap(), Endpoint::UsQuote);
        assert_eq!("us_quote".parse::<Endpoint>().unwrap(), Endpoint::UsQuote);
        assert_eq!("CRYPTO".parse::<Endpoint>().unwrap(), Endpoint::Crypto);
        assert_eq!("forex".parse::<Endpoint>().unwrap(), Endpoint::Forex);
    }

    #[test]
    fn test_endpoint_parse_rejects_unknown() {
        // "stocks" is a construction error, never a runtime connection error.
        assert!("stocks".parse::<Endpoint>().is_err());
        assert!("".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_endpoint_wire_spelling() {
        assert_eq!(Endpoint::UsQuote.as_str(), "us-quote");
        assert_eq!(Endpoint::Us.to_string(), "us");
    }

    #[test]
    fn test_endpoint_serde_kebab_case() {
        let json = serde_json::to_string(&Endpoint::UsQuote).unwrap();
        assert_eq!(json, "\"us-quote\"");
    }
}
