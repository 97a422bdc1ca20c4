//! Validated subscription requests.

use std::collections::HashSet;
use std::str::FromStr;

use tickwire_types::{
    ApiKey, Endpoint, MAX_SUBSCRIPTION_SYMBOLS, SubscriptionError, Symbol,
};

/// A validated subscribe request: API key, feed endpoint, and 1 to 50
/// unique symbols.
///
/// Immutable after construction. Every validation failure surfaces here,
/// synchronously, before any network activity.
#[derive(Debug, Clone)]
pub struct Subscription {
    api_key: ApiKey,
    endpoint: Endpoint,
    symbols: Vec<Symbol>,
}

impl Subscription {
    /// Creates a subscription from already-validated parts, checking the
    /// list bounds and uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol list is empty, contains a
    /// duplicate, or exceeds [`MAX_SUBSCRIPTION_SYMBOLS`] entries.
    pub fn new(
        api_key: ApiKey,
        endpoint: Endpoint,
        symbols: Vec<Symbol>,
    ) -> Result<Self, SubscriptionError> {
        if symbols.is_empty() {
            return Err(SubscriptionError::NoSymbols);
        }
        if symbols.len() > MAX_SUBSCRIPTION_SYMBOLS {
            return Err(SubscriptionError::TooManySymbols(symbols.len()));
        }
        let mut seen = HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(SubscriptionError::DuplicateSymbol(
                    symbol.as_str().to_string(),
                ));
            }
        }
        Ok(Self {
            api_key,
            endpoint,
            symbols,
        })
    }

    /// Creates a subscription from raw strings, validating every part.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: bad API key shape, unknown
    /// endpoint, empty list, invalid or duplicate symbol, or more than
    /// [`MAX_SUBSCRIPTION_SYMBOLS`] symbols.
    pub fn parse<S: AsRef<str>>(
        api_key: &str,
        endpoint: &str,
        symbols: impl IntoIterator<Item = S>,
    ) -> Result<Self, SubscriptionError> {
        let api_key = ApiKey::new(api_key)?;
        let endpoint = Endpoint::from_str(endpoint)
            .map_err(|_| SubscriptionError::InvalidEndpoint(endpoint.to_string()))?;
        let symbols = symbols
            .into_iter()
            .map(|s| Symbol::new(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(api_key, endpoint, symbols)
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the feed endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Returns the subscribed symbols.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns the symbols comma-joined with no spaces, as the feed
    /// expects them in the subscribe frame.
    #[must_use]
    pub fn symbols_csv(&self) -> String {
        self.symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Renders the JSON subscribe frame sent immediately after connect.
    #[must_use]
    pub fn subscribe_frame(&self) -> String {
        serde_json::json!({
            "action": "subscribe",
            "symbols": self.symbols_csv(),
        })
        .to_string()
    }
}
