//! Ticker symbol validation.

use crate::SubscriptionError;
use serde::{Deserialize, Serialize};

/// Maximum legal length of a single symbol.
pub const MAX_SYMBOL_LEN: usize = 48;

/// Maximum number of symbols per streaming subscription.
pub const MAX_SUBSCRIPTION_SYMBOLS: usize = 50;

/// A validated ticker symbol.
///
/// Symbols are 1 to [`MAX_SYMBOL_LEN`] characters drawn from
/// `[A-Za-z0-9-$]`, e.g. `AAPL`, `BTC-USD`, `EURUSD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a validated symbol.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidSymbol`] if the symbol is
    /// empty, too long, or contains a disallowed character.
    pub fn new(symbol: impl Into<String>) -> Result<Self, SubscriptionError> {
        let symbol = symbol.into();
        if is_valid_symbol(&symbol) {
            Ok(Self(symbol))
        } else {
            Err(SubscriptionError::InvalidSymbol(symbol))
        }
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks the fixed symbol character class: `[A-Za-z0-9-$]{1,48}`.
fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '$')
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SubscriptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
