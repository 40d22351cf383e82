//! Trade stream frame types
//!
//! Types for messages received from the `<key>@trade` WebSocket stream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trade event from the `<key>@trade` stream
///
/// Example JSON:
/// ```json
/// {
///   "e": "trade",
///   "E": 1672531200000,
///   "s": "BTCUSDT",
///   "p": "16800.50",
///   "q": "1.25",
///   "T": 1672531199999
/// }
/// ```
///
/// Only the price and trade time are retained; unrecognized fields are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Last-trade price (as string to preserve precision)
    #[serde(rename = "p")]
    pub price: String,

    /// Trade timestamp (Unix milliseconds)
    #[serde(rename = "T")]
    pub trade_time: i64,
}

impl TradeEvent {
    /// Parses the textual price field into a decimal.
    ///
    /// Returns `None` when the field does not hold a valid decimal number.
    pub fn price_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(&self.price).ok()
    }
}

/// Decodes one text frame into a price.
///
/// A frame is accepted only if it is a JSON object carrying a string price
/// field that parses as a decimal number. Any other shape yields `None` and
/// is dropped by the receive loop without surfacing an error.
pub(crate) fn decode_trade_price(text: &str) -> Option<Decimal> {
    let event: TradeEvent = serde_json::from_str(text).ok()?;
    event.price_decimal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_event_deserialization() {
        let json = r#"{
            "e": "trade",
            "E": 1672531200000,
            "s": "BTCUSDT",
            "t": 12345,
            "p": "16800.50",
            "q": "1.25",
            "T": 1672531199999,
            "m": true,
            "M": true
        }"#;

        let event: TradeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.price, "16800.50");
        assert_eq!(event.trade_time, 1672531199999);
        assert_eq!(event.price_decimal(), Decimal::from_str("16800.50").ok());
    }

    #[test]
    fn test_decode_accepts_valid_frame() {
        let price = decode_trade_price(r#"{"p": "42000.10", "T": 1672531199999}"#);
        assert_eq!(price, Decimal::from_str("42000.10").ok());
    }

    #[test]
    fn test_decode_drops_non_json() {
        assert!(decode_trade_price("not json at all").is_none());
    }

    #[test]
    fn test_decode_drops_missing_price() {
        assert!(decode_trade_price(r#"{"e": "trade", "T": 1672531199999}"#).is_none());
    }

    #[test]
    fn test_decode_drops_numeric_price_field() {
        // The price must be a numeric *string*; a bare number is rejected.
        assert!(decode_trade_price(r#"{"p": 16800.5, "T": 1672531199999}"#).is_none());
    }

    #[test]
    fn test_decode_drops_unparseable_price_string() {
        assert!(decode_trade_price(r#"{"p": "not-a-number", "T": 1672531199999}"#).is_none());
    }
}
