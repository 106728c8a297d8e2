//! A numeric request field that clients may send as a JSON number or string.

use serde::Deserialize;

/// A numeric field accepted either as a JSON number or as a string.
///
/// The raw textual form is kept alongside the parsed value so that a
/// transaction hashes to the same identity no matter how the client encoded
/// the amount.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// The field arrived as a JSON number, e.g. `50` or `-3.5`.
    Number(serde_json::Number),
    /// The field arrived as a string, e.g. `"50"`.
    Text(String),
}

impl RawNumber {
    /// The textual form of the value as the client supplied it.
    pub fn as_text(&self) -> String {
        match self {
            RawNumber::Number(number) => number.to_string(),
            RawNumber::Text(text) => text.clone(),
        }
    }

    /// Parse the value as a float, or `None` if it is not a finite number.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(number) => number.as_f64()?,
            RawNumber::Text(text) => text.trim().parse().ok()?,
        };

        value.is_finite().then_some(value)
    }
}
