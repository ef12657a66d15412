//! Amount type for user-entered values to convert
//!
//! Exchange rates are fractional, so amounts are kept as `f64` and only
//! rounded when formatted for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::CURRENCIES;
use crate::error::FxError;

/// A strictly positive, finite amount of money in some currency
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

/// Errors from parsing an amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
    #[error("Please enter an amount")]
    Empty,
    #[error("Please enter a valid number: '{0}'")]
    InvalidFormat(String),
    #[error("Amount must be greater than 0")]
    NotPositive,
}

impl From<AmountParseError> for FxError {
    fn from(err: AmountParseError) -> Self {
        FxError::Validation(err.to_string())
    }
}

impl Amount {
    /// Create an amount from a raw value
    pub fn new(value: f64) -> Result<Self, AmountParseError> {
        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(value.to_string()));
        }
        if value <= 0.0 {
            return Err(AmountParseError::NotPositive);
        }
        Ok(Self(value))
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Parse an amount from user text
    ///
    /// Accepts "1000", "1000.50", "1,000.50" and an optional leading
    /// currency symbol such as "$" or "€".
    ///
    /// # Examples
    /// ```
    /// use fxpro_cli::models::Amount;
    /// assert_eq!(Amount::parse("$1,250.5").unwrap().value(), 1250.5);
    /// ```
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let mut rest = trimmed;
        // Longest symbols first so "NZ$" wins over "$"
        let mut symbols: Vec<&str> = CURRENCIES.iter().map(|c| c.symbol).collect();
        symbols.sort_by_key(|s| std::cmp::Reverse(s.len()));
        for symbol in symbols {
            if let Some(stripped) = rest.strip_prefix(symbol) {
                rest = stripped.trim_start();
                break;
            }
        }

        let cleaned: String = rest.chars().filter(|c| *c != ',' && *c != '_').collect();
        if cleaned.is_empty()
            || !cleaned
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
        {
            return Err(AmountParseError::InvalidFormat(trimmed.to_string()));
        }

        let value: f64 = cleaned
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(trimmed.to_string()))?;

        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grouped(self.0))
    }
}

/// Format a value as `#,##0.00`
///
/// # Examples
/// ```
/// use fxpro_cli::models::amount::format_grouped;
/// assert_eq!(format_grouped(1234567.891), "1,234,567.89");
/// ```
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Format a value with a currency symbol, e.g. `₹ 8,325.00`
pub fn format_with_symbol(value: f64, symbol: &str) -> String {
    format!("{} {}", symbol, format_grouped(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(Amount::parse("100").unwrap().value(), 100.0);
        assert_eq!(Amount::parse("0.5").unwrap().value(), 0.5);
        assert_eq!(Amount::parse(" 42.25 ").unwrap().value(), 42.25);
    }

    #[test]
    fn test_parse_separators_and_symbols() {
        assert_eq!(Amount::parse("1,000.50").unwrap().value(), 1000.5);
        assert_eq!(Amount::parse("$250").unwrap().value(), 250.0);
        assert_eq!(Amount::parse("€ 12").unwrap().value(), 12.0);
        assert_eq!(Amount::parse("NZ$3").unwrap().value(), 3.0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Amount::parse("").unwrap_err(), AmountParseError::Empty);
        assert_eq!(Amount::parse("   ").unwrap_err(), AmountParseError::Empty);
        assert_eq!(Amount::parse("0").unwrap_err(), AmountParseError::NotPositive);
        assert_eq!(Amount::parse("-5").unwrap_err(), AmountParseError::NotPositive);
        assert!(matches!(
            Amount::parse("abc"),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Amount::parse("1e5"),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Amount::parse("NaN"),
            Err(AmountParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0.00");
        assert_eq!(format_grouped(999.999), "1,000.00");
        assert_eq!(format_grouped(1234.5), "1,234.50");
        assert_eq!(format_grouped(100000.0), "100,000.00");
        assert_eq!(format_grouped(-1234.5), "-1,234.50");
        assert_eq!(format_grouped(-0.001), "0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(format_with_symbol(8325.0, "₹"), "₹ 8,325.00");
    }
}
