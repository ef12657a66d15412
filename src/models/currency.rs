//! Currency codes and the catalog of supported currencies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FxError;

/// A three-letter ISO 4217 currency code, always uppercase ASCII
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// US dollar, the pivot currency of the mock rate table
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");

    /// Parse a code from user input
    ///
    /// Surrounding whitespace is ignored and letters are uppercased.
    ///
    /// # Examples
    /// ```
    /// use fxpro_cli::models::CurrencyCode;
    /// let code = CurrencyCode::parse(" eur ").unwrap();
    /// assert_eq!(code.as_str(), "EUR");
    /// ```
    pub fn parse(s: &str) -> Result<Self, FxError> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(FxError::Validation(format!(
                "Invalid currency code '{}': expected three letters like USD",
                s
            )));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Catalog entry for this code, if the currency is supported
    pub fn info(&self) -> Option<&'static CurrencyInfo> {
        lookup(*self)
    }

    /// Display symbol, falling back to the code itself
    pub fn symbol(&self) -> &str {
        match self.info() {
            Some(info) => info.symbol,
            None => self.as_str(),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = FxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

/// Display metadata for a supported currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub flag: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn info(
    code: &[u8; 3],
    flag: &'static str,
    name: &'static str,
    symbol: &'static str,
) -> CurrencyInfo {
    CurrencyInfo {
        code: CurrencyCode(*code),
        flag,
        name,
        symbol,
    }
}

/// Supported currencies, in the order they are offered to the user
pub const CURRENCIES: &[CurrencyInfo] = &[
    info(b"USD", "🇺🇸", "United States Dollar", "$"),
    info(b"EUR", "🇪🇺", "Euro", "€"),
    info(b"GBP", "🇬🇧", "British Pound Sterling", "£"),
    info(b"JPY", "🇯🇵", "Japanese Yen", "¥"),
    info(b"AUD", "🇦🇺", "Australian Dollar", "A$"),
    info(b"CAD", "🇨🇦", "Canadian Dollar", "C$"),
    info(b"CHF", "🇨🇭", "Swiss Franc", "Fr"),
    info(b"CNY", "🇨🇳", "Chinese Yuan", "¥"),
    info(b"SEK", "🇸🇪", "Swedish Krona", "kr"),
    info(b"NZD", "🇳🇿", "New Zealand Dollar", "NZ$"),
    info(b"INR", "🇮🇳", "Indian Rupee", "₹"),
    info(b"BRL", "🇧🇷", "Brazilian Real", "R$"),
    info(b"RUB", "🇷🇺", "Russian Ruble", "₽"),
    info(b"KRW", "🇰🇷", "South Korean Won", "₩"),
    info(b"SGD", "🇸🇬", "Singapore Dollar", "S$"),
];

/// Find the catalog entry for a code
pub fn lookup(code: CurrencyCode) -> Option<&'static CurrencyInfo> {
    CURRENCIES.iter().find(|c| c.code == code)
}

/// Parse a code and require it to be in the catalog
pub fn supported(s: &str) -> Result<CurrencyCode, FxError> {
    let code = CurrencyCode::parse(s)?;
    if lookup(code).is_none() {
        return Err(FxError::currency_not_found(code.as_str()));
    }
    Ok(code)
}

/// Position of a code in the catalog
pub fn catalog_index(code: CurrencyCode) -> Option<usize> {
    CURRENCIES.iter().position(|c| c.code == code)
}
