//! Currency catalog tables

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::conversion::source_label;
use crate::models::{CurrencyCode, RateSource, CURRENCIES};

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "")]
    flag: &'static str,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
}

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "")]
    flag: &'static str,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// Table of every supported currency
pub fn format_currency_table() -> String {
    let rows: Vec<CurrencyRow> = CURRENCIES
        .iter()
        .map(|c| CurrencyRow {
            flag: c.flag,
            code: c.code.to_string(),
            name: c.name,
            symbol: c.symbol,
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Table of catalog currencies quoted against `base`
///
/// Currencies missing from `rates` show a dash.
pub fn format_rate_table(
    base: CurrencyCode,
    rates: &HashMap<String, f64>,
    source: RateSource,
    offline: bool,
) -> String {
    let rows: Vec<RateRow> = CURRENCIES
        .iter()
        .map(|c| RateRow {
            flag: c.flag,
            code: c.code.to_string(),
            name: c.name,
            rate: rates
                .get(c.code.as_str())
                .map(|r| format!("{:.4}", r))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    format!(
        "Rates for 1 {} ({})\n{}",
        base,
        source_label(source, offline),
        Table::new(rows).with(Style::rounded())
    )
}
