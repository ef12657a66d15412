use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::amount::format_grouped;
use crate::models::Conversion;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Source")]
    source: &'static str,
}

/// Table of past conversions in the order given
pub fn format_history(conversions: &[Conversion]) -> String {
    if conversions.is_empty() {
        return "No conversions yet.".to_string();
    }

    let rows: Vec<HistoryRow> = conversions
        .iter()
        .map(|c| HistoryRow {
            when: c
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            amount: format!("{} {}", format_grouped(c.amount), c.from),
            result: format!("{} {}", format_grouped(c.result), c.to),
            rate: format!("{:.4}", c.rate),
            source: c.source.as_str(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, CurrencyCode, ExchangeRate, RateSource};

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history(&[]), "No conversions yet.");
    }

    #[test]
    fn test_history_rows() {
        let rate = ExchangeRate::new(
            CurrencyCode::USD,
            CurrencyCode::parse("JPY").unwrap(),
            110.0,
            RateSource::Mock,
        );
        let conversion = Conversion::new("alice", Amount::parse("25").unwrap(), &rate);
        let table = format_history(&[conversion]);

        assert!(table.contains("25.00 USD"));
        assert!(table.contains("2,750.00 JPY"));
        assert!(table.contains("110.0000"));
        assert!(table.contains("mock"));
    }
}
