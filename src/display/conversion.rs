//! Conversion result formatting

use crate::models::{Conversion, RateSource};

/// Short description of where a rate came from
///
/// Mock rates are labelled by cause: offline mode, or a failed live fetch.
pub fn source_label(source: RateSource, offline: bool) -> &'static str {
    match (source, offline) {
        (RateSource::Live, _) => "live rates",
        (RateSource::Mock, true) => "mock rates (offline)",
        (RateSource::Mock, false) => "mock rates (live rates unavailable)",
    }
}

/// Format a finished conversion
///
/// ```text
/// 100.00 USD = 85.00 EUR
///   € 85.00
///   1 USD = 0.8500 EUR (mock rates (offline))
/// ```
pub fn format_conversion(conversion: &Conversion, offline: bool) -> String {
    let mut output = String::new();
    output.push_str(&conversion.summary());
    output.push('\n');
    output.push_str(&format!("  {}\n", conversion.formatted_result()));
    output.push_str(&format!(
        "  {} ({})\n",
        conversion.rate_line(),
        source_label(conversion.source, offline)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, CurrencyCode, ExchangeRate};

    #[test]
    fn test_format_conversion() {
        let rate = ExchangeRate::new(
            CurrencyCode::USD,
            CurrencyCode::parse("INR").unwrap(),
            83.25,
            RateSource::Live,
        );
        let conversion = Conversion::new("alice", Amount::parse("1000").unwrap(), &rate);
        let output = format_conversion(&conversion, false);

        assert!(output.starts_with("1,000.00 USD = 83,250.00 INR\n"));
        assert!(output.contains("₹ 83,250.00"));
        assert!(output.contains("1 USD = 83.2500 INR (live rates)"));
    }

    #[test]
    fn test_mock_label_depends_on_mode() {
        assert_eq!(source_label(RateSource::Mock, true), "mock rates (offline)");
        assert_eq!(
            source_label(RateSource::Mock, false),
            "mock rates (live rates unavailable)"
        );
        assert_eq!(source_label(RateSource::Live, true), "live rates");

        let rate = ExchangeRate::new(CurrencyCode::USD, CurrencyCode::USD, 1.0, RateSource::Mock);
        let conversion = Conversion::new("alice", Amount::parse("5").unwrap(), &rate);
        assert!(format_conversion(&conversion, false).contains("(mock rates (live rates unavailable))"));
    }
}
