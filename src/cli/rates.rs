//! Conversion, trend and currency commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_conversion, format_currency_table, format_rate_table, format_trend};
use crate::error::FxResult;
use crate::models::currency;
use crate::services::{AuthService, ConversionRequest, ConversionService, RateService};
use crate::storage::Storage;

/// Rate subcommands
#[derive(Subcommand)]
pub enum RateCommands {
    /// Convert an amount between currencies
    Convert {
        /// Amount to convert, e.g. "100", "1,250.50" or "$20"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency to convert from (defaults to the configured pair)
        from: Option<String>,
        /// Currency to convert to (defaults to the configured pair)
        to: Option<String>,
    },
    /// Show the recent trend for a currency pair
    Trend {
        /// Base currency
        base: Option<String>,
        /// Target currency
        target: Option<String>,
        /// Number of days to show
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(2..=365))]
        days: Option<u32>,
    },
    /// List supported currencies
    Currencies {
        /// Include current rates
        #[arg(short, long)]
        rates: bool,
        /// Base currency for --rates
        #[arg(short, long, default_value = "USD")]
        base: String,
    },
}

/// Handle a rate command
pub fn handle_rate_command(
    storage: &Storage,
    settings: &Settings,
    rates: &RateService,
    cmd: RateCommands,
) -> FxResult<()> {
    match cmd {
        RateCommands::Convert { amount, from, to } => {
            let username = AuthService::new(storage, settings).require_user()?;
            let (default_from, default_to) = settings.default_pair()?;
            let from = from.unwrap_or_else(|| default_from.to_string());
            let to = to.unwrap_or_else(|| default_to.to_string());

            let request = ConversionRequest::parse(&username, &amount, &from, &to)?;
            let conversion = ConversionService::new(storage, rates).convert(&request)?;
            print!("{}", format_conversion(&conversion, rates.is_offline()));
        }

        RateCommands::Trend { base, target, days } => {
            AuthService::new(storage, settings).require_user()?;
            let (default_from, default_to) = settings.default_pair()?;
            let base = match base {
                Some(code) => currency::supported(&code)?,
                None => default_from,
            };
            let target = match target {
                Some(code) => currency::supported(&code)?,
                None => default_to,
            };

            let series = rates.trend(base, target, days.unwrap_or(settings.trend_days))?;
            print!("{}", format_trend(&series, rates.is_offline()));
        }

        RateCommands::Currencies { rates: show_rates, base } => {
            if show_rates {
                let base = currency::supported(&base)?;
                let (table, source) = rates.rate_table(base);
                println!("{}", format_rate_table(base, &table, source, rates.is_offline()));
            } else {
                println!("{}", format_currency_table());
            }
        }
    }

    Ok(())
}
