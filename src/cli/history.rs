//! Conversion history command

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_history;
use crate::error::FxResult;
use crate::services::{AuthService, ConversionService, RateService};
use crate::storage::Storage;

/// Arguments for `history`
#[derive(Args)]
pub struct HistoryArgs {
    /// Number of conversions to show (defaults to the history_limit setting)
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Delete your conversion history
    #[arg(long)]
    pub clear: bool,
}

/// Handle the history command
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    rates: &RateService,
    args: HistoryArgs,
) -> FxResult<()> {
    let username = AuthService::new(storage, settings).require_user()?;
    let service = ConversionService::new(storage, rates);

    if args.clear {
        let removed = service.clear_history(&username)?;
        println!("Removed {} conversion(s) from history.", removed);
        return Ok(());
    }

    let entries = service.history(&username, args.limit.unwrap_or(settings.history_limit))?;
    println!("{}", format_history(&entries));
    Ok(())
}
