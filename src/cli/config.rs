//! Settings commands

use clap::Subcommand;

use crate::config::paths::FxPaths;
use crate::config::settings::Settings;
use crate::error::FxResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings and paths
    Show,
    /// Change a setting
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
    /// Print the data directory
    Path,
}

/// Handle a config command
///
/// Reads settings straight from disk so flags such as `--offline` are never
/// persisted by accident.
pub fn handle_config_command(paths: &FxPaths, cmd: ConfigCommands) -> FxResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let settings = Settings::load_or_create(paths)?;

            println!("fxpro configuration");
            println!("===================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Database:       {}", paths.database_file().display());
            println!();
            println!("Settings:");
            println!("  default_from:          {}", settings.default_from);
            println!("  default_to:            {}", settings.default_to);
            println!("  trend_days:            {}", settings.trend_days);
            println!("  request_timeout_secs:  {}", settings.request_timeout_secs);
            println!("  exchange_rate_api_url: {}", settings.exchange_rate_api_url);
            println!("  frankfurter_api_url:   {}", settings.frankfurter_api_url);
            println!("  offline:               {}", settings.offline);
            println!("  session_ttl_hours:     {}", settings.session_ttl_hours);
            println!("  history_limit:         {}", settings.history_limit);
            println!("  min_password_length:   {}", settings.min_password_length);
        }

        ConfigCommands::Set { key, value } => {
            let mut settings = Settings::load_or_create(paths)?;
            settings.set(&key, &value)?;
            settings.save(paths)?;
            tracing::info!(%key, %value, "Updated setting");
            println!("Set {} = {}", key, value);
        }

        ConfigCommands::Path => {
            println!("{}", paths.base_dir().display());
        }
    }

    Ok(())
}
