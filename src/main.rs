use anyhow::Result;
use clap::{Parser, Subcommand};

use fxpro_cli::cli::{
    handle_auth_command, handle_config_command, handle_history_command, handle_rate_command,
};
use fxpro_cli::config::logging::{self, LogTarget};
use fxpro_cli::config::{paths::FxPaths, settings::Settings};
use fxpro_cli::services::RateService;
use fxpro_cli::storage::Storage;
use fxpro_cli::FxResult;

#[derive(Parser)]
#[command(
    name = "fxpro",
    author = "Kaylee Beyene",
    version,
    about = "Terminal currency converter with live rates",
    long_about = "fxpro converts between 15 currencies using live exchange rates, \
                  falling back to a built-in rate table when offline. Run without a \
                  command to open the interactive dashboard."
)]
struct Cli {
    /// Use the built-in rate table instead of the network
    #[arg(long, global = true)]
    offline: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Auth(fxpro_cli::cli::AuthCommands),

    #[command(flatten)]
    Rates(fxpro_cli::cli::RateCommands),

    /// Show your conversion history
    History(fxpro_cli::cli::HistoryArgs),

    /// Show or change settings
    #[command(subcommand)]
    Config(fxpro_cli::cli::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and logging
    let paths = FxPaths::new()?;
    paths.ensure_directories()?;

    let target = match cli.command {
        None | Some(Commands::Tui) => LogTarget::File,
        Some(_) => LogTarget::Stderr,
    };
    logging::init(target, &paths.log_file(), cli.verbose);

    let mut settings = Settings::load_or_create(&paths)?;
    if cli.offline {
        settings.offline = true;
    }

    let storage = Storage::new(paths.clone())?;
    let rates = RateService::from_settings(&settings)?;

    let result: FxResult<()> = match cli.command {
        None | Some(Commands::Tui) => {
            return fxpro_cli::tui::run_tui(&storage, &settings, rates);
        }
        Some(Commands::Auth(cmd)) => handle_auth_command(&storage, &settings, cmd),
        Some(Commands::Rates(cmd)) => handle_rate_command(&storage, &settings, &rates, cmd),
        Some(Commands::History(args)) => {
            handle_history_command(&storage, &settings, &rates, args)
        }
        Some(Commands::Config(cmd)) => handle_config_command(&paths, cmd),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
