//! Account and session commands

use std::io::{self, BufRead};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::crypto::Password;
use crate::error::{FxError, FxResult};
use crate::services::{AuthService, RegistrationStatus};
use crate::storage::Storage;

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create a new account
    Register {
        /// Username for the new account
        username: String,
        /// Read the password and its confirmation as two lines from stdin
        #[arg(long)]
        password_stdin: bool,
    },
    /// Log in and start a session
    Login {
        /// Account username
        username: String,
        /// Read the password as one line from stdin
        #[arg(long)]
        password_stdin: bool,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show recent sign-in activity for your account
    Activity {
        /// Number of events to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

/// Where passwords are read from
enum PasswordInput {
    Prompt,
    Stdin(io::StdinLock<'static>),
}

impl PasswordInput {
    fn new(from_stdin: bool) -> Self {
        if from_stdin {
            Self::Stdin(io::stdin().lock())
        } else {
            Self::Prompt
        }
    }

    /// Read one password; a missing stdin line reads as empty
    fn read(&mut self, prompt: &str) -> FxResult<Password> {
        match self {
            Self::Prompt => Ok(Password::new(rpassword::prompt_password(prompt)?)),
            Self::Stdin(lock) => {
                let mut line = Password::new(String::new());
                lock.read_line(&mut line)?;
                let trimmed = line.trim_end_matches(['\r', '\n']).len();
                line.truncate(trimmed);
                Ok(line)
            }
        }
    }
}

/// Handle an authentication command
pub fn handle_auth_command(storage: &Storage, settings: &Settings, cmd: AuthCommands) -> FxResult<()> {
    let service = AuthService::new(storage, settings);

    match cmd {
        AuthCommands::Register {
            username,
            password_stdin,
        } => {
            let mut input = PasswordInput::new(password_stdin);
            let password = input.read("Password: ")?;
            let confirm = input.read("Confirm password: ")?;

            match service.register(&username, &password, &confirm)? {
                RegistrationStatus::Success => {
                    println!("Registration successful! You can now login as '{}'.", username.trim());
                }
                RegistrationStatus::UserAlreadyExists => {
                    return Err(FxError::user_exists(username.trim()));
                }
            }
        }

        AuthCommands::Login {
            username,
            password_stdin,
        } => {
            let password = PasswordInput::new(password_stdin).read("Password: ")?;

            if !service.login(&username, &password)? {
                return Err(FxError::Auth("Invalid username or password".into()));
            }
            println!("Welcome, {}!", username.trim());
        }

        AuthCommands::Logout => match service.logout()? {
            Some(user) => println!("Logged out {}.", user),
            None => println!("Not logged in."),
        },

        AuthCommands::Whoami => match service.current_user()? {
            Some(user) => println!("{}", user),
            None => println!("Not logged in."),
        },

        AuthCommands::Activity { limit } => {
            let entries = service.recent_activity(limit)?;
            if entries.is_empty() {
                println!("No activity recorded.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}
