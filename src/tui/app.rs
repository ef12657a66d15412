//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events,
//! and performs the actions that touch services.

use std::time::Instant;

use crate::config::settings::Settings;
use crate::models::{Amount, CurrencyCode, RateSource};
use crate::services::{
    spawn, AuthService, ConversionRequest, ConversionService, RateService, RegistrationStatus,
};
use crate::storage::Storage;

use super::views::dashboard::DashboardState;
use super::views::login::{LoginField, LoginForm};
use super::views::register::RegisterForm;
use super::widgets::{Notification, NotificationQueue};

/// Which screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Dashboard,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Rate lookups, cloned into worker threads
    pub rates: RateService,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently shown screen
    pub screen: Screen,

    /// Logged-in user, set on the dashboard
    pub user: Option<String>,

    pub login: LoginForm,
    pub register: RegisterForm,
    pub dashboard: DashboardState,

    /// Toasts on screen
    pub notifications: NotificationQueue,
}

impl<'a> App<'a> {
    /// Create a new App instance on the login screen
    pub fn new(storage: &'a Storage, settings: &'a Settings, rates: RateService) -> Self {
        let (from, to) = settings
            .default_pair()
            .unwrap_or((CurrencyCode::USD, CurrencyCode::USD));

        let mut dashboard = DashboardState::new(from, to);
        dashboard.offline = rates.is_offline();

        Self {
            storage,
            settings,
            rates,
            should_quit: false,
            screen: Screen::Login,
            user: None,
            login: LoginForm::new(),
            register: RegisterForm::new(),
            dashboard,
            notifications: NotificationQueue::new(),
        }
    }

    fn auth(&self) -> AuthService<'a> {
        AuthService::new(self.storage, self.settings)
    }

    /// Skip the login screen when a saved session is still valid
    pub fn resume_session(&mut self) {
        match self.auth().current_user() {
            Ok(Some(user)) => {
                tracing::info!(%user, "Resuming saved session");
                self.enter_dashboard(user);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not read saved session"),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Show a toast
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn show_register(&mut self) {
        self.register.reset();
        self.register.username.set_value(self.login.username.value());
        self.screen = Screen::Register;
    }

    pub fn show_login(&mut self) {
        self.register.reset();
        self.screen = Screen::Login;
    }

    /// Check the login form and open the dashboard on success
    pub fn submit_login(&mut self) {
        let username = self.login.username.value().trim().to_string();
        let password = self.login.password.take_secret();

        match self.auth().login(&username, &password) {
            Ok(true) => {
                self.login.reset();
                self.notify(Notification::success(format!("Welcome, {}!", username)));
                self.enter_dashboard(username);
            }
            Ok(false) => {
                self.login.focus = LoginField::Password;
                self.notify(Notification::error("Invalid username or password"));
            }
            Err(e) => self.notify(Notification::error(e.user_message())),
        }
    }

    /// Create the account from the registration form
    pub fn submit_register(&mut self) {
        let username = self.register.username.value().trim().to_string();
        let password = self.register.password.take_secret();
        let confirm = self.register.confirm.take_secret();

        match self.auth().register(&username, &password, &confirm) {
            Ok(RegistrationStatus::Success) => {
                self.show_login();
                self.login.username.set_value(&username);
                self.login.focus = LoginField::Password;
                self.notify(Notification::success(
                    "Account created successfully! Please login.",
                ));
            }
            Ok(RegistrationStatus::UserAlreadyExists) => {
                self.notify(Notification::error("Username already exists"));
            }
            Err(e) => self.notify(Notification::error(e.user_message())),
        }
    }

    fn enter_dashboard(&mut self, user: String) {
        self.user = Some(user);
        self.screen = Screen::Dashboard;
        self.refresh_trend();
    }

    /// End the session and go back to the login screen
    pub fn logout(&mut self) {
        if let Err(e) = self.auth().logout() {
            tracing::warn!(error = %e, "Failed to clear session");
        }
        self.user = None;
        self.dashboard.pending = None;
        self.dashboard.trend_job = None;
        self.login.reset();
        self.screen = Screen::Login;
        self.notify(Notification::info("Logged out"));
    }

    /// Convert the amount on the dashboard in the background
    pub fn start_conversion(&mut self) {
        if self.dashboard.is_converting() {
            return;
        }
        let Some(user) = self.user.clone() else {
            return;
        };

        let amount = match Amount::parse(self.dashboard.amount.value()) {
            Ok(amount) => amount,
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                return;
            }
        };

        let request = ConversionRequest::new(
            user,
            amount,
            self.dashboard.from_currency().code,
            self.dashboard.to_currency().code,
        );
        tracing::debug!(from = %request.from, to = %request.to, "Starting conversion");
        self.dashboard.pending = Some(spawn(self.rates.clone(), request));
    }

    /// Fetch the trend for the selected pair in the background
    pub fn refresh_trend(&mut self) {
        let base = self.dashboard.from_currency().code;
        let target = self.dashboard.to_currency().code;
        self.dashboard.trend_job = Some(self.rates.spawn_trend(base, target, self.settings.trend_days));
    }

    pub fn swap_currencies(&mut self) {
        self.dashboard.swap();
        self.refresh_trend();
    }

    /// Step the focused currency selector
    pub fn cycle_currency(&mut self, step: isize) {
        if self.dashboard.cycle_selected(step) {
            self.refresh_trend();
        }
    }

    /// Advance animations and collect finished background work
    pub fn on_tick(&mut self, now: Instant) {
        self.notifications.remove_expired_at(now);
        self.poll_conversion(now);
        self.poll_trend();
        self.dashboard.reveal.tick();
    }

    fn poll_conversion(&mut self, now: Instant) {
        let Some(handle) = self.dashboard.pending.as_mut() else {
            return;
        };
        let Some(result) = handle.try_result() else {
            return;
        };
        self.dashboard.pending = None;

        let conversion = match result {
            Ok(conversion) => conversion,
            Err(e) => {
                self.notify(Notification::error(e.user_message()));
                return;
            }
        };

        if conversion.source == RateSource::Mock && !self.rates.is_offline() {
            self.notify(Notification::warning(
                "Live rates unavailable, showing mock rates",
            ));
        }

        let saved = ConversionService::new(self.storage, &self.rates).record(conversion.clone());
        let conversion = match saved {
            Ok(saved) => saved,
            Err(e) => {
                tracing::error!(error = %e, "Failed to save conversion");
                self.notify(Notification::warning("Could not save conversion history"));
                conversion
            }
        };

        self.dashboard.show_result(conversion, now);
    }

    fn poll_trend(&mut self) {
        let Some(job) = self.dashboard.trend_job.as_mut() else {
            return;
        };
        let Some(result) = job.try_result() else {
            return;
        };
        self.dashboard.trend_job = None;

        match result.and_then(|series| series) {
            Ok(series) => {
                // Ignore a trend for a pair that is no longer selected
                if series.base == self.dashboard.from_currency().code
                    && series.target == self.dashboard.to_currency().code
                {
                    self.dashboard.show_trend(series);
                }
            }
            Err(e) => self.notify(Notification::error(e.user_message())),
        }
    }
}
