//! Display formatting for terminal output
//!
//! Turns conversions, the currency catalog, trends and history into plain
//! strings for the CLI. The TUI renders the same data with ratatui widgets.

pub mod conversion;
pub mod currency;
pub mod history;
pub mod trend;

pub use conversion::{format_conversion, source_label};
pub use currency::{format_currency_table, format_rate_table};
pub use history::format_history;
pub use trend::{format_trend, sparkline};
