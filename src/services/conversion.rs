//! Conversion service
//!
//! Turns user input into a [`Conversion`] and keeps the per-user history.
//! Rate lookups can block on the network, so the TUI runs each conversion on
//! its own worker thread via [`spawn`] and polls the returned handle.

use super::rates::RateService;
use super::worker::Job;
use crate::error::{FxError, FxResult};
use crate::models::{currency, Amount, Conversion, CurrencyCode};
use crate::storage::Storage;

/// A validated conversion request
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub username: String,
    pub amount: Amount,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionRequest {
    pub fn new(username: impl Into<String>, amount: Amount, from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            username: username.into(),
            amount,
            from,
            to,
        }
    }

    /// Validate raw user input
    ///
    /// Both codes must be in the supported catalog.
    pub fn parse(username: &str, amount: &str, from: &str, to: &str) -> FxResult<Self> {
        let amount = Amount::parse(amount)?;
        let from = currency::supported(from)?;
        let to = currency::supported(to)?;
        Ok(Self::new(username, amount, from, to))
    }

    /// Resolve the rate and compute the result
    ///
    /// A result too large to represent is a validation error.
    pub fn execute(&self, rates: &RateService) -> FxResult<Conversion> {
        let rate = rates.exchange_rate(self.from, self.to);
        let conversion = Conversion::new(&self.username, self.amount, &rate);
        if !conversion.result.is_finite() {
            return Err(FxError::Validation(format!(
                "Amount is too large to convert to {}",
                self.to
            )));
        }
        Ok(conversion)
    }
}

/// A conversion running on a worker thread
pub struct ConversionHandle {
    request: ConversionRequest,
    job: Job<FxResult<Conversion>>,
}

/// Start a conversion on a new thread
pub fn spawn(rates: RateService, request: ConversionRequest) -> ConversionHandle {
    let work = request.clone();
    ConversionHandle {
        request,
        job: Job::spawn(move || work.execute(&rates)),
    }
}

impl ConversionHandle {
    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    /// The finished conversion, or `None` while still running
    pub fn try_result(&mut self) -> Option<FxResult<Conversion>> {
        self.job.try_result().map(|result| result.and_then(|conversion| conversion))
    }

    /// Block until the conversion finishes
    pub fn wait(self) -> FxResult<Conversion> {
        self.job.wait().and_then(|conversion| conversion)
    }
}

/// Service for conversions and their history
pub struct ConversionService<'a> {
    storage: &'a Storage,
    rates: &'a RateService,
}

impl<'a> ConversionService<'a> {
    /// Create a new conversion service
    pub fn new(storage: &'a Storage, rates: &'a RateService) -> Self {
        Self { storage, rates }
    }

    /// Convert on the calling thread and record the result
    pub fn convert(&self, request: &ConversionRequest) -> FxResult<Conversion> {
        let conversion = request.execute(self.rates)?;
        self.record(conversion)
    }

    /// Store a finished conversion, filling in its id
    pub fn record(&self, mut conversion: Conversion) -> FxResult<Conversion> {
        let id = self.storage.history().record(&conversion)?;
        conversion.id = Some(id);

        tracing::info!(
            user = %conversion.username,
            from = %conversion.from,
            to = %conversion.to,
            amount = conversion.amount,
            source = %conversion.source,
            "Recorded conversion"
        );
        Ok(conversion)
    }

    /// Most recent conversions, newest first
    pub fn history(&self, username: &str, limit: usize) -> FxResult<Vec<Conversion>> {
        self.storage.history().recent(username, limit)
    }

    /// Delete a user's history, returning how many entries went
    pub fn clear_history(&self, username: &str) -> FxResult<usize> {
        let removed = self.storage.history().clear(username)?;
        tracing::info!(user = %username, removed, "Cleared conversion history");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FxPaths;
    use crate::models::RateSource;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FxPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::in_memory(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_parse_request() {
        let request = ConversionRequest::parse("alice", "1,000", "usd", "EUR").unwrap();
        assert_eq!(request.amount.value(), 1000.0);
        assert_eq!(request.from.as_str(), "USD");

        assert!(ConversionRequest::parse("alice", "abc", "USD", "EUR")
            .unwrap_err()
            .is_validation());
        assert!(ConversionRequest::parse("alice", "-5", "USD", "EUR").is_err());
        assert!(ConversionRequest::parse("alice", "5", "USD", "XYZ")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_convert_records_history() {
        let (_temp_dir, storage) = create_test_storage();
        let rates = RateService::offline();
        let service = ConversionService::new(&storage, &rates);

        let request = ConversionRequest::parse("alice", "100", "USD", "EUR").unwrap();
        let conversion = service.convert(&request).unwrap();

        assert!(conversion.id.is_some());
        assert!((conversion.result - 85.0).abs() < 1e-9);
        assert_eq!(conversion.source, RateSource::Mock);

        let history = service.history("alice", 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, conversion.id);
        assert!(service.history("bob", 10).unwrap().is_empty());
    }

    #[test]
    fn test_clear_history() {
        let (_temp_dir, storage) = create_test_storage();
        let rates = RateService::offline();
        let service = ConversionService::new(&storage, &rates);

        for amount in ["1", "2", "3"] {
            let request = ConversionRequest::parse("alice", amount, "USD", "INR").unwrap();
            service.convert(&request).unwrap();
        }
        let request = ConversionRequest::parse("bob", "1", "USD", "INR").unwrap();
        service.convert(&request).unwrap();

        let history = service.history("alice", 2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].amount, 3.0);

        assert_eq!(service.clear_history("alice").unwrap(), 3);
        assert!(service.history("alice", 10).unwrap().is_empty());
        assert_eq!(service.history("bob", 10).unwrap().len(), 1);
    }

    #[test]
    fn test_overflowing_result_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let rates = RateService::offline();
        let service = ConversionService::new(&storage, &rates);

        let request = ConversionRequest::new(
            "alice",
            Amount::new(1e306).unwrap(),
            CurrencyCode::USD,
            CurrencyCode::parse("KRW").unwrap(),
        );
        let err = service.convert(&request).unwrap_err();
        assert!(err.is_validation());
        assert!(service.history("alice", 10).unwrap().is_empty());

        assert!(spawn(rates.clone(), request).wait().unwrap_err().is_validation());
    }

    #[test]
    fn test_spawn_and_wait() {
        let request = ConversionRequest::parse("alice", "10", "USD", "JPY").unwrap();
        let handle = spawn(RateService::offline(), request.clone());
        assert_eq!(handle.request(), &request);

        let conversion = handle.wait().unwrap();
        assert!((conversion.result - 1100.0).abs() < 1e-9);
        assert!(conversion.id.is_none());
    }

    #[test]
    fn test_spawn_and_poll() {
        let request = ConversionRequest::parse("alice", "2", "USD", "GBP").unwrap();
        let mut handle = spawn(RateService::offline(), request);

        let deadline = Instant::now() + Duration::from_secs(5);
        let result = loop {
            if let Some(result) = handle.try_result() {
                break result;
            }
            assert!(Instant::now() < deadline, "worker did not finish");
            std::thread::sleep(Duration::from_millis(5));
        };

        assert!((result.unwrap().result - 1.46).abs() < 1e-9);
    }
}
