//! Conversion history repository

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::error::FxResult;
use crate::models::{Conversion, CurrencyCode, RateSource};

/// Access to the `conversions` table
pub struct HistoryRepository<'a> {
    conn: &'a Connection,
}

fn text_error(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn row_to_conversion(row: &Row<'_>) -> rusqlite::Result<Conversion> {
    let from: String = row.get(2)?;
    let to: String = row.get(3)?;
    let source: String = row.get(7)?;
    let created_at: String = row.get(8)?;

    Ok(Conversion {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        from: CurrencyCode::parse(&from).map_err(|e| text_error(2, e))?,
        to: CurrencyCode::parse(&to).map_err(|e| text_error(3, e))?,
        amount: row.get(4)?,
        rate: row.get(5)?,
        result: row.get(6)?,
        source: source.parse::<RateSource>().map_err(|e| text_error(7, e))?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| text_error(8, e))?
            .with_timezone(&Utc),
    })
}

impl<'a> HistoryRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Store a conversion and return its row id
    pub fn record(&self, conversion: &Conversion) -> FxResult<i64> {
        self.conn.execute(
            "INSERT INTO conversions
                (username, from_currency, to_currency, amount, rate, result, source, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                conversion.username,
                conversion.from.as_str(),
                conversion.to.as_str(),
                conversion.amount,
                conversion.rate,
                conversion.result,
                conversion.source.as_str(),
                conversion.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent conversions for a user, newest first
    pub fn recent(&self, username: &str, limit: usize) -> FxResult<Vec<Conversion>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, from_currency, to_currency, amount, rate, result, source, created_at
             FROM conversions
             WHERE username = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;

        let rows = stmt
            .query_map(params![username, limit as i64], row_to_conversion)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count(&self, username: &str) -> FxResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM conversions WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Delete a user's history, returning the number of rows removed
    pub fn clear(&self, username: &str) -> FxResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM conversions WHERE username = ?1",
            params![username],
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExchangeRate};
    use crate::storage::Database;

    fn conversion(user: &str, amount: &str, to: &str, rate: f64) -> Conversion {
        let rate = ExchangeRate::new(
            CurrencyCode::USD,
            CurrencyCode::parse(to).unwrap(),
            rate,
            RateSource::Live,
        );
        Conversion::new(user, Amount::parse(amount).unwrap(), &rate)
    }

    #[test]
    fn test_record_and_recent() {
        let db = Database::open_in_memory().unwrap();
        let history = db.history();

        history.record(&conversion("alice", "10", "EUR", 0.9)).unwrap();
        history.record(&conversion("alice", "20", "GBP", 0.8)).unwrap();
        history.record(&conversion("bob", "30", "JPY", 150.0)).unwrap();

        let recent = history.recent("alice", 10).unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first
        assert_eq!(recent[0].to.as_str(), "GBP");
        assert_eq!(recent[1].to.as_str(), "EUR");
        assert!(recent[0].id.is_some());
        assert_eq!(recent[1].source, RateSource::Live);
        assert!((recent[1].result - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_respects_limit() {
        let db = Database::open_in_memory().unwrap();
        let history = db.history();

        for i in 1..=5 {
            history
                .record(&conversion("alice", &i.to_string(), "EUR", 0.9))
                .unwrap();
        }

        let recent = history.recent("alice", 3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].amount, 5.0);
        assert_eq!(history.count("alice").unwrap(), 5);
    }

    #[test]
    fn test_clear_only_affects_user() {
        let db = Database::open_in_memory().unwrap();
        let history = db.history();

        history.record(&conversion("alice", "1", "EUR", 0.9)).unwrap();
        history.record(&conversion("bob", "1", "EUR", 0.9)).unwrap();

        assert_eq!(history.clear("alice").unwrap(), 1);
        assert_eq!(history.count("alice").unwrap(), 0);
        assert_eq!(history.count("bob").unwrap(), 1);
    }
}
