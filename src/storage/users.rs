//! User credential repository

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::error::{FxError, FxResult};

/// A stored credential row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub salt: String,
}

/// Access to the `users` table
pub struct UserRepository<'a> {
    conn: &'a Connection,
}

impl<'a> UserRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new user, returning its row id
    ///
    /// A taken username surfaces as [`FxError::Duplicate`], relying on the
    /// table's UNIQUE constraint rather than a separate lookup.
    pub fn insert(&self, username: &str, password_hash: &str, salt: &str) -> FxResult<i64> {
        let result = self.conn.execute(
            "INSERT INTO users (username, password_hash, salt) VALUES (?1, ?2, ?3)",
            params![username, password_hash, salt],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(FxError::user_exists(username))
            }
            Err(e) => Err(FxError::Database(format!("Failed to insert user: {}", e))),
        }
    }

    /// Look up the hash and salt for a username
    pub fn get_credentials(&self, username: &str) -> FxResult<Option<StoredCredentials>> {
        self.conn
            .query_row(
                "SELECT id, username, password_hash, salt FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(StoredCredentials {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                        salt: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| FxError::Database(format!("Failed to query user: {}", e)))
    }

    pub fn exists(&self, username: &str) -> FxResult<bool> {
        Ok(self.get_credentials(username)?.is_some())
    }

    pub fn count(&self) -> FxResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete a user, returning whether a row was removed
    pub fn delete(&self, username: &str) -> FxResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE username = ?1", params![username])?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Database;

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        let id = users.insert("alice", "h1", "s1").unwrap();
        let creds = users.get_credentials("alice").unwrap().unwrap();

        assert_eq!(creds.id, id);
        assert_eq!(creds.password_hash, "h1");
        assert_eq!(creds.salt, "s1");
        assert!(users.get_credentials("bob").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        users.insert("alice", "h1", "s1").unwrap();
        let err = users.insert("alice", "h2", "s2").unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(users.count().unwrap(), 1);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        users.insert("alice", "h", "s").unwrap();
        users.insert("Alice", "h", "s").unwrap();
        assert_eq!(users.count().unwrap(), 2);
        assert!(users.exists("Alice").unwrap());
        assert!(!users.exists("ALICE").unwrap());
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        let users = db.users();

        users.insert("alice", "h1", "s1").unwrap();
        assert!(users.delete("alice").unwrap());
        assert!(!users.delete("alice").unwrap());
        assert_eq!(users.count().unwrap(), 0);
    }
}
