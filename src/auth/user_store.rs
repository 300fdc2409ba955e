//! Credential Storage
//! Mission: Persist account records with hashed passwords in SQLite

use crate::auth::models::Account;
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

/// Credential store with SQLite backend.
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new credential store and initialize the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Look up an account by exact username.
    pub fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, username, password_hash, created_at
             FROM accounts WHERE username = ?1",
        )?;

        let account_result = stmt.query_row(params![username], |row| {
            let id: String = row.get(0)?;
            Ok(Account {
                id: Uuid::parse_str(&id).unwrap_or_default(),
                username: row.get(1)?,
                password_hash: row.get(2)?,
                created_at: row.get(3)?,
            })
        });

        match account_result {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify a username/password pair.
    ///
    /// Returns the matching account on success. Unknown username and wrong
    /// password both return `None` so callers cannot distinguish the cases.
    pub fn verify_password(&self, username: &str, password: &str) -> Result<Option<Account>> {
        match self.find_by_username(username)? {
            Some(account) => {
                let valid = verify(password, &account.password_hash)
                    .context("Failed to verify password")?;
                Ok(if valid { Some(account) } else { None })
            }
            None => Ok(None),
        }
    }

    /// Create a new account. The plaintext password is transformed through
    /// bcrypt before it touches the database and is never logged.
    ///
    /// Fails if the username already exists (UNIQUE constraint).
    pub fn create_account(&self, username: &str, password: &str) -> Result<Account> {
        let password_hash = hash(password, DEFAULT_COST).context("Failed to hash password")?;

        let account = Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO accounts (id, username, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                account.id.to_string(),
                account.username,
                account.password_hash,
                account.created_at,
            ],
        )
        .context("Failed to insert account")?;

        info!("Registered account: {}", account.username);

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_create_and_retrieve_account() {
        let (store, _temp) = create_test_store();

        let created = store.create_account("alice", "s3cret").unwrap();
        assert_eq!(created.username, "alice");
        assert_ne!(created.password_hash, "s3cret"); // never stored plaintext

        let found = store.find_by_username("alice").unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, created.id);
    }

    #[test]
    fn test_find_missing_account() {
        let (store, _temp) = create_test_store();

        assert!(store.find_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn test_password_verification() {
        let (store, _temp) = create_test_store();
        let created = store.create_account("alice", "s3cret").unwrap();

        // Correct password returns the account
        let verified = store.verify_password("alice", "s3cret").unwrap();
        assert_eq!(verified.unwrap().id, created.id);

        // Wrong password and unknown user are indistinguishable
        assert!(store.verify_password("alice", "wrong").unwrap().is_none());
        assert!(store.verify_password("nobody", "s3cret").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (store, _temp) = create_test_store();

        store.create_account("alice", "s3cret").unwrap();
        let result = store.create_account("alice", "other");
        assert!(result.is_err());
    }
}
