//! Sqlite-backed key-value storage.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::KeyValue;
use crate::error::{Result, StorageResultExt, WizardError};

const INIT_SQL: &str =
    "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)";
const GET_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const SET_SQL: &str =
    "INSERT INTO kv (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2";
const REMOVE_SQL: &str = "DELETE FROM kv WHERE key = ?1";

/// Durable key-value store over a single sqlite table.
pub struct SqliteKeyValue {
    connection: Mutex<Connection>,
}

impl SqliteKeyValue {
    /// Opens (and initializes) the database at the given path, creating
    /// parent directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| WizardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let connection =
            Connection::open(path).storage_context("Failed to open draft database")?;
        connection
            .execute(INIT_SQL, [])
            .storage_context("Failed to initialize draft schema")?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Opens the store at the default XDG data path.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_database_path()?)
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("crewline")
            .place_data_file("drafts.db")
            .map_err(|e| WizardError::XdgDirectory(e.to_string()))
    }

    fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValue for SqliteKeyValue {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection()
            .query_row(GET_SQL, params![key], |row| row.get(0))
            .optional()
            .storage_context("Failed to read key")
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.connection()
            .execute(SET_SQL, params![key, value])
            .map(|_| ())
            .storage_context("Failed to write key")
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.connection()
            .execute(REMOVE_SQL, params![key])
            .map(|_| ())
            .storage_context("Failed to remove key")
    }
}
