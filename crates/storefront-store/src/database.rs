//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation. The connection sits behind
//! a mutex: every helper holds the lock for its whole duration, so writes to
//! a table never interleave and multi-statement reads see one snapshot.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use directories::ProjectDirs;
use rusqlite::types::Type;
use rusqlite::Connection;
use rust_decimal::Decimal;
use storefront_shared::constants::DB_FILE_NAME;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Tables every ready database must contain.
const REQUIRED_TABLES: [&str; 3] = ["cart_items", "customers", "orders"];

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path()).finish()
    }
}

impl Database {
    /// Resolve the platform-appropriate database file path:
    /// - Linux:   `~/.local/share/storefront/store.db`
    /// - macOS:   `~/Library/Application Support/com.storefront.storefront/store.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\storefront\storefront\data\store.db`
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from("com", "storefront", "storefront").ok_or(StoreError::NoDataDir)?;
        Ok(project_dirs.data_dir().join(DB_FILE_NAME))
    }

    /// Open (or create) the default application database.
    pub fn open_default() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(&path)
    }

    /// Open the database at `path` when one is configured, otherwise at
    /// [`Database::default_path`].
    pub fn open_with(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open_at(path),
            None => Self::open_default(),
        }
    }

    /// Open (or create) a database at an explicit path, creating the parent
    /// directory if needed.
    pub fn open_at(path: &Path) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!(path = %path.display(), "opening database");

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.ensure_ready()?;
        Ok(db)
    }

    /// Bring the schema up to date and check that every table exists.
    ///
    /// Idempotent; safe to call on an already-initialised database.
    pub fn ensure_ready(&self) -> Result<()> {
        self.with_conn(|conn| {
            migrations::run_migrations(conn)?;

            for table in REQUIRED_TABLES {
                let present: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                    [table],
                    |row| row.get(0),
                )?;
                if !present {
                    return Err(StoreError::Migration(format!("missing table `{table}`")));
                }
            }
            Ok(())
        })
    }

    /// Run `f` with exclusive access to the connection.
    ///
    /// Callers should prefer the typed CRUD helpers, but direct access is
    /// occasionally needed for ad-hoc queries.
    pub fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut guard)
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .lock()
            .ok()
            .and_then(|conn| conn.path().filter(|p| !p.is_empty()).map(PathBuf::from))
    }
}

// ---------------------------------------------------------------------------
// Column codecs
// ---------------------------------------------------------------------------

/// Fixed-width RFC 3339 so that lexical order matches chronological order.
pub(crate) fn encode_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn decode_decimal(idx: usize, raw: &str) -> rusqlite::Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
