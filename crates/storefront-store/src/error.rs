use thiserror::Error;

/// Everything that can go wrong talking to the local database.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No home/data directory could be resolved for this platform.
    #[error("Could not determine application data directory")]
    NoDataDir,

    #[error("Database path is empty")]
    EmptyPath,

    /// Creating the directory that holds the database file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup by id matched no row.
    #[error("Record not found")]
    NotFound,

    /// Schema upgrade failed or left a table missing.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Another thread panicked while holding the connection.
    #[error("Database lock poisoned")]
    LockPoisoned,

    /// A cart total does not fit in its numeric type.
    #[error("Cart totals out of range")]
    Overflow,

    /// Cart quantities start at one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}

pub type Result<T> = std::result::Result<T, StoreError>;
