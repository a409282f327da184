//! Schema migrations, tracked through the `user_version` pragma.
//!
//! Each step runs in its own transaction together with the version bump, so
//! an interrupted upgrade leaves the schema at the last completed version.

pub mod v001_initial;

use rusqlite::{Connection, TransactionBehavior};

use crate::error::{Result, StoreError};

type Step = fn(&Connection) -> rusqlite::Result<()>;

/// Ordered list of `(version, name, step)`. Append only.
const MIGRATIONS: &[(u32, &str, Step)] = &[(1, "v001_initial", v001_initial::up)];

/// Bring the schema up to the newest version. Does nothing when already there.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(StoreError::Migration(format!(
            "database schema v{current} is newer than this build (v{latest})"
        )));
    }

    for &(version, name, step) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        tracing::info!(version, name, "applying migration");
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        step(&tx).map_err(|e| StoreError::Migration(format!("{name}: {e}")))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
    }

    tracing::debug!(schema_version = latest, "schema up to date");
    Ok(())
}

fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(v, _, _)| *v)
}
