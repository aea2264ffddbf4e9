//! Schema registry for the `authors` and `posts` tables.
//!
//! # Responsibility
//! - Own the ordered list of schema steps for the blog store.
//! - Bring a connection up to the latest step in one transaction.
//!
//! # Invariants
//! - Step versions increase strictly; the applied one is kept in
//!   `PRAGMA user_version`.
//! - A database written by a newer binary is never touched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the newest schema version this build can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Applies every schema step newer than the connection's `user_version`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > current) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current, latest
    );
    Ok(())
}

/// Reads `PRAGMA user_version` from `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
