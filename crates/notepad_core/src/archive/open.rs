//! Connection bootstrap utilities for the SQLite archive.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by archive behavior.
//! - Ensure the archive schema exists before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have the full schema in place.

use super::ArchiveResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

// Schema is created idempotently on every open; the archive carries no
// version marker and no migration history.
const ARCHIVE_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id      INTEGER PRIMARY KEY,
    subject TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS bullet_points (
    note_id  INTEGER NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    text     TEXT NOT NULL,
    PRIMARY KEY (note_id, position)
);

CREATE TABLE IF NOT EXISTS store_meta (
    key   TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);
";

/// Opens a SQLite archive file and ensures its schema.
///
/// # Side effects
/// - Performs connection bootstrap and schema setup.
/// - Emits `archive_open` logging events with duration and status.
pub fn open_archive(path: impl AsRef<Path>) -> ArchiveResult<Connection> {
    let started_at = Instant::now();
    info!("event=archive_open module=archive status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=archive_open module=archive status=error mode=file duration_ms={} error_code=archive_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=archive_open module=archive status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=archive_open module=archive status=error mode=file duration_ms={} error_code=archive_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory SQLite archive and ensures its schema.
///
/// # Side effects
/// - Performs connection bootstrap and schema setup.
/// - Emits `archive_open` logging events with duration and status.
pub fn open_archive_in_memory() -> ArchiveResult<Connection> {
    let started_at = Instant::now();
    info!("event=archive_open module=archive status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=archive_open module=archive status=error mode=memory duration_ms={} error_code=archive_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=archive_open module=archive status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=archive_open module=archive status=error mode=memory duration_ms={} error_code=archive_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> ArchiveResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(ARCHIVE_SCHEMA_SQL)?;
    Ok(())
}
