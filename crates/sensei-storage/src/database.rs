// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use sensei_core::SenseiError;
use tracing::debug;

/// Convert a tokio-rusqlite error into SenseiError::Storage.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> SenseiError {
    SenseiError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database.
///
/// Cloning is cheap: all clones share the same background connection thread,
/// so queries issued through any clone are serialized.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at the given path.
    ///
    /// Enables WAL journaling and foreign keys, then runs any pending
    /// embedded migrations before returning.
    pub async fn open(path: &str) -> Result<Self, SenseiError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| SenseiError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e| SenseiError::Storage {
                source: Box::new(e),
            })?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), SenseiError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(|e| SenseiError::Storage {
            source: Box::new(e),
        })?;
        debug!("database closed");
        Ok(())
    }
}
