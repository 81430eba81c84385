// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

mod events;

use std::error::Error;
use std::path::PathBuf;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub(crate) use events::{EventRecord, Events};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS events (
    uid         TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    location    TEXT NOT NULL,
    category    TEXT NOT NULL,
    all_day     INTEGER NOT NULL,
    start_at    TEXT NOT NULL,
    end_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_start_at ON events (start_at);
";

#[derive(Debug, Clone)]
pub(crate) struct LocalDb {
    pool: SqlitePool,

    pub events: Events,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `state_dir` is `None`, it opens an in-memory database.
    pub async fn open(state_dir: &Option<PathBuf>) -> Result<Self, Box<dyn Error>> {
        let options = match state_dir {
            Some(dir) => {
                const NAME: &str = "slate.db";

                tracing::info!(path = %dir.display(), "connecting to SQLite database");
                let dir = dir.to_str().ok_or("Invalid path encoding")?;
                SqliteConnectOptions::new()
                    .filename(format!("{dir}/{NAME}"))
                    .create_if_missing(true)
            }
            None => {
                tracing::info!("connecting to in-memory SQLite database");
                SqliteConnectOptions::new().in_memory(true)
            }
        };

        // An in-memory SQLite database is private to its connection, so the
        // pool must hold exactly one connection and never recycle it.
        let mut pool_options = SqlitePoolOptions::new();
        if state_dir.is_none() {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| format!("Failed to create schema: {e}"))?;

        let events = Events::new(pool.clone());
        Ok(LocalDb { pool, events })
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}
