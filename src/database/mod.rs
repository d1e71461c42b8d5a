// ABOUTME: SQLite database connection management and schema migrations
// ABOUTME: Owns the connection pool that backs the notification store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite-backed notification storage

/// Notification record operations
pub mod notifications;

use crate::config::environment::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to `database_url` and run migrations
    ///
    /// In-memory databases use a single long-lived connection, since every
    /// new connection would otherwise see an empty database. File databases
    /// are created along with their parent directory when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?;

        let pool = match &url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect(&url.to_connection_string())
                    .await?
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }

                let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
                    .create_if_missing(true);
                SqlitePoolOptions::new().connect_with(options).await?
            }
        };

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database connected");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_notifications().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    async fn migrate_notifications(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS notifications (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                user_id TEXT NOT NULL,
                order_id INTEGER NOT NULL DEFAULT 0,
                is_read INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create notifications table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_notifications_user_unread ON notifications(user_id, is_read)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create notifications index: {e}")))?;

        Ok(())
    }
}
