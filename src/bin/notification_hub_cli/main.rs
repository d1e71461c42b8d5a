// ABOUTME: Notification hub CLI for generating fake notifications
// ABOUTME: Inserts fake rows straight into the store or posts them through the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Insert 10 fake notifications for random users directly into the database
//! notification-hub-cli fake --count 10
//!
//! # Insert 5 fake notifications for one user
//! notification-hub-cli fake --count 5 --user-id 8a3c5a9e-0d6f-4f45-9a53-0f0c3f1f1b2a
//!
//! # Post 100 fake notifications through a running server so live counters move
//! notification-hub-cli seed --count 100 --base-url http://127.0.0.1:8000
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use notification_hub::{
    constants::database::DEFAULT_DATABASE_URL, database::Database, errors::AppResult,
};
use std::env;
use tracing::info;
use uuid::Uuid;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "notification-hub-cli",
    about = "Notification Hub CLI",
    long_about = "Generates fake notifications, either directly in the database or through the HTTP API."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Insert fake notifications directly into the database (no live updates)
    Fake {
        /// Number of notifications to create
        #[arg(long, short = 'n', default_value = "10")]
        count: u32,

        /// Recipient for every notification (random per notification if omitted)
        #[arg(long)]
        user_id: Option<Uuid>,

        /// Database URL override
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Post fake notifications through a running server
    Seed {
        /// Number of notifications to create
        #[arg(long, short = 'n', default_value = "100")]
        count: u32,

        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        base_url: String,

        /// Recipient for every notification (random per notification if omitted)
        #[arg(long)]
        user_id: Option<Uuid>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("Notification Hub CLI");

    match cli.command {
        Command::Fake {
            count,
            user_id,
            database_url,
        } => {
            let database_url = database_url
                .or_else(|| env::var("DATABASE_URL").ok())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

            info!("Connecting to database: {}", database_url);
            let database = Database::new(&database_url).await?;

            commands::fake::run(&database, count, user_id).await?;
        }
        Command::Seed {
            count,
            base_url,
            user_id,
        } => {
            commands::seed::run(&base_url, count, user_id).await?;
        }
    }

    Ok(())
}
