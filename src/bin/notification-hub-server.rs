// ABOUTME: Server binary for the notification hub HTTP and SSE service
// ABOUTME: Loads configuration, opens the database, and serves until Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Notification Hub Server Binary

use anyhow::Result;
use clap::Parser;
use notification_hub::{
    config::environment::ServerConfig,
    database::Database,
    logging,
    resources::ServerResources,
    server::{shutdown_signal, NotificationHubServer},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "notification-hub-server")]
#[command(about = "Notification Hub - per-user notifications with live unread counts")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url =
            notification_hub::config::DatabaseUrl::parse_url(database_url)?;
    }

    logging::init_from_env()?;

    info!("Starting notification hub");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    let resources = Arc::new(ServerResources::new(Arc::new(database), Arc::new(config)));

    if let Err(e) = NotificationHubServer::new(resources)
        .run(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
