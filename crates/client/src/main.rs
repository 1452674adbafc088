// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line client for the alert relay: handshake with a display name, send
//! alert lines from stdin, print directed replies from the server.

mod counter;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[derive(Debug, Clone, Parser)]
#[command(name = "alert-relay-client", about = "Send alerts to a relay server")]
struct ClientConfig {
    /// Relay server host.
    #[arg(long, default_value = "127.0.0.1", env = "ALERT_RELAY_HOST")]
    host: String,

    /// Relay server port.
    #[arg(long, default_value_t = 5050, env = "ALERT_RELAY_PORT")]
    port: u16,

    /// Display name sent at handshake. Defaults to a sequential ClientN name.
    #[arg(long, env = "ALERT_RELAY_NAME")]
    name: Option<String>,

    /// File holding the sequential-name counter.
    #[arg(long, default_value = "client_counter.txt")]
    counter_file: PathBuf,
}

#[tokio::main]
async fn main() {
    let config = ClientConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(config).await {
        tracing::error!("fatal: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let name = match config.name {
        Some(name) => name,
        None => {
            let number = counter::next_client_number(&config.counter_file)
                .context("update client counter file")?;
            format!("Client{number}")
        }
    };

    let stream = TcpStream::connect((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("connect to {}:{}", config.host, config.port))?;
    let (read_half, mut write_half) = stream.into_split();

    // First line is the display name.
    write_half.write_all(format!("{}\n", name.trim()).as_bytes()).await?;
    tracing::info!(name = %name, "connected to {}:{}", config.host, config.port);

    // Print everything the server sends until the stream closes.
    let mut reader = tokio::spawn(async move {
        let mut lines = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            println!("Server: {line}");
        }
        tracing::info!("server closed the connection");
    });

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = &mut reader => break,
            line = stdin.next_line() => match line? {
                Some(line) => {
                    let message = line.trim();
                    if message.is_empty() {
                        continue;
                    }
                    write_half.write_all(format!("{message}\n").as_bytes()).await?;
                }
                None => break,
            },
        }
    }

    Ok(())
}
