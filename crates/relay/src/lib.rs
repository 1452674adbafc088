// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert relay: line-oriented TCP collection point for client alerts with
//! directed replies.

pub mod config;
pub mod connection;
pub mod console;
pub mod error;
pub mod event;
pub mod registry;
pub mod server;

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::event::BroadcastSink;
use crate::server::RelayServer;

/// Run the relay server with the operator console until `quit` or EOF.
pub async fn run(config: RelayConfig) -> anyhow::Result<()> {
    let sink = Arc::new(BroadcastSink::new(256));
    let events = sink.subscribe();

    let server = Arc::new(RelayServer::new(sink));
    let addr = server.start(&config.host, config.port)?;
    tracing::info!("alert relay listening on {addr}");

    console::run(server, events).await
}
