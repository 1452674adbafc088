// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-connection lifecycle: handshake, read loop, cleanup.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use crate::event::{AlertEvent, AlertSink};
use crate::registry::{ClientHandle, ClientRegistry};

/// Prefix on every server-originated reply line, so clients can tell replies
/// apart from other traffic.
pub const REPLY_PREFIX: &str = "Server Reply: ";

/// Drive one accepted connection from handshake to cleanup.
///
/// The first line a client sends is its display name. Every later line is an
/// alert, emitted to the sink in arrival order. EOF, a read error, or
/// shutdown cancellation ends the connection; on every exit path after
/// registration the registry entry is removed exactly once. A connection that
/// dies before sending its name line is discarded without ever registering.
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    registry: ClientRegistry,
    sink: Arc<dyn AlertSink>,
    shutdown: CancellationToken,
) {
    let (read_half, write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Handshake: exactly one name line before any routing.
    let name = tokio::select! {
        _ = shutdown.cancelled() => return,
        line = lines.next_line() => match line {
            Ok(Some(line)) => {
                let name = line.trim();
                if name.is_empty() { "Unknown".to_owned() } else { name.to_owned() }
            }
            Ok(None) => return,
            Err(e) => {
                tracing::debug!(peer = %peer, err = %e, "handshake read failed");
                return;
            }
        },
    };

    let key = client_key(&peer);
    registry.insert(key.clone(), ClientHandle::new(name.clone(), write_half)).await;
    tracing::info!(client = %key, name = %name, "client registered");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    sink.on_alert(AlertEvent::new(&name, message_body(&line), &key));
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(client = %key, err = %e, "read failed");
                    break;
                }
            },
        }
    }

    // Dropping the registry entry drops the write half, closing the socket
    // once any in-flight reply clone is gone.
    registry.remove(&key).await;
    tracing::info!(client = %key, "client disconnected");
}

/// Key identifying one live connection: remote address and port.
pub fn client_key(peer: &SocketAddr) -> String {
    format!("{}:{}", peer.ip(), peer.port())
}

/// Extract the message body from a received line.
///
/// Legacy clients prefix every message with their name and a tab; the prefix
/// is discarded because the handshake-declared name is authoritative.
pub fn message_body(line: &str) -> &str {
    match line.split_once('\t') {
        Some((_, rest)) => rest.trim(),
        None => line.trim(),
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
