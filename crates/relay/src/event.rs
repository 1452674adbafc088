// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert event model and the sink interface the presentation layer plugs in.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// One alert flowing from the network core to the presentation layer:
/// either an inbound client message or an outgoing reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Epoch milliseconds captured at receipt.
    pub timestamp: u64,
    /// Display name declared at handshake; `"Unknown"` if the client sent none.
    pub sender: String,
    /// Message body, possibly empty.
    pub message: String,
    /// Key of the originating connection; empty for server-originated notices.
    pub client_key: String,
    /// Read/unread marker. Owned by the presentation layer; the core sets it
    /// false at construction and never touches it again.
    #[serde(default)]
    pub read: bool,
}

impl AlertEvent {
    /// Event for an inbound client line.
    pub fn new(
        sender: impl Into<String>,
        message: impl Into<String>,
        client_key: impl Into<String>,
    ) -> Self {
        let sender = sender.into();
        Self {
            timestamp: epoch_ms(),
            sender: if sender.is_empty() { "Unknown".to_owned() } else { sender },
            message: message.into(),
            client_key: client_key.into(),
            read: false,
        }
    }

    /// Event synthesized for a successfully delivered reply, so replies show
    /// up in the same stream as inbound alerts.
    pub fn reply(
        original_sender: &str,
        text: impl Into<String>,
        client_key: impl Into<String>,
    ) -> Self {
        Self::new(format!("Server (reply to {original_sender})"), text, client_key)
    }

    /// Server-originated notice (e.g. a non-fatal accept error). Carries no
    /// client key.
    pub fn server_notice(message: impl Into<String>) -> Self {
        Self::new("Server", message, "")
    }
}

/// Return current epoch millis.
pub fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// -- Sink --------------------------------------------------------------------

/// Destination for alert events, supplied by the presentation layer.
///
/// Invoked inline from whichever task produced the event — for inbound alerts
/// that is the originating connection's read loop, so a slow sink stalls that
/// one connection's reads and nothing else. A sink that cannot afford to
/// block should hand the event off to its own queue.
pub trait AlertSink: Send + Sync + 'static {
    fn on_alert(&self, event: AlertEvent);
}

impl<F> AlertSink for F
where
    F: Fn(AlertEvent) + Send + Sync + 'static,
{
    fn on_alert(&self, event: AlertEvent) {
        self(event)
    }
}

/// Stock sink that fans events out over a broadcast channel.
pub struct BroadcastSink {
    event_tx: broadcast::Sender<AlertEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);
        Self { event_tx }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.event_tx.subscribe()
    }
}

impl AlertSink for BroadcastSink {
    fn on_alert(&self, event: AlertEvent) {
        // Send only fails with no subscribers, which is fine to drop.
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
