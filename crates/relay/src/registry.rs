// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared registry mapping live client keys to their output channels.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::{Mutex, RwLock};

/// Addressable output channel for one connected client.
///
/// Writes go through a per-connection mutex so concurrent replies to the
/// same client cannot interleave bytes on the stream.
#[derive(Clone)]
pub struct ClientHandle {
    /// Display name the client declared at handshake.
    pub name: String,
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl ClientHandle {
    pub fn new(name: String, writer: OwnedWriteHalf) -> Self {
        Self { name, writer: Arc::new(Mutex::new(writer)) }
    }

    /// Write one newline-terminated line to the client.
    pub async fn send_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await
    }
}

/// Concurrency-safe map from client key to [`ClientHandle`].
///
/// Shared by every connection handler and the reply path. An entry exists
/// exactly while its connection's handler is between handshake completion and
/// cleanup. Key reuse while the original connection is open cannot happen
/// with address+port keys; `insert` overwrites rather than guarding against
/// it.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    clients: Arc<RwLock<HashMap<String, ClientHandle>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, key: impl Into<String>, handle: ClientHandle) {
        self.clients.write().await.insert(key.into(), handle);
    }

    /// Remove an entry. Removing an absent key is a no-op, which matters when
    /// handler cleanup races a forced shutdown.
    pub async fn remove(&self, key: &str) {
        self.clients.write().await.remove(key);
    }

    /// Look up a client. Absence is an expected, recoverable outcome.
    pub async fn get(&self, key: &str) -> Option<ClientHandle> {
        self.clients.read().await.get(key).cloned()
    }

    /// Keys of all currently registered clients.
    pub async fn keys(&self) -> Vec<String> {
        self.clients.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
