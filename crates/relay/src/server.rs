// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listening loop and directed-reply routing.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::connection::{handle_connection, REPLY_PREFIX};
use crate::error::{BindError, ReplyError};
use crate::event::{AlertEvent, AlertSink};
use crate::registry::ClientRegistry;

/// Handle for one active listening run.
struct Running {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
}

/// The relay server: accepts connections, routes replies, and forwards every
/// alert to the supplied sink.
///
/// `start` and `stop` may be called repeatedly; a stopped server can be
/// started again on the same or a different port.
pub struct RelayServer {
    registry: ClientRegistry,
    sink: Arc<dyn AlertSink>,
    running: Mutex<Option<Running>>,
}

impl RelayServer {
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self { registry: ClientRegistry::new(), sink, running: Mutex::new(None) }
    }

    /// Bind and begin accepting connections. Returns the bound address.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, host: &str, port: u16) -> Result<SocketAddr, BindError> {
        if port == 0 {
            return Err(BindError::InvalidPort(port));
        }

        let mut running = self.running.lock();
        if running.is_some() {
            return Err(BindError::AlreadyRunning);
        }

        // Bind synchronously so the whole start sequence happens under the
        // run-slot lock.
        let std_listener = std::net::TcpListener::bind((host, port)).map_err(BindError::Bind)?;
        std_listener.set_nonblocking(true).map_err(BindError::Bind)?;
        let listener = TcpListener::from_std(std_listener).map_err(BindError::Bind)?;
        let local_addr = listener.local_addr().map_err(BindError::Bind)?;

        let shutdown = CancellationToken::new();
        tokio::spawn(accept_loop(
            listener,
            self.registry.clone(),
            Arc::clone(&self.sink),
            shutdown.clone(),
        ));

        *running = Some(Running { local_addr, shutdown });
        tracing::info!(addr = %local_addr, "listener started");
        Ok(local_addr)
    }

    /// Stop accepting and force-close every live connection. Idempotent;
    /// a no-op when not running.
    pub fn stop(&self) {
        if let Some(run) = self.running.lock().take() {
            run.shutdown.cancel();
            tracing::info!(addr = %run.local_addr, "listener stopped");
        }
    }

    /// Send a directed reply to a registered client.
    ///
    /// Empty (after trimming) text is a successful no-op. On delivery the
    /// reply is echoed into the event stream as a synthesized [`AlertEvent`].
    pub async fn reply(&self, client_key: &str, text: &str) -> Result<(), ReplyError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let handle =
            self.registry.get(client_key).await.ok_or(ReplyError::ClientUnavailable)?;
        handle
            .send_line(&format!("{REPLY_PREFIX}{text}"))
            .await
            .map_err(ReplyError::Delivery)?;

        self.sink.on_alert(AlertEvent::reply(&handle.name, text, client_key));
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Address of the active listener, if any.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.lock().as_ref().map(|r| r.local_addr)
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }
}

/// Accept until cancelled, spawning one handler task per connection.
async fn accept_loop(
    listener: TcpListener,
    registry: ClientRegistry,
    sink: Arc<dyn AlertSink>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tokio::spawn(handle_connection(
                        stream,
                        peer,
                        registry.clone(),
                        Arc::clone(&sink),
                        shutdown.clone(),
                    ));
                }
                Err(e) => {
                    // Non-fatal while running; keep accepting.
                    tracing::warn!(err = %e, "accept failed");
                    sink.on_alert(AlertEvent::server_notice(format!("accept error: {e}")));
                }
            },
        }
    }
}
