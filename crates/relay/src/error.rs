// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Failure to start the listener. Never affects existing connections.
#[derive(Debug)]
pub enum BindError {
    /// Port outside the usable range (only 0 is unrepresentable otherwise).
    InvalidPort(u16),
    /// `start` called while the listener is already running.
    AlreadyRunning,
    /// The OS refused the bind, typically because the port is in use.
    Bind(std::io::Error),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort(port) => write!(f, "invalid port {port}"),
            Self::AlreadyRunning => f.write_str("listener already running"),
            Self::Bind(e) => write!(f, "failed to bind: {e}"),
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure to deliver a directed reply.
#[derive(Debug)]
pub enum ReplyError {
    /// The target key is not registered. An expected outcome — the client
    /// may have disconnected between the alert and the operator's reply.
    ClientUnavailable,
    /// The write to the target's socket failed. The target's own handler
    /// detects the broken stream on its next read and cleans up; no retry.
    Delivery(std::io::Error),
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientUnavailable => f.write_str("client not available"),
            Self::Delivery(e) => write!(f, "reply delivery failed: {e}"),
        }
    }
}

impl std::error::Error for ReplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Delivery(e) => Some(e),
            Self::ClientUnavailable => None,
        }
    }
}
