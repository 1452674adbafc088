// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator console for the relay binary.
//!
//! Prints each alert as it arrives and accepts commands on stdin:
//! `reply <client-key> <text>`, `list`, `quit`. The console owns all
//! presentation state; the core only feeds it events.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use crate::event::AlertEvent;
use crate::server::RelayServer;

/// Run the console loop until `quit` or stdin EOF.
pub async fn run(
    server: Arc<RelayServer>,
    mut events: broadcast::Receiver<AlertEvent>,
) -> anyhow::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => println!("{}", render(&event)),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(dropped = n, "console lagged behind event stream");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            line = stdin.next_line() => match line? {
                Some(line) => {
                    if !dispatch(&server, line.trim()).await {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    server.stop();
    Ok(())
}

/// Handle one operator command. Returns false when the console should exit.
async fn dispatch(server: &RelayServer, line: &str) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "quit" | "exit" => return false,
        "list" => {
            let keys = server.registry().keys().await;
            if keys.is_empty() {
                println!("no clients connected");
            } else {
                for key in keys {
                    println!("  {key}");
                }
            }
        }
        "reply" => match rest.split_once(' ') {
            Some((key, text)) => match server.reply(key, text).await {
                Ok(()) => {}
                Err(e) => println!("reply failed: {e}"),
            },
            None => println!("usage: reply <client-key> <text>"),
        },
        _ => println!("commands: reply <client-key> <text> | list | quit"),
    }
    true
}

/// One-line rendering of an alert, unread-dot style.
fn render(event: &AlertEvent) -> String {
    let marker = if event.read { "   " } else { "\u{25cf} " };
    let message = if event.message.chars().count() > 50 {
        let head: String = event.message.chars().take(50).collect();
        format!("{head}...")
    } else {
        event.message.clone()
    };
    if event.client_key.is_empty() {
        format!("{marker}[{}] {message}", event.sender)
    } else {
        format!("{marker}[{}] {message}  <{}>", event.sender, event.client_key)
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
