// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Configuration for the relay server binary.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "alert-relay", about = "Alert collection point with directed replies")]
pub struct RelayConfig {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "ALERT_RELAY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 5050, env = "ALERT_RELAY_PORT")]
    pub port: u16,
}
