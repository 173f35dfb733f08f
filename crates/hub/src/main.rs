// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing::error;

use framehub::config::HubConfig;

#[tokio::main]
async fn main() {
    // reqwest is built with `rustls-no-provider`; a crypto provider must be
    // installed before any Client is constructed.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = HubConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = framehub::run(config).await {
        error!("fatal: {e:#}");
        std::process::exit(1);
    }
}
