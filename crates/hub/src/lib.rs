// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Framehub: coordinator for embedded frame applications.
//!
//! Distributes a single bearer credential to N isolated frames, re-arms
//! distribution on frame load/reload, and relays change events from source
//! frames into refresh requests for the others.

pub mod config;
pub mod coordinator;
pub mod credential;
pub mod error;
pub mod frame;
pub mod propagate;
pub mod registry;
pub mod relay;
pub mod test_support;
pub mod transport;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::HubConfig;
use crate::coordinator::{Coordinator, Startup};
use crate::credential::CredentialStore;
use crate::frame::FramesConfig;
use crate::transport::build_router;

/// Run the hub until shutdown.
///
/// With no persisted credential this logs the login boundary and returns
/// without serving — the page-level equivalent of redirecting to login.
pub async fn run(config: HubConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let shutdown = CancellationToken::new();

    let store = CredentialStore::open(config.state_dir());

    let frames = match config.frames_config {
        Some(ref path) => FramesConfig::load(path)?.frames,
        None => Vec::new(),
    };
    let frame_count = frames.len();

    let coordinator = Coordinator::new(config, store);
    match coordinator.startup(frames).await {
        Startup::RedirectLogin { login_url } => {
            tracing::info!(%login_url, "no bearer credential, redirecting to login boundary");
            return Ok(());
        }
        Startup::Ready => {}
    }

    tracing::info!("framehub listening on {addr} ({frame_count} frames registered)");

    let ctrl_c_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_shutdown.cancel();
        }
    });

    let router = build_router(coordinator);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown.cancelled_owned()).await?;

    Ok(())
}
