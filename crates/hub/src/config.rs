// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Configuration for the framehub coordinator.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "framehub", about = "Credential coordinator for embedded frame applications")]
pub struct HubConfig {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "FRAMEHUB_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 9900, env = "FRAMEHUB_PORT")]
    pub port: u16,

    /// Bearer token for the hub API. If unset, auth is disabled.
    #[arg(long, env = "FRAMEHUB_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Path to the frames configuration JSON file.
    #[arg(long, env = "FRAMEHUB_FRAMES_CONFIG")]
    pub frames_config: Option<PathBuf>,

    /// Login boundary the caller is directed to when unauthenticated.
    #[arg(long, default_value = "login/index.html", env = "FRAMEHUB_LOGIN_URL")]
    pub login_url: String,

    /// Externally reachable base URL, used as the callback target for
    /// change subscriptions. Defaults to `http://{host}:{port}`.
    #[arg(long, env = "FRAMEHUB_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// State directory override (credential persistence).
    #[arg(long, env = "FRAMEHUB_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
}

impl HubConfig {
    /// Resolve the state directory, falling back to the platform default.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(crate::credential::state_dir)
    }

    /// Base URL frames use to reach the hub.
    pub fn public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}
