// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame capability contract.
//!
//! An embedded frame is an isolated application the hub can only reach
//! through this capability surface. Calls across the boundary are
//! fire-and-forget with local error containment: a failing call is an
//! `Err` the caller logs, never a crash.

pub mod client;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Readiness state of an embedded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    /// Registered, load event not yet seen.
    Loading,
    /// Loaded with the expected capability surface present.
    Ready,
    /// Loaded but the capability surface is missing — the embedded app
    /// failed to initialize. A later load event may recover it.
    Unavailable,
}

/// The control surface every embedded frame must expose.
#[async_trait]
pub trait FrameCapability: Send + Sync {
    /// Inject the current bearer credential into the frame.
    async fn set_bearer_token(&self, token: &str) -> anyhow::Result<()>;

    /// Ask the frame to re-fetch its own data.
    async fn refresh_data(&self) -> anyhow::Result<()>;

    /// Direct change notifications at `callback_url`. Only meaningful for
    /// frames that are change sources.
    async fn subscribe_changes(&self, callback_url: &str) -> anyhow::Result<()>;
}

/// Probes a frame for its capability surface after a load event.
///
/// Load completion and capability availability are not atomic — the embedded
/// app may still be initializing when the load event fires. The probe is the
/// explicit check that decides Ready vs Unavailable.
#[async_trait]
pub trait CapabilityProbe: Send + Sync {
    /// Returns the capability surface if the frame exposes the mandatory
    /// operations, `None` otherwise.
    async fn probe(&self) -> Option<Arc<dyn FrameCapability>>;
}

/// Operations a frame reports during the capability probe.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CapabilityManifest {
    #[serde(default)]
    pub set_bearer_token: bool,
    #[serde(default)]
    pub refresh_data: bool,
    /// Whether the frame emits change events (optional operation).
    #[serde(default)]
    pub change_events: bool,
}

impl CapabilityManifest {
    /// The two mandatory operations the hub requires before marking Ready.
    pub fn is_complete(&self) -> bool {
        self.set_bearer_token && self.refresh_data
    }
}

/// Static configuration for one embedded frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Stable frame identifier (e.g. "roles", "users").
    pub id: String,
    /// Base URL of the frame's capability surface.
    pub url: String,
    /// Bearer token for calls into this frame, if it requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Whether this frame emits change events the relay fans out.
    #[serde(default)]
    pub change_source: bool,
}

/// Top-level frames configuration loaded from `--frames-config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramesConfig {
    pub frames: Vec<FrameConfig>,
}

impl FramesConfig {
    /// Load the frames configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}
