// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level coordinator: wires the credential store, frame registry,
//! propagation, and change relay together, and exposes the external
//! capability surface consumed by the transport layer.

use std::sync::Arc;

use crate::config::HubConfig;
use crate::credential::CredentialStore;
use crate::error::HubError;
use crate::frame::client::HttpProbe;
use crate::frame::{FrameConfig, Readiness};
use crate::propagate::Propagator;
use crate::registry::FrameRegistry;
use crate::relay::ChangeRelay;

/// Outcome of the startup credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// No persisted credential: the caller must navigate to the login
    /// boundary. No frame wiring is performed — this is a terminal state
    /// for the process instance.
    RedirectLogin { login_url: String },
    /// Credential present, frames registered and watchers armed.
    Ready,
}

pub struct Coordinator {
    pub config: HubConfig,
    pub store: CredentialStore,
    pub registry: Arc<FrameRegistry>,
    pub propagator: Propagator,
    pub relay: ChangeRelay,
}

impl Coordinator {
    pub fn new(config: HubConfig, store: CredentialStore) -> Arc<Self> {
        let registry = Arc::new(FrameRegistry::new());
        let propagator = Propagator::new(Arc::clone(&registry));
        let relay = ChangeRelay::new(Arc::clone(&registry));
        Arc::new(Self { config, store, registry, propagator, relay })
    }

    /// Check the credential and, when authenticated, register the configured
    /// frames as Loading. With no credential, nothing is initialized.
    pub async fn startup(&self, frames: Vec<FrameConfig>) -> Startup {
        if self.store.get().await.is_none() {
            return Startup::RedirectLogin { login_url: self.config.login_url.clone() };
        }
        for frame in frames {
            let probe = Arc::new(HttpProbe::new(frame.url.clone(), frame.auth_token.clone()));
            self.registry.register(frame.id, frame.url, frame.change_source, probe).await;
        }
        Startup::Ready
    }

    /// Handle a frame load event.
    ///
    /// Probes the frame; on Ready, pushes the current credential and
    /// requests an initial refresh, in that order, gated on a credential
    /// being set. Change sources are subscribed regardless of the
    /// credential, so a later `set` still reaches re-armed relays.
    pub async fn frame_loaded(&self, id: &str) -> Result<Readiness, HubError> {
        let readiness = self.registry.on_load(id).await?;
        if readiness != Readiness::Ready {
            tracing::warn!(frame = %id, "frame loaded without capability surface, marked unavailable");
            return Ok(readiness);
        }
        tracing::info!(frame = %id, "frame ready");

        if let Some(token) = self.store.get().await {
            self.propagator.push_to(id, &token).await?;
            self.propagator.refresh(id).await?;
        }

        let snapshot = self.registry.get(id).await?;
        if snapshot.change_source {
            if let Some(cap) = self.registry.capability(id).await? {
                let callback_url =
                    format!("{}/api/v1/frames/{}/changed", self.config.public_url(), id);
                if let Err(e) = cap.subscribe_changes(&callback_url).await {
                    tracing::warn!(frame = %id, err = %e, "change subscription failed");
                } else {
                    self.relay.subscribe(id).await;
                }
            }
        }
        Ok(readiness)
    }

    /// Handle a change event from a frame.
    pub async fn frame_changed(
        &self,
        id: &str,
        payload: &serde_json::Value,
    ) -> Result<usize, HubError> {
        self.relay.on_change(id, payload).await
    }

    /// Store a new credential and propagate it to every Ready frame.
    pub async fn set_bearer_token(&self, token: String) {
        self.store.set(token.clone()).await;
        self.propagator.push_to_all(&token).await;
    }

    /// Clear the credential without propagating — callers are expected to
    /// navigate away.
    pub async fn clear_token(&self) {
        self.store.clear().await;
    }

    /// Current credential, if any.
    pub async fn token(&self) -> Option<String> {
        self.store.get().await
    }

    /// Request a refresh from every Ready frame.
    pub async fn refresh_all(&self) {
        self.propagator.refresh_all().await;
    }

    /// Logout: clear the credential and the remembered-user marker, and
    /// return the login boundary for the caller-driven navigation.
    pub async fn logout(&self) -> String {
        self.store.logout().await;
        self.config.login_url.clone()
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
