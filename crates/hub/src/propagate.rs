// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential propagation: pushes the current credential into ready frames.
//!
//! Push-based by design — frames never read the credential themselves, so
//! they stay agnostic of the storage mechanism. A not-Ready target is a
//! benign no-op: readiness races between "credential set" and "frame loaded"
//! are expected, and the credential is pushed at whichever event occurs
//! later. Capability call failures are caught and logged here, never raised.

use std::sync::Arc;

use crate::error::HubError;
use crate::frame::Readiness;
use crate::registry::FrameRegistry;

/// Pushes credentials and refresh requests into frames through the registry.
pub struct Propagator {
    registry: Arc<FrameRegistry>,
}

impl Propagator {
    pub fn new(registry: Arc<FrameRegistry>) -> Self {
        Self { registry }
    }

    /// Push `token` into one frame. Requires the target to be Ready;
    /// otherwise skips without error. An id that was never registered is a
    /// wiring bug and fails loudly.
    pub async fn push_to(&self, id: &str, token: &str) -> Result<(), HubError> {
        let snapshot = self.registry.get(id).await?;
        if snapshot.readiness != Readiness::Ready {
            tracing::debug!(frame = %id, readiness = ?snapshot.readiness, "skipping credential push, frame not ready");
            return Ok(());
        }
        if let Some(cap) = self.registry.capability(id).await? {
            if let Err(e) = cap.set_bearer_token(token).await {
                tracing::warn!(frame = %id, err = %e, "credential push failed");
            }
        }
        Ok(())
    }

    /// Push `token` into every registered frame, in registration order.
    /// Not-Ready frames are skipped.
    pub async fn push_to_all(&self, token: &str) {
        for (id, cap) in self.registry.ready_frames().await {
            if let Err(e) = cap.set_bearer_token(token).await {
                tracing::warn!(frame = %id, err = %e, "credential push failed");
            }
        }
    }

    /// Request a data refresh from one frame, gated on readiness the same
    /// way as [`push_to`](Self::push_to).
    pub async fn refresh(&self, id: &str) -> Result<(), HubError> {
        let snapshot = self.registry.get(id).await?;
        if snapshot.readiness != Readiness::Ready {
            tracing::debug!(frame = %id, readiness = ?snapshot.readiness, "skipping refresh, frame not ready");
            return Ok(());
        }
        if let Some(cap) = self.registry.capability(id).await? {
            if let Err(e) = cap.refresh_data().await {
                tracing::warn!(frame = %id, err = %e, "refresh request failed");
            }
        }
        Ok(())
    }

    /// Request a data refresh from every Ready frame, in registration order.
    pub async fn refresh_all(&self) {
        for (id, cap) in self.registry.ready_frames().await {
            if let Err(e) = cap.refresh_data().await {
                tracing::warn!(frame = %id, err = %e, "refresh request failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "propagate_tests.rs"]
mod tests;
