// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change relay: fans out a change event from one frame into refresh
//! requests to every other ready frame.
//!
//! The relay is a pure trigger, not a data pipe — the payload is never
//! inspected or forwarded; receiving frames re-fetch their own data.
//! Delivery is fire-and-forget: no ack, no retry, and a transiently
//! not-Ready target simply misses the notification.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::HubError;
use crate::registry::FrameRegistry;

/// Fans out change events from subscribed source frames.
pub struct ChangeRelay {
    registry: Arc<FrameRegistry>,
    /// Source frames whose change events are armed. Populated only after
    /// the source reaches Ready.
    sources: RwLock<HashSet<String>>,
}

impl ChangeRelay {
    pub fn new(registry: Arc<FrameRegistry>) -> Self {
        Self { registry, sources: RwLock::new(HashSet::new()) }
    }

    /// Arm change events from `source_id`. Called from the post-ready hook.
    pub async fn subscribe(&self, source_id: &str) {
        self.sources.write().await.insert(source_id.to_owned());
        tracing::debug!(frame = %source_id, "change relay armed");
    }

    /// Whether change events from `source_id` are armed.
    pub async fn is_subscribed(&self, source_id: &str) -> bool {
        self.sources.read().await.contains(source_id)
    }

    /// Handle a change event from `source_id`: request a refresh from every
    /// OTHER Ready frame. Returns the number of refreshes triggered.
    ///
    /// Events from a frame that was never registered fail loudly; events
    /// from a registered but unsubscribed frame are dropped with a warning
    /// (the source was not armed, so nothing should be relaying from it).
    pub async fn on_change(
        &self,
        source_id: &str,
        payload: &serde_json::Value,
    ) -> Result<usize, HubError> {
        // Existence check first: unknown ids indicate a wiring bug.
        self.registry.get(source_id).await?;

        if !self.is_subscribed(source_id).await {
            tracing::warn!(frame = %source_id, "dropping change event from unsubscribed frame");
            return Ok(0);
        }

        // The payload is deliberately not inspected or forwarded.
        let _ = payload;

        let mut fanned_out = 0;
        for (id, cap) in self.registry.ready_frames().await {
            if id == source_id {
                continue;
            }
            match cap.refresh_data().await {
                Ok(()) => fanned_out += 1,
                Err(e) => {
                    tracing::warn!(frame = %id, source = %source_id, err = %e, "change fan-out refresh failed");
                }
            }
        }
        tracing::debug!(source = %source_id, fanned_out, "change event relayed");
        Ok(fanned_out)
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
