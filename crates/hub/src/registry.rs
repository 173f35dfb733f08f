// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame registry: the set of embedded frame handles and their readiness.
//!
//! Handles are created when the coordinator is wired at startup, before the
//! frames finish loading, and are never destroyed within a process lifetime.
//! Registration order is preserved — propagation iterates in that order.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::error::HubError;
use crate::frame::{CapabilityProbe, FrameCapability, Readiness};

/// One registered frame handle.
pub struct FrameEntry {
    pub id: String,
    pub url: String,
    pub change_source: bool,
    pub readiness: Readiness,
    /// Capability surface; `Some` only while Ready.
    pub capability: Option<Arc<dyn FrameCapability>>,
    probe: Arc<dyn CapabilityProbe>,
}

/// Cloneable view of a frame handle for listings and gating decisions.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FrameSnapshot {
    pub id: String,
    pub url: String,
    pub readiness: Readiness,
    pub change_source: bool,
}

/// Registry of all embedded frame handles, in registration order.
pub struct FrameRegistry {
    frames: RwLock<IndexMap<String, FrameEntry>>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self { frames: RwLock::new(IndexMap::new()) }
    }

    /// Add a frame handle with readiness Loading.
    ///
    /// Re-registering an existing id replaces its probe and resets it to
    /// Loading.
    pub async fn register(
        &self,
        id: String,
        url: String,
        change_source: bool,
        probe: Arc<dyn CapabilityProbe>,
    ) {
        let entry = FrameEntry {
            id: id.clone(),
            url,
            change_source,
            readiness: Readiness::Loading,
            capability: None,
            probe,
        };
        self.frames.write().await.insert(id, entry);
    }

    /// Handle a frame load event: probe the capability surface and
    /// transition the handle to Ready or Unavailable.
    ///
    /// A repeated load event (frame reload) re-probes, so an Unavailable
    /// frame can recover once its surface appears. Returns the new
    /// readiness; an id that was never registered is a wiring bug and
    /// fails loudly.
    pub async fn on_load(&self, id: &str) -> Result<Readiness, HubError> {
        let probe = {
            let frames = self.frames.read().await;
            let entry = frames.get(id).ok_or(HubError::FrameNotFound)?;
            Arc::clone(&entry.probe)
        };

        // Probe outside the lock — it is a network call.
        let capability = probe.probe().await;

        let mut frames = self.frames.write().await;
        let entry = frames.get_mut(id).ok_or(HubError::FrameNotFound)?;
        match capability {
            Some(cap) => {
                entry.readiness = Readiness::Ready;
                entry.capability = Some(cap);
            }
            None => {
                entry.readiness = Readiness::Unavailable;
                entry.capability = None;
            }
        }
        Ok(entry.readiness)
    }

    /// Snapshot one handle. Fails loudly for an id that was never registered.
    pub async fn get(&self, id: &str) -> Result<FrameSnapshot, HubError> {
        let frames = self.frames.read().await;
        let entry = frames.get(id).ok_or(HubError::FrameNotFound)?;
        Ok(snapshot(entry))
    }

    /// Capability surface of one handle, present only while Ready.
    pub async fn capability(
        &self,
        id: &str,
    ) -> Result<Option<Arc<dyn FrameCapability>>, HubError> {
        let frames = self.frames.read().await;
        let entry = frames.get(id).ok_or(HubError::FrameNotFound)?;
        match entry.readiness {
            Readiness::Ready => Ok(entry.capability.as_ref().map(Arc::clone)),
            _ => Ok(None),
        }
    }

    /// Snapshot every handle, in registration order.
    pub async fn snapshot_all(&self) -> Vec<FrameSnapshot> {
        self.frames.read().await.values().map(snapshot).collect()
    }

    /// Every Ready frame with its capability surface, in registration order.
    pub async fn ready_frames(&self) -> Vec<(String, Arc<dyn FrameCapability>)> {
        self.frames
            .read()
            .await
            .values()
            .filter(|e| e.readiness == Readiness::Ready)
            .filter_map(|e| e.capability.as_ref().map(|c| (e.id.clone(), Arc::clone(c))))
            .collect()
    }
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot(entry: &FrameEntry) -> FrameSnapshot {
    FrameSnapshot {
        id: entry.id.clone(),
        url: entry.url.clone(),
        readiness: entry.readiness,
        change_source: entry.change_source,
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
