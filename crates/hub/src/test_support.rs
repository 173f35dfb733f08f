// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test infrastructure: mock frame capability surfaces and probes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;

use crate::frame::{CapabilityProbe, FrameCapability};

/// One recorded call into a mock frame's capability surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameCall {
    SetBearerToken(String),
    RefreshData,
    SubscribeChanges(String),
}

/// In-memory frame capability surface that records every call.
pub struct MockFrame {
    calls: Mutex<Vec<FrameCall>>,
    fail: AtomicBool,
}

impl MockFrame {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), fail: AtomicBool::new(false) })
    }

    /// Make every subsequent capability call return an error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<FrameCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of credential pushes received.
    pub fn token_pushes(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, FrameCall::SetBearerToken(_))).count()
    }

    /// Number of refresh requests received.
    pub fn refreshes(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, FrameCall::RefreshData)).count()
    }

    fn record(&self, call: FrameCall) -> anyhow::Result<()> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        if self.fail.load(Ordering::Relaxed) {
            anyhow::bail!("mock frame failure");
        }
        Ok(())
    }
}

#[async_trait]
impl FrameCapability for MockFrame {
    async fn set_bearer_token(&self, token: &str) -> anyhow::Result<()> {
        self.record(FrameCall::SetBearerToken(token.to_owned()))
    }

    async fn refresh_data(&self) -> anyhow::Result<()> {
        self.record(FrameCall::RefreshData)
    }

    async fn subscribe_changes(&self, callback_url: &str) -> anyhow::Result<()> {
        self.record(FrameCall::SubscribeChanges(callback_url.to_owned()))
    }
}

/// Probe returning a preconfigured capability surface.
///
/// The surface can be swapped between load events to exercise the
/// Unavailable→Ready recovery path.
pub struct MockProbe {
    surface: RwLock<Option<Arc<dyn FrameCapability>>>,
}

impl MockProbe {
    /// Probe that finds `frame`'s capability surface.
    pub fn ready(frame: Arc<MockFrame>) -> Arc<Self> {
        Arc::new(Self { surface: RwLock::new(Some(frame as Arc<dyn FrameCapability>)) })
    }

    /// Probe that finds no capability surface.
    pub fn missing() -> Arc<Self> {
        Arc::new(Self { surface: RwLock::new(None) })
    }

    /// Replace the surface the next probe will find.
    pub fn set_surface(&self, surface: Option<Arc<MockFrame>>) {
        *self.surface.write().unwrap_or_else(PoisonError::into_inner) =
            surface.map(|f| f as Arc<dyn FrameCapability>);
    }
}

#[async_trait]
impl CapabilityProbe for MockProbe {
    async fn probe(&self) -> Option<Arc<dyn FrameCapability>> {
        self.surface.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
