// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for communicating with a single embedded frame.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::frame::{CapabilityManifest, CapabilityProbe, FrameCapability};

/// HTTP implementation of a frame's capability surface.
pub struct FrameClient {
    base_url: String,
    auth_token: Option<String>,
    client: Client,
}

impl FrameClient {
    pub fn new(base_url: String, auth_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { base_url, auth_token, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Fetch the frame's capability manifest.
    pub async fn capabilities(&self) -> anyhow::Result<CapabilityManifest> {
        let req = self.client.get(self.url("/api/v1/capabilities"));
        let resp = self.apply_auth(req).send().await?;
        let manifest = resp.error_for_status()?.json().await?;
        Ok(manifest)
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> anyhow::Result<()> {
        let req = self.client.post(self.url(path)).json(body);
        self.apply_auth(req).send().await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl FrameCapability for FrameClient {
    async fn set_bearer_token(&self, token: &str) -> anyhow::Result<()> {
        self.post_json("/api/v1/token", &serde_json::json!({ "token": token })).await
    }

    async fn refresh_data(&self) -> anyhow::Result<()> {
        self.post_json("/api/v1/refresh", &serde_json::json!({})).await
    }

    async fn subscribe_changes(&self, callback_url: &str) -> anyhow::Result<()> {
        self.post_json("/api/v1/subscribe", &serde_json::json!({ "callback_url": callback_url }))
            .await
    }
}

/// Probe that checks a frame's capability manifest over HTTP.
pub struct HttpProbe {
    base_url: String,
    auth_token: Option<String>,
}

impl HttpProbe {
    pub fn new(base_url: String, auth_token: Option<String>) -> Self {
        Self { base_url, auth_token }
    }
}

#[async_trait]
impl CapabilityProbe for HttpProbe {
    async fn probe(&self) -> Option<Arc<dyn FrameCapability>> {
        let client = FrameClient::new(self.base_url.clone(), self.auth_token.clone());
        match client.capabilities().await {
            Ok(manifest) if manifest.is_complete() => Some(Arc::new(client)),
            Ok(manifest) => {
                tracing::warn!(
                    url = %self.base_url,
                    set_bearer_token = manifest.set_bearer_token,
                    refresh_data = manifest.refresh_data,
                    "frame capability surface incomplete"
                );
                None
            }
            Err(e) => {
                tracing::warn!(url = %self.base_url, err = %e, "capability probe failed");
                None
            }
        }
    }
}
