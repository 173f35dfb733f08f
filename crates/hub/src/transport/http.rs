// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the hub's external capability surface.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::coordinator::Coordinator;
use crate::frame::Readiness;

// -- Request/Response types ---------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub frame_count: usize,
    pub ready_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetTokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SetTokenResponse {
    pub stored: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearTokenResponse {
    pub cleared: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
    /// Navigation target for the caller.
    pub login_url: String,
}

#[derive(Debug, Serialize)]
pub struct LoadedResponse {
    pub id: String,
    pub readiness: Readiness,
}

#[derive(Debug, Serialize)]
pub struct ChangedResponse {
    pub id: String,
    /// Number of other frames that received a refresh.
    pub fanned_out: usize,
}

// -- Handlers -----------------------------------------------------------------

/// `GET /api/v1/health`
pub async fn health(State(c): State<Arc<Coordinator>>) -> impl IntoResponse {
    let frames = c.registry.snapshot_all().await;
    let ready_count = frames.iter().filter(|f| f.readiness == Readiness::Ready).count();
    Json(HealthResponse {
        status: "running".to_owned(),
        frame_count: frames.len(),
        ready_count,
    })
}

/// `GET /api/v1/token` — current bearer credential.
pub async fn get_token(State(c): State<Arc<Coordinator>>) -> impl IntoResponse {
    Json(TokenResponse { token: c.token().await })
}

/// `POST /api/v1/token` — store a credential and propagate to ready frames.
pub async fn set_token(
    State(c): State<Arc<Coordinator>>,
    Json(req): Json<SetTokenRequest>,
) -> impl IntoResponse {
    c.set_bearer_token(req.token).await;
    Json(SetTokenResponse { stored: true })
}

/// `DELETE /api/v1/token` — clear the credential (no propagation).
pub async fn clear_token(State(c): State<Arc<Coordinator>>) -> impl IntoResponse {
    c.clear_token().await;
    Json(ClearTokenResponse { cleared: true })
}

/// `POST /api/v1/refresh` — request a refresh from every ready frame.
pub async fn refresh_all(State(c): State<Arc<Coordinator>>) -> impl IntoResponse {
    c.refresh_all().await;
    Json(RefreshResponse { refreshed: true })
}

/// `POST /api/v1/logout` — clear credential and remembered user.
pub async fn logout(State(c): State<Arc<Coordinator>>) -> impl IntoResponse {
    let login_url = c.logout().await;
    Json(LogoutResponse { logged_out: true, login_url })
}

/// `GET /api/v1/frames` — list registered frame handles.
pub async fn list_frames(State(c): State<Arc<Coordinator>>) -> impl IntoResponse {
    Json(c.registry.snapshot_all().await)
}

/// `POST /api/v1/frames/{id}/loaded` — a frame finished loading.
pub async fn frame_loaded(
    State(c): State<Arc<Coordinator>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match c.frame_loaded(&id).await {
        Ok(readiness) => Json(LoadedResponse { id, readiness }).into_response(),
        Err(e) => e.to_http_response(format!("frame not registered: {id}")).into_response(),
    }
}

/// `POST /api/v1/frames/{id}/changed` — a source frame signals a change.
pub async fn frame_changed(
    State(c): State<Arc<Coordinator>>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    match c.frame_changed(&id, &payload).await {
        Ok(fanned_out) => Json(ChangedResponse { id, fanned_out }).into_response(),
        Err(e) => e.to_http_response(format!("frame not registered: {id}")).into_response(),
    }
}
