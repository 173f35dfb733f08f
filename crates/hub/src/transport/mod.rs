// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport for the hub's external capability surface.

pub mod auth;
pub mod http;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::coordinator::Coordinator;

/// Build the axum `Router` with all hub routes.
pub fn build_router(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        // Health (no auth)
        .route("/api/v1/health", get(http::health))
        // Credential surface
        .route(
            "/api/v1/token",
            get(http::get_token).post(http::set_token).delete(http::clear_token),
        )
        .route("/api/v1/refresh", post(http::refresh_all))
        .route("/api/v1/logout", post(http::logout))
        // Frame lifecycle
        .route("/api/v1/frames", get(http::list_frames))
        .route("/api/v1/frames/{id}/loaded", post(http::frame_loaded))
        .route("/api/v1/frames/{id}/changed", post(http::frame_changed))
        // Middleware
        .layer(middleware::from_fn_with_state(coordinator.clone(), auth::auth_layer))
        .layer(CorsLayer::permissive())
        .with_state(coordinator)
}
