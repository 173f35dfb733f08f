// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end smoke tests that spawn the real `framehub` binary against
//! stub frame servers and exercise the credential propagation and change
//! relay protocol over HTTP.

use std::time::Duration;

use framehub_specs::{FrameSpec, HubProcess, StubCall, StubFrame};

const TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn boots_with_frames_registered_as_loading() -> anyhow::Result<()> {
    let roles = StubFrame::spawn().await?;
    let users = StubFrame::spawn().await?;
    let hub = HubProcess::start(
        "seed-token",
        &[FrameSpec::new("roles", &roles, true), FrameSpec::new("users", &users, false)],
    )?;
    hub.wait_healthy(TIMEOUT).await?;

    let frames: Vec<serde_json::Value> =
        reqwest::get(format!("{}/api/v1/frames", hub.base_url())).await?.json().await?;

    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|f| f["readiness"] == "loading"));
    // Nothing was pushed yet — no frame has reported loaded.
    assert!(roles.calls().is_empty());
    assert!(users.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn loaded_frame_receives_token_then_refresh() -> anyhow::Result<()> {
    let roles = StubFrame::spawn().await?;
    let hub = HubProcess::start("seed-token", &[FrameSpec::new("roles", &roles, true)])?;
    hub.wait_healthy(TIMEOUT).await?;

    let client = reqwest::Client::new();
    let resp: serde_json::Value = client
        .post(format!("{}/api/v1/frames/roles/loaded", hub.base_url()))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(resp["readiness"], "ready");

    // Probe, then credential push, then refresh, then change subscription.
    roles.wait_for_calls(4, TIMEOUT).await?;
    let calls = roles.calls();
    assert_eq!(calls[0], StubCall::Capabilities);
    assert_eq!(calls[1], StubCall::Token("seed-token".into()));
    assert_eq!(calls[2], StubCall::Refresh);
    assert!(matches!(&calls[3], StubCall::Subscribe(cb) if cb.ends_with("/api/v1/frames/roles/changed")));
    Ok(())
}

#[tokio::test]
async fn frame_without_surface_is_unavailable() -> anyhow::Result<()> {
    // Only refresh_data — the mandatory surface is incomplete.
    let broken =
        StubFrame::spawn_with_manifest(serde_json::json!({ "refresh_data": true })).await?;
    let hub = HubProcess::start("seed-token", &[FrameSpec::new("broken", &broken, false)])?;
    hub.wait_healthy(TIMEOUT).await?;

    let client = reqwest::Client::new();
    let resp: serde_json::Value = client
        .post(format!("{}/api/v1/frames/broken/loaded", hub.base_url()))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(resp["readiness"], "unavailable");

    // The probe ran, but no credential or refresh crossed the boundary.
    assert_eq!(broken.calls(), vec![StubCall::Capabilities]);
    Ok(())
}

#[tokio::test]
async fn change_event_refreshes_other_frames_only() -> anyhow::Result<()> {
    let roles = StubFrame::spawn().await?;
    let users = StubFrame::spawn().await?;
    let hub = HubProcess::start(
        "seed-token",
        &[FrameSpec::new("roles", &roles, true), FrameSpec::new("users", &users, false)],
    )?;
    hub.wait_healthy(TIMEOUT).await?;

    let client = reqwest::Client::new();
    for id in ["roles", "users"] {
        client
            .post(format!("{}/api/v1/frames/{id}/loaded", hub.base_url()))
            .send()
            .await?
            .error_for_status()?;
    }
    let roles_calls_before = roles.calls().len();
    let users_refreshes_before = users.refreshes();

    let resp: serde_json::Value = client
        .post(format!("{}/api/v1/frames/roles/changed", hub.base_url()))
        .json(&serde_json::json!([{ "id": 1, "name": "admin" }]))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(resp["fanned_out"], 1);

    // Fan-out completes before the hub responds.
    assert_eq!(users.refreshes(), users_refreshes_before + 1);
    // The source frame received nothing from its own change event.
    assert_eq!(roles.calls().len(), roles_calls_before);
    Ok(())
}

#[tokio::test]
async fn set_token_propagates_to_ready_frames() -> anyhow::Result<()> {
    let roles = StubFrame::spawn().await?;
    let users = StubFrame::spawn().await?;
    let hub = HubProcess::start(
        "seed-token",
        &[FrameSpec::new("roles", &roles, true), FrameSpec::new("users", &users, false)],
    )?;
    hub.wait_healthy(TIMEOUT).await?;

    let client = reqwest::Client::new();
    // Only "roles" reports loaded.
    client
        .post(format!("{}/api/v1/frames/roles/loaded", hub.base_url()))
        .send()
        .await?
        .error_for_status()?;

    client
        .post(format!("{}/api/v1/token", hub.base_url()))
        .json(&serde_json::json!({ "token": "abc123" }))
        .send()
        .await?
        .error_for_status()?;

    assert_eq!(roles.tokens(), vec!["seed-token".to_owned(), "abc123".to_owned()]);
    assert!(users.calls().is_empty());

    // "users" loads afterwards and catches up with the current credential.
    client
        .post(format!("{}/api/v1/frames/users/loaded", hub.base_url()))
        .send()
        .await?
        .error_for_status()?;
    assert_eq!(users.tokens(), vec!["abc123".to_owned()]);
    Ok(())
}

#[tokio::test]
async fn logout_clears_persisted_session() -> anyhow::Result<()> {
    let hub = HubProcess::start("seed-token", &[])?;
    hub.wait_healthy(TIMEOUT).await?;

    let client = reqwest::Client::new();
    let resp: serde_json::Value = client
        .post(format!("{}/api/v1/logout", hub.base_url()))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(resp["logged_out"], true);
    assert_eq!(resp["login_url"], "login/index.html");

    let session: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(hub.session_path())?)?;
    assert!(session.get("bearer_token").is_none());
    assert!(session.get("remembered_user").is_none());
    Ok(())
}

#[tokio::test]
async fn unauthenticated_start_exits_without_serving() -> anyhow::Result<()> {
    let mut hub = HubProcess::start_unauthenticated()?;
    let status = hub.wait_exit(TIMEOUT).await?;
    assert!(status.success());
    Ok(())
}
