// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential store: the single current bearer credential, persisted across
//! restarts.
//!
//! Owns the in-memory value and the durable copy; the two are equal except
//! during the atomic window of a `set`/`clear` call. Propagation to frames is
//! the caller's responsibility (see the coordinator) — the store itself never
//! talks to frames.

pub mod persist;

use std::path::PathBuf;

use tokio::sync::RwLock;

use crate::credential::persist::PersistedSession;

/// Resolve the state directory for hub data.
///
/// Checks `FRAMEHUB_STATE_DIR`, then `$XDG_STATE_HOME/framehub`,
/// then `$HOME/.local/state/framehub`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FRAMEHUB_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("framehub");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/state/framehub");
    }
    PathBuf::from(".framehub")
}

/// Holds the current bearer credential and the remembered-user marker.
pub struct CredentialStore {
    session: RwLock<PersistedSession>,
    path: PathBuf,
}

impl CredentialStore {
    /// Open the store rooted at `state_dir`, seeding memory from the
    /// persisted file when one exists. A missing file means unauthenticated;
    /// an unreadable file is logged and treated the same way.
    pub fn open(state_dir: PathBuf) -> Self {
        let path = state_dir.join("session.json");
        let session = match persist::load(&path) {
            Ok(s) => s,
            Err(e) if path.exists() => {
                tracing::warn!(path = %path.display(), err = %e, "failed to load persisted session, starting unauthenticated");
                PersistedSession::default()
            }
            Err(_) => PersistedSession::default(),
        };
        Self { session: RwLock::new(session), path }
    }

    /// Current bearer credential, if any.
    pub async fn get(&self) -> Option<String> {
        self.session.read().await.bearer_token.clone()
    }

    /// Store a new credential in memory and on disk.
    ///
    /// Setting an identical value is not suppressed — callers re-propagate
    /// regardless, which is idempotent for frames.
    pub async fn set(&self, token: String) {
        let mut session = self.session.write().await;
        session.bearer_token = Some(token);
        self.persist(&session);
    }

    /// Remove the credential from memory and disk. The remembered-user
    /// marker is left untouched.
    pub async fn clear(&self) {
        let mut session = self.session.write().await;
        session.bearer_token = None;
        self.persist(&session);
    }

    /// Logout: clear both the credential and the remembered-user marker.
    pub async fn logout(&self) {
        let mut session = self.session.write().await;
        session.bearer_token = None;
        session.remembered_user = None;
        self.persist(&session);
    }

    fn persist(&self, session: &PersistedSession) {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    tracing::warn!(err = %e, "failed to create state dir");
                    return;
                }
            }
        }
        if let Err(e) = persist::save(&self.path, session) {
            tracing::warn!(err = %e, "failed to persist session");
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
