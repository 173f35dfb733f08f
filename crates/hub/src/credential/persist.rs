// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential persistence: load/save to JSON file with atomic writes.
//!
//! Frames never read this file — the coordinator is the single writer and
//! the only reader. Credential visibility for frames goes through explicit
//! propagation only.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted session state: the two durable string keys.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Current bearer credential. Absent means unauthenticated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Remembered-user marker, cleared on logout and otherwise untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remembered_user: Option<String>,
}

/// Load persisted session state from a JSON file.
pub fn load(path: &Path) -> anyhow::Result<PersistedSession> {
    let contents = std::fs::read_to_string(path)?;
    let session: PersistedSession = serde_json::from_str(&contents)?;
    Ok(session)
}

/// Save session state to a JSON file atomically (write tmp + rename).
///
/// Uses a unique temp filename (PID + counter) to avoid corruption when
/// concurrent saves race on the same `.tmp` file — a shorter write can leave
/// trailing bytes from a longer previous write.
pub fn save(path: &Path, session: &PersistedSession) -> anyhow::Result<()> {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let json = serde_json::to_string_pretty(session)?;
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(
        "{}.{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id(),
        seq,
    );
    let tmp_path = path.with_file_name(tmp_name);
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
