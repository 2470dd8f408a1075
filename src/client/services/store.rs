//! # Session Stores
//!
//! Two independent persistence scopes, never conflated:
//!
//! - the **draft scope** keeps last-entered values for a whitelisted set
//!   of signup fields for the lifetime of the process, so an accidental
//!   page switch does not lose typed input;
//! - the **identity scope** durably remembers a username across runs,
//!   opt-in via the "remember me" toggle.
//!
//! Both are injected as capabilities so tests substitute in-memory
//! fakes. Password fields are never written to either scope.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Signup fields whitelisted for draft persistence.
///
/// Passwords and the terms checkbox are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FirstName,
    LastName,
    Username,
    Email,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Username,
        DraftField::Email,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DraftField::FirstName => "first_name",
            DraftField::LastName => "last_name",
            DraftField::Username => "username",
            DraftField::Email => "email",
        }
    }
}

/// Draft scope: per-field last-entered values, process lifetime.
pub trait DraftStore: Send {
    /// Record the latest value for a field. Called on every keystroke.
    fn set(&mut self, field: DraftField, value: &str);

    fn get(&self, field: DraftField) -> Option<String>;

    /// Drop every draft. Invoked exactly once on signup submit
    /// dispatch, independent of the request outcome.
    fn clear_all(&mut self);

    /// Snapshot of all stored drafts, used to repopulate the form on
    /// page mount.
    fn get_all(&self) -> Vec<(DraftField, String)> {
        DraftField::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|value| (*field, value)))
            .collect()
    }
}

/// In-memory draft store. The process is the page lifetime here.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    values: HashMap<&'static str, String>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn set(&mut self, field: DraftField, value: &str) {
        self.values.insert(field.key(), value.to_string());
    }

    fn get(&self, field: DraftField) -> Option<String> {
        self.values.get(field.key()).cloned()
    }

    fn clear_all(&mut self) {
        self.values.clear();
    }
}

/// Identity scope: durable, cross-session remembered username.
pub trait IdentityStore: Send {
    fn remember(&mut self, username: &str) -> Result<()>;

    fn recall(&self) -> Option<String>;

    fn forget(&mut self) -> Result<()>;
}

/// In-memory identity store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    username: Option<String>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn remember(&mut self, username: &str) -> Result<()> {
        self.username = Some(username.to_string());
        Ok(())
    }

    fn recall(&self) -> Option<String> {
        self.username.clone()
    }

    fn forget(&mut self) -> Result<()> {
        self.username = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedIdentity {
    username: String,
}

/// File-backed identity store. Stores a small JSON document at the
/// configured state path; a missing or unreadable file reads as "no
/// remembered identity".
#[derive(Debug)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IdentityStore for FileIdentityStore {
    fn remember(&mut self, username: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating state directory {}", parent.display()))?;
        }
        let identity = PersistedIdentity {
            username: username.to_string(),
        };
        let body = serde_json::to_string_pretty(&identity)?;
        fs::write(&self.path, body)
            .with_context(|| format!("writing identity to {}", self.path.display()))?;
        tracing::debug!("remembered identity at {}", self.path.display());
        Ok(())
    }

    fn recall(&self) -> Option<String> {
        let body = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<PersistedIdentity>(&body) {
            Ok(identity) => Some(identity.username),
            Err(error) => {
                tracing::debug!("ignoring unreadable identity file: {error}");
                None
            }
        }
    }

    fn forget(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error).context("removing remembered identity"),
        }
    }
}
