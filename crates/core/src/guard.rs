//! Per-target guard against duplicate in-flight mutations.
//!
//! A second submit for the same goal while the first is still awaiting the
//! server is refused instead of racing it.

use std::fmt;
use std::sync::Arc;

use dashmap::DashSet;
use finnote_shared::AppError;

/// Set of mutation targets that currently have a request in flight.
///
/// Cloning shares the same set.
#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    keys: Arc<DashSet<String>>,
}

impl InFlightGuard {
    /// Creates an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as in flight. Returns `None` if it already is.
    #[must_use]
    pub fn try_acquire(&self, key: impl fmt::Display) -> Option<InFlightTicket> {
        let key = key.to_string();
        if !self.keys.insert(key.clone()) {
            tracing::debug!(key = %key, "Mutation already in flight");
            return None;
        }
        Some(InFlightTicket {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    /// Like `try_acquire`, but reports a held key as `AppError::Conflict`.
    pub fn acquire(&self, key: impl fmt::Display) -> Result<InFlightTicket, AppError> {
        let key = key.to_string();
        self.try_acquire(&key)
            .ok_or_else(|| AppError::Conflict(format!("{key} is already being updated")))
    }

    /// Returns true while `key` is held.
    #[must_use]
    pub fn is_held(&self, key: impl fmt::Display) -> bool {
        self.keys.contains(&key.to_string())
    }

    /// Number of held keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Proof that a key is held. Releases it on drop.
#[derive(Debug)]
pub struct InFlightTicket {
    keys: Arc<DashSet<String>>,
    key: String,
}

impl InFlightTicket {
    /// The held key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}
