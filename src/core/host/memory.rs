//! In-memory host environment.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::HostEnvironment;
use crate::error::HostError;

/// Host environment held in process memory, with optional per-key failures.
#[derive(Debug, Default)]
pub struct MemoryHost {
    elevated: bool,
    failing: BTreeSet<String>,
    attempts: AtomicUsize,
    vars: Mutex<BTreeMap<String, String>>,
}

impl MemoryHost {
    /// A host where the process has administrative rights
    pub fn elevated() -> Self {
        Self {
            elevated: true,
            ..Self::default()
        }
    }

    /// A host where the process does not
    pub fn unprivileged() -> Self {
        Self::default()
    }

    /// Make bindings of `key` fail
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Number of bindings attempted, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Snapshot of bound variables
    pub fn vars(&self) -> BTreeMap<String, String> {
        self.lock().clone()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.vars.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HostEnvironment for MemoryHost {
    fn has_elevated_privilege(&self) -> bool {
        self.elevated
    }

    fn set_persistent_variable(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(name) {
            return Err(HostError::SetFailed {
                key: name.to_string(),
                reason: "rejected by host".to_string(),
            });
        }
        self.lock().insert(name.to_string(), value.to_string());
        Ok(())
    }
}
