//! Machine-wide environment bindings on the executing host.
//!
//! Bindings outlive the process and are visible to every new process or
//! session on the host, but not to shells that are already running.
//!
//! Application is gated once on elevated privilege: [`LocalEnvironmentApplier::elevate`]
//! is the only way to obtain an [`ElevatedApplier`], so no binding can be
//! attempted without the check having passed.

use tracing::{debug, error, info};

use crate::core::domain::{ApplyOutcome, ApplySummary, SecretSet};
use crate::error::HostError;

mod memory;
mod system;

pub use memory::MemoryHost;
pub use system::SystemEnvironment;

/// Host environment port.
pub trait HostEnvironment {
    /// Whether the current process holds administrative rights.
    fn has_elevated_privilege(&self) -> bool;

    /// Persist `name=value` machine-wide.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the binding could not be written.
    fn set_persistent_variable(&self, name: &str, value: &str) -> Result<(), HostError>;
}

/// Applies a secret set to a [`HostEnvironment`].
pub struct LocalEnvironmentApplier<H> {
    host: H,
}

impl<H: HostEnvironment> LocalEnvironmentApplier<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// The underlying host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Check privilege once, up front.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotElevated` if the process lacks administrative rights.
    pub fn elevate(&self) -> Result<ElevatedApplier<'_, H>, HostError> {
        if !self.host.has_elevated_privilege() {
            return Err(HostError::NotElevated);
        }
        debug!("elevated privilege confirmed");
        Ok(ElevatedApplier { host: &self.host })
    }
}

/// An applier whose privilege check has passed.
pub struct ElevatedApplier<'a, H> {
    host: &'a H,
}

impl<H: HostEnvironment> ElevatedApplier<'_, H> {
    /// Bind one variable.
    ///
    /// # Errors
    ///
    /// Returns the host's error for this key only.
    pub fn apply(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.host.set_persistent_variable(key, value)
    }

    /// Bind every entry, continuing past per-key failures.
    pub fn apply_all(&self, secrets: &SecretSet) -> ApplySummary {
        info!(count = secrets.len(), "applying environment variables");

        let outcomes = secrets
            .iter()
            .map(|(key, value)| match self.apply(key, value) {
                Ok(()) => {
                    debug!(key, "environment variable set");
                    ApplyOutcome::Applied {
                        key: key.to_string(),
                    }
                }
                Err(e) => {
                    error!(key, error = %e, "failed to set environment variable");
                    ApplyOutcome::Failed {
                        key: key.to_string(),
                        error: e,
                    }
                }
            })
            .collect();

        ApplySummary { outcomes }
    }
}
