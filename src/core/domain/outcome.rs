//! Per-item outcomes of the local and CI batches.

use crate::core::types::SecretKey;
use crate::error::{CiError, HostError};

/// Step at which a CI publish failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Encrypt,
    Publish,
}

impl std::fmt::Display for PublishStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStage::Encrypt => write!(f, "encrypt"),
            PublishStage::Publish => write!(f, "publish"),
        }
    }
}

/// Terminal state of one required variable.
#[derive(Debug)]
pub enum PublishOutcome {
    /// Sealed and accepted by the platform
    Published { name: SecretKey },
    /// Listed as required but absent from the secret set
    Skipped { name: SecretKey },
    /// Failed at `stage`; siblings are unaffected
    Failed {
        name: SecretKey,
        stage: PublishStage,
        error: CiError,
    },
}

impl PublishOutcome {
    /// Variable name this outcome is for
    pub fn name(&self) -> &str {
        match self {
            PublishOutcome::Published { name }
            | PublishOutcome::Skipped { name }
            | PublishOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published { .. })
    }
}

/// Outcomes of a CI publish batch, in allow-list order.
#[derive(Debug, Default)]
pub struct PublishSummary {
    pub outcomes: Vec<PublishOutcome>,
}

impl PublishSummary {
    pub fn published(&self) -> usize {
        self.count(|o| matches!(o, PublishOutcome::Published { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, PublishOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, PublishOutcome::Failed { .. }))
    }

    /// Outcome for a variable, if it was in the allow-list
    pub fn get(&self, name: &str) -> Option<&PublishOutcome> {
        self.outcomes.iter().find(|o| o.name() == name)
    }

    fn count(&self, pred: impl Fn(&PublishOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Result of binding one host environment variable.
#[derive(Debug)]
pub enum ApplyOutcome {
    Applied { key: SecretKey },
    Failed { key: SecretKey, error: HostError },
}

impl ApplyOutcome {
    pub fn key(&self) -> &str {
        match self {
            ApplyOutcome::Applied { key } | ApplyOutcome::Failed { key, .. } => key,
        }
    }
}

/// Outcomes of a local apply batch, in key order.
#[derive(Debug, Default)]
pub struct ApplySummary {
    pub outcomes: Vec<ApplyOutcome>,
}

impl ApplySummary {
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ApplyOutcome::Applied { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.applied()
    }
}
