//! Publishing secrets to a CI platform's encrypted store.
//!
//! Each required variable moves through
//! `pending → key fetched → encrypted → published`, or fails on its own
//! without affecting its siblings. The repository key is fetched once per
//! batch and never cached between batches, since the platform may rotate it.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::core::domain::{
    CiRecipientKey, EncryptedSecretEntry, PublishOutcome, PublishStage, PublishSummary, SecretSet,
};
use crate::core::types::SecretKey;
use crate::error::{CiError, ConfigError};

mod github;
pub mod seal;

pub use github::GithubClient;

/// CI platform port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CiPlatform: Send + Sync {
    /// The repository's current public key for sealing secrets.
    async fn get_repo_public_key(&self, owner: &str, repo: &str) -> Result<CiRecipientKey, CiError>;

    /// Store `entry`, replacing any secret of the same name.
    async fn create_or_update_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        entry: &EncryptedSecretEntry,
    ) -> Result<(), CiError>;
}

/// Require the CI access token before any network call is made.
///
/// # Errors
///
/// Returns `ConfigError::MissingToken` if `token` is absent or blank.
pub fn require_token(token: Option<String>, var: &'static str) -> Result<String, ConfigError> {
    token
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingToken(var))
}

/// Publishes an allow-listed subset of a secret set to one repository.
pub struct CiSecretPublisher<P> {
    platform: P,
    owner: String,
    repo: String,
}

impl<P: CiPlatform> CiSecretPublisher<P> {
    pub fn new(platform: P, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            platform,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// The underlying platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Fetch the repository's public key.
    ///
    /// # Errors
    ///
    /// Returns the platform's error unchanged.
    pub async fn fetch_recipient_key(&self) -> Result<CiRecipientKey, CiError> {
        self.platform
            .get_repo_public_key(&self.owner, &self.repo)
            .await
    }

    /// Seal `plaintext` for `key` and store it under `name`.
    ///
    /// # Errors
    ///
    /// Returns the sealing or platform error.
    pub async fn publish(
        &self,
        name: &str,
        plaintext: &str,
        key: &CiRecipientKey,
    ) -> Result<(), CiError> {
        let entry = seal::seal_entry(name, plaintext, key)?;
        self.submit(&entry).await
    }

    /// Publish every name in `required`, ignoring anything else in `secrets`.
    ///
    /// Absent names are skipped with a warning. Per-variable failures are
    /// recorded in the summary and the batch continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if the repository key cannot be fetched, in
    /// which case nothing has been published.
    pub async fn publish_all(
        &self,
        secrets: &SecretSet,
        required: &[SecretKey],
    ) -> Result<PublishSummary, CiError> {
        info!(
            owner = %self.owner,
            repo = %self.repo,
            required = required.len(),
            "publishing CI secrets"
        );

        let key = self.fetch_recipient_key().await?;
        debug!(key_id = %key.key_id, "repository public key fetched");

        let mut summary = PublishSummary::default();
        for name in required {
            let outcome = self.publish_one(name, secrets, &key).await;
            summary.outcomes.push(outcome);
        }
        Ok(summary)
    }

    async fn publish_one(
        &self,
        name: &str,
        secrets: &SecretSet,
        key: &CiRecipientKey,
    ) -> PublishOutcome {
        let Some(plaintext) = secrets.get(name) else {
            warn!(name, "required variable missing from secret set, skipping");
            return PublishOutcome::Skipped {
                name: name.to_string(),
            };
        };

        let entry = match seal::seal_entry(name, plaintext, key) {
            Ok(entry) => entry,
            Err(e) => return failed(name, PublishStage::Encrypt, e),
        };

        match self.submit(&entry).await {
            Ok(()) => {
                info!(name, "CI secret published");
                PublishOutcome::Published {
                    name: name.to_string(),
                }
            }
            Err(e) => failed(name, PublishStage::Publish, e),
        }
    }

    async fn submit(&self, entry: &EncryptedSecretEntry) -> Result<(), CiError> {
        self.platform
            .create_or_update_repo_secret(&self.owner, &self.repo, entry)
            .await
    }
}

fn failed(name: &str, stage: PublishStage, error: CiError) -> PublishOutcome {
    match error.response() {
        Some((status, body)) => {
            error!(name, %stage, status, body, "failed to publish CI secret")
        }
        None => error!(name, %stage, error = %error, "failed to publish CI secret"),
    }
    PublishOutcome::Failed {
        name: name.to_string(),
        stage,
        error,
    }
}
