//! AWS Secrets Manager store.
//!
//! Credentials come from the default provider chain (environment, profile,
//! instance role). Only `ResourceNotFoundException` maps to
//! `RemoteError::NotFound`; throttling, access denied, and transport errors
//! all surface as `RemoteError::Api` with the SDK's full error context.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::operation::update_secret::UpdateSecretError;
use aws_sdk_secretsmanager::Client;
use tracing::{debug, trace};

use super::{RemoteStore, Version};
use crate::error::RemoteError;

/// Secrets Manager client for one region.
pub struct SecretsManager {
    client: Client,
}

impl SecretsManager {
    /// Build a client for `region` from the default credential chain.
    pub async fn new(region: &str) -> Self {
        debug!(region, "loading AWS config");
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

/// Operation errors that can report a missing record.
trait MissingRecord {
    fn is_missing_record(&self) -> bool;
}

impl MissingRecord for UpdateSecretError {
    fn is_missing_record(&self) -> bool {
        self.is_resource_not_found_exception()
    }
}

impl MissingRecord for GetSecretValueError {
    fn is_missing_record(&self) -> bool {
        self.is_resource_not_found_exception()
    }
}

/// Classify an SDK failure, keeping not-found distinct from everything else.
fn classify<E, R>(id: &str, err: SdkError<E, R>) -> RemoteError
where
    E: MissingRecord + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if err.as_service_error().is_some_and(E::is_missing_record) {
        RemoteError::NotFound(id.to_string())
    } else {
        api_error(err)
    }
}

fn api_error<E, R>(err: SdkError<E, R>) -> RemoteError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    RemoteError::Api(DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl RemoteStore for SecretsManager {
    async fn update(&self, id: &str, payload: &str) -> Result<Version, RemoteError> {
        trace!(id, payload_len = payload.len(), "UpdateSecret");
        let output = self
            .client
            .update_secret()
            .secret_id(id)
            .secret_string(payload)
            .send()
            .await
            .map_err(|e| classify(id, e))?;

        Ok(output.version_id().map(str::to_string))
    }

    async fn create(
        &self,
        id: &str,
        description: &str,
        payload: &str,
    ) -> Result<Version, RemoteError> {
        trace!(id, payload_len = payload.len(), "CreateSecret");
        let output = self
            .client
            .create_secret()
            .name(id)
            .description(description)
            .secret_string(payload)
            .send()
            .await
            .map_err(api_error)?;

        Ok(output.version_id().map(str::to_string))
    }

    async fn read(&self, id: &str) -> Result<String, RemoteError> {
        trace!(id, "GetSecretValue");
        let output = self
            .client
            .get_secret_value()
            .secret_id(id)
            .send()
            .await
            .map_err(|e| classify(id, e))?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| RemoteError::EmptyPayload(id.to_string()))
    }
}
