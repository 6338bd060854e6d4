//! GitHub Actions repository secrets over the REST API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::CiPlatform;
use crate::core::domain::{CiRecipientKey, EncryptedSecretEntry};
use crate::error::CiError;

const API_VERSION: &str = "2022-11-28";

#[derive(Deserialize)]
struct PublicKeyResponse {
    key_id: String,
    key: String,
}

#[derive(Serialize)]
struct SecretRequest<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
}

/// Authenticated GitHub REST client.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: Url,
    token: String,
}

impl GithubClient {
    /// Create a client for `api_url` (e.g. `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns `CiError::InvalidUrl` if `api_url` is not a base URL, and
    /// `CiError::Transport` if the HTTP client cannot be built.
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self, CiError> {
        let api_url = Url::parse(api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| CiError::InvalidUrl(api_url.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(concat!("lockstep/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url,
            token: token.into(),
        })
    }

    /// `{api}/repos/{owner}/{repo}/actions/secrets/{tail}`, each segment
    /// percent-encoded.
    fn secrets_url(&self, owner: &str, repo: &str, tail: &str) -> Result<Url, CiError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| CiError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "actions", "secrets", tail]);
        Ok(url)
    }
}

/// Secret names are limited to ASCII letters, digits and `_`, and may not
/// start with a digit.
fn is_valid_secret_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Turn a non-2xx response into `CiError::Api` carrying its body.
async fn check(response: Response) -> Result<Response, CiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CiError::Api {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CiPlatform for GithubClient {
    async fn get_repo_public_key(&self, owner: &str, repo: &str) -> Result<CiRecipientKey, CiError> {
        let url = self.secrets_url(owner, repo, "public-key")?;
        debug!(owner, repo, "fetching repository public key");

        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let key: PublicKeyResponse = check(response).await?.json().await?;

        trace!(key_id = %key.key_id, "repository public key fetched");
        Ok(CiRecipientKey {
            key_id: key.key_id,
            key: key.key,
        })
    }

    async fn create_or_update_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        entry: &EncryptedSecretEntry,
    ) -> Result<(), CiError> {
        if !is_valid_secret_name(&entry.name) {
            return Err(CiError::InvalidName(entry.name.clone()));
        }
        let url = self.secrets_url(owner, repo, &entry.name)?;
        debug!(owner, repo, name = %entry.name, "putting repository secret");

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&SecretRequest {
                encrypted_value: &entry.encrypted_value,
                key_id: &entry.key_id,
            })
            .send()
            .await?;
        let status = check(response).await?.status();

        trace!(name = %entry.name, status = status.as_u16(), "repository secret stored");
        Ok(())
    }
}
