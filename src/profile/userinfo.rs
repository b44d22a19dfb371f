use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::config::EnrichmentConfig;
use crate::error::LoginError;
use crate::profile::ProfileFetcher;

/// Fetches the signed-in user's profile from Google's userinfo endpoint.
#[derive(Debug, Clone)]
pub struct GoogleUserInfoFetcher {
    client: reqwest::Client,
    userinfo_url: reqwest::Url,
}

impl GoogleUserInfoFetcher {
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let userinfo_url = reqwest::Url::parse(&config.userinfo_url)
            .with_context(|| format!("parsing userinfo url {:?}", config.userinfo_url))?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("building the userinfo http client")?;
        Ok(Self {
            client,
            userinfo_url,
        })
    }
}

#[async_trait::async_trait]
impl ProfileFetcher for GoogleUserInfoFetcher {
    async fn fetch(&self, access_token: &str) -> Result<Map<String, Value>, LoginError> {
        let response = self
            .client
            .get(self.userinfo_url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| LoginError::ProfileFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoginError::ProfileFetch(format!(
                "userinfo endpoint returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LoginError::ProfileFetch(format!("malformed userinfo body: {e}")))?;
        tracing::debug!("User info: {body:#?}");

        match body {
            Value::Object(profile) => Ok(profile),
            other => Err(LoginError::ProfileFetch(format!(
                "expected a JSON object from the userinfo endpoint, got {other}"
            ))),
        }
    }
}
