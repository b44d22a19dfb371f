pub mod userinfo;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::config::EnrichmentConfig;
use crate::error::LoginError;
use crate::types::{EnrichedSuccessPayload, TokenGrantEvent};

pub use self::userinfo::GoogleUserInfoFetcher;

/// Source of the profile record merged into a successful grant.
#[async_trait::async_trait]
pub trait ProfileFetcher: Send + Sync + std::fmt::Debug + 'static {
    async fn fetch(&self, access_token: &str) -> Result<Map<String, Value>, LoginError>;
}

/// Best-effort profile enrichment of token grants.
#[derive(Debug, Clone)]
pub struct ProfileEnricher {
    fetcher: Arc<dyn ProfileFetcher>,
    timeout: Duration,
}

impl ProfileEnricher {
    pub fn new(fetcher: Arc<dyn ProfileFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// Enricher backed by the Google userinfo endpoint.
    pub fn google(config: &EnrichmentConfig) -> anyhow::Result<Self> {
        let fetcher = GoogleUserInfoFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), config.timeout))
    }

    /// Never fails: a grant without an access token, or one whose profile
    /// cannot be fetched, is returned un-enriched.
    pub async fn enrich(&self, grant: TokenGrantEvent) -> EnrichedSuccessPayload {
        let Some(access_token) = grant.access_token.clone() else {
            tracing::debug!("Grant carries no access token, skipping profile enrichment");
            return EnrichedSuccessPayload::from_grant(grant);
        };
        match self.fetch_profile(&access_token).await {
            Ok(profile) => EnrichedSuccessPayload::merge(profile, grant),
            Err(e) => {
                tracing::warn!("Falling back to the un-enriched grant: {e}");
                EnrichedSuccessPayload::from_grant(grant)
            }
        }
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Map<String, Value>, LoginError> {
        tokio::time::timeout(self.timeout, self.fetcher.fetch(access_token))
            .await
            .map_err(|_| {
                LoginError::ProfileFetch(format!("timed out after {:?}", self.timeout))
            })?
    }
}
