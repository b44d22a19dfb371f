use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Scopes requested on every login, ahead of whatever the caller asks for.
///
/// This is a fixed policy: profile enrichment relies on these grants, so they
/// cannot be turned off through [`crate::login::LoginOptions`].
pub const BASELINE_SCOPES: [&str; 4] = [
    "openid",
    "profile",
    "email",
    "https://www.googleapis.com/auth/userinfo.profile",
];

pub const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v1/userinfo";
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(5);

pub const USERINFO_URL_ENV: &str = "GOOGLE_OAUTH_USERINFO_URL";
pub const ENRICHMENT_TIMEOUT_ENV: &str = "GOOGLE_OAUTH_ENRICHMENT_TIMEOUT_MS";

/// Keys owned by the binder. Passthrough options may not set them.
pub const RESERVED_OPTION_KEYS: [&str; 3] = ["client_id", "scope", "callback"];

/// Builds the scope string handed to the SDK factory.
///
/// The caller scope is appended verbatim after a single space. An empty caller
/// scope yields the baseline alone, without a trailing separator.
pub fn effective_scope(caller_scope: &str) -> String {
    let baseline = BASELINE_SCOPES.join(" ");
    if caller_scope.is_empty() {
        baseline
    } else {
        format!("{baseline} {caller_scope}")
    }
}

/// Drops reserved keys from caller supplied provider options.
pub fn sanitize_passthrough(mut options: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_OPTION_KEYS {
        if options.remove(key).is_some() {
            tracing::warn!("Ignoring reserved provider option {key:?}");
        }
    }
    options
}

/// Settings of the profile enrichment request.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    pub userinfo_url: String,
    pub timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            userinfo_url: DEFAULT_USERINFO_URL.to_string(),
            timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }
}

impl EnrichmentConfig {
    /// Defaults overridden by `GOOGLE_OAUTH_USERINFO_URL` and
    /// `GOOGLE_OAUTH_ENRICHMENT_TIMEOUT_MS` when they are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(USERINFO_URL_ENV) {
            config.userinfo_url = url;
        }
        if let Some(ms) = lookup(ENRICHMENT_TIMEOUT_ENV) {
            let ms = ms
                .trim()
                .parse::<u64>()
                .with_context(|| format!("parsing {ENRICHMENT_TIMEOUT_ENV}={ms:?} as milliseconds"))?;
            config.timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }
}
