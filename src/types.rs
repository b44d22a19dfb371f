use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which native entry point a binder drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flow {
    /// Token client, `requestAccessToken`.
    #[default]
    Implicit,
    /// Code client, `requestCode`.
    AuthCode,
}

/// Configuration handed to the SDK factory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfiguration {
    pub client_id: String,
    /// Effective scope, baseline included.
    pub scope: String,
    /// Provider passthrough options (`prompt`, `hint`, `ux_mode`, ...).
    #[serde(flatten)]
    pub extra_options: Map<String, Value>,
}

impl ClientConfiguration {
    /// Shallow merge of per-request overrides over this configuration.
    ///
    /// Returns a new value; the standing configuration is left untouched.
    pub fn merged_with(&self, overrides: &OverridableTokenClientConfig) -> ClientConfiguration {
        let mut merged = self.clone();
        let Ok(Value::Object(fields)) = serde_json::to_value(overrides) else {
            return merged;
        };
        for (key, value) in fields {
            match key.as_str() {
                "scope" => {
                    if let Value::String(scope) = value {
                        merged.scope = scope;
                    }
                }
                "client_id" => {
                    if let Value::String(client_id) = value {
                        merged.client_id = client_id;
                    }
                }
                _ => {
                    merged.extra_options.insert(key, value);
                }
            }
        }
        merged
    }
}

/// Per-request overrides accepted by `requestAccessToken`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverridableTokenClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_granted_scopes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_serial_consent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Raw payload delivered by a native client to its callback.
///
/// Token clients fill `access_token`, code clients fill `code`; both may carry
/// the error triple instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenGrantEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,
    /// Fields this crate does not model, kept as delivered.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenGrantEvent {
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// The error triple, when the provider reported a failure.
    pub fn provider_error(&self) -> Option<ProviderError> {
        self.error.as_ref().map(|error| ProviderError {
            error: error.clone(),
            error_description: self.error_description.clone(),
            error_uri: self.error_uri.clone(),
        })
    }

    /// Grant fields as a JSON object, error fields excluded.
    pub fn into_success_fields(self) -> Map<String, Value> {
        let mut fields = match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        for key in ["error", "error_description", "error_uri"] {
            fields.remove(key);
        }
        fields
    }
}

/// Failure reported by the provider inside a grant event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(description) = &self.error_description {
            write!(f, " - {description}")?;
        }
        if let Some(uri) = &self.error_uri {
            write!(f, " ({uri})")?;
        }
        Ok(())
    }
}

/// Success payload: profile fields overlaid with the grant fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichedSuccessPayload(Map<String, Value>);

impl EnrichedSuccessPayload {
    /// Profile fields are the base; grant fields win on collision.
    pub fn merge(profile: Map<String, Value>, grant: TokenGrantEvent) -> Self {
        let mut merged = profile;
        merged.extend(grant.into_success_fields());
        Self(merged)
    }

    /// Un-enriched payload.
    pub fn from_grant(grant: TokenGrantEvent) -> Self {
        Self(grant.into_success_fields())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.get_str("access_token")
    }

    pub fn code(&self) -> Option<&str> {
        self.get_str("code")
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn verified_email(&self) -> Option<bool> {
        self.0.get("verified_email").and_then(Value::as_bool)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
