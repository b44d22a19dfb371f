pub mod binder;
pub mod continuation;
pub mod trampoline;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_utils;

use std::fmt;

use serde_json::{Map, Value};

pub use self::binder::{GoogleLogin, Reconciled, RebuildKey};
pub use self::continuation::{ContinuationPair, ErrorCallback, SuccessCallback};
pub use self::trampoline::CallbackTrampoline;
pub use self::trigger::{AuthCodeLogin, ImplicitLogin, LoginTrigger};

/// Options re-declared by the caller on every [`GoogleLogin::setup`].
#[derive(Clone, Default)]
pub struct LoginOptions {
    /// Extra scopes, space separated, requested after the baseline set.
    pub scope: String,
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<ErrorCallback>,
    /// Forwarded to the SDK factory as-is, minus the keys the binder owns.
    pub passthrough: Map<String, Value>,
}

impl LoginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(crate::types::EnrichedSuccessPayload) + Send + Sync + 'static,
    {
        self.on_success = Some(std::sync::Arc::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(crate::error::LoginError) + Send + Sync + 'static,
    {
        self.on_error = Some(std::sync::Arc::new(f));
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.passthrough.insert(key.into(), value.into());
        self
    }

    fn continuations(&self) -> ContinuationPair {
        ContinuationPair {
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl fmt::Debug for LoginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginOptions")
            .field("scope", &self.scope)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("passthrough", &self.passthrough)
            .finish()
    }
}
