//! Seam to the provider's client-side SDK (`google.accounts.oauth2`).
//!
//! The SDK is injected as a [`GoogleIdentitySdk`] trait object, so a binder
//! never reaches for global state and tests can substitute a double.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::login::CallbackTrampoline;
use crate::types::{ClientConfiguration, OverridableTokenClientConfig};

/// Client factories exposed by the SDK.
///
/// Every client built here receives the same `callback`; the SDK invokes
/// [`CallbackTrampoline::dispatch`] once per finished interaction.
pub trait GoogleIdentitySdk: Send + Sync {
    /// `initTokenClient`.
    fn init_token_client(
        &self,
        config: ClientConfiguration,
        callback: Arc<CallbackTrampoline>,
    ) -> Result<Arc<dyn TokenClient>>;

    /// `initCodeClient`.
    fn init_code_client(
        &self,
        config: ClientConfiguration,
        callback: Arc<CallbackTrampoline>,
    ) -> Result<Arc<dyn CodeClient>>;
}

/// Native token client. Requests are fire-and-forget; results arrive through the callback.
pub trait TokenClient: Send + Sync {
    fn request_access_token(&self, overrides: Option<OverridableTokenClientConfig>);
}

/// Native code client.
pub trait CodeClient: Send + Sync {
    fn request_code(&self);
}

/// The one live native client of a binder.
#[derive(Clone)]
pub enum NativeClientHandle {
    Token(Arc<dyn TokenClient>),
    Code(Arc<dyn CodeClient>),
}

impl fmt::Debug for NativeClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeClientHandle::Token(_) => f.write_str("NativeClientHandle::Token"),
            NativeClientHandle::Code(_) => f.write_str("NativeClientHandle::Code"),
        }
    }
}
