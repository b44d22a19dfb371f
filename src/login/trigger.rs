use std::sync::Arc;

use crate::login::binder::BinderState;
use crate::sdk::NativeClientHandle;
use crate::types::{Flow, OverridableTokenClientConfig};

/// Starts an implicit-flow login on the binder's current token client.
#[derive(Clone)]
pub struct ImplicitLogin {
    state: Arc<BinderState>,
}

impl ImplicitLogin {
    pub(crate) fn new(state: Arc<BinderState>) -> Self {
        Self { state }
    }

    /// `overrides` apply to this request only.
    pub async fn login(&self, overrides: Option<OverridableTokenClientConfig>) {
        match self.state.current_handle().await {
            Some(NativeClientHandle::Token(client)) => {
                tracing::info!("Requesting access token");
                client.request_access_token(overrides);
            }
            Some(NativeClientHandle::Code(_)) => {
                self.state
                    .precondition_failed("the live client is a code client")
                    .await;
            }
            None => {
                self.state
                    .precondition_failed("the Google Identity Services client is not initialized")
                    .await;
            }
        }
    }
}

/// Starts an authorization-code login on the binder's current code client.
#[derive(Clone)]
pub struct AuthCodeLogin {
    state: Arc<BinderState>,
}

impl AuthCodeLogin {
    pub(crate) fn new(state: Arc<BinderState>) -> Self {
        Self { state }
    }

    pub async fn login(&self) {
        match self.state.current_handle().await {
            Some(NativeClientHandle::Code(client)) => {
                tracing::info!("Requesting authorization code");
                client.request_code();
            }
            Some(NativeClientHandle::Token(_)) => {
                self.state
                    .precondition_failed("the live client is a token client")
                    .await;
            }
            None => {
                self.state
                    .precondition_failed("the Google Identity Services client is not initialized")
                    .await;
            }
        }
    }
}

/// The trigger matching the binder's flow.
#[derive(Clone)]
pub enum LoginTrigger {
    Implicit(ImplicitLogin),
    AuthCode(AuthCodeLogin),
}

impl LoginTrigger {
    pub fn flow(&self) -> Flow {
        match self {
            LoginTrigger::Implicit(_) => Flow::Implicit,
            LoginTrigger::AuthCode(_) => Flow::AuthCode,
        }
    }

    pub fn into_implicit(self) -> Option<ImplicitLogin> {
        match self {
            LoginTrigger::Implicit(login) => Some(login),
            LoginTrigger::AuthCode(_) => None,
        }
    }

    pub fn into_auth_code(self) -> Option<AuthCodeLogin> {
        match self {
            LoginTrigger::AuthCode(login) => Some(login),
            LoginTrigger::Implicit(_) => None,
        }
    }
}
