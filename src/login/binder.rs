use std::sync::Arc;

use async_lock::RwLock;

use crate::config::{effective_scope, sanitize_passthrough};
use crate::error::LoginError;
use crate::login::LoginOptions;
use crate::login::continuation::ContinuationCell;
use crate::login::trampoline::CallbackTrampoline;
use crate::login::trigger::{AuthCodeLogin, ImplicitLogin, LoginTrigger};
use crate::profile::ProfileEnricher;
use crate::provider::ProviderContext;
use crate::sdk::{GoogleIdentitySdk, NativeClientHandle};
use crate::types::{ClientConfiguration, Flow};

/// Inputs whose change forces a new native client.
///
/// Continuations and passthrough options are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildKey {
    pub client_id: String,
    pub script_ready: bool,
    pub scope: String,
}

/// Outcome of [`GoogleLogin::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// Same key as the previous attempt, nothing touched.
    Unchanged,
    /// SDK not loaded yet; no client exists.
    Waiting,
    /// A new native client replaced the previous one.
    Rebuilt,
}

#[derive(Debug, Default)]
struct ClientSlot {
    key: Option<RebuildKey>,
    config: Option<ClientConfiguration>,
    handle: Option<NativeClientHandle>,
}

pub(crate) struct BinderState {
    flow: Flow,
    sdk: Arc<dyn GoogleIdentitySdk>,
    continuations: Arc<ContinuationCell>,
    trampoline: Arc<CallbackTrampoline>,
    slot: RwLock<ClientSlot>,
}

impl BinderState {
    pub(crate) async fn current_handle(&self) -> Option<NativeClientHandle> {
        self.slot.read().await.handle.clone()
    }

    pub(crate) async fn precondition_failed(&self, reason: &str) {
        tracing::warn!("Login requested without a usable client: {reason}");
        self.continuations
            .error(LoginError::Precondition(reason.to_string()))
            .await;
    }
}

/// Binds the provider SDK to a caller's continuations.
///
/// One instance owns one native client at a time. Cloning shares the binder.
#[derive(Clone)]
pub struct GoogleLogin {
    state: Arc<BinderState>,
}

impl GoogleLogin {
    pub fn new(flow: Flow, sdk: Arc<dyn GoogleIdentitySdk>, enricher: ProfileEnricher) -> Self {
        let continuations = ContinuationCell::new();
        let trampoline = CallbackTrampoline::new(continuations.clone(), Arc::new(enricher));
        Self {
            state: Arc::new(BinderState {
                flow,
                sdk,
                continuations,
                trampoline,
                slot: RwLock::new(ClientSlot::default()),
            }),
        }
    }

    pub fn implicit(sdk: Arc<dyn GoogleIdentitySdk>, enricher: ProfileEnricher) -> Self {
        Self::new(Flow::Implicit, sdk, enricher)
    }

    pub fn auth_code(sdk: Arc<dyn GoogleIdentitySdk>, enricher: ProfileEnricher) -> Self {
        Self::new(Flow::AuthCode, sdk, enricher)
    }

    pub fn flow(&self) -> Flow {
        self.state.flow
    }

    /// Re-declares the caller's options and returns the login trigger.
    ///
    /// Continuations are swapped in place on every call. The native client is
    /// only rebuilt when [`RebuildKey`] changed; a failed rebuild is reported
    /// to the error continuation.
    pub async fn setup(&self, ctx: &dyn ProviderContext, options: LoginOptions) -> LoginTrigger {
        self.state
            .continuations
            .replace(options.continuations())
            .await;
        if let Err(e) = self.reconcile(ctx, &options).await {
            self.state.continuations.error(e).await;
        }
        self.trigger()
    }

    /// Rebuilds the native client if the rebuild key changed since the last attempt.
    ///
    /// A failed attempt still records its key, so it is retried only once the
    /// configuration changes again.
    pub async fn reconcile(
        &self,
        ctx: &dyn ProviderContext,
        options: &LoginOptions,
    ) -> Result<Reconciled, LoginError> {
        let key = RebuildKey {
            client_id: ctx.client_id(),
            script_ready: ctx.script_loaded_successfully(),
            scope: options.scope.clone(),
        };

        let mut slot = self.state.slot.write().await;
        if slot.key.as_ref() == Some(&key) {
            return Ok(Reconciled::Unchanged);
        }
        tracing::debug!("Rebuild key changed: {:?} -> {:?}", slot.key, key);
        slot.key = Some(key.clone());
        slot.config = None;
        slot.handle = None;

        if !key.script_ready {
            tracing::debug!("SDK not loaded yet, deferring client creation");
            return Ok(Reconciled::Waiting);
        }

        let config = ClientConfiguration {
            client_id: key.client_id,
            scope: effective_scope(&key.scope),
            extra_options: sanitize_passthrough(options.passthrough.clone()),
        };
        let callback = self.state.trampoline.clone();
        let handle = match self.state.flow {
            Flow::Implicit => self
                .state
                .sdk
                .init_token_client(config.clone(), callback)
                .map(NativeClientHandle::Token),
            Flow::AuthCode => self
                .state
                .sdk
                .init_code_client(config.clone(), callback)
                .map(NativeClientHandle::Code),
        }
        .map_err(|e| {
            tracing::error!("Failed to initialize the {:?} client: {e:#}", self.state.flow);
            LoginError::ClientInitialization(format!("{e:#}"))
        })?;

        tracing::info!(
            "Installed {:?} client for {} with scope {:?}",
            self.state.flow,
            config.client_id,
            config.scope
        );
        slot.config = Some(config);
        slot.handle = Some(handle);
        Ok(Reconciled::Rebuilt)
    }

    /// The standing configuration of the live client, if any.
    pub async fn configuration(&self) -> Option<ClientConfiguration> {
        self.state.slot.read().await.config.clone()
    }

    pub fn trigger(&self) -> LoginTrigger {
        match self.state.flow {
            Flow::Implicit => LoginTrigger::Implicit(ImplicitLogin::new(self.state.clone())),
            Flow::AuthCode => LoginTrigger::AuthCode(AuthCodeLogin::new(self.state.clone())),
        }
    }
}
