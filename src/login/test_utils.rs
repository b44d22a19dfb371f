//! Test doubles for the SDK seam and the profile endpoint.

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use serde_json::{Map, Value};

use crate::error::LoginError;
use crate::login::continuation::{ErrorCallback, SuccessCallback};
use crate::login::trampoline::CallbackTrampoline;
use crate::profile::ProfileFetcher;
use crate::sdk::{CodeClient, GoogleIdentitySdk, TokenClient};
use crate::types::{
    ClientConfiguration, EnrichedSuccessPayload, Flow, OverridableTokenClientConfig,
    TokenGrantEvent,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
    AccessToken(Option<OverridableTokenClientConfig>),
    Code,
}

type RequestLog = Arc<Mutex<Vec<Request>>>;

struct FakeClient {
    flow: Flow,
    config: ClientConfiguration,
    callback: Arc<CallbackTrampoline>,
    requests: RequestLog,
}

#[derive(Default)]
struct FakeSdkState {
    clients: Vec<FakeClient>,
    fail_next: Option<String>,
}

/// Records every client it builds and lets tests fire grants through them.
#[derive(Default)]
pub(crate) struct FakeSdk {
    state: Mutex<FakeSdkState>,
    all_requests: RequestLog,
}

impl FakeSdk {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn fail_next(&self, reason: &str) {
        self.lock().fail_next = Some(reason.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeSdkState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn build(
        &self,
        flow: Flow,
        config: ClientConfiguration,
        callback: Arc<CallbackTrampoline>,
    ) -> anyhow::Result<RequestLog> {
        let mut state = self.lock();
        if let Some(reason) = state.fail_next.take() {
            return Err(anyhow!(reason));
        }
        let requests = RequestLog::default();
        state.clients.push(FakeClient {
            flow,
            config,
            callback,
            requests: requests.clone(),
        });
        Ok(requests)
    }

    pub(crate) fn init_count(&self) -> usize {
        self.lock().clients.len()
    }

    pub(crate) fn init_flows(&self) -> Vec<Flow> {
        self.lock().clients.iter().map(|c| c.flow).collect()
    }

    pub(crate) fn last_config(&self) -> Option<ClientConfiguration> {
        self.lock().clients.last().map(|c| c.config.clone())
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.all_requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub(crate) fn requests_on(&self, index: usize) -> Vec<Request> {
        self.lock()
            .clients
            .get(index)
            .and_then(|c| c.requests.lock().ok().map(|r| r.clone()))
            .unwrap_or_default()
    }

    /// Delivers a grant through the most recently built client.
    pub(crate) async fn fire(&self, event: TokenGrantEvent) {
        let index = self.init_count().checked_sub(1).expect("no client built");
        self.fire_on(index, event).await;
    }

    /// Delivers a grant through the `index`-th client ever built.
    pub(crate) async fn fire_on(&self, index: usize, event: TokenGrantEvent) {
        let callback = self
            .lock()
            .clients
            .get(index)
            .map(|c| c.callback.clone())
            .expect("client index out of range");
        callback.dispatch(event).await;
    }
}

struct FakeTokenClient {
    config: ClientConfiguration,
    requests: RequestLog,
    all_requests: RequestLog,
}

impl TokenClient for FakeTokenClient {
    fn request_access_token(&self, overrides: Option<OverridableTokenClientConfig>) {
        if let Some(overrides) = &overrides {
            let effective = self.config.merged_with(overrides);
            tracing::debug!("Fake token request with scope {:?}", effective.scope);
        }
        let request = Request::AccessToken(overrides);
        self.requests.lock().unwrap().push(request.clone());
        self.all_requests.lock().unwrap().push(request);
    }
}

struct FakeCodeClient {
    requests: RequestLog,
    all_requests: RequestLog,
}

impl CodeClient for FakeCodeClient {
    fn request_code(&self) {
        self.requests.lock().unwrap().push(Request::Code);
        self.all_requests.lock().unwrap().push(Request::Code);
    }
}

impl GoogleIdentitySdk for FakeSdk {
    fn init_token_client(
        &self,
        config: ClientConfiguration,
        callback: Arc<CallbackTrampoline>,
    ) -> anyhow::Result<Arc<dyn TokenClient>> {
        let requests = self.build(Flow::Implicit, config.clone(), callback)?;
        Ok(Arc::new(FakeTokenClient {
            config,
            requests,
            all_requests: self.all_requests.clone(),
        }))
    }

    fn init_code_client(
        &self,
        config: ClientConfiguration,
        callback: Arc<CallbackTrampoline>,
    ) -> anyhow::Result<Arc<dyn CodeClient>> {
        let requests = self.build(Flow::AuthCode, config, callback)?;
        Ok(Arc::new(FakeCodeClient {
            requests,
            all_requests: self.all_requests.clone(),
        }))
    }
}

/// Collects whatever reaches the continuations it hands out.
#[derive(Default)]
pub(crate) struct Recorder {
    successes: Mutex<Vec<EnrichedSuccessPayload>>,
    errors: Mutex<Vec<LoginError>>,
}

impl Recorder {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn success_callback(self: &Arc<Self>) -> SuccessCallback {
        let recorder = self.clone();
        Arc::new(move |payload: EnrichedSuccessPayload| recorder.successes.lock().unwrap().push(payload))
    }

    pub(crate) fn error_callback(self: &Arc<Self>) -> ErrorCallback {
        let recorder = self.clone();
        Arc::new(move |err: LoginError| recorder.errors.lock().unwrap().push(err))
    }

    pub(crate) fn successes(&self) -> Vec<EnrichedSuccessPayload> {
        self.successes.lock().unwrap().clone()
    }

    pub(crate) fn errors(&self) -> Vec<LoginError> {
        self.errors.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone)]
enum StubMode {
    Profile(Map<String, Value>),
    Failing(String),
    Hanging,
}

/// Profile fetcher with a canned outcome.
#[derive(Debug, Clone)]
pub(crate) struct StubFetcher {
    mode: StubMode,
    tokens: Arc<async_lock::Mutex<Vec<String>>>,
}

impl StubFetcher {
    fn with_mode(mode: StubMode) -> Self {
        Self {
            mode,
            tokens: Arc::default(),
        }
    }

    pub(crate) fn profile(profile: Value) -> Self {
        let profile = profile.as_object().cloned().unwrap_or_default();
        Self::with_mode(StubMode::Profile(profile))
    }

    pub(crate) fn failing(reason: &str) -> Self {
        Self::with_mode(StubMode::Failing(reason.to_string()))
    }

    pub(crate) fn hanging() -> Self {
        Self::with_mode(StubMode::Hanging)
    }

    /// Access tokens the fetcher was asked about.
    pub(crate) async fn tokens(&self) -> Vec<String> {
        self.tokens.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl ProfileFetcher for StubFetcher {
    async fn fetch(&self, access_token: &str) -> Result<Map<String, Value>, LoginError> {
        self.tokens.lock().await.push(access_token.to_string());
        match &self.mode {
            StubMode::Profile(profile) => Ok(profile.clone()),
            StubMode::Failing(reason) => Err(LoginError::ProfileFetch(reason.clone())),
            StubMode::Hanging => std::future::pending().await,
        }
    }
}
