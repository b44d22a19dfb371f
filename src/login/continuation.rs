use std::fmt;
use std::sync::Arc;

use async_lock::RwLock;

use crate::error::LoginError;
use crate::types::EnrichedSuccessPayload;

pub type SuccessCallback = Arc<dyn Fn(EnrichedSuccessPayload) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(LoginError) + Send + Sync>;

/// The caller's latest continuations.
#[derive(Clone, Default)]
pub struct ContinuationPair {
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl fmt::Debug for ContinuationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuationPair")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Shared slot read at dispatch time, so late callbacks see the current pair.
#[derive(Debug, Default)]
pub struct ContinuationCell {
    pair: RwLock<ContinuationPair>,
}

impl ContinuationCell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn replace(&self, pair: ContinuationPair) {
        *self.pair.write().await = pair;
    }

    pub async fn success(&self, payload: EnrichedSuccessPayload) {
        // Clone out of the lock; the callback may re-enter the binder.
        let on_success = self.pair.read().await.on_success.clone();
        match on_success {
            Some(on_success) => on_success(payload),
            None => tracing::debug!("No success continuation set, dropping payload"),
        }
    }

    pub async fn error(&self, err: LoginError) {
        let on_error = self.pair.read().await.on_error.clone();
        match on_error {
            Some(on_error) => on_error(err),
            None => tracing::debug!("No error continuation set, dropping {err}"),
        }
    }
}
