use std::sync::Arc;

use crate::login::continuation::ContinuationCell;
use crate::profile::ProfileEnricher;
use crate::types::TokenGrantEvent;

/// The fixed callback installed into every native client a binder builds.
///
/// It holds the continuation cell, not the continuations, so swapping the
/// caller's callbacks never requires rebuilding a client.
#[derive(Debug)]
pub struct CallbackTrampoline {
    continuations: Arc<ContinuationCell>,
    enricher: Arc<ProfileEnricher>,
}

impl CallbackTrampoline {
    pub fn new(continuations: Arc<ContinuationCell>, enricher: Arc<ProfileEnricher>) -> Arc<Self> {
        Arc::new(Self {
            continuations,
            enricher,
        })
    }

    /// Resolves one grant event through exactly one continuation.
    pub async fn dispatch(&self, event: TokenGrantEvent) {
        if let Some(err) = event.provider_error() {
            tracing::info!("Provider reported a login error: {err}");
            self.continuations.error(err.into()).await;
            return;
        }
        let payload = self.enricher.enrich(event).await;
        self.continuations.success(payload).await;
    }
}
