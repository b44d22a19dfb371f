use std::sync::atomic::{AtomicBool, Ordering};

/// What a login binder reads from the surrounding provider.
pub trait ProviderContext: Send + Sync {
    fn client_id(&self) -> String;

    /// Whether the SDK finished loading. Once true, stays true.
    fn script_loaded_successfully(&self) -> bool;
}

/// Provider state owned by the host that loads the Google Identity Services SDK.
#[derive(Debug)]
pub struct GoogleOAuthProvider {
    client_id: String,
    script_loaded: AtomicBool,
}

impl GoogleOAuthProvider {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            script_loaded: AtomicBool::new(false),
        }
    }

    /// Called by the script loader once the SDK is available.
    pub fn mark_script_loaded(&self) {
        if !self.script_loaded.swap(true, Ordering::AcqRel) {
            tracing::debug!("Google Identity Services SDK loaded");
        }
    }
}

impl ProviderContext for GoogleOAuthProvider {
    fn client_id(&self) -> String {
        self.client_id.clone()
    }

    fn script_loaded_successfully(&self) -> bool {
        self.script_loaded.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_loaded_is_monotonic() {
        let provider = GoogleOAuthProvider::new("client");
        assert!(!provider.script_loaded_successfully());
        provider.mark_script_loaded();
        provider.mark_script_loaded();
        assert!(provider.script_loaded_successfully());
        assert_eq!(provider.client_id(), "client");
    }
}
