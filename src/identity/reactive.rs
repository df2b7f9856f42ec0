use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::debug;

use super::base::{AuthState, AuthStateProvider, WaitPolicy};

/// Identity state pushed in by the SDK bridge and observed by the guard.
///
/// Backed by a `watch` channel so waiting for the load flag is an event
/// rather than a poll.
pub struct ReactiveAuthState {
    sender: watch::Sender<AuthState>,
}

impl ReactiveAuthState {
    pub fn new(initial: AuthState) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Publishes a new state from the SDK. Waiters wake when the value changes.
    pub fn publish(&self, state: AuthState) {
        self.sender.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            debug!(
                "Identity state changed: loaded {} -> {}, signed_in {} -> {}",
                current.is_loaded, state.is_loaded, current.is_signed_in, state.is_signed_in
            );
            *current = state;
            true
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }
}

impl Default for ReactiveAuthState {
    fn default() -> Self {
        Self::new(AuthState::unloaded())
    }
}

#[async_trait]
impl AuthStateProvider for ReactiveAuthState {
    fn get_name(&self) -> &str {
        "reactive"
    }

    fn is_loaded(&self) -> bool {
        self.sender.borrow().is_loaded
    }

    fn is_signed_in(&self) -> bool {
        self.sender.borrow().is_signed_in
    }

    fn snapshot(&self) -> AuthState {
        *self.sender.borrow()
    }

    async fn wait_until_loaded(&self, policy: &WaitPolicy) -> bool {
        let mut receiver = self.subscribe();
        let loaded = async move {
            loop {
                if receiver.borrow_and_update().is_loaded {
                    return true;
                }
                // the sender lives as long as self, so this only fails on teardown
                if receiver.changed().await.is_err() {
                    return false;
                }
            }
        };
        timeout(policy.timeout, loaded).await.unwrap_or(false)
    }
}
