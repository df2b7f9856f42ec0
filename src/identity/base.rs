use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::config::GuardConfig;

/// The {loaded, signed-in} pair owned by the identity SDK.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthState {
    pub is_loaded: bool,
    pub is_signed_in: bool,
}

impl AuthState {
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn signed_in() -> Self {
        Self {
            is_loaded: true,
            is_signed_in: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            is_loaded: true,
            is_signed_in: false,
        }
    }
}

/// How long the guard waits for the SDK to finish loading, and how often a
/// provider without a change notification is polled meanwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            timeout: Duration::from_millis(3000),
        }
    }
}

impl From<&GuardConfig> for WaitPolicy {
    fn from(config: &GuardConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            timeout: config.timeout(),
        }
    }
}

/// Read-only view of the identity SDK. The guard never mutates it.
#[async_trait]
pub trait AuthStateProvider: Send + Sync {
    fn get_name(&self) -> &str;
    fn is_loaded(&self) -> bool;
    fn is_signed_in(&self) -> bool;

    fn snapshot(&self) -> AuthState {
        AuthState {
            is_loaded: self.is_loaded(),
            is_signed_in: self.is_signed_in(),
        }
    }

    /// Resolves to `true` once the SDK reports loaded, or `false` when
    /// `policy.timeout` elapses first.
    ///
    /// The default polls `is_loaded` every `policy.poll_interval`. Providers
    /// that can observe the load event directly should override it.
    async fn wait_until_loaded(&self, policy: &WaitPolicy) -> bool {
        if self.is_loaded() {
            return true;
        }
        let poll = async {
            let mut ticker = interval(policy.poll_interval.max(Duration::from_millis(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if self.is_loaded() {
                    break;
                }
            }
        };
        match timeout(policy.timeout, poll).await {
            Ok(()) => true,
            Err(_) => self.is_loaded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// A provider that only supports polling, so the default wait is used.
    struct PolledProvider {
        loaded: AtomicBool,
        polls: AtomicUsize,
    }

    #[async_trait]
    impl AuthStateProvider for PolledProvider {
        fn get_name(&self) -> &str {
            "polled"
        }

        fn is_loaded(&self) -> bool {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.loaded.load(Ordering::SeqCst)
        }

        fn is_signed_in(&self) -> bool {
            false
        }
    }

    fn polled(loaded: bool) -> Arc<PolledProvider> {
        Arc::new(PolledProvider {
            loaded: AtomicBool::new(loaded),
            polls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_wait_returns_immediately_when_loaded() {
        let provider = polled(true);
        assert!(provider.wait_until_loaded(&WaitPolicy::default()).await);
        assert_eq!(provider.polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let provider = polled(false);
        let policy = WaitPolicy {
            poll_interval: Duration::from_millis(5),
            timeout: Duration::from_millis(40),
        };
        let started = tokio::time::Instant::now();
        assert!(!provider.wait_until_loaded(&policy).await);
        assert!(started.elapsed() >= Duration::from_millis(40));
        assert!(provider.polls.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_wait_sees_late_load() {
        let provider = polled(false);
        let policy = WaitPolicy {
            poll_interval: Duration::from_millis(5),
            timeout: Duration::from_secs(2),
        };

        let flipper = provider.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            flipper.loaded.store(true, Ordering::SeqCst);
        });

        assert!(provider.wait_until_loaded(&policy).await);
    }

    #[test]
    fn test_wait_policy_from_guard_config() {
        let policy = WaitPolicy::from(&GuardConfig::default());
        assert_eq!(policy, WaitPolicy::default());
    }
}
