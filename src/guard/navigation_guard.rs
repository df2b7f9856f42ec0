use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::policy::{decide, Action, RoutePolicy, SessionEvidence, TokenProbe};
use super::sequencer::{NavigationSequencer, NavigationTicket};
use crate::config::GuardConfig;
use crate::identity::{AuthStateProvider, WaitPolicy};
use crate::storage::ClientStorage;
use crate::utils::log_throttle::should_emit;

const STORAGE_WARN_INTERVAL: Duration = Duration::from_secs(60);

/// Whether the transition runs in a client with inspectable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPass {
    #[default]
    Client,
    /// A server-side render pass; the guard has no authority here.
    Server,
}

/// An attempted route transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub target: String,
    pub render: RenderPass,
}

impl Navigation {
    pub fn client(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            render: RenderPass::Client,
        }
    }

    pub fn server(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            render: RenderPass::Server,
        }
    }

    /// The route path the policy matches on: the target without its query
    /// string or fragment.
    pub fn path(&self) -> &str {
        match self.target.find(|c: char| c == '?' || c == '#') {
            Some(end) => &self.target[..end],
            None => &self.target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Resolved(Action),
    /// A newer navigation started while this one was waiting. No side
    /// effects were performed and the caller should drop the transition.
    Superseded,
}

/// Decides every route transition against the identity SDK, falling back to
/// the cached session token when the SDK is slow to load.
pub struct NavigationGuard {
    policy: RoutePolicy,
    wait: WaitPolicy,
    redirect_key: String,
    token_keys: Vec<String>,
    identity: Arc<dyn AuthStateProvider>,
    storage: Arc<dyn ClientStorage>,
    sequencer: NavigationSequencer,
}

impl NavigationGuard {
    pub fn new(
        config: &GuardConfig,
        identity: Arc<dyn AuthStateProvider>,
        storage: Arc<dyn ClientStorage>,
    ) -> Self {
        info!(
            "Creating navigation guard (identity '{}', storage '{}', public routes {:?})",
            identity.get_name(),
            storage.get_name(),
            config.public_routes
        );
        Self {
            policy: RoutePolicy::from(config),
            wait: WaitPolicy::from(config),
            redirect_key: config.redirect_key.clone(),
            token_keys: config.token_keys.clone(),
            identity,
            storage,
            sequencer: NavigationSequencer::new(),
        }
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    pub fn redirect_key(&self) -> &str {
        &self.redirect_key
    }

    /// Runs the guard for one transition. Never fails: storage problems
    /// degrade to "no token" and a failed write of the pending target still
    /// redirects.
    pub async fn check(&self, navigation: &Navigation) -> GuardOutcome {
        if navigation.render == RenderPass::Server {
            debug!(
                "Server render pass for '{}'; skipping auth checks",
                navigation.target
            );
            return GuardOutcome::Resolved(Action::Allow);
        }

        let path = navigation.path();
        let mut ticket = self.sequencer.begin();
        let Some(evidence) = self.resolve_evidence(&mut ticket, path).await else {
            return GuardOutcome::Superseded;
        };

        let action = decide(evidence, path, &self.policy);
        if !ticket.is_current() {
            info!(
                "Navigation #{} to '{}' superseded before it resolved",
                ticket.id(),
                navigation.target
            );
            return GuardOutcome::Superseded;
        }

        if let Action::PersistThenRedirect { persisted, .. } = &action {
            self.persist_redirect_target(persisted).await;
        }

        info!(
            "Navigation #{} to '{}' resolved with {:?} ({:?})",
            ticket.id(),
            navigation.target,
            action,
            evidence
        );
        GuardOutcome::Resolved(action)
    }

    async fn resolve_evidence(
        &self,
        ticket: &mut NavigationTicket,
        target: &str,
    ) -> Option<SessionEvidence> {
        if !self.identity.is_loaded() {
            debug!(
                "Identity SDK not loaded; waiting up to {:?} before deciding '{}'",
                self.wait.timeout, target
            );
            let id = ticket.id();
            let loaded = tokio::select! {
                loaded = self.identity.wait_until_loaded(&self.wait) => loaded,
                _ = ticket.superseded() => {
                    info!("Navigation #{} to '{}' superseded while waiting", id, target);
                    return None;
                }
            };

            if !loaded {
                warn!(
                    "Identity SDK did not load within {:?}; using cached session token",
                    self.wait.timeout
                );
                return Some(SessionEvidence::CachedToken(self.probe_token().await));
            }
        }

        Some(SessionEvidence::Sdk {
            signed_in: self.identity.is_signed_in(),
        })
    }

    async fn probe_token(&self) -> TokenProbe {
        for key in &self.token_keys {
            match self.storage.get_item(key).await {
                Ok(Some(token)) if !token.is_empty() => {
                    debug!("Found cached session token under '{}'", key);
                    return TokenProbe::Present;
                }
                Ok(_) => {}
                Err(e) => {
                    if let Some(suppressed) = should_emit("guard.storage_read", STORAGE_WARN_INTERVAL) {
                        warn!(
                            suppressed,
                            "Could not read session token '{}' from client storage: {}", key, e
                        );
                    }
                    return TokenProbe::Unreadable;
                }
            }
        }
        TokenProbe::Absent
    }

    async fn persist_redirect_target(&self, target: &str) {
        match self.storage.set_item(&self.redirect_key, target).await {
            Ok(()) => debug!("Saved pending redirect target '{}'", target),
            Err(e) => {
                if let Some(suppressed) = should_emit("guard.storage_write", STORAGE_WARN_INTERVAL) {
                    warn!(
                        suppressed,
                        "Could not save pending redirect target '{}': {}", target, e
                    );
                }
            }
        }
    }
}
