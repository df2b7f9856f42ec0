use crate::config::GuardConfig;

/// Which paths are public and where redirects go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    pub public_routes: Vec<String>,
    pub login_path: String,
    pub dashboard_path: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        RoutePolicy::from(&GuardConfig::default())
    }
}

impl From<&GuardConfig> for RoutePolicy {
    fn from(config: &GuardConfig) -> Self {
        Self {
            public_routes: config.public_routes.clone(),
            login_path: config.login_path.clone(),
            dashboard_path: config.dashboard_path.clone(),
        }
    }
}

impl RoutePolicy {
    /// Public routes are matched exactly; `/login/extra` is private.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_routes.iter().any(|route| route == path)
    }
}

/// Result of probing client storage for a cached session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenProbe {
    Present,
    Absent,
    /// Storage could not be read; counts as absent.
    Unreadable,
}

/// What the guard knows about the session when it decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvidence {
    /// The identity SDK finished loading.
    Sdk { signed_in: bool },
    /// The SDK did not load in time; fall back to the cached token.
    CachedToken(TokenProbe),
}

impl SessionEvidence {
    pub fn is_signed_in(&self) -> bool {
        match self {
            SessionEvidence::Sdk { signed_in } => *signed_in,
            SessionEvidence::CachedToken(probe) => *probe == TokenProbe::Present,
        }
    }
}

/// The single terminal action of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Allow,
    RedirectTo { location: String },
    /// Store `persisted` as the pending redirect target, then go to `location`.
    PersistThenRedirect { location: String, persisted: String },
}

impl Action {
    pub fn location(&self) -> Option<&str> {
        match self {
            Action::Allow => None,
            Action::RedirectTo { location } | Action::PersistThenRedirect { location, .. } => {
                Some(location)
            }
        }
    }
}

/// The guard's decision table. Pure: no storage, no clock, no SDK.
///
/// | signed in | public target | action                    |
/// |-----------|---------------|---------------------------|
/// | no        | no            | persist target, to login  |
/// | yes       | yes           | to dashboard              |
/// | -         | -             | allow                     |
///
/// A cached token counts as signed in; a missing or unreadable one does not.
pub fn decide(evidence: SessionEvidence, target: &str, policy: &RoutePolicy) -> Action {
    let public = policy.is_public(target);
    match (evidence.is_signed_in(), public) {
        (false, false) => Action::PersistThenRedirect {
            location: policy.login_path.clone(),
            persisted: target.to_string(),
        },
        (true, true) => Action::RedirectTo {
            location: policy.dashboard_path.clone(),
        },
        _ => Action::Allow,
    }
}
