use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Keys for the external identity provider.
///
/// The publishable key is handed to the client shell through
/// `/runtime-config`; the secret key stays in the process. Both are usually
/// supplied through `ROUTEGATE_IDENTITY__PUBLISHABLE_KEY` and
/// `ROUTEGATE_IDENTITY__SECRET_KEY`.
#[derive(Deserialize, Serialize, Clone, Default, JsonSchema)]
pub struct IdentityConfig {
    #[serde(default)]
    pub publishable_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("publishable_key", &self.publishable_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The part of the runtime configuration that may be exposed to clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicRuntimeConfig {
    pub publishable_key: Option<String>,
}

impl IdentityConfig {
    pub fn public(&self) -> PublicRuntimeConfig {
        PublicRuntimeConfig {
            publishable_key: self.publishable_key.clone(),
        }
    }
}
