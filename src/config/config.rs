use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::guard::GuardConfig;
use super::identity::IdentityConfig;
use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl Config {
    pub fn into_latest(self) -> ConfigV1 {
        match self {
            Config::ConfigV1(c) => c,
        }
    }
}

/// Builds the figment used to read the configuration: the YAML file at `path`
/// with `ROUTEGATE_*` environment variables layered on top
/// (`ROUTEGATE_IDENTITY__SECRET_KEY` sets `identity.secret_key`).
pub fn figment(path: &str) -> Figment {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("ROUTEGATE_").split("__"))
}

/// Load config from the given YAML file plus environment overrides.
pub fn load_config(path: &str) -> Result<ConfigV1, figment::Error> {
    figment(path).extract::<Config>().map(Config::into_latest)
}

/// Render the JSON schema for the configuration.
pub fn schema_json() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    const MINIMAL: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8090
storage:
  enabled: true
  type: memory
"#;

    fn parse(yaml: &str) -> ConfigV1 {
        Figment::new()
            .merge(Yaml::string(yaml))
            .extract::<Config>()
            .expect("config should parse")
            .into_latest()
    }

    #[test]
    fn test_minimal_config_uses_guard_defaults() {
        let config = parse(MINIMAL);
        assert_eq!(config.guard.public_routes, vec!["/login", "/sign-up"]);
        assert_eq!(config.guard.login_path, "/login");
        assert_eq!(config.guard.dashboard_path, "/dashboard");
        assert_eq!(config.guard.redirect_key, "authRedirect");
        assert_eq!(
            config.guard.token_keys,
            vec!["clerk-session-token", "__clerk_client_jwt"]
        );
        assert_eq!(config.guard.poll_interval_ms, 100);
        assert_eq!(config.guard.timeout_ms, 3000);
        assert!(matches!(
            config.storage.backend,
            Some(StorageBackend::Memory)
        ));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_guard_overrides() {
        let config = parse(
            r#"
version: "1.0.0"
bind_address: 127.0.0.1:8090
guard:
  public_routes: ["/login", "/sign-up", "/about"]
  timeout_ms: 500
storage:
  enabled: false
"#,
        );
        assert_eq!(config.guard.public_routes.len(), 3);
        assert_eq!(config.guard.timeout_ms, 500);
        assert_eq!(config.guard.poll_interval_ms, 100);
        assert!(!config.storage.enabled);
        assert!(config.storage.backend.is_none());
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let result = Figment::new()
            .merge(Yaml::string(
                "version: \"9.9.9\"\nbind_address: x\nstorage:\n  enabled: false\n",
            ))
            .extract::<Config>();
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_renders() {
        let schema = schema_json().expect("schema should serialize");
        assert!(schema.contains("bind_address"));
        assert!(schema.contains("poll_interval_ms"));
    }
}
