use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "WHELPS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

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
    pub storage: StorageConfig,
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// The external account and pets API the shell talks to.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    /// Absolute URL of the pets listing.
    pub pets_url: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
    /// How long a fetched pets listing is reused. 0 disables caching.
    #[serde(default = "default_pets_cache_seconds")]
    pub pets_cache_seconds: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    /// Substituted when a profile has no picture.
    #[serde(default = "default_avatar")]
    pub default_avatar: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_avatar: default_avatar(),
        }
    }
}

fn default_profile_path() -> String {
    "/api/auth/profile/".to_string()
}

fn default_login_path() -> String {
    "/api/auth/login/".to_string()
}

fn default_register_path() -> String {
    "/api/auth/register/".to_string()
}

fn default_timeout_in_ms() -> u64 {
    5000
}

fn default_pets_cache_seconds() -> u64 {
    60
}

fn default_avatar() -> String {
    "/images/default-profile.png".to_string()
}

/// Extract a `ConfigV1` from an already assembled figment.
pub fn parse_config(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load config from the YAML file (./config.yaml unless WHELPS_CONFIG is set),
/// with WHELPS_* environment variables layered on top.
pub fn load_config() -> ConfigV1 {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let figment = Figment::new()
        .merge(Yaml::file(&path))
        .merge(Env::prefixed("WHELPS_").ignore(&["CONFIG"]).split("__"));
    match parse_config(figment) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration from {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    const YAML: &str = r#"
version: "1.0.0"
bind_address: "127.0.0.1:8080"
logging:
  level: "debug"
  format: "json"
storage:
  type: "file"
  path: "/tmp/whelps-prefs.json"
api:
  base_url: "http://localhost:8000"
  pets_url: "http://localhost:3000/api/pets"
"#;

    #[test]
    fn test_parse_v1_with_defaults() {
        let config = parse_config(Figment::new().merge(Yaml::string(YAML))).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.api.profile_path, "/api/auth/profile/");
        assert_eq!(config.api.timeout_in_ms, 5000);
        assert_eq!(config.storage.token_key, "auth_token");
        assert_eq!(config.storage.favorites_key, "favorites");
        assert_eq!(config.session.default_avatar, "/images/default-profile.png");
        match config.storage.backend {
            StorageBackend::File(file) => {
                assert_eq!(file.path.to_str(), Some("/tmp/whelps-prefs.json"))
            }
            other => panic!("unexpected backend {:?}", other),
        }
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let yaml = YAML.replace("1.0.0", "9.9.9");
        assert!(parse_config(Figment::new().merge(Yaml::string(&yaml))).is_err());
    }

    #[test]
    fn test_memory_backend_with_quota() {
        let yaml = YAML.replace(
            "type: \"file\"\n  path: \"/tmp/whelps-prefs.json\"",
            "type: \"memory\"\n  quota_bytes: 64\n  favorites_key: \"favs\"",
        );
        let config = parse_config(Figment::new().merge(Yaml::string(&yaml))).unwrap();
        assert_eq!(config.storage.favorites_key, "favs");
        match config.storage.backend {
            StorageBackend::Memory(memory) => assert_eq!(memory.quota_bytes, Some(64)),
            other => panic!("unexpected backend {:?}", other),
        }
    }
}
