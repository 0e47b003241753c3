// common/src/config.rs
use config::{Config as ConfigFile, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Central configuration for the gateway service
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub gateway_addr: String,
    pub identity_strategy: IdentityStrategyKind,

    pub backend: BackendConfig,
    pub session: SessionConfig,
}

/// Which identity derivation policy the gateway runs with.
/// Picked once at startup; the two strategies must never be mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityStrategyKind {
    /// Random identity persisted in a caller-held session cookie
    Session,
    /// Deterministic hash of MAC address and host name
    MachineHash,
}

/// Where the backend chat service lives and how long we wait for it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub cleanup_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_addr: "127.0.0.1:8081".to_string(),
            identity_strategy: IdentityStrategyKind::Session,
            backend: BackendConfig {
                base_url: "http://localhost:4343".to_string(),
                timeout_secs: 10,
            },
            session: SessionConfig {
                cookie_name: "relay_session".to_string(),
                ttl_seconds: 86400,
                cleanup_interval_secs: 3600,
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        // Get the run mode, defaulting to "development"
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Locate the config directory
        let config_dir = env::var("CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Check if we're in the project root or a subcrate
                let mut path = PathBuf::from("./config");
                if !path.exists() {
                    path = PathBuf::from("../config");
                }
                path
            });

        tracing::info!("Loading configuration from {}", config_dir.display());
        tracing::info!("Using run mode: {}", run_mode);

        let config = ConfigFile::builder()
            // Start with defaults
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add environment specific config
            .add_source(File::from(config_dir.join(format!("{}.toml", run_mode))).required(false))
            // Add a local config file for local overrides
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment variables with prefix "APP"
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load from environment variables directly (backward compatibility)
    pub fn from_env() -> Self {
        match Self::load() {
            Ok(config) => {
                tracing::info!("Configuration loaded from files and environment");
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load configuration from files: {}", e);
                tracing::info!("Falling back to environment variables only");

                let defaults = Self::default();

                let gateway_addr = env::var("GATEWAY_ADDR").unwrap_or(defaults.gateway_addr);

                let identity_strategy = match env::var("IDENTITY_STRATEGY").as_deref() {
                    Ok("machine-hash") => IdentityStrategyKind::MachineHash,
                    _ => IdentityStrategyKind::Session,
                };

                let base_url = env::var("BACKEND_BASE_URL").unwrap_or(defaults.backend.base_url);

                let timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(defaults.backend.timeout_secs);

                let cookie_name =
                    env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.session.cookie_name);

                let ttl_seconds = env::var("SESSION_TTL_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok())
                    .unwrap_or(defaults.session.ttl_seconds);

                let cleanup_interval_secs = env::var("SESSION_CLEANUP_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(defaults.session.cleanup_interval_secs);

                Self {
                    gateway_addr,
                    identity_strategy,
                    backend: BackendConfig {
                        base_url,
                        timeout_secs,
                    },
                    session: SessionConfig {
                        cookie_name,
                        ttl_seconds,
                        cleanup_interval_secs,
                    },
                }
            }
        }
    }
}
