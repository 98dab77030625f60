use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use std::time::Duration;
use tracing::info;

use crate::commands::DEFAULT_PRESIGN_EXPIRY;
use crate::storage::R2Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "prod")]
    Prod,
    #[serde(rename = "test")]
    Test,
    #[serde(rename = "pr")]
    Pr,
    #[serde(rename = "nightly")]
    Nightly,
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Prod => write!(f, "prod"),
            Env::Test => write!(f, "test"),
            Env::Pr => write!(f, "pr"),
            Env::Nightly => write!(f, "nightly"),
        }
    }
}

impl Env {
    /// Version label reported by the health check.
    ///
    /// - Pr: `pr:{number}` (from `PR_NUMBER` at build time)
    /// - Nightly: `nightly:{date}`
    /// - Local/Test: `main:{commit}`
    /// - Prod: `stable:{version}`
    pub fn version_label(&self) -> String {
        match self {
            Env::Pr => format!("pr:{}", option_env!("PR_NUMBER").unwrap_or("unknown")),
            Env::Nightly => {
                let date = env!("BUILD_DATE");
                let day = date.get(..10).unwrap_or(date);
                format!("nightly:{day}")
            }
            Env::Local | Env::Test => format!("main:{}", env!("BUILD_COMMIT")),
            Env::Prod => format!("stable:{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where buckets live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Gcs,
    R2,
    Memory,
}

impl Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Gcs => write!(f, "gcs"),
            StorageKind::R2 => write!(f, "r2"),
            StorageKind::Memory => write!(f, "memory"),
        }
    }
}

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    server_addr: String,
    port: u16,
    storage_backend: StorageKind,
    gcs_credentials: Option<String>,
    r2: Option<R2Config>,
    jwt_secret: String,
    presign_expiry: Duration,
    public_url_base: Option<String>,
    memory_buckets: Vec<String>,
}

// An intermediate struct for deserializing environment variables.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    server_addr: Option<String>,
    port: Option<u16>,
    storage_backend: Option<StorageKind>,
    gcs_credentials: Option<String>,
    cf_account_id: Option<String>,
    cf_access_key_id: Option<String>,
    cf_secret_access_key: Option<String>,
    jwt_secret: Option<String>,
    presign_expiry_secs: Option<u64>,
    public_url_base: Option<String>,
    // Comma separated
    memory_buckets: Option<String>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// Available to both unit and integration tests. Uses in-memory storage.
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Local,
            server_addr: "127.0.0.1".to_string(),
            port: 8080,
            storage_backend: StorageKind::Memory,
            gcs_credentials: None,
            r2: None,
            jwt_secret: "test-jwt-secret-key-for-local-development".to_string(),
            presign_expiry: DEFAULT_PRESIGN_EXPIRY,
            public_url_base: None,
            memory_buckets: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn new_for_test_with_env(env: Env) -> Self {
        Self {
            env,
            ..Self::new_for_test()
        }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self.env, Env::Prod)
    }

    pub fn storage_backend(&self) -> StorageKind {
        self.storage_backend
    }

    pub fn gcs_credentials(&self) -> Option<&str> {
        self.gcs_credentials.as_deref()
    }

    /// R2 credentials; always present when the backend is r2.
    pub fn r2(&self) -> Option<&R2Config> {
        self.r2.as_ref()
    }

    /// Get the secret used to verify bearer tokens.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn presign_expiry(&self) -> Duration {
        self.presign_expiry
    }

    pub fn public_url_base(&self) -> Option<&str> {
        self.public_url_base.as_deref()
    }

    /// Buckets created at startup when running on in-memory storage.
    pub fn memory_buckets(&self) -> &[String] {
        &self.memory_buckets
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            server_addr,
            port,
            storage_backend,
            gcs_credentials,
            cf_account_id,
            cf_access_key_id,
            cf_secret_access_key,
            jwt_secret,
            presign_expiry_secs,
            public_url_base,
            memory_buckets,
        } = raw_config;

        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    _ => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_string()
            }
        };

        let port = match port {
            Some(port) => port,
            None if matches!(env, Env::Local) => {
                info!("PORT not set, defaulting to 8080 for local environment");
                8080
            }
            None => anyhow::bail!("PORT must be set for {} environment", env),
        };

        let jwt_secret = match jwt_secret {
            Some(secret) => secret,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("JWT_SECRET not set, using default for {} environment", env);
                "default-jwt-secret-for-local-development-only".to_string()
            }
            None => anyhow::bail!("JWT_SECRET must be set for {} environment", env),
        };

        let storage_backend = match storage_backend {
            Some(kind) => kind,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("STORAGE_BACKEND not set, using memory for {} environment", env);
                StorageKind::Memory
            }
            None => anyhow::bail!("STORAGE_BACKEND must be set for {} environment", env),
        };

        let r2 = match (cf_account_id, cf_access_key_id, cf_secret_access_key) {
            (Some(account_id), Some(access_key_id), Some(secret_access_key)) => Some(R2Config {
                account_id,
                access_key_id,
                secret_access_key,
            }),
            (account_id, access_key_id, _) if storage_backend == StorageKind::R2 => {
                let missing = if account_id.is_none() {
                    "CF_ACCOUNT_ID"
                } else if access_key_id.is_none() {
                    "CF_ACCESS_KEY_ID"
                } else {
                    "CF_SECRET_ACCESS_KEY"
                };
                anyhow::bail!("{missing} must be set for the r2 storage backend");
            }
            _ => None,
        };
        if r2.is_some() {
            info!("R2 storage credentials validated for {} environment", env);
        }

        if storage_backend == StorageKind::Gcs && gcs_credentials.is_none() {
            if matches!(env, Env::Local | Env::Test) {
                info!("GCS_CREDENTIALS not set, relying on ambient credentials");
            } else {
                anyhow::bail!("GCS_CREDENTIALS must be set for {} environment", env);
            }
        }

        if storage_backend == StorageKind::Memory && matches!(env, Env::Prod) {
            anyhow::bail!("memory storage backend is not allowed for prod environment");
        }

        let presign_expiry = presign_expiry_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PRESIGN_EXPIRY);

        let memory_buckets = memory_buckets
            .map(|names| {
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            env,
            server_addr,
            port,
            storage_backend,
            gcs_credentials,
            r2,
            jwt_secret,
            presign_expiry,
            public_url_base,
            memory_buckets,
        })
    }
}
