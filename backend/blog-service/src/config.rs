//! Configuration for blog-service
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)

use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration. `None` runs against the in-memory store.
    pub database: Option<DatabaseConfig>,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Image upload configuration
    pub uploads: UploadConfig,

    /// GraphQL configuration
    pub graphql: GraphQLConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory accepted images are written to
    pub images_dir: PathBuf,
    /// Hard cap on a single upload
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphQLConfig {
    /// Serve GraphiQL on GET /graphql
    pub playground: bool,
    /// Enable introspection
    pub introspection: bool,
    /// Max query depth
    pub max_depth: usize,
    /// Max query complexity
    pub max_complexity: usize,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            playground: true,
            introspection: true,
            max_depth: 10,
            max_complexity: 1000,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let jwt = Self::jwt_from_env()?;

        let database = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(DatabaseConfig {
                url,
                max_connections: env_or("DB_MAX_CONNECTIONS", 10),
                min_connections: env_or("DB_MIN_CONNECTIONS", 2),
                acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 10),
                connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT_SECS", 5),
            }),
            _ => {
                warn!("DATABASE_URL not set, using the in-memory store (data is lost on restart)");
                None
            }
        };

        let uploads = UploadConfig {
            images_dir: env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| UploadConfig::default().images_dir),
            max_bytes: env_or("UPLOAD_MAX_BYTES", UploadConfig::default().max_bytes),
        };

        let defaults = GraphQLConfig::default();

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or("SERVER_PORT", 8080),
                workers: env_or("SERVER_WORKERS", num_cpus::get()),
            },
            database,
            jwt,
            uploads,
            graphql: GraphQLConfig {
                playground: env_or("GRAPHQL_PLAYGROUND", defaults.playground),
                introspection: env_or("GRAPHQL_INTROSPECTION", defaults.introspection),
                max_depth: env_or("GRAPHQL_MAX_DEPTH", defaults.max_depth),
                max_complexity: env_or("GRAPHQL_MAX_COMPLEXITY", defaults.max_complexity),
            },
        })
    }

    /// Load JWT configuration from environment variables
    ///
    /// `JWT_SECRET` is required and has no fallback value.
    fn jwt_from_env() -> Result<JwtConfig> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        if secret.len() < crypto_core::jwt::MIN_SECRET_BYTES {
            bail!(
                "JWT_SECRET too short: need at least {} bytes",
                crypto_core::jwt::MIN_SECRET_BYTES
            );
        }

        let expiry_seconds = env::var("JWT_EXPIRY_SECONDS")
            .unwrap_or_else(|_| crypto_core::jwt::DEFAULT_TOKEN_EXPIRY_SECONDS.to_string())
            .parse()
            .context("Invalid JWT_EXPIRY_SECONDS")?;

        info!(expiry_seconds, "JWT configuration loaded from environment");

        Ok(JwtConfig {
            secret,
            expiry_seconds,
        })
    }
}
