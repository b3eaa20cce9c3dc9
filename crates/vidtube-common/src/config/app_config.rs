//! Application configuration
//!
//! Everything is read from environment variables (a `.env` file is honoured).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
    pub migrations_dir: PathBuf,
}

/// Token signing configuration. Access and refresh tokens use separate secrets.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Upload and media configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Where multipart files land before being uploaded
    pub upload_dir: PathBuf,
    /// Where uploaded media is kept and served from
    pub media_dir: PathBuf,
    /// Public URL prefix of `media_dir`
    pub media_base_url: String,
    pub max_file_size_mb: u32,
}

impl StorageConfig {
    /// Request body limit in bytes
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

const DEFAULT_APP_NAME: &str = "vidtube";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_MIN_CONNECTIONS: u32 = 5;
const DEFAULT_MIGRATIONS_DIR: &str = "./migrations";
const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 86_400; // 1 day
const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 864_000; // 10 days
const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;
const DEFAULT_BURST: u32 = 50;
const DEFAULT_UPLOAD_DIR: &str = "./public/temp";
const DEFAULT_MEDIA_DIR: &str = "./public/media";
const DEFAULT_MAX_FILE_SIZE_MB: u32 = 10;

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let port: u16 = vars.parsed("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?;

        let jwt = JwtConfig {
            access_token_secret: vars.required("ACCESS_TOKEN_SECRET")?,
            refresh_token_secret: vars.required("REFRESH_TOKEN_SECRET")?,
            access_token_expiry: vars
                .parsed("ACCESS_TOKEN_EXPIRY")?
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
            refresh_token_expiry: vars
                .parsed("REFRESH_TOKEN_EXPIRY")?
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRY),
        };
        if jwt.access_token_secret == jwt.refresh_token_secret {
            return Err(ConfigError::InvalidValue(
                "REFRESH_TOKEN_SECRET",
                "must differ from ACCESS_TOKEN_SECRET".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
                env: vars
                    .get("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars
                    .parsed("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                min_connections: vars
                    .parsed("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or(DEFAULT_MIN_CONNECTIONS),
                run_migrations: vars.parsed("DATABASE_RUN_MIGRATIONS")?.unwrap_or(true),
                migrations_dir: vars
                    .get("MIGRATIONS_DIR")
                    .unwrap_or_else(|| DEFAULT_MIGRATIONS_DIR.to_string())
                    .into(),
            },
            jwt,
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or(DEFAULT_REQUESTS_PER_SECOND),
                burst: vars.parsed("RATE_LIMIT_BURST")?.unwrap_or(DEFAULT_BURST),
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                upload_dir: vars
                    .get("UPLOAD_DIR")
                    .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                    .into(),
                media_dir: vars
                    .get("MEDIA_DIR")
                    .unwrap_or_else(|| DEFAULT_MEDIA_DIR.to_string())
                    .into(),
                media_base_url: vars
                    .get("MEDIA_BASE_URL")
                    .unwrap_or_else(|| format!("http://localhost:{port}/media"))
                    .trim_end_matches('/')
                    .to_string(),
                max_file_size_mb: vars
                    .parsed("MAX_FILE_SIZE_MB")?
                    .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB),
            },
        })
    }
}

/// Typed access to the key lookup. Blank values count as unset.
struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parsed<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
            })
            .transpose()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
