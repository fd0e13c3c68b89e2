//! Server configuration read once from the environment at start-up.
//!
//! | Variable                    | Default                                        |
//! |-----------------------------|------------------------------------------------|
//! | `BACKEND_HOST`              | `0.0.0.0`                                      |
//! | `BACKEND_PORT`              | `5000`                                         |
//! | `BACKEND_JWT_SECRET`        | required                                       |
//! | `JWT_EXPIRATION_IN_SECONDS` | `604800`                                       |
//! | `CORS_ALLOWED_ORIGINS`      | `http://localhost:3000,http://127.0.0.1:3000`  |
//! | `LOG_FORMAT`                | `json` (or `text`)                             |

use std::env;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL_SECS};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Shape of the log lines written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable lines for local runs.
    Text,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(AppError::config("LOG_FORMAT must be 'json' or 'text'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub cors_allowed_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("BACKEND_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number"))?,
        };

        let jwt_secret =
            get("BACKEND_JWT_SECRET").ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;

        let token_ttl_secs = match get("JWT_EXPIRATION_IN_SECONDS") {
            None => DEFAULT_TOKEN_TTL_SECS,
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::config("JWT_EXPIRATION_IN_SECONDS must be a positive integer")
                })?,
        };

        let cors_allowed_origins = parse_origins(get("CORS_ALLOWED_ORIGINS").as_deref());

        let log_format = match get("LOG_FORMAT") {
            None => LogFormat::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl_secs,
            cors_allowed_origins,
            log_format,
        })
    }

    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes()).with_token_ttl(self.token_ttl_secs)
    }
}

/// Comma-separated origins; entries that are empty, `null` or not http(s)
/// are dropped. Falls back to localhost when nothing valid remains.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        origins
    }
}
