use std::net::SocketAddr;

use jsonwebtoken::Algorithm;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ALGORITHM: &str = "HS256";
const DEFAULT_TOKEN_TTL_MINUTES: u32 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Token signing settings. Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub signing_secret: String,
    pub signing_algorithm: Algorithm,
    pub token_ttl_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url,
            bind_addr,
            auth: AuthConfig::from_lookup(&lookup)?,
        })
    }
}

impl AuthConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_secret = lookup("TOKEN_SECRET_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("TOKEN_SECRET_KEY"))?;

        let algorithm = lookup("TOKEN_ALGORITHM").unwrap_or_else(|| DEFAULT_ALGORITHM.to_string());
        let signing_algorithm = parse_algorithm(&algorithm)?;

        let token_ttl_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "ACCESS_TOKEN_EXPIRE_MINUTES",
                        reason: format!("expected a positive integer, got {:?}", raw),
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        Ok(Self {
            signing_secret,
            signing_algorithm,
            token_ttl_minutes,
        })
    }
}

// Tokens are signed with a shared secret, so only the HMAC family applies.
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::Invalid {
            name: "TOKEN_ALGORITHM",
            reason: format!("unsupported algorithm {:?}, expected HS256, HS384 or HS512", other),
        }),
    }
}
