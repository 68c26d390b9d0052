//! Configuration module for environment variables and application settings
//!
//! Loaded once in `main` and handed to the components that need it; nothing
//! reads the environment after startup.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::auth::guard::RouteGuardConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub guard: RouteGuardConfig,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret shared by issuance and verification
    pub jwt_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig").field("jwt_secret", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API with credentials
    pub cors_origins: Vec<String>,
    /// Exported dashboard served behind the route guard
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let jwt_secret = non_empty("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let database_url = non_empty("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let defaults = RouteGuardConfig::default();
        let guard = RouteGuardConfig {
            protected_prefixes: non_empty("GUARD_PROTECTED_PREFIXES")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.protected_prefixes),
            login_path: non_empty("GUARD_LOGIN_PATH").unwrap_or(defaults.login_path),
            landing_path: non_empty("GUARD_LANDING_PATH").unwrap_or(defaults.landing_path),
        };

        Ok(Self {
            auth: AuthConfig { jwt_secret },

            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    non_empty("DATABASE_MAX_CONNECTIONS"),
                    16,
                )?,
            },

            server: ServerConfig {
                host: non_empty("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or("PORT", non_empty("PORT"), 3000)?,
                cors_origins: non_empty("CORS_ORIGINS")
                    .map(|raw| split_list(&raw))
                    .unwrap_or_else(|| vec!["http://localhost:3001".to_string()]),
                static_dir: non_empty("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./public")),
            },

            guard,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DATABASE_URL: (&str, &str) = ("DATABASE_URL", "postgres://localhost/ngo");

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = load(&[DATABASE_URL]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let err = load(&[("JWT_SECRET", "   "), DATABASE_URL]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("JWT_SECRET", "s3cret"), DATABASE_URL]).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 16);
        assert_eq!(config.guard, RouteGuardConfig::default());
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3001"]);
    }

    #[test]
    fn guard_overrides_are_parsed() {
        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            DATABASE_URL,
            ("GUARD_PROTECTED_PREFIXES", "/dashboard, /settings ,"),
            ("GUARD_LOGIN_PATH", "/entrar"),
        ])
        .unwrap();

        assert_eq!(config.guard.protected_prefixes, vec!["/dashboard", "/settings"]);
        assert_eq!(config.guard.login_path, "/entrar");
        assert_eq!(config.guard.landing_path, "/dashboard/ongs");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = load(&[("JWT_SECRET", "s3cret"), DATABASE_URL, ("PORT", "eighty")]).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let config = load(&[("JWT_SECRET", "s3cret"), DATABASE_URL]).unwrap();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
