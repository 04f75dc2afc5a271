use std::str::FromStr;

use axum::http::HeaderValue;

/// Default comma-separated CORS allow-list.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://fada2020.github.io";

/// Default `RUST_LOG` filter when none is set.
pub const DEFAULT_LOG_FILTER: &str = "folio_api=debug,folio_db=info,tower_http=debug";

/// A configuration variable that failed to parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which [`folio_db::PortfolioStore`] backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Postgres,
    Memory,
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "mock" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except
/// `DATABASE_URL`, which postgres mode needs at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store_mode: StoreMode,
    /// Only read in postgres mode.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Insert the sample portfolio on startup (default: `true`).
    pub seed_sample_data: bool,
    /// Take the client ip from `X-Forwarded-For` / `X-Real-IP`
    /// instead of the socket peer (default: `false`).
    pub trust_proxy_headers: bool,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
            request_timeout_secs: 30,
            store_mode: StoreMode::Postgres,
            database_url: None,
            db_max_connections: 10,
            seed_sample_data: true,
            trust_proxy_headers: false,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                            |
    /// |------------------------|----------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                          |
    /// | `PORT`                 | `8080`                                             |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,https://fada2020.github.io` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                               |
    /// | `STORE_MODE`           | `postgres`                                         |
    /// | `DATABASE_URL`         | (none)                                             |
    /// | `DB_MAX_CONNECTIONS`   | `10`                                               |
    /// | `SEED_SAMPLE_DATA`     | `true`                                             |
    /// | `TRUST_PROXY_HEADERS`  | `false`                                            |
    /// | `LOG_FORMAT`           | `text`                                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let cors_origins = get("CORS_ORIGINS")
            .map(|v| split_origins(&v))
            .unwrap_or(defaults.cors_origins);
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: bad.clone(),
                reason: "not a valid header value".into(),
            });
        }

        let request_timeout_secs =
            parse_or(&get, "REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                value: "0".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(&get, "PORT", defaults.port)?,
            cors_origins,
            request_timeout_secs,
            store_mode: parse_or(&get, "STORE_MODE", defaults.store_mode)?,
            database_url: get("DATABASE_URL"),
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            seed_sample_data: parse_flag(&get, "SEED_SAMPLE_DATA", defaults.seed_sample_data)?,
            trust_proxy_headers: parse_flag(
                &get,
                "TRUST_PROXY_HEADERS",
                defaults.trust_proxy_headers,
            )?,
            log_format: parse_or(&get, "LOG_FORMAT", defaults.log_format)?,
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(var) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
        },
    }
}

fn parse_flag(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = get(var) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected a boolean".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn memory_mode_needs_no_database() {
        let config = load(&[("STORE_MODE", "memory")]).unwrap();
        assert_eq!(config.store_mode, StoreMode::Memory);
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.seed_sample_data);
        assert!(!config.trust_proxy_headers);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "https://fada2020.github.io"]
        );
    }

    #[test]
    fn postgres_is_the_default_mode() {
        let config = load(&[]).unwrap();
        assert_eq!(config.store_mode, StoreMode::Postgres);
        assert_eq!(config.database_url, None);

        let config = load(&[("DATABASE_URL", "postgres://localhost/folio")]).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/folio"));
        assert_eq!(config.db_max_connections, 10);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("STORE_MODE", "memory"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", " https://a.example , ,https://b.example"),
            ("SEED_SAMPLE_DATA", "false"),
            ("TRUST_PROXY_HEADERS", "1"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert!(!config.seed_sample_data);
        assert!(config.trust_proxy_headers);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_matches!(
            load(&[("STORE_MODE", "memory"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("STORE_MODE", "redis")]),
            Err(ConfigError::Invalid { var: "STORE_MODE", .. })
        );
        assert_matches!(
            load(&[("STORE_MODE", "memory"), ("CORS_ORIGINS", "https://ok.example,bad\norigin")]),
            Err(ConfigError::Invalid { var: "CORS_ORIGINS", .. })
        );
        assert_matches!(
            load(&[("STORE_MODE", "memory"), ("SEED_SAMPLE_DATA", "maybe")]),
            Err(ConfigError::Invalid { var: "SEED_SAMPLE_DATA", .. })
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert_matches!(
            load(&[("STORE_MODE", "memory"), ("REQUEST_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                ..
            })
        );
        let config = load(&[("STORE_MODE", "memory"), ("REQUEST_TIMEOUT_SECS", "1")]).unwrap();
        assert_eq!(config.request_timeout_secs, 1);
    }
}
