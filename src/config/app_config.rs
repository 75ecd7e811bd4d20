use std::env;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_DRIVER: &str = "sqlite";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("Unsupported database driver: {0:?} (only \"sqlite\" is available)")]
    UnsupportedDriver(String),
}

/// Runtime settings, read once at startup and handed to the constructors that need them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_driver: String,
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Build the configuration from `DB_DRIVER`, `DATABASE_URL`, `HOST`, `PORT`
    /// and `DB_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_driver = non_empty_var("DB_DRIVER")
            .unwrap_or_else(|| DEFAULT_DRIVER.to_string())
            .to_ascii_lowercase();
        if database_driver != DEFAULT_DRIVER {
            return Err(ConfigError::UnsupportedDriver(database_driver));
        }

        let database_url =
            non_empty_var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host = parse_var::<IpAddr>("HOST", DEFAULT_HOST.parse().ok())?;
        let port = parse_var::<u16>("PORT", Some(DEFAULT_PORT))?;
        let max_connections =
            parse_var::<u32>("DB_MAX_CONNECTIONS", Some(DEFAULT_MAX_CONNECTIONS))?;

        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            database_driver,
            database_url,
            host,
            port,
            max_connections,
        })
    }

    /// Settings for a database URL with every other field at its default.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Config {
            database_driver: DEFAULT_DRIVER.to_string(),
            database_url: database_url.into(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: std::str::FromStr>(
    key: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match non_empty_var(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => default.ok_or(ConfigError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 5] = ["DB_DRIVER", "DATABASE_URL", "HOST", "PORT", "DB_MAX_CONNECTIONS"];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_apply_when_only_url_is_set() {
        clear_env();
        env::set_var("DATABASE_URL", "sqlite://data/users.db");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.database_driver, "sqlite");
        assert_eq!(config.database_url, "sqlite://data/users.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8080");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_database_url() {
        clear_env();

        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    #[serial]
    fn test_unsupported_driver_is_rejected() {
        clear_env();
        env::set_var("DB_DRIVER", "postgres");
        env::set_var("DATABASE_URL", "postgres://localhost/users");

        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::UnsupportedDriver(ref d)) if d == "postgres"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port() {
        clear_env();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("PORT", "eighty");

        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_custom_host_and_port() {
        clear_env();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("HOST", "127.0.0.1");
        env::set_var("PORT", "3000");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:3000");

        clear_env();
    }
}
