use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// `None` runs the service from the content tree alone.
    pub database: Option<DatabaseConfig>,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("DATA_DIR")
            .unwrap_or_else(|| "./data".to_string())
            .into();

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5);

                let acquire_timeout_secs: u64 = lookup("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5);

                let run_migrations = lookup("RUN_MIGRATIONS")
                    .map(|v| v != "false" && v != "0")
                    .unwrap_or(true);

                DatabaseConfig {
                    url,
                    max_connections,
                    acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                    run_migrations,
                }
            });

        let bind_addr = lookup("BIND_ADDR")
            .and_then(|v| match v.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!(value = %v, error = %e, "invalid BIND_ADDR, using default");
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

        if database.is_some() {
            tracing::info!("database configured, content tree is the fallback");
        } else {
            tracing::info!("DATABASE_URL not set, serving from the content tree only");
        }

        Self {
            data_dir,
            database,
            bind_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.database.is_none());
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_database_settings() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/kenpo"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "2"),
            ("RUN_MIGRATIONS", "false"),
            ("DATA_DIR", "/srv/kenpo"),
        ]);
        let database = config.database.expect("database configured");
        assert_eq!(database.url, "postgres://localhost/kenpo");
        assert_eq!(database.max_connections, 12);
        assert_eq!(database.acquire_timeout, Duration::from_secs(2));
        assert!(!database.run_migrations);
        assert_eq!(config.data_dir, PathBuf::from("/srv/kenpo"));
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/kenpo"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
            ("BIND_ADDR", "not an address"),
        ]);
        assert_eq!(config.database.map(|d| d.max_connections), Some(5));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_empty_database_url_means_file_only() {
        let config = config_from(&[("DATABASE_URL", "  ")]);
        assert!(config.database.is_none());
    }
}
