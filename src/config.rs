//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/authz-service/config.toml`,
//! overridable with `AUTHZ_CONFIG`). Every section falls back to defaults so
//! a partial file is enough.

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::{ConfigError, PaginationConfig};

/// Environment variable pointing at the config file.
pub const CONFIG_PATH_ENV: &str = "AUTHZ_CONFIG";

/// Default config location: `<config dir>/authz-service/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("authz-service")
        .join("config.toml")
}

/// Config path from `AUTHZ_CONFIG`, or the default location.
pub fn config_path_from_env() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub security: SecuritySection,
    pub pagination: PaginationSection,
    pub authorization: AuthorizationSection,
    pub admin: AdminSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Database URL (e.g., "sqlite://./authz.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./authz.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

/// Page-size settings for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSection {
    /// Let clients pick the page size with `?limit=`
    pub skip_pagination: bool,
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PaginationSection {
    fn default() -> Self {
        Self {
            skip_pagination: true,
            default_limit: 15,
            max_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationSection {
    /// Guard every role and permission belongs to
    pub guard_name: String,
    /// Roles that can be neither renamed nor deleted
    pub default_roles: Vec<String>,
}

impl AuthorizationSection {
    pub fn is_default_role(&self, name: &str) -> bool {
        self.default_roles.iter().any(|role| role == name)
    }
}

impl Default for AuthorizationSection {
    fn default() -> Self {
        Self {
            guard_name: "api".to_string(),
            default_roles: vec!["system".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            email: "system@authz.local".to_string(),
            username: "system".to_string(),
            password: "secret123".to_string(),
        }
    }
}

impl AppConfig {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pagination;
        if p.default_limit == 0 || p.max_limit == 0 {
            return Err(ConfigError::Invalid(
                "pagination limits must be greater than zero".into(),
            ));
        }
        if p.max_limit > i64::MAX as u64 {
            return Err(ConfigError::Invalid(format!(
                "pagination.max_limit ({}) exceeds {}",
                p.max_limit,
                i64::MAX
            )));
        }
        if p.default_limit > p.max_limit {
            return Err(ConfigError::Invalid(format!(
                "pagination.default_limit ({}) exceeds pagination.max_limit ({})",
                p.default_limit, p.max_limit
            )));
        }
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.authorization.guard_name.is_empty() {
            return Err(ConfigError::Invalid(
                "authorization.guard_name is empty".into(),
            ));
        }
        Ok(())
    }

    pub fn pagination_config(&self) -> Result<PaginationConfig, ConfigError> {
        let positive = |value: u64, key: &str| {
            NonZeroU64::new(value)
                .ok_or_else(|| ConfigError::Invalid(format!("pagination.{} must be > 0", key)))
        };
        Ok(PaginationConfig::new(
            self.pagination.skip_pagination,
            positive(self.pagination.default_limit, "default_limit")?,
            positive(self.pagination.max_limit, "max_limit")?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [pagination]
            skip_pagination = false
            max_limit = 50
            "#,
        )
        .unwrap();

        assert!(!config.pagination.skip_pagination);
        assert_eq!(config.pagination.default_limit, 15);
        assert_eq!(config.pagination.max_limit, 50);
        assert_eq!(config.server.api_port, 8080);
        assert_eq!(config.authorization.guard_name, "api");
        config.validate().unwrap();
    }

    #[test]
    fn pagination_config_carries_section_values() {
        let mut config = AppConfig::default();
        config.pagination.default_limit = 20;
        config.pagination.max_limit = 60;

        let pagination = config.pagination_config().unwrap();
        assert!(pagination.skip_pagination);
        assert_eq!(pagination.default_limit.get(), 20);
        assert_eq!(pagination.max_limit.get(), 60);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut config = AppConfig::default();
        config.pagination.default_limit = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.pagination_config().is_err());
    }

    #[test]
    fn default_above_max_is_rejected() {
        let mut config = AppConfig::default();
        config.pagination.default_limit = 200;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unbindable_max_is_rejected() {
        let mut config = AppConfig::default();
        config.pagination.max_limit = u64::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/authz/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn system_role_is_default() {
        let config = AppConfig::default();
        assert!(config.authorization.is_default_role("system"));
        assert!(!config.authorization.is_default_role("editor"));
    }
}
