use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, value: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: value.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_become_database_errors() {
        let err: DomainError = sea_orm::DbErr::Custom("connection reset".into()).into();
        assert!(matches!(err, DomainError::Database(_)));
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = DomainError::Validation("The email has already been taken.".into());
        assert_eq!(err.to_string(), "The email has already been taken.");
    }

    #[test]
    fn client_facing_messages_have_no_prefix() {
        let err = DomainError::Unauthorized("Invalid credentials".into());
        assert_eq!(err.to_string(), "Invalid credentials");
        let err = DomainError::Forbidden("Default roles cannot be deleted.".into());
        assert_eq!(err.to_string(), "Default roles cannot be deleted.");
    }
}
