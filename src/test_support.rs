//! In-memory SQLite fixtures shared by the unit and feature tests.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::application::seed_defaults;
use crate::config::AppConfig;
use crate::domain::{CreateUserDto, Permission, RepositoryProvider, Role, User};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

/// Cheapest bcrypt cost; production keeps the default.
const TEST_BCRYPT_COST: u32 = 4;

pub struct TestDb {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    pub admin: Option<User>,
}

impl TestDb {
    /// Migrated, empty database.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Migrated database with default permissions, roles and admin.
    pub async fn seeded() -> Self {
        Self::seeded_with(AppConfig::default()).await
    }

    pub async fn seeded_with(config: AppConfig) -> Self {
        let mut db = Self::with_config(config).await;
        let admin = seed_defaults(db.repos.as_ref(), &db.config)
            .await
            .expect("seed defaults");
        db.admin = Some(admin);
        db
    }

    async fn with_config(config: AppConfig) -> Self {
        let db = init_database(&DatabaseConfig::in_memory())
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");

        let repos: Arc<dyn RepositoryProvider> = Arc::new(
            SeaOrmRepositoryProvider::new(db.clone()).with_bcrypt_cost(TEST_BCRYPT_COST),
        );

        Self {
            db,
            repos,
            config,
            admin: None,
        }
    }

    pub fn admin(&self) -> &User {
        self.admin.as_ref().expect("database was not seeded")
    }

    pub async fn create_user(&self, username: &str) -> User {
        self.repos
            .users()
            .create_user(CreateUserDto {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password: "password1".to_string(),
            })
            .await
            .expect("create user")
    }

    pub async fn role_named(&self, name: &str) -> Role {
        self.repos
            .roles()
            .find_by_name(name, &self.config.authorization.guard_name)
            .await
            .expect("query role")
            .expect("role exists")
    }

    pub async fn permission_named(&self, name: &str) -> Permission {
        self.repos
            .permissions()
            .find_by_name(name, &self.config.authorization.guard_name)
            .await
            .expect("query permission")
            .expect("permission exists")
    }
}
