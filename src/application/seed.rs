//! Startup seeding
//!
//! Creates the built-in permissions, the default roles (holding every
//! built-in permission) and the configured admin account. Safe to run on
//! every start: existing records are reused.

use tracing::info;

use crate::config::AppConfig;
use crate::domain::{permission_names, CreateUserDto, DomainResult, RepositoryProvider, User};

pub async fn seed_defaults(repos: &dyn RepositoryProvider, config: &AppConfig) -> DomainResult<User> {
    let guard = config.authorization.guard_name.as_str();

    let mut permission_ids = Vec::with_capacity(permission_names::ALL.len());
    for name in permission_names::ALL {
        let permission = match repos.permissions().find_by_name(name, guard).await? {
            Some(existing) => existing,
            None => {
                info!(permission = name, "Seeding permission");
                repos.permissions().create_permission(name, guard).await?
            }
        };
        permission_ids.push(permission.id);
    }

    let mut default_role_ids = Vec::with_capacity(config.authorization.default_roles.len());
    for name in &config.authorization.default_roles {
        let role = match repos.roles().find_by_name(name, guard).await? {
            Some(existing) => existing,
            None => {
                info!(role = %name, "Seeding default role");
                repos.roles().create_role(name, guard).await?
            }
        };
        for permission_id in &permission_ids {
            repos.roles().give_permission_to(&role.id, permission_id).await?;
        }
        default_role_ids.push(role.id);
    }

    let admin = match repos.users().get_user_by_email(&config.admin.email).await? {
        Some(existing) => existing,
        None => {
            info!("Creating default admin user...");
            let admin = repos
                .users()
                .create_user(CreateUserDto {
                    username: config.admin.username.clone(),
                    email: config.admin.email.clone(),
                    password: config.admin.password.clone(),
                })
                .await?;
            info!("Default admin created: {}", admin.email);
            info!("Please change the admin password immediately!");
            admin
        }
    };

    for role_id in &default_role_ids {
        repos.users().assign_role(&admin.id, role_id).await?;
    }

    Ok(admin)
}
