use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::is_unique_violation;
use super::permission_repository::permission_model_to_domain;
use super::role_repository::role_model_to_domain;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Permission, Role, UpdateUserDto, User,
    UserRepositoryInterface,
};
use crate::infrastructure::crypto::password::hash_password_with_cost;
use crate::infrastructure::database::entities::{
    permission, role, role_permission, user, user_permission, user_role,
};
use crate::shared::{PaginatedResult, ResolvedLimit};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
    bcrypt_cost: u32,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    async fn role_ids_of(&self, user_id: &str) -> DomainResult<Vec<String>> {
        Ok(user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.role_id)
            .collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

fn unique_err(e: sea_orm::DbErr) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::Conflict("Username or email already exists".to_string())
    } else {
        e.into()
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let password_hash = hash_password_with_cost(&dto.password, self.bcrypt_cost)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let new_user = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(password_hash),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let model = new_user.insert(&self.db).await.map_err(unique_err)?;
        Ok(user_model_to_domain(model))
    }

    async fn list_users(
        &self,
        limit: ResolvedLimit,
        page: u64,
    ) -> DomainResult<PaginatedResult<User>> {
        let page = page.max(1);
        let query = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Username);

        let total = query.clone().count(&self.db).await?;
        let models = query
            .offset(limit.offset_for(page))
            .limit(limit.get())
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(user_model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();

        if let Some(username) = dto.username {
            active.username = Set(username);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(is_active) = dto.is_active {
            active.is_active = Set(is_active);
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(unique_err)?;
        Ok(Some(user_model_to_domain(updated)))
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        let Some(existing) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Err(DomainError::not_found("User", id));
        };

        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await?;
        Ok(())
    }

    async fn assign_role(&self, user_id: &str, role_id: &str) -> DomainResult<()> {
        let key = (user_id.to_string(), role_id.to_string());
        if user_role::Entity::find_by_id(key)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Ok(());
        }

        user_role::ActiveModel {
            user_id: Set(user_id.to_string()),
            role_id: Set(role_id.to_string()),
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }

    async fn remove_role(&self, user_id: &str, role_id: &str) -> DomainResult<()> {
        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.eq(role_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn give_permission_to(&self, user_id: &str, permission_id: &str) -> DomainResult<()> {
        let key = (user_id.to_string(), permission_id.to_string());
        if user_permission::Entity::find_by_id(key)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Ok(());
        }

        user_permission::ActiveModel {
            user_id: Set(user_id.to_string()),
            permission_id: Set(permission_id.to_string()),
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }

    async fn revoke_permission_to(&self, user_id: &str, permission_id: &str) -> DomainResult<()> {
        user_permission::Entity::delete_many()
            .filter(user_permission::Column::UserId.eq(user_id))
            .filter(user_permission::Column::PermissionId.eq(permission_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn roles_of(&self, user_id: &str) -> DomainResult<Vec<Role>> {
        let role_ids = self.role_ids_of(user_id).await?;
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = role::Entity::find()
            .filter(role::Column::Id.is_in(role_ids))
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(role_model_to_domain).collect())
    }

    async fn direct_permissions_of(&self, user_id: &str) -> DomainResult<Vec<Permission>> {
        let permission_ids: Vec<String> = user_permission::Entity::find()
            .filter(user_permission::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.permission_id)
            .collect();

        if permission_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = permission::Entity::find()
            .filter(permission::Column::Id.is_in(permission_ids))
            .order_by_asc(permission::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(permission_model_to_domain).collect())
    }

    async fn has_permission(&self, user_id: &str, permission: &str) -> DomainResult<bool> {
        let permission_ids: Vec<String> = permission::Entity::find()
            .filter(permission::Column::Name.eq(permission))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if permission_ids.is_empty() {
            return Ok(false);
        }

        let direct = user_permission::Entity::find()
            .filter(user_permission::Column::UserId.eq(user_id))
            .filter(user_permission::Column::PermissionId.is_in(permission_ids.clone()))
            .count(&self.db)
            .await?;
        if direct > 0 {
            return Ok(true);
        }

        let role_ids = self.role_ids_of(user_id).await?;
        if role_ids.is_empty() {
            return Ok(false);
        }

        let via_role = role_permission::Entity::find()
            .filter(role_permission::Column::RoleId.is_in(role_ids))
            .filter(role_permission::Column::PermissionId.is_in(permission_ids))
            .count(&self.db)
            .await?;

        Ok(via_role > 0)
    }
}
