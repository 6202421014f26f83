use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::is_unique_violation;
use super::permission_repository::permission_model_to_domain;
use crate::domain::{DomainError, DomainResult, Permission, Role, RoleRepositoryInterface};
use crate::infrastructure::database::entities::{permission, role, role_permission, user_role};
use crate::shared::{PaginatedResult, ResolvedLimit};

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        guard_name: model.guard_name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn duplicate_role(name: &str, guard_name: &str) -> DomainError {
    DomainError::Conflict(format!(
        "A role `{}` already exists for guard `{}`.",
        name, guard_name
    ))
}

#[async_trait]
impl RoleRepositoryInterface for SeaOrmRoleRepository {
    async fn list_roles(
        &self,
        limit: ResolvedLimit,
        page: u64,
    ) -> DomainResult<PaginatedResult<Role>> {
        let page = page.max(1);
        let query = role::Entity::find()
            .order_by_asc(role::Column::CreatedAt)
            .order_by_asc(role::Column::Name);

        let total = query.clone().count(&self.db).await?;
        let models = query
            .offset(limit.offset_for(page))
            .limit(limit.get())
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(role_model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(role_model_to_domain))
    }

    async fn find_by_name(&self, name: &str, guard_name: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .filter(role::Column::GuardName.eq(guard_name))
            .one(&self.db)
            .await?;
        Ok(model.map(role_model_to_domain))
    }

    async fn create_role(&self, name: &str, guard_name: &str) -> DomainResult<Role> {
        let now = Utc::now();
        let new_role = role::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            guard_name: Set(guard_name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_role.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_role(name, guard_name)
            } else {
                e.into()
            }
        })?;

        Ok(role_model_to_domain(model))
    }

    async fn rename_role(&self, id: &str, name: &str) -> DomainResult<Option<Role>> {
        let Some(existing) = role::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let guard_name = existing.guard_name.clone();
        let mut active: role::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_role(name, &guard_name)
            } else {
                e.into()
            }
        })?;

        Ok(Some(role_model_to_domain(updated)))
    }

    async fn delete_role(&self, id: &str) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::RoleId.eq(id))
            .exec(&txn)
            .await?;
        role_permission::Entity::delete_many()
            .filter(role_permission::Column::RoleId.eq(id))
            .exec(&txn)
            .await?;
        let result = role::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::not_found("Role", id));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn give_permission_to(&self, role_id: &str, permission_id: &str) -> DomainResult<()> {
        let key = (role_id.to_string(), permission_id.to_string());
        if role_permission::Entity::find_by_id(key)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Ok(());
        }

        role_permission::ActiveModel {
            role_id: Set(role_id.to_string()),
            permission_id: Set(permission_id.to_string()),
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }

    async fn revoke_permission_to(&self, role_id: &str, permission_id: &str) -> DomainResult<()> {
        role_permission::Entity::delete_many()
            .filter(role_permission::Column::RoleId.eq(role_id))
            .filter(role_permission::Column::PermissionId.eq(permission_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn permissions_of(&self, role_id: &str) -> DomainResult<Vec<Permission>> {
        let permission_ids: Vec<String> = role_permission::Entity::find()
            .filter(role_permission::Column::RoleId.eq(role_id))
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
}
