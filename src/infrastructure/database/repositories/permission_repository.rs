use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::is_unique_violation;
use crate::domain::{DomainError, DomainResult, Permission, PermissionRepositoryInterface};
use crate::infrastructure::database::entities::permission;
use crate::shared::{PaginatedResult, ResolvedLimit};

pub struct SeaOrmPermissionRepository {
    db: DatabaseConnection,
}

impl SeaOrmPermissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn permission_model_to_domain(model: permission::Model) -> Permission {
    Permission {
        id: model.id,
        name: model.name,
        guard_name: model.guard_name,
        created_at: model.created_at,
    }
}

#[async_trait]
impl PermissionRepositoryInterface for SeaOrmPermissionRepository {
    async fn list_permissions(
        &self,
        limit: ResolvedLimit,
        page: u64,
    ) -> DomainResult<PaginatedResult<Permission>> {
        let page = page.max(1);
        let query = permission::Entity::find()
            .order_by_asc(permission::Column::CreatedAt)
            .order_by_asc(permission::Column::Name);

        let total = query.clone().count(&self.db).await?;
        let models = query
            .offset(limit.offset_for(page))
            .limit(limit.get())
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(permission_model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Permission>> {
        let model = permission::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(permission_model_to_domain))
    }

    async fn find_by_name(
        &self,
        name: &str,
        guard_name: &str,
    ) -> DomainResult<Option<Permission>> {
        let model = permission::Entity::find()
            .filter(permission::Column::Name.eq(name))
            .filter(permission::Column::GuardName.eq(guard_name))
            .one(&self.db)
            .await?;
        Ok(model.map(permission_model_to_domain))
    }

    async fn create_permission(&self, name: &str, guard_name: &str) -> DomainResult<Permission> {
        let new_permission = permission::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            guard_name: Set(guard_name.to_string()),
            created_at: Set(Utc::now()),
        };

        let model = new_permission.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!(
                    "A permission `{}` already exists for guard `{}`.",
                    name, guard_name
                ))
            } else {
                e.into()
            }
        })?;

        Ok(permission_model_to_domain(model))
    }
}
