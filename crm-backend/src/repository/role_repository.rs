// src/repository/role_repository.rs

use crate::domain::role_model::{
    ActiveModel as RoleActiveModel, Column as RoleColumn, Entity as RoleEntity, Model as Role,
};
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct RoleRepository {
    db: DatabaseConnection,
}

impl RoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// ロールを作成
    pub async fn create(&self, role: &Role) -> AppResult<Role> {
        let active_model = RoleActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
            rank: Set(role.rank),
            department_id: Set(role.department_id),
            description: Set(role.description.clone()),
            deleted_at: Set(None),
            created_at: Set(role.created_at),
            updated_at: Set(role.updated_at),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(model)
    }

    /// ロールをIDで取得（削除済みは除外）
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        let model = RoleEntity::find_by_id(id)
            .filter(RoleColumn::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// 部門内のアクティブなロール一覧を取得（rank昇順）
    pub async fn find_by_department_id(&self, department_id: Uuid) -> AppResult<Vec<Role>> {
        let models = RoleEntity::find()
            .filter(RoleColumn::DepartmentId.eq(department_id))
            .filter(RoleColumn::DeletedAt.is_null())
            .order_by_asc(RoleColumn::Rank)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// 同一部門内で名前またはrankが衝突するアクティブなロールを探す
    ///
    /// `exclude_id` は更新時に自分自身を除外するため
    pub async fn find_conflicting(
        &self,
        department_id: Uuid,
        name: Option<&str>,
        rank: Option<i32>,
        exclude_id: Option<Uuid>,
    ) -> AppResult<Option<Role>> {
        let mut collision = Condition::any();
        if let Some(name) = name {
            collision = collision.add(RoleColumn::Name.eq(name));
        }
        if let Some(rank) = rank {
            collision = collision.add(RoleColumn::Rank.eq(rank));
        }

        let mut condition = Condition::all()
            .add(RoleColumn::DepartmentId.eq(department_id))
            .add(RoleColumn::DeletedAt.is_null())
            .add(collision);
        if let Some(exclude_id) = exclude_id {
            condition = condition.add(RoleColumn::Id.ne(exclude_id));
        }

        let model = RoleEntity::find().filter(condition).one(&self.db).await?;
        Ok(model)
    }

    /// ロール情報を更新
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
        rank: Option<i32>,
    ) -> AppResult<Option<Role>> {
        let Some(role) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: RoleActiveModel = role.into();
        if let Some(name) = name {
            active_model.name = Set(name);
        }
        if let Some(description) = description {
            active_model.description = Set(Some(description));
        }
        if let Some(rank) = rank {
            active_model.rank = Set(rank);
        }
        active_model.updated_at = Set(Utc::now());

        let updated = active_model.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// ロールをソフトデリート
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let Some(role) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active_model: RoleActiveModel = role.into();
        active_model.deleted_at = Set(Some(Utc::now()));
        active_model.updated_at = Set(Utc::now());
        active_model.update(&self.db).await?;
        Ok(true)
    }
}
