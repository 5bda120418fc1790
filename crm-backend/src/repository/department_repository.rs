// src/repository/department_repository.rs

use crate::domain::department_model::{
    ActiveModel as DepartmentActiveModel, Column as DepartmentColumn, Entity as DepartmentEntity,
    Model as Department,
};
use crate::domain::role_model::{
    Column as RoleColumn, Entity as RoleEntity, Model as Role,
};
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct DepartmentRepository {
    db: DatabaseConnection,
}

impl DepartmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 部門を作成
    pub async fn create(&self, department: &Department) -> AppResult<Department> {
        let active_model = DepartmentActiveModel {
            id: Set(department.id),
            name: Set(department.name.clone()),
            description: Set(department.description.clone()),
            deleted_at: Set(None),
            created_at: Set(department.created_at),
            updated_at: Set(department.updated_at),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(model)
    }

    /// 部門をIDで取得（削除済みは除外）
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        let model = DepartmentEntity::find_by_id(id)
            .filter(DepartmentColumn::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// 部門を名前で取得（削除済みは除外）
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        let model = DepartmentEntity::find()
            .filter(DepartmentColumn::Name.eq(name))
            .filter(DepartmentColumn::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// アクティブな部門一覧を取得
    pub async fn find_all_active(&self) -> AppResult<Vec<Department>> {
        let models = DepartmentEntity::find()
            .filter(DepartmentColumn::DeletedAt.is_null())
            .order_by_asc(DepartmentColumn::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// 部門のアクティブなロール一覧を取得（rank昇順）
    pub async fn find_roles(&self, department_id: Uuid) -> AppResult<Vec<Role>> {
        let models = RoleEntity::find()
            .filter(RoleColumn::DepartmentId.eq(department_id))
            .filter(RoleColumn::DeletedAt.is_null())
            .order_by_asc(RoleColumn::Rank)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// 部門情報を更新
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Option<Department>> {
        let Some(department) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: DepartmentActiveModel = department.into();
        if let Some(name) = name {
            active_model.name = Set(name);
        }
        if let Some(description) = description {
            active_model.description = Set(Some(description));
        }
        active_model.updated_at = Set(Utc::now());

        let updated = active_model.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// 部門をソフトデリート
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let Some(department) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active_model: DepartmentActiveModel = department.into();
        active_model.deleted_at = Set(Some(Utc::now()));
        active_model.updated_at = Set(Utc::now());
        active_model.update(&self.db).await?;
        Ok(true)
    }
}
