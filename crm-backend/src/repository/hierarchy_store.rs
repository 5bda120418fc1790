// src/repository/hierarchy_store.rs

use crate::domain::department_model::{
    Column as DepartmentColumn, Entity as DepartmentEntity, Model as Department,
};
use crate::domain::role_model::{Column as RoleColumn, Entity as RoleEntity, Model as Role};
use crate::domain::team_model::{Column as TeamColumn, Entity as TeamEntity};
use crate::domain::user_model::{Column as UserColumn, Entity as UserEntity, Model as User};
use crate::domain::user_role_model::{Column as UserRoleColumn, Entity as UserRoleEntity};
use crate::error::AppResult;
use crate::hierarchy::{DepartmentRecord, HierarchyStore, RoleRecord, UserRecord};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use uuid::Uuid;

/// sea-orm による [`HierarchyStore`] 実装
///
/// 読み取り専用。削除済み（ソフトデリート）のロール・部門・チームは
/// 返さない。`DbErr` は `AppError::StoreUnavailable` として伝播する。
pub struct SeaOrmHierarchyStore {
    db: DatabaseConnection,
}

impl SeaOrmHierarchyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn user_record(user: User) -> UserRecord {
        let is_active = user.is_active();
        UserRecord {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            is_active,
            team_id: user.team_id,
        }
    }

    fn role_record(role: Role, departments: &HashMap<Uuid, Department>) -> RoleRecord {
        let department_name = departments
            .get(&role.department_id)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        RoleRecord {
            id: role.id,
            name: role.name,
            rank: Some(role.rank),
            department_id: role.department_id,
            department_name,
        }
    }

    async fn departments_by_ids(&self, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, Department>> {
        let departments = DepartmentEntity::find()
            .filter(DepartmentColumn::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(departments.into_iter().map(|d| (d.id, d)).collect())
    }
}

#[async_trait]
impl HierarchyStore for SeaOrmHierarchyStore {
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(Self::user_record))
    }

    async fn find_user_roles(&self, user_id: Uuid) -> AppResult<Vec<RoleRecord>> {
        // 割当順（assigned_at, id）を保持する。先頭が正準ロール
        let assignments = UserRoleEntity::find()
            .filter(UserRoleColumn::UserId.eq(user_id))
            .order_by_asc(UserRoleColumn::AssignedAt)
            .order_by_asc(UserRoleColumn::Id)
            .all(&self.db)
            .await?;

        let role_ids: Vec<Uuid> = assignments.iter().map(|a| a.role_id).collect();
        let roles: HashMap<Uuid, Role> = RoleEntity::find()
            .filter(RoleColumn::Id.is_in(role_ids))
            .filter(RoleColumn::DeletedAt.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let department_ids: Vec<Uuid> = roles.values().map(|r| r.department_id).collect();
        let departments = self.departments_by_ids(department_ids).await?;

        let records = assignments
            .into_iter()
            .filter_map(|a| roles.get(&a.role_id).cloned())
            .map(|r| Self::role_record(r, &departments))
            .collect();
        Ok(records)
    }

    async fn find_role_by_rank(
        &self,
        department_id: Uuid,
        rank: i32,
    ) -> AppResult<Option<RoleRecord>> {
        let role = RoleEntity::find()
            .filter(RoleColumn::DepartmentId.eq(department_id))
            .filter(RoleColumn::Rank.eq(rank))
            .filter(RoleColumn::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        match role {
            Some(role) => {
                let departments = self.departments_by_ids(vec![role.department_id]).await?;
                Ok(Some(Self::role_record(role, &departments)))
            }
            None => Ok(None),
        }
    }

    async fn find_users_by_role(&self, role_id: Uuid) -> AppResult<Vec<UserRecord>> {
        let user_ids: Vec<Uuid> = UserRoleEntity::find()
            .filter(UserRoleColumn::RoleId.eq(role_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| a.user_id)
            .collect();

        let users = UserEntity::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await?;
        Ok(users.into_iter().map(Self::user_record).collect())
    }

    async fn find_users_by_team_department(
        &self,
        department_id: Uuid,
    ) -> AppResult<Vec<UserRecord>> {
        let team_ids: Vec<Uuid> = TeamEntity::find()
            .filter(TeamColumn::DepartmentId.eq(department_id))
            .filter(TeamColumn::DeletedAt.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        let users = UserEntity::find()
            .filter(UserColumn::TeamId.is_in(team_ids))
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await?;
        Ok(users.into_iter().map(Self::user_record).collect())
    }

    async fn find_roles_by_department(&self, department_id: Uuid) -> AppResult<Vec<RoleRecord>> {
        let roles = RoleEntity::find()
            .filter(RoleColumn::DepartmentId.eq(department_id))
            .filter(RoleColumn::DeletedAt.is_null())
            .order_by_asc(RoleColumn::Rank)
            .all(&self.db)
            .await?;

        let departments = self.departments_by_ids(vec![department_id]).await?;
        Ok(roles
            .into_iter()
            .map(|r| Self::role_record(r, &departments))
            .collect())
    }

    async fn find_user_team_department(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<DepartmentRecord>> {
        let Some(user) = UserEntity::find_by_id(user_id).one(&self.db).await? else {
            return Ok(None);
        };
        let Some(team_id) = user.team_id else {
            return Ok(None);
        };

        let Some(team) = TeamEntity::find_by_id(team_id)
            .filter(TeamColumn::DeletedAt.is_null())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let department = DepartmentEntity::find_by_id(team.department_id)
            .filter(DepartmentColumn::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(department.map(|d| DepartmentRecord {
            id: d.id,
            name: d.name,
        }))
    }
}
