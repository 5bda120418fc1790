// src/domain/role_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ロールエンティティ
///
/// `rank` は部門内の権限順序。1が頂点で、数値が大きいほど下位。
/// 同一部門内では (name, rank) の組がアクティブなロール間で衝突しないことを
/// サービス層で保証する。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub rank: i32,

    pub department_id: Uuid,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department_model::Entity",
        from = "Column::DepartmentId",
        to = "super::department_model::Column::Id"
    )]
    Department,

    #[sea_orm(has_many = "super::user_role_model::Entity")]
    UserRoles,

    #[sea_orm(has_many = "super::role_permission_model::Entity")]
    RolePermissions,
}

impl Related<super::department_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::user_role_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::role_permission_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 頂点ランク。これ以上上位の役職は存在しない
pub const APEX_RANK: i32 = 1;

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_apex(&self) -> bool {
        self.rank <= APEX_RANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(rank: i32) -> Model {
        Model {
            id: Uuid::new_v4(),
            name: "Manager".to_string(),
            rank,
            department_id: Uuid::new_v4(),
            description: None,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apex_detection() {
        assert!(role(1).is_apex());
        assert!(!role(2).is_apex());
    }

    #[test]
    fn test_soft_delete_marker() {
        let mut r = role(3);
        assert!(!r.is_deleted());
        r.deleted_at = Some(Utc::now());
        assert!(r.is_deleted());
    }
}
