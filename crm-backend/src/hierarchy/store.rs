// src/hierarchy/store.rs

use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// ストアから返される素のユーザーレコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub team_id: Option<Uuid>,
}

/// ストアから返される素のロールレコード（所属部門込み）
///
/// `rank` はデータ不備で未設定の可能性があるため Option。エンジン側で
/// fail-closed に扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    pub id: Uuid,
    pub name: String,
    pub rank: Option<i32>,
    pub department_id: Uuid,
    pub department_name: String,
}

/// 部門参照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRecord {
    pub id: Uuid,
    pub name: String,
}

/// 階層解決エンジンが消費するストアインターフェース
///
/// 実装は読み取りのみで、削除済み（ソフトデリート）のロール・部門を
/// 返さないこと。トランザクション境界や再試行はストア実装側の責務。
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>>;

    /// ユーザーのロール割当を割当順（assigned_at, id）で返す
    async fn find_user_roles(&self, user_id: Uuid) -> AppResult<Vec<RoleRecord>>;

    /// 部門内で指定rankを持つアクティブなロールを返す
    async fn find_role_by_rank(
        &self,
        department_id: Uuid,
        rank: i32,
    ) -> AppResult<Option<RoleRecord>>;

    /// 指定ロールを割り当てられた全ユーザーを返す
    async fn find_users_by_role(&self, role_id: Uuid) -> AppResult<Vec<UserRecord>>;

    /// 指定部門に属するチームのメンバー全員を返す
    async fn find_users_by_team_department(&self, department_id: Uuid)
        -> AppResult<Vec<UserRecord>>;

    /// 部門内のアクティブなロール一覧を返す
    async fn find_roles_by_department(&self, department_id: Uuid) -> AppResult<Vec<RoleRecord>>;

    /// ユーザーの所属チーム経由の部門を返す
    async fn find_user_team_department(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<DepartmentRecord>>;
}
