// tests/common/mod.rs

// テストバイナリごとに使われるヘルパーが異なる
#![allow(dead_code)]

use async_trait::async_trait;
use crm_backend::config::HierarchyConfig;
use crm_backend::error::AppResult;
use crm_backend::hierarchy::{
    DepartmentRecord, HierarchyEngine, HierarchyStore, RoleRecord, UserRecord,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("crm_backend=debug")
        .with_test_writer()
        .try_init();
});

/// テスト用のインメモリ組織構造
///
/// ストア実装が返すレコードの順序保証（ロール割当は割当順）も忠実に再現する。
#[derive(Default)]
pub struct InMemoryOrg {
    departments: Vec<DepartmentRecord>,
    roles: Vec<RoleRecord>,
    users: Vec<UserRecord>,
    // (user_id, role_id) 割当順
    assignments: Vec<(Uuid, Uuid)>,
    // (team_id, department_id)
    teams: Vec<(Uuid, Uuid)>,
}

impl InMemoryOrg {
    pub fn new() -> Self {
        Lazy::force(&TRACING);
        Self::default()
    }

    pub fn add_department(&mut self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.departments.push(DepartmentRecord {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn add_role(&mut self, name: &str, rank: Option<i32>, department_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        let department_name = self
            .departments
            .iter()
            .find(|d| d.id == department_id)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        self.roles.push(RoleRecord {
            id,
            name: name.to_string(),
            rank,
            department_id,
            department_name,
        });
        id
    }

    pub fn add_team(&mut self, department_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.teams.push((id, department_id));
        id
    }

    pub fn add_user(&mut self, full_name: &str, team_id: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        self.users.push(UserRecord {
            id,
            full_name: full_name.to_string(),
            email: format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
            phone: format!("+81-{}", self.users.len() + 1000),
            is_active: true,
            team_id,
        });
        id
    }

    pub fn assign_role(&mut self, user_id: Uuid, role_id: Uuid) {
        self.assignments.push((user_id, role_id));
    }

    /// デフォルト設定（Admin, Director が無制限）のエンジンを構築する
    pub fn into_engine(self) -> HierarchyEngine {
        self.into_engine_with_roles("Admin,Director")
    }

    pub fn into_engine_with_roles(self, unrestricted: &str) -> HierarchyEngine {
        HierarchyEngine::new(
            Arc::new(self),
            HierarchyConfig::from_role_list(unrestricted),
        )
    }
}

#[async_trait]
impl HierarchyStore for InMemoryOrg {
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_roles(&self, user_id: Uuid) -> AppResult<Vec<RoleRecord>> {
        let roles = self
            .assignments
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, rid)| self.roles.iter().find(|r| r.id == *rid).cloned())
            .collect();
        Ok(roles)
    }

    async fn find_role_by_rank(
        &self,
        department_id: Uuid,
        rank: i32,
    ) -> AppResult<Option<RoleRecord>> {
        Ok(self
            .roles
            .iter()
            .find(|r| r.department_id == department_id && r.rank == Some(rank))
            .cloned())
    }

    async fn find_users_by_role(&self, role_id: Uuid) -> AppResult<Vec<UserRecord>> {
        let users = self
            .assignments
            .iter()
            .filter(|(_, rid)| *rid == role_id)
            .filter_map(|(uid, _)| self.users.iter().find(|u| u.id == *uid).cloned())
            .collect();
        Ok(users)
    }

    async fn find_users_by_team_department(
        &self,
        department_id: Uuid,
    ) -> AppResult<Vec<UserRecord>> {
        let team_ids: Vec<Uuid> = self
            .teams
            .iter()
            .filter(|(_, did)| *did == department_id)
            .map(|(tid, _)| *tid)
            .collect();
        let users = self
            .users
            .iter()
            .filter(|u| u.team_id.is_some_and(|tid| team_ids.contains(&tid)))
            .cloned()
            .collect();
        Ok(users)
    }

    async fn find_roles_by_department(&self, department_id: Uuid) -> AppResult<Vec<RoleRecord>> {
        Ok(self
            .roles
            .iter()
            .filter(|r| r.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn find_user_team_department(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<DepartmentRecord>> {
        let Some(user) = self.users.iter().find(|u| u.id == user_id) else {
            return Ok(None);
        };
        let Some(team_id) = user.team_id else {
            return Ok(None);
        };
        let Some((_, department_id)) = self.teams.iter().find(|(tid, _)| *tid == team_id) else {
            return Ok(None);
        };
        Ok(self
            .departments
            .iter()
            .find(|d| d.id == *department_id)
            .cloned())
    }
}

/// 営業部門の標準的な3階層フィクスチャ
///
/// Director(rank 1) 1名、Manager(rank 2) 2名、Executive(rank 3) 3名。
/// 全員が同じチームに所属する。
pub struct SalesFixture {
    pub org: InMemoryOrg,
    pub department_id: Uuid,
    pub team_id: Uuid,
    pub director_role: Uuid,
    pub manager_role: Uuid,
    pub executive_role: Uuid,
    pub director: Uuid,
    pub managers: Vec<Uuid>,
    pub executives: Vec<Uuid>,
}

impl SalesFixture {
    pub fn build() -> Self {
        let mut org = InMemoryOrg::new();

        let department_id = org.add_department("Sales");
        let team_id = org.add_team(department_id);

        let director_role = org.add_role("Sales Director", Some(1), department_id);
        let manager_role = org.add_role("Sales Manager", Some(2), department_id);
        let executive_role = org.add_role("Sales Executive", Some(3), department_id);

        let director = org.add_user("Sales Director One", Some(team_id));
        org.assign_role(director, director_role);

        let mut managers = Vec::new();
        for name in ["Manager One", "Manager Two"] {
            let id = org.add_user(name, Some(team_id));
            org.assign_role(id, manager_role);
            managers.push(id);
        }

        let mut executives = Vec::new();
        for name in ["Executive One", "Executive Two", "Executive Three"] {
            let id = org.add_user(name, Some(team_id));
            org.assign_role(id, executive_role);
            executives.push(id);
        }

        Self {
            org,
            department_id,
            team_id,
            director_role,
            manager_role,
            executive_role,
            director,
            managers,
            executives,
        }
    }
}
