// src/service/team_service.rs

use crate::domain::team_model::Model as Team;
use crate::domain::user_model::SafeUser;
use crate::error::{AppError, AppResult};
use crate::repository::department_repository::DepartmentRepository;
use crate::repository::team_repository::TeamRepository;
use crate::repository::user_repository::UserRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// チーム作成の入力
#[derive(Debug, Clone)]
pub struct CreateTeamInput {
    pub name: String,
    pub department_id: Uuid,
}

/// チームとメンバー一覧
#[derive(Debug, Clone)]
pub struct TeamWithMembers {
    pub team: Team,
    pub members: Vec<SafeUser>,
}

/// チーム管理サービス
///
/// メンバーの追加・削除は `users.team_id` と `team_members` の両方を
/// 更新する。部下解決のアンカーは `users.team_id` なので、ここが唯一の
/// 変更経路であること。
pub struct TeamService {
    team_repo: Arc<TeamRepository>,
    department_repo: Arc<DepartmentRepository>,
    user_repo: Arc<UserRepository>,
}

impl TeamService {
    pub fn new(
        team_repo: Arc<TeamRepository>,
        department_repo: Arc<DepartmentRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            team_repo,
            department_repo,
            user_repo,
        }
    }

    /// チームを作成
    pub async fn create_team(&self, input: CreateTeamInput) -> AppResult<Team> {
        self.department_repo
            .find_by_id(input.department_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

        let team = Team {
            id: Uuid::new_v4(),
            name: input.name,
            department_id: input.department_id,
            leader_id: None,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let created = self.team_repo.create(&team).await?;

        info!(team_id = %created.id, department_id = %created.department_id, "Team created successfully");

        Ok(created)
    }

    /// チームを取得
    pub async fn get_team(&self, team_id: Uuid) -> AppResult<Team> {
        self.team_repo
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))
    }

    /// アクティブなチーム一覧を取得
    pub async fn list_teams(&self) -> AppResult<Vec<Team>> {
        self.team_repo.find_all_active().await
    }

    /// 部門配下のチーム一覧を取得
    pub async fn list_teams_by_department(&self, department_id: Uuid) -> AppResult<Vec<Team>> {
        self.department_repo
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

        self.team_repo.find_by_department_id(department_id).await
    }

    /// チームをメンバー一覧付きで取得
    pub async fn get_team_with_members(&self, team_id: Uuid) -> AppResult<TeamWithMembers> {
        let team = self.get_team(team_id).await?;

        let memberships = self.team_repo.find_members(team_id).await?;
        let user_ids: Vec<Uuid> = memberships.iter().map(|m| m.user_id).collect();
        let users = self.user_repo.find_by_ids(&user_ids).await?;

        let members = users.into_iter().map(SafeUser::from).collect();

        Ok(TeamWithMembers { team, members })
    }

    /// メンバーを追加する
    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let team = self.get_team(team_id).await?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if self.team_repo.is_member(team_id, user_id).await? {
            return Err(AppError::Conflict(
                "User is already a member of this team".to_string(),
            ));
        }

        self.team_repo.add_member(team_id, user_id).await?;
        self.user_repo.set_team(user_id, Some(team_id)).await?;

        info!(team_id = %team.id, user_id = %user_id, "Team member added successfully");

        Ok(())
    }

    /// メンバーを外す（リーダーだった場合はリーダーも解除）
    pub async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let team = self.get_team(team_id).await?;

        let removed = self.team_repo.remove_member(team_id, user_id).await?;
        if !removed {
            return Err(AppError::NotFound(
                "User is not a member of this team".to_string(),
            ));
        }

        self.user_repo.set_team(user_id, None).await?;

        if team.leader_id == Some(user_id) {
            self.team_repo.set_leader(team_id, None).await?;
        }

        info!(team_id = %team_id, user_id = %user_id, "Team member removed successfully");

        Ok(())
    }

    /// リーダーを設定する（リーダーはメンバーでなければならない）
    pub async fn set_leader(&self, team_id: Uuid, leader_id: Uuid) -> AppResult<Team> {
        self.get_team(team_id).await?;

        if !self.team_repo.is_member(team_id, leader_id).await? {
            return Err(AppError::BadRequest(
                "Team leader must be a member of the team".to_string(),
            ));
        }

        let updated = self
            .team_repo
            .set_leader(team_id, Some(leader_id))
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

        info!(team_id = %team_id, leader_id = %leader_id, "Team leader updated successfully");

        Ok(updated)
    }

    /// チームをソフトデリート
    pub async fn delete_team(&self, team_id: Uuid) -> AppResult<()> {
        let memberships = self.team_repo.find_members(team_id).await?;

        let deleted = self.team_repo.soft_delete(team_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Team not found".to_string()));
        }

        // 所属解除。削除済みチームを部下解決のアンカーに残さない
        for membership in memberships {
            self.user_repo.set_team(membership.user_id, None).await?;
        }

        info!(team_id = %team_id, "Team deleted successfully");

        Ok(())
    }
}
