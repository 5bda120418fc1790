// src/repository/team_repository.rs

use crate::domain::team_member_model::{
    ActiveModel as TeamMemberActiveModel, Column as TeamMemberColumn, Entity as TeamMemberEntity,
    Model as TeamMember,
};
use crate::domain::team_model::{
    ActiveModel as TeamActiveModel, Column as TeamColumn, Entity as TeamEntity, Model as Team,
};
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct TeamRepository {
    db: DatabaseConnection,
}

impl TeamRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// チームを作成
    pub async fn create(&self, team: &Team) -> AppResult<Team> {
        let active_model = TeamActiveModel {
            id: Set(team.id),
            name: Set(team.name.clone()),
            department_id: Set(team.department_id),
            leader_id: Set(team.leader_id),
            deleted_at: Set(None),
            created_at: Set(team.created_at),
            updated_at: Set(team.updated_at),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(model)
    }

    /// チームをIDで取得（削除済みは除外）
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>> {
        let model = TeamEntity::find_by_id(id)
            .filter(TeamColumn::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// 部門のチーム一覧を取得
    pub async fn find_by_department_id(&self, department_id: Uuid) -> AppResult<Vec<Team>> {
        let models = TeamEntity::find()
            .filter(TeamColumn::DepartmentId.eq(department_id))
            .filter(TeamColumn::DeletedAt.is_null())
            .order_by_asc(TeamColumn::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// アクティブなチーム一覧を取得
    pub async fn find_all_active(&self) -> AppResult<Vec<Team>> {
        let models = TeamEntity::find()
            .filter(TeamColumn::DeletedAt.is_null())
            .order_by_asc(TeamColumn::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// チームリーダーを設定
    pub async fn set_leader(&self, id: Uuid, leader_id: Option<Uuid>) -> AppResult<Option<Team>> {
        let Some(team) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: TeamActiveModel = team.into();
        active_model.leader_id = Set(leader_id);
        active_model.updated_at = Set(Utc::now());

        let updated = active_model.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// メンバーを追加
    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid) -> AppResult<TeamMember> {
        let member = TeamMemberActiveModel {
            id: Set(Uuid::new_v4()),
            team_id: Set(team_id),
            user_id: Set(user_id),
            joined_at: Set(Utc::now()),
            created_at: Set(Utc::now()),
        };

        let model = member.insert(&self.db).await?;
        Ok(model)
    }

    /// メンバーを削除
    pub async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = TeamMemberEntity::delete_many()
            .filter(TeamMemberColumn::TeamId.eq(team_id))
            .filter(TeamMemberColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// メンバーシップの有無をチェック
    pub async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let existing = TeamMemberEntity::find()
            .filter(TeamMemberColumn::TeamId.eq(team_id))
            .filter(TeamMemberColumn::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }

    /// チームのメンバー一覧を取得
    pub async fn find_members(&self, team_id: Uuid) -> AppResult<Vec<TeamMember>> {
        let models = TeamMemberEntity::find()
            .filter(TeamMemberColumn::TeamId.eq(team_id))
            .order_by_asc(TeamMemberColumn::JoinedAt)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// チームをソフトデリート
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let Some(team) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active_model: TeamActiveModel = team.into();
        active_model.deleted_at = Set(Some(Utc::now()));
        active_model.updated_at = Set(Utc::now());
        active_model.update(&self.db).await?;
        Ok(true)
    }
}
