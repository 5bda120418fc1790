// src/api/dto/team_dto.rs

use crate::service::team_service::CreateTeamInput;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// チーム作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: String,

    pub department_id: Uuid,
}

impl CreateTeamRequest {
    pub fn into_service_input(self) -> CreateTeamInput {
        CreateTeamInput {
            name: self.name,
            department_id: self.department_id,
        }
    }
}

/// メンバー追加リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct AddTeamMemberRequest {
    pub user_id: Uuid,
}

/// リーダー設定リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct SetTeamLeaderRequest {
    pub leader_id: Uuid,
}
