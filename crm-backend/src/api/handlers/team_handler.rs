// src/api/handlers/team_handler.rs

use crate::api::dto::team_dto::*;
use crate::api::AppState;
use crate::domain::team_model::Model as Team;
use crate::domain::user_model::SafeUser;
use crate::error::AppResult;
use crate::service::team_service::TeamWithMembers;
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// チーム詳細レスポンス（メンバー付き）
#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<SafeUser>,
}

impl From<TeamWithMembers> for TeamDetailResponse {
    fn from(detail: TeamWithMembers) -> Self {
        Self {
            team: detail.team,
            members: detail.members,
        }
    }
}

/// チーム作成
pub async fn create_team_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTeamRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Team>>)> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "create_team_handler"))?;

    let team = app_state
        .team_service
        .create_team(payload.into_service_input())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Team created successfully", team)),
    ))
}

/// チーム一覧取得
pub async fn list_teams_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Team>>>> {
    let teams = app_state.team_service.list_teams().await?;

    Ok(Json(ApiResponse::success(
        "Teams retrieved successfully",
        teams,
    )))
}

/// チーム詳細取得（メンバー付き）
pub async fn get_team_handler(
    State(app_state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TeamDetailResponse>>> {
    let detail = app_state.team_service.get_team_with_members(team_id).await?;

    Ok(Json(ApiResponse::success(
        "Team retrieved successfully",
        TeamDetailResponse::from(detail),
    )))
}

/// メンバー追加
pub async fn add_team_member_handler(
    State(app_state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(payload): Json<AddTeamMemberRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    app_state
        .team_service
        .add_member(team_id, payload.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_message("Team member added successfully")),
    ))
}

/// メンバー削除
pub async fn remove_team_member_handler(
    State(app_state): State<AppState>,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state.team_service.remove_member(team_id, user_id).await?;

    Ok(Json(ApiResponse::success_message(
        "Team member removed successfully",
    )))
}

/// リーダー設定
pub async fn set_team_leader_handler(
    State(app_state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(payload): Json<SetTeamLeaderRequest>,
) -> AppResult<Json<ApiResponse<Team>>> {
    let team = app_state
        .team_service
        .set_leader(team_id, payload.leader_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Team leader updated successfully",
        team,
    )))
}

/// チーム削除（ソフトデリート）
pub async fn delete_team_handler(
    State(app_state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state.team_service.delete_team(team_id).await?;

    Ok(Json(ApiResponse::success_message(
        "Team deleted successfully",
    )))
}

// --- ルーター ---

/// チームルーターを作成
pub fn team_router(app_state: AppState) -> Router {
    Router::new()
        .route("/teams", post(create_team_handler))
        .route("/teams", get(list_teams_handler))
        .route("/teams/{id}", get(get_team_handler))
        .route("/teams/{id}", delete(delete_team_handler))
        .route("/teams/{id}/leader", patch(set_team_leader_handler))
        .route("/teams/{id}/members", post(add_team_member_handler))
        .route(
            "/teams/{team_id}/members/{user_id}",
            delete(remove_team_member_handler),
        )
        .with_state(app_state)
}
