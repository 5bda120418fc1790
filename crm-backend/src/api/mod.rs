// src/api/mod.rs

use crate::service::department_service::DepartmentService;
use crate::service::permission_service::PermissionService;
use crate::service::role_service::RoleService;
use crate::service::team_service::TeamService;
use crate::service::user_service::UserService;
use axum::Router;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
    pub department_service: Arc<DepartmentService>,
    pub team_service: Arc<TeamService>,
    pub permission_service: Arc<PermissionService>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        role_service: Arc<RoleService>,
        department_service: Arc<DepartmentService>,
        team_service: Arc<TeamService>,
        permission_service: Arc<PermissionService>,
    ) -> Self {
        Self {
            user_service,
            role_service,
            department_service,
            team_service,
            permission_service,
        }
    }
}

/// 全ルーターを結合したアプリケーションルーターを作成
pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .merge(handlers::user_handler::user_router(app_state.clone()))
        .merge(handlers::role_handler::role_router(app_state.clone()))
        .merge(handlers::department_handler::department_router(
            app_state.clone(),
        ))
        .merge(handlers::team_handler::team_router(app_state.clone()))
        .merge(handlers::permission_handler::permission_router(app_state))
}
