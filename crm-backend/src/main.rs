// src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crm_backend::api::{app_router, AppState};
use crm_backend::config::Config;
use crm_backend::db::create_db_pool;
use crm_backend::hierarchy::HierarchyEngine;
use crm_backend::logging::request_logging;
use crm_backend::repository::department_repository::DepartmentRepository;
use crm_backend::repository::hierarchy_store::SeaOrmHierarchyStore;
use crm_backend::repository::permission_repository::PermissionRepository;
use crm_backend::repository::role_repository::RoleRepository;
use crm_backend::repository::team_repository::TeamRepository;
use crm_backend::repository::user_repository::UserRepository;
use crm_backend::service::department_service::DepartmentService;
use crm_backend::service::permission_service::PermissionService;
use crm_backend::service::role_service::RoleService;
use crm_backend::service::team_service::TeamService;
use crm_backend::service::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env があれば読み込む（本番では環境変数のみ）
    dotenvy::dotenv().ok();

    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crm_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting CRM Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env().map_err(|e| format!("Failed to load configuration: {e}"))?;
    tracing::info!(environment = %app_config.environment, "Configuration loaded");

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    // リポジトリ層
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let role_repo = Arc::new(RoleRepository::new(db_pool.clone()));
    let department_repo = Arc::new(DepartmentRepository::new(db_pool.clone()));
    let team_repo = Arc::new(TeamRepository::new(db_pool.clone()));
    let permission_repo = Arc::new(PermissionRepository::new(db_pool.clone()));

    // 階層解決エンジン（ストア実装は共有）
    let hierarchy_store = Arc::new(SeaOrmHierarchyStore::new(db_pool.clone()));
    let hierarchy_engine = Arc::new(HierarchyEngine::new(
        hierarchy_store.clone(),
        app_config.hierarchy.clone(),
    ));

    // サービス層
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        role_repo.clone(),
        hierarchy_engine.clone(),
    ));
    let role_service = Arc::new(RoleService::new(
        role_repo.clone(),
        department_repo.clone(),
        hierarchy_engine.clone(),
    ));
    let department_service = Arc::new(DepartmentService::new(department_repo.clone()));
    let team_service = Arc::new(TeamService::new(
        team_repo,
        department_repo,
        user_repo.clone(),
    ));
    let permission_service = Arc::new(PermissionService::new(
        permission_repo,
        role_repo,
        user_repo,
        hierarchy_store,
    ));

    let app_state = AppState::new(
        user_service,
        role_service,
        department_service,
        team_service,
        permission_service,
    );

    // ルーターの設定
    // 開発環境ではCORSを緩め、それ以外は許可リストのみ
    let cors = if app_config.is_development() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<_> = app_config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let router = app_router(app_state).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(request_logging))
            .layer(cors)
            .layer(DefaultBodyLimit::max(1024 * 1024)),
    );

    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
