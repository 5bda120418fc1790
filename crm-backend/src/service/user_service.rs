// src/service/user_service.rs

use crate::domain::user_model::{Model as User, SafeUser, UserStatus};
use crate::error::{AppError, AppResult};
use crate::hierarchy::{HierarchyEngine, HierarchyNode, UserRecord, UserScopeQuery};
use crate::repository::role_repository::RoleRepository;
use crate::repository::user_repository::UserRepository;
use crate::types::{PaginatedResponse, PaginationQuery, SortQuery};
use crate::utils::password::PasswordManager;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// ユーザー作成の入力
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role_id: Uuid,
}

/// ユーザー更新の入力（Noneのフィールドは変更しない）
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// ユーザー管理サービス
///
/// 一覧取得は必ず階層解決エンジンで可視範囲を解決してから行う。
/// 呼び出し元を素通しする読み取り経路は存在しない。
pub struct UserService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    hierarchy_engine: Arc<HierarchyEngine>,
    password_manager: PasswordManager,
}

impl UserService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        hierarchy_engine: Arc<HierarchyEngine>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            hierarchy_engine,
            password_manager: PasswordManager::new(),
        }
    }

    /// ユーザーを作成し、初期ロールを割り当てる
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<SafeUser> {
        if self
            .user_repo
            .find_by_email_or_phone(&input.email, &input.phone)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "User with this email or phone already exists".to_string(),
            ));
        }

        self.role_repo
            .find_by_id(input.role_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))?;

        let password_hash = self.password_manager.hash_password(&input.password)?;

        let user = User {
            id: Uuid::new_v4(),
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            password_hash,
            status: UserStatus::Active.as_str().to_string(),
            profile_image: None,
            team_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let created = self.user_repo.create(&user).await?;
        self.user_repo.assign_role(created.id, input.role_id).await?;

        info!(user_id = %created.id, role_id = %input.role_id, "User created successfully");

        Ok(created.into())
    }

    /// 呼び出し元の可視範囲内のユーザー一覧を取得
    pub async fn list_users(
        &self,
        caller_id: Uuid,
        query: UserScopeQuery,
        pagination: &PaginationQuery,
        sort: &SortQuery,
    ) -> AppResult<PaginatedResponse<SafeUser>> {
        let scope = self
            .hierarchy_engine
            .resolve_visibility_scope(caller_id, &query)
            .await?;

        let (page, per_page) = pagination.get_pagination();
        let (users, total_count) = self
            .user_repo
            .find_visible_users(&scope, page, per_page, sort)
            .await?;

        let items: Vec<SafeUser> = users.into_iter().map(SafeUser::from).collect();

        Ok(PaginatedResponse::new(
            items,
            page,
            per_page,
            total_count as i64,
        ))
    }

    /// ユーザーを取得
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<SafeUser> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    /// ユーザー情報を更新
    pub async fn update_user(&self, user_id: Uuid, input: UpdateUserInput) -> AppResult<SafeUser> {
        // メール・電話の変更時は重複チェック
        if input.email.is_some() || input.phone.is_some() {
            let current = self
                .user_repo
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            let email = input.email.as_deref().unwrap_or(&current.email);
            let phone = input.phone.as_deref().unwrap_or(&current.phone);
            if let Some(existing) = self.user_repo.find_by_email_or_phone(email, phone).await? {
                if existing.id != user_id {
                    return Err(AppError::Conflict(
                        "User with this email or phone already exists".to_string(),
                    ));
                }
            }
        }

        let password_hash = match &input.password {
            Some(password) => Some(self.password_manager.hash_password(password)?),
            None => None,
        };

        let updated = self
            .user_repo
            .update_fields(user_id, input.full_name, input.email, input.phone, password_hash)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        info!(user_id = %user_id, "User updated successfully");

        Ok(updated.into())
    }

    /// ユーザーのステータスを変更
    pub async fn update_status(&self, user_id: Uuid, status: UserStatus) -> AppResult<SafeUser> {
        let updated = self
            .user_repo
            .update_status(user_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        info!(user_id = %user_id, status = %status, "User status updated successfully");

        Ok(updated.into())
    }

    /// プロフィール画像を設定
    pub async fn update_profile_image(
        &self,
        user_id: Uuid,
        profile_image: Option<String>,
    ) -> AppResult<SafeUser> {
        let updated = self
            .user_repo
            .update_profile_image(user_id, profile_image)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(updated.into())
    }

    /// アクセスロールを付け替える（既存の割当をすべて置き換える）
    pub async fn update_access_role(&self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))?;

        self.user_repo
            .replace_role_assignments(user_id, &[role_id])
            .await?;

        info!(user_id = %user_id, role_id = %role_id, "User access role updated successfully");

        Ok(())
    }

    /// 直属の部下（同部門でrankが厳密に下位のユーザー）を取得
    pub async fn get_subordinates(&self, user_id: Uuid) -> AppResult<Vec<UserRecord>> {
        self.hierarchy_engine.resolve_subordinates(user_id).await
    }

    /// 上位方向の階層パスを取得
    pub async fn get_hierarchy_path(&self, user_id: Uuid) -> AppResult<Vec<HierarchyNode>> {
        self.hierarchy_engine.resolve_hierarchy_path(user_id).await
    }
}
