// src/api/dto/user_dto.rs

use crate::hierarchy::{UserRecord, UserScopeQuery};
use crate::service::user_service::{CreateUserInput, UpdateUserInput};
use crate::types::{PaginationQuery, SortOrder, SortQuery};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// ユーザー作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 5, max = 20, message = "Phone must be 5-20 characters"))]
    pub phone: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role_id: Uuid,
}

impl CreateUserRequest {
    pub fn into_service_input(self) -> CreateUserInput {
        CreateUserInput {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            password: self.password,
            role_id: self.role_id,
        }
    }
}

/// ユーザー更新リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 20, message = "Phone must be 5-20 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_service_input(self) -> UpdateUserInput {
        UpdateUserInput {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            password: self.password,
        }
    }
}

/// ステータス変更リクエスト（"ACTIVE" | "INACTIVE"）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub status: String,
}

/// アクセスロール変更リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccessRoleRequest {
    pub role_id: Uuid,
}

/// プロフィール画像変更リクエスト（nullで削除）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileImageRequest {
    pub profile_image: Option<String>,
}

/// ユーザー一覧のクエリパラメータ
///
/// 検索・フィルタは可視範囲の内側でのみ作用する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl ListUsersQuery {
    pub fn scope_query(&self) -> UserScopeQuery {
        UserScopeQuery {
            search: self.search.clone(),
            department_id: self.department_id,
            department_name: self.department_name.clone(),
        }
    }

    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn sort(&self) -> SortQuery {
        SortQuery {
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
        }
    }
}

/// 部下一覧の1エントリ
#[derive(Debug, Clone, Serialize)]
pub struct SubordinateResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub team_id: Option<Uuid>,
}

impl From<UserRecord> for SubordinateResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            team_id: user.team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_validation() {
        let request = CreateUserRequest {
            full_name: "Taro Yamada".to_string(),
            email: "taro@example.com".to_string(),
            phone: "090-1234-5678".to_string(),
            password: "secret-password".to_string(),
            role_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_ok());

        let bad_email = CreateUserRequest {
            email: "not-an-email".to_string(),
            ..request.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUserRequest {
            password: "short".to_string(),
            ..request
        };
        assert!(short_password.validate().is_err());
    }
}
