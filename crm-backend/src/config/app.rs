// src/config/app.rs

use std::collections::HashSet;
use std::env;

/// 階層解決エンジンの設定
///
/// `unrestricted_roles` に含まれるロール名はランク制限を受けず、
/// 全ユーザーを閲覧できる。環境変数 `UNRESTRICTED_ROLES`（カンマ区切り）で
/// 上書き可能。デフォルトは Admin と Director。
#[derive(Clone, Debug)]
pub struct HierarchyConfig {
    pub unrestricted_roles: HashSet<String>,
}

impl HierarchyConfig {
    fn from_env() -> Self {
        let raw = env::var("UNRESTRICTED_ROLES").unwrap_or_else(|_| "Admin,Director".to_string());
        Self::from_role_list(&raw)
    }

    pub fn from_role_list(raw: &str) -> Self {
        let unrestricted_roles = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { unrestricted_roles }
    }

    pub fn is_unrestricted(&self, role_name: &str) -> bool {
        self.unrestricted_roles.contains(role_name)
    }
}

/// アプリケーション全体の設定
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub database_url: String,
    pub hierarchy: HierarchyConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| "Invalid PORT value")?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3001".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            hierarchy: HierarchyConfig::from_env(),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_role_list_parsing() {
        let config = HierarchyConfig::from_role_list("Admin, Director , ");
        assert!(config.is_unrestricted("Admin"));
        assert!(config.is_unrestricted("Director"));
        assert!(!config.is_unrestricted("Manager"));
        assert_eq!(config.unrestricted_roles.len(), 2);
    }

    #[test]
    fn test_role_matching_is_case_sensitive() {
        let config = HierarchyConfig::from_role_list("Admin");
        assert!(config.is_unrestricted("Admin"));
        assert!(!config.is_unrestricted("admin"));
    }
}
