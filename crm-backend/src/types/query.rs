// src/types/query.rs

use serde::{Deserialize, Serialize};

/// 統一ソートクエリパラメータ
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SortQuery {
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// ソート順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortQuery {
    /// 許可されたカラム名のみ受け付ける（それ以外はデフォルトにフォールバック）
    pub fn sort_by_allowed<'a>(&'a self, allowed: &[&'a str], default: &'a str) -> &'a str {
        match self.sort_by.as_deref() {
            Some(column) if allowed.contains(&column) => column,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_default() {
        let sort = SortQuery::default();
        assert!(sort.sort_by.is_none());
        assert!(matches!(sort.sort_order, SortOrder::Asc));
    }

    #[test]
    fn test_sort_by_allowed_falls_back() {
        let sort = SortQuery {
            sort_by: Some("password_hash".to_string()),
            sort_order: SortOrder::Desc,
        };
        assert_eq!(sort.sort_by_allowed(&["id", "email"], "id"), "id");

        let sort = SortQuery {
            sort_by: Some("email".to_string()),
            sort_order: SortOrder::Asc,
        };
        assert_eq!(sort.sort_by_allowed(&["id", "email"], "id"), "email");
    }
}
