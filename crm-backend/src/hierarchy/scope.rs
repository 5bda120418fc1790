// src/hierarchy/scope.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 可視範囲解決への入力となる呼び出し元指定のフィルタ
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserScopeQuery {
    /// 氏名・メール・電話に対する部分一致検索（大文字小文字を区別しない）
    pub search: Option<String>,
    /// 明示的な部門IDフィルタ
    pub department_id: Option<Uuid>,
    /// 部門（モジュール）名でのフィルタ。指定時は呼び出し元の所属部門にも
    /// スコープが交差される
    pub department_name: Option<String>,
}

/// ランク制限の種別
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScopeRestriction {
    /// 無制限ロール（Admin/Director等）。明示フィルタ以外の制限なし
    Unrestricted,
    /// rank >= min_rank のロールを持つユーザーのみ可視。
    /// `department_ids` があれば、ロールの所属部門もその集合に限定される
    MinRank {
        min_rank: i32,
        department_ids: Option<Vec<Uuid>>,
    },
}

/// 可視範囲を表す不透明なフィルタ記述子
///
/// ストレージ層がこれを具体的なクエリに翻訳する。検索条件は常にランク制限と
/// AND結合されなければならない（検索で制限を迂回できてはならない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibilityScope {
    pub restriction: ScopeRestriction,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
    pub search: Option<String>,
}

impl VisibilityScope {
    pub fn is_unrestricted(&self) -> bool {
        matches!(self.restriction, ScopeRestriction::Unrestricted)
    }
}
