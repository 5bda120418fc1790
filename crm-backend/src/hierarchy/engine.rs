// src/hierarchy/engine.rs

use crate::config::HierarchyConfig;
use crate::domain::role_model::APEX_RANK;
use crate::error::{AppError, AppResult};
use crate::hierarchy::scope::{ScopeRestriction, UserScopeQuery, VisibilityScope};
use crate::hierarchy::store::{HierarchyStore, UserRecord};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// 階層パス上の1ノード
///
/// 同一 (ロール, 部門) を共有するピアの一覧と件数は契約の一部であり、
/// 付随的なログ出力ではない。
#[derive(Debug, Clone, Serialize)]
pub struct HierarchyNode {
    pub user_id: Uuid,
    pub full_name: String,
    pub role_name: String,
    pub rank: Option<i32>,
    pub department_name: String,
    pub peer_count: usize,
    pub peers: Vec<PeerUser>,
}

/// 階層ノードに載せるピアユーザーの要約
#[derive(Debug, Clone, Serialize)]
pub struct PeerUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<UserRecord> for PeerUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

/// rank空き状況の問い合わせ結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankAvailability {
    pub available: bool,
    pub used_ranks: Vec<i32>,
}

/// 階層解決エンジン
///
/// 全操作は読み取り専用のストア参照と純粋な計算のみで構成され、
/// ロックも可変状態も持たない。並行呼び出しは調整なしに独立して動作する。
pub struct HierarchyEngine {
    store: Arc<dyn HierarchyStore>,
    config: HierarchyConfig,
}

impl HierarchyEngine {
    pub fn new(store: Arc<dyn HierarchyStore>, config: HierarchyConfig) -> Self {
        Self { store, config }
    }

    /// 呼び出し元の可視範囲を解決する
    ///
    /// 無制限ロールならフィルタのみ、それ以外は rank >= 呼び出し元rank の
    /// ロールを持つユーザーに制限される（厳密に上位の者は見えない）。
    /// ロール・rank欠落時は既定スコープに落とさず必ず失敗する（fail-closed）。
    pub async fn resolve_visibility_scope(
        &self,
        caller_id: Uuid,
        query: &UserScopeQuery,
    ) -> AppResult<VisibilityScope> {
        let caller = self
            .store
            .find_user_by_id(caller_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Current user not found".to_string()))?;

        let roles = self.store.find_user_roles(caller.id).await?;
        // 先頭の割当が正準ロール（割当順はストアが保証する）
        let current_role = roles.first().ok_or_else(|| {
            AppError::Configuration("Current user has no role assignment".to_string())
        })?;
        let current_rank = current_role.rank.ok_or_else(|| {
            AppError::Configuration("Current user's role has no rank".to_string())
        })?;

        let search = query
            .search
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let restriction = if self.config.is_unrestricted(&current_role.name) {
            debug!(caller_id = %caller_id, role = %current_role.name, "Resolved unrestricted visibility scope");
            ScopeRestriction::Unrestricted
        } else {
            // 部門横断モジュール指定時は、呼び出し元の所属部門にも交差させる
            let department_ids = if query.department_name.is_some() {
                Some(roles.iter().map(|r| r.department_id).collect())
            } else {
                None
            };

            debug!(
                caller_id = %caller_id,
                role = %current_role.name,
                min_rank = current_rank,
                "Resolved rank-restricted visibility scope"
            );
            ScopeRestriction::MinRank {
                min_rank: current_rank,
                department_ids,
            }
        };

        Ok(VisibilityScope {
            restriction,
            department_id: query.department_id,
            department_name: query.department_name.clone(),
            search,
        })
    }

    /// ユーザーから部門頂点までの上位者チェーンを構築する
    ///
    /// 各ステップで同一部門内の rank - 1 のロール保持者を直属上位とする。
    /// 同rankの上位候補が複数いる場合はユーザーIDが最小の者を決定的に選ぶ。
    /// 戻り値は走査順（起点が先頭、最上位が末尾）。
    pub async fn resolve_hierarchy_path(&self, user_id: Uuid) -> AppResult<Vec<HierarchyNode>> {
        let start = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut path: Vec<HierarchyNode> = Vec::new();
        let mut visited: HashSet<Uuid> = HashSet::new();
        let mut current = start;
        let mut is_start = true;

        loop {
            if !visited.insert(current.id) {
                // rankは毎ステップ厳密に1ずつ減るので通常は到達しない。
                // ストアの矛盾したデータに対する停止保証
                warn!(user_id = %current.id, "Hierarchy walk revisited a user, stopping");
                break;
            }

            let roles = self.store.find_user_roles(current.id).await?;
            let role = match roles.into_iter().next() {
                Some(role) => role,
                None if is_start => {
                    return Err(AppError::Configuration(
                        "User has no role assignment".to_string(),
                    ));
                }
                None => break,
            };
            is_start = false;

            // 同一 (ロール, 部門) のピアコホート
            let peers: Vec<PeerUser> = self
                .store
                .find_users_by_role(role.id)
                .await?
                .into_iter()
                .map(PeerUser::from)
                .collect();

            let rank = role.rank;
            let department_id = role.department_id;

            path.push(HierarchyNode {
                user_id: current.id,
                full_name: current.full_name.clone(),
                role_name: role.name,
                rank,
                department_name: role.department_name,
                peer_count: peers.len(),
                peers,
            });

            // 頂点またはrank未設定で終了（いずれも正常終了）
            let rank = match rank {
                Some(rank) if rank > APEX_RANK => rank,
                _ => break,
            };

            let superior_role = match self
                .store
                .find_role_by_rank(department_id, rank - 1)
                .await?
            {
                Some(role) => role,
                None => break,
            };

            let mut holders = self.store.find_users_by_role(superior_role.id).await?;
            if holders.is_empty() {
                break;
            }
            // 曖昧な上位者はID最小で決定的に解決する
            holders.sort_by_key(|u| u.id);
            current = holders.remove(0);
        }

        debug!(user_id = %user_id, path_len = path.len(), "Hierarchy path resolved");

        Ok(path)
    }

    /// 呼び出し元の部下一覧を返す
    ///
    /// 所属チームの部門を基準に、呼び出し元の最小rank（最上位ロール）より
    /// 厳密に大きいrankのロールを持つユーザーのみ。可視範囲と異なり
    /// 同rankは含まれない。
    pub async fn resolve_subordinates(&self, user_id: Uuid) -> AppResult<Vec<UserRecord>> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let department = self
            .store
            .find_user_team_department(user.id)
            .await?
            .ok_or_else(|| {
                AppError::Configuration("User does not belong to any department".to_string())
            })?;

        let roles = self.store.find_user_roles(user.id).await?;
        let min_rank = roles
            .iter()
            .filter_map(|r| r.rank)
            .min()
            .ok_or_else(|| AppError::Configuration("User has no ranked role".to_string()))?;

        let candidates = self
            .store
            .find_users_by_team_department(department.id)
            .await?;

        let mut subordinates = Vec::new();
        for candidate in candidates {
            if candidate.id == user.id {
                continue;
            }
            let candidate_roles = self.store.find_user_roles(candidate.id).await?;
            let is_subordinate = candidate_roles
                .iter()
                .filter_map(|r| r.rank)
                .any(|rank| rank > min_rank);
            if is_subordinate {
                subordinates.push(candidate);
            }
        }

        debug!(
            user_id = %user_id,
            department_id = %department.id,
            min_rank,
            count = subordinates.len(),
            "Subordinates resolved"
        );

        Ok(subordinates)
    }

    /// 部門内のrank空き状況を返す
    ///
    /// アクティブな（削除されていない）ロールのみが対象。`used_ranks` は昇順。
    pub async fn check_rank_availability(
        &self,
        department_id: Uuid,
        rank: i32,
    ) -> AppResult<RankAvailability> {
        if rank < APEX_RANK {
            return Err(AppError::ValidationError(format!(
                "rank: must be a positive integer, got {}",
                rank
            )));
        }

        let roles = self.store.find_roles_by_department(department_id).await?;

        let mut used_ranks: Vec<i32> = roles.iter().filter_map(|r| r.rank).collect();
        used_ranks.sort_unstable();

        let available = !used_ranks.contains(&rank);

        Ok(RankAvailability {
            available,
            used_ranks,
        })
    }
}
