// src/hierarchy/mod.rs

//! 階層解決エンジン
//!
//! 部門 → ロール（rank付き） → ユーザーのグラフから、可視範囲・上位者
//! チェーン・部下一覧・rank空き状況を導出する。データ取得は注入された
//! [`store::HierarchyStore`] 経由で行い、エンジン自体は状態を持たない。

pub mod engine;
pub mod scope;
pub mod store;

pub use engine::{HierarchyEngine, HierarchyNode, PeerUser, RankAvailability};
pub use scope::{ScopeRestriction, UserScopeQuery, VisibilityScope};
pub use store::{DepartmentRecord, HierarchyStore, RoleRecord, UserRecord};
