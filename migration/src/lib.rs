// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 組織構造マイグレーション
mod m20250804_000001_create_departments_table;
mod m20250804_000002_create_roles_table;
mod m20250804_000003_create_users_table;
mod m20250804_000004_create_teams_table;
mod m20250804_000005_add_team_id_to_users;
mod m20250804_000006_create_team_members_table;

// パーミッション関連マイグレーション
mod m20250804_000007_create_permissions_table;
mod m20250804_000008_create_user_roles_table;
mod m20250804_000009_create_role_permissions_table;
mod m20250804_000010_create_user_permissions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250804_000001_create_departments_table::Migration),
            Box::new(m20250804_000003_create_users_table::Migration),
            // 2. 部門に依存するテーブル
            Box::new(m20250804_000002_create_roles_table::Migration),
            Box::new(m20250804_000004_create_teams_table::Migration),
            // 3. 既存テーブルの変更（teams への外部キー追加）
            Box::new(m20250804_000005_add_team_id_to_users::Migration),
            Box::new(m20250804_000006_create_team_members_table::Migration),
            // 4. パーミッションシステム
            Box::new(m20250804_000007_create_permissions_table::Migration),
            Box::new(m20250804_000008_create_user_roles_table::Migration),
            Box::new(m20250804_000009_create_role_permissions_table::Migration),
            Box::new(m20250804_000010_create_user_permissions_table::Migration),
        ]
    }
}
