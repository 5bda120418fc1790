// src/repository/user_repository.rs

use crate::domain::department_model::{
    Column as DepartmentColumn, Entity as DepartmentEntity,
};
use crate::domain::role_model::{Column as RoleColumn, Entity as RoleEntity};
use crate::domain::user_model::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as User,
    UserStatus,
};
use crate::domain::user_role_model::{
    ActiveModel as UserRoleActiveModel, Column as UserRoleColumn, Entity as UserRoleEntity,
};
use crate::error::AppResult;
use crate::hierarchy::{ScopeRestriction, VisibilityScope};
use crate::types::{SortOrder, SortQuery};
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashSet;
use uuid::Uuid;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// ユーザーを作成
    pub async fn create(&self, user: &User) -> AppResult<User> {
        let active_model = UserActiveModel {
            id: Set(user.id),
            full_name: Set(user.full_name.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            status: Set(user.status.clone()),
            profile_image: Set(user.profile_image.clone()),
            team_id: Set(user.team_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(model)
    }

    /// ユーザーをIDで取得
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(model)
    }

    /// 複数IDでユーザーを取得（ID昇順）
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(UserColumn::Id.is_in(ids.to_vec()))
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// メールまたは電話番号でユーザーを取得（重複チェック用）
    pub async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(
                Condition::any()
                    .add(UserColumn::Email.eq(email))
                    .add(UserColumn::Phone.eq(phone)),
            )
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// 可視範囲記述子をクエリに翻訳してユーザー一覧を取得
    ///
    /// 検索条件はランク制限と常にAND結合される。検索で制限を迂回することは
    /// できない。
    pub async fn find_visible_users(
        &self,
        scope: &VisibilityScope,
        page: i32,
        per_page: i32,
        sort: &SortQuery,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut condition =
            Condition::all().add(UserColumn::Status.eq(UserStatus::Active.as_str()));

        // ランク制限の翻訳
        if let ScopeRestriction::MinRank {
            min_rank,
            department_ids,
        } = &scope.restriction
        {
            let visible_ids = self
                .user_ids_by_role(Some(*min_rank), department_ids.as_deref(), None)
                .await?;
            condition = condition.add(UserColumn::Id.is_in(visible_ids));
        }

        // 明示的な部門IDフィルタ
        if let Some(department_id) = scope.department_id {
            let ids = self
                .user_ids_by_role(None, Some(&[department_id]), None)
                .await?;
            condition = condition.add(UserColumn::Id.is_in(ids));
        }

        // 部門（モジュール）名フィルタ
        if let Some(department_name) = &scope.department_name {
            let ids = self
                .user_ids_by_role(None, None, Some(department_name))
                .await?;
            condition = condition.add(UserColumn::Id.is_in(ids));
        }

        // 検索条件（氏名・メール・電話の大文字小文字を区別しない部分一致）
        if let Some(search) = &scope.search {
            let pattern = format!("%{}%", search);
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(UserColumn::FullName).ilike(&pattern))
                    .add(Expr::col(UserColumn::Email).ilike(&pattern))
                    .add(Expr::col(UserColumn::Phone).ilike(&pattern)),
            );
        }

        let mut query = UserEntity::find().filter(condition);

        // ソートの適用（許可カラム以外はID昇順にフォールバック）
        let sort_by = sort.sort_by_allowed(&["id", "full_name", "email", "created_at"], "id");
        query = match (sort_by, sort.sort_order) {
            ("full_name", SortOrder::Asc) => query.order_by_asc(UserColumn::FullName),
            ("full_name", SortOrder::Desc) => query.order_by_desc(UserColumn::FullName),
            ("email", SortOrder::Asc) => query.order_by_asc(UserColumn::Email),
            ("email", SortOrder::Desc) => query.order_by_desc(UserColumn::Email),
            ("created_at", SortOrder::Asc) => query.order_by_asc(UserColumn::CreatedAt),
            ("created_at", SortOrder::Desc) => query.order_by_desc(UserColumn::CreatedAt),
            (_, SortOrder::Asc) => query.order_by_asc(UserColumn::Id),
            (_, SortOrder::Desc) => query.order_by_desc(UserColumn::Id),
        };

        let paginator = query.paginate(&self.db, per_page as u64);
        let total_count = paginator.num_items().await?;
        let users = paginator.fetch_page((page - 1) as u64).await?;

        Ok((users, total_count))
    }

    /// ユーザー状態を更新
    pub async fn update_status(&self, id: Uuid, status: UserStatus) -> AppResult<Option<User>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: UserActiveModel = user.into();
        active_model.status = Set(status.as_str().to_string());
        active_model.updated_at = Set(Utc::now());

        let updated = active_model.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// プロフィール画像を更新（Noneで削除）
    pub async fn update_profile_image(
        &self,
        id: Uuid,
        profile_image: Option<String>,
    ) -> AppResult<Option<User>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: UserActiveModel = user.into();
        active_model.profile_image = Set(profile_image);
        active_model.updated_at = Set(Utc::now());

        let updated = active_model.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// ユーザー情報を更新（許可フィールドのみ、サービス層で検証済み）
    pub async fn update_fields(
        &self,
        id: Uuid,
        full_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        password_hash: Option<String>,
    ) -> AppResult<Option<User>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: UserActiveModel = user.into();
        if let Some(full_name) = full_name {
            active_model.full_name = Set(full_name);
        }
        if let Some(email) = email {
            active_model.email = Set(email);
        }
        if let Some(phone) = phone {
            active_model.phone = Set(phone);
        }
        if let Some(password_hash) = password_hash {
            active_model.password_hash = Set(password_hash);
        }
        active_model.updated_at = Set(Utc::now());

        let updated = active_model.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// 所属チームを設定（Noneで解除）
    pub async fn set_team(&self, id: Uuid, team_id: Option<Uuid>) -> AppResult<Option<User>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: UserActiveModel = user.into();
        active_model.team_id = Set(team_id);
        active_model.updated_at = Set(Utc::now());

        let updated = active_model.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// ロール割当を置き換える（既存割当を削除して新規作成）
    pub async fn replace_role_assignments(
        &self,
        user_id: Uuid,
        role_ids: &[Uuid],
    ) -> AppResult<()> {
        UserRoleEntity::delete_many()
            .filter(UserRoleColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        for role_id in role_ids {
            let assignment = UserRoleActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                role_id: Set(*role_id),
                assigned_at: Set(Utc::now()),
            };
            assignment.insert(&self.db).await?;
        }

        Ok(())
    }

    /// ロール割当を1件追加
    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        let assignment = UserRoleActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role_id: Set(role_id),
            assigned_at: Set(Utc::now()),
        };
        assignment.insert(&self.db).await?;
        Ok(())
    }

    /// ロール条件（最小rank・部門集合・部門名）に合致するユーザーIDを列挙
    ///
    /// 2段階クエリ：条件に合うロールID → その割当を持つユーザーID。
    /// 可視範囲記述子をエンジン非依存に保つため、ここでのみ翻訳する。
    async fn user_ids_by_role(
        &self,
        min_rank: Option<i32>,
        department_ids: Option<&[Uuid]>,
        department_name: Option<&str>,
    ) -> AppResult<Vec<Uuid>> {
        let mut role_condition = Condition::all().add(RoleColumn::DeletedAt.is_null());

        if let Some(min_rank) = min_rank {
            role_condition = role_condition.add(RoleColumn::Rank.gte(min_rank));
        }
        if let Some(department_ids) = department_ids {
            role_condition =
                role_condition.add(RoleColumn::DepartmentId.is_in(department_ids.to_vec()));
        }
        if let Some(department_name) = department_name {
            let department_ids: Vec<Uuid> = DepartmentEntity::find()
                .filter(DepartmentColumn::Name.eq(department_name))
                .filter(DepartmentColumn::DeletedAt.is_null())
                .all(&self.db)
                .await?
                .into_iter()
                .map(|d| d.id)
                .collect();
            role_condition = role_condition.add(RoleColumn::DepartmentId.is_in(department_ids));
        }

        let role_ids: Vec<Uuid> = RoleEntity::find()
            .filter(role_condition)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        let user_ids: HashSet<Uuid> = UserRoleEntity::find()
            .select_only()
            .column(UserRoleColumn::UserId)
            .filter(UserRoleColumn::RoleId.is_in(role_ids))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        Ok(user_ids.into_iter().collect())
    }
}
