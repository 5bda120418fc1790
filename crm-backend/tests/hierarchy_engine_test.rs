// tests/hierarchy_engine_test.rs

mod common;

use common::{InMemoryOrg, SalesFixture};
use crm_backend::error::AppError;

#[tokio::test]
async fn test_hierarchy_path_walks_to_department_apex() {
    let fixture = SalesFixture::build();
    let executive = fixture.executives[0];
    let engine = fixture.org.into_engine();

    let path = engine.resolve_hierarchy_path(executive).await.unwrap();

    // Executive(3) -> Manager(2) -> Director(1)
    assert_eq!(path.len(), 3);
    assert_eq!(path[0].user_id, executive);
    assert_eq!(path[0].rank, Some(3));
    assert_eq!(path[1].rank, Some(2));
    assert_eq!(path[2].rank, Some(1));
    assert_eq!(path[2].role_name, "Sales Director");
}

#[tokio::test]
async fn test_hierarchy_path_includes_peer_cohort() {
    let fixture = SalesFixture::build();
    let executive = fixture.executives[0];
    let engine = fixture.org.into_engine();

    let path = engine.resolve_hierarchy_path(executive).await.unwrap();

    // Executiveは3名、Managerは2名、Directorは1名
    assert_eq!(path[0].peer_count, 3);
    assert_eq!(path[1].peer_count, 2);
    assert_eq!(path[2].peer_count, 1);
    assert_eq!(path[0].peers.len(), 3);
    assert!(path[0].peers.iter().any(|p| p.id == executive));
}

#[tokio::test]
async fn test_hierarchy_path_starts_at_apex_for_director() {
    let fixture = SalesFixture::build();
    let director = fixture.director;
    let engine = fixture.org.into_engine();

    let path = engine.resolve_hierarchy_path(director).await.unwrap();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].user_id, director);
    assert_eq!(path[0].rank, Some(1));
}

#[tokio::test]
async fn test_hierarchy_path_ambiguous_superior_resolved_by_lowest_id() {
    // Manager が2名いるので、Executive の直属上位は決定的に選ばれる
    let fixture = SalesFixture::build();
    let executive = fixture.executives[0];
    let expected_superior = *fixture.managers.iter().min().unwrap();
    let engine = fixture.org.into_engine();

    let path = engine.resolve_hierarchy_path(executive).await.unwrap();

    assert_eq!(path[1].user_id, expected_superior);
}

#[tokio::test]
async fn test_hierarchy_path_stops_at_rank_gap() {
    // rank 2 のロールが存在しない部門では、rank 3 のユーザーで打ち切られる
    let mut org = InMemoryOrg::new();
    let dept = org.add_department("Support");
    let executive_role = org.add_role("Support Executive", Some(3), dept);
    org.add_role("Support Head", Some(1), dept);
    let user = org.add_user("Support User", None);
    org.assign_role(user, executive_role);
    let engine = org.into_engine();

    let path = engine.resolve_hierarchy_path(user).await.unwrap();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].rank, Some(3));
}

#[tokio::test]
async fn test_hierarchy_path_missing_user_is_not_found() {
    let fixture = SalesFixture::build();
    let engine = fixture.org.into_engine();

    let result = engine.resolve_hierarchy_path(uuid::Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_hierarchy_path_start_user_without_role_fails_closed() {
    let mut org = InMemoryOrg::new();
    org.add_department("Sales");
    let user = org.add_user("Roleless User", None);
    let engine = org.into_engine();

    let result = engine.resolve_hierarchy_path(user).await;

    assert!(matches!(result, Err(AppError::Configuration(_))));
}

#[tokio::test]
async fn test_hierarchy_path_unranked_role_terminates_walk() {
    // rank未設定のロールはノードとして載るが、そこで走査が終わる
    let mut org = InMemoryOrg::new();
    let dept = org.add_department("Ops");
    let unranked_role = org.add_role("Ops Advisor", None, dept);
    let user = org.add_user("Ops User", None);
    org.assign_role(user, unranked_role);
    let engine = org.into_engine();

    let path = engine.resolve_hierarchy_path(user).await.unwrap();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].rank, None);
}

#[tokio::test]
async fn test_subordinates_strictly_below_min_rank() {
    let fixture = SalesFixture::build();
    let manager = fixture.managers[0];
    let executives = fixture.executives.clone();
    let engine = fixture.org.into_engine();

    let subordinates = engine.resolve_subordinates(manager).await.unwrap();

    // Manager(2) の部下は Executive(3) のみ。同rankの他Managerは含まれない
    let ids: Vec<_> = subordinates.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 3);
    for executive in &executives {
        assert!(ids.contains(executive));
    }
}

#[tokio::test]
async fn test_subordinates_excludes_caller() {
    let fixture = SalesFixture::build();
    let director = fixture.director;
    let engine = fixture.org.into_engine();

    let subordinates = engine.resolve_subordinates(director).await.unwrap();

    // Director(1) の部下は Manager 2名と Executive 3名
    assert_eq!(subordinates.len(), 5);
    assert!(subordinates.iter().all(|u| u.id != director));
}

#[tokio::test]
async fn test_subordinates_empty_for_lowest_rank() {
    let fixture = SalesFixture::build();
    let executive = fixture.executives[0];
    let engine = fixture.org.into_engine();

    let subordinates = engine.resolve_subordinates(executive).await.unwrap();

    assert!(subordinates.is_empty());
}

#[tokio::test]
async fn test_subordinates_without_team_fails_closed() {
    let mut org = InMemoryOrg::new();
    let dept = org.add_department("Sales");
    let role = org.add_role("Sales Manager", Some(2), dept);
    let user = org.add_user("Teamless Manager", None);
    org.assign_role(user, role);
    let engine = org.into_engine();

    let result = engine.resolve_subordinates(user).await;

    assert!(matches!(result, Err(AppError::Configuration(_))));
}

#[tokio::test]
async fn test_subordinates_missing_user_is_not_found() {
    let fixture = SalesFixture::build();
    let engine = fixture.org.into_engine();

    let result = engine.resolve_subordinates(uuid::Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_subordinates_scoped_to_team_department() {
    // 別部門の下位rankユーザーは部下に含まれない
    let mut fixture = SalesFixture::build();
    let other_dept = fixture.org.add_department("Marketing");
    let other_team = fixture.org.add_team(other_dept);
    let other_role = fixture
        .org
        .add_role("Marketing Executive", Some(3), other_dept);
    let outsider = fixture.org.add_user("Marketing Person", Some(other_team));
    fixture.org.assign_role(outsider, other_role);

    let manager = fixture.managers[0];
    let engine = fixture.org.into_engine();

    let subordinates = engine.resolve_subordinates(manager).await.unwrap();

    assert!(subordinates.iter().all(|u| u.id != outsider));
}
