// tests/role_rank_test.rs

mod common;

use common::{InMemoryOrg, SalesFixture};
use crm_backend::error::AppError;

#[tokio::test]
async fn test_rank_availability_reports_used_ranks_ascending() {
    let fixture = SalesFixture::build();
    let department_id = fixture.department_id;
    let engine = fixture.org.into_engine();

    let availability = engine
        .check_rank_availability(department_id, 4)
        .await
        .unwrap();

    assert!(availability.available);
    assert_eq!(availability.used_ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_rank_availability_detects_taken_rank() {
    let fixture = SalesFixture::build();
    let department_id = fixture.department_id;
    let engine = fixture.org.into_engine();

    let availability = engine
        .check_rank_availability(department_id, 2)
        .await
        .unwrap();

    assert!(!availability.available);
}

#[tokio::test]
async fn test_rank_availability_is_idempotent_without_writes() {
    let fixture = SalesFixture::build();
    let department_id = fixture.department_id;
    let engine = fixture.org.into_engine();

    let first = engine
        .check_rank_availability(department_id, 2)
        .await
        .unwrap();
    let second = engine
        .check_rank_availability(department_id, 2)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rank_availability_rejects_non_positive_rank() {
    let fixture = SalesFixture::build();
    let department_id = fixture.department_id;
    let engine = fixture.org.into_engine();

    let zero = engine.check_rank_availability(department_id, 0).await;
    assert!(matches!(zero, Err(AppError::ValidationError(_))));

    let negative = engine.check_rank_availability(department_id, -3).await;
    assert!(matches!(negative, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_rank_availability_ignores_unranked_roles() {
    let mut org = InMemoryOrg::new();
    let dept = org.add_department("Ops");
    org.add_role("Ops Head", Some(1), dept);
    org.add_role("Ops Advisor", None, dept);
    let engine = org.into_engine();

    let availability = engine.check_rank_availability(dept, 2).await.unwrap();

    assert!(availability.available);
    assert_eq!(availability.used_ranks, vec![1]);
}

#[tokio::test]
async fn test_rank_availability_empty_department() {
    let mut org = InMemoryOrg::new();
    let dept = org.add_department("New Department");
    let engine = org.into_engine();

    let availability = engine.check_rank_availability(dept, 1).await.unwrap();

    assert!(availability.available);
    assert!(availability.used_ranks.is_empty());
}
