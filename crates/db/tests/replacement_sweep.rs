//! Integration tests for the replacement sweep.
//!
//! The sweep takes `today` as a parameter, so each test pins the clock
//! relative to a fixed purchase date.

use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use stockroom_db::models::category::CreateCategory;
use stockroom_db::models::item::CreateItem;
use stockroom_db::repositories::{CategoryRepo, ItemRepo};

const THRESHOLD: i32 = 100;

fn purchased() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

async fn seed_item(pool: &PgPool) -> i64 {
    let category = CreateCategory {
        name: "Tools".to_string(),
        description: String::new(),
    };
    let category_id = CategoryRepo::create(pool, &category).await.unwrap().id;

    let item = CreateItem {
        name: "Drill".to_string(),
        category_id,
        photo_url: "uploads/drill.jpg".to_string(),
        price: 200.0,
        purchase_date: purchased(),
        depreciated_rate: 10,
    };
    ItemRepo::create(pool, &item).await.unwrap().id
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sweep_flags_items_past_threshold(pool: PgPool) {
    let id = seed_item(&pool).await;
    let today = purchased() + Duration::days(150);

    let swept = ItemRepo::sweep_replacement(&pool, THRESHOLD, today)
        .await
        .unwrap();
    assert_eq!(swept.len(), 1);
    assert_eq!(swept[0].total_usage_days, 150);
    assert!(swept[0].is_replacement_needed);

    let stored = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.total_usage_days, 150);
    assert!(stored.is_replacement_needed);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sweep_is_idempotent_on_same_day(pool: PgPool) {
    let id = seed_item(&pool).await;
    let today = purchased() + Duration::days(150);

    ItemRepo::sweep_replacement(&pool, THRESHOLD, today)
        .await
        .unwrap();
    let first = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    ItemRepo::sweep_replacement(&pool, THRESHOLD, today)
        .await
        .unwrap();
    let second = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    assert_eq!(first.total_usage_days, second.total_usage_days);
    assert_eq!(first.is_replacement_needed, second.is_replacement_needed);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_flag_is_kept_at_threshold_and_cleared_below(pool: PgPool) {
    let id = seed_item(&pool).await;

    ItemRepo::sweep_replacement(&pool, THRESHOLD, purchased() + Duration::days(150))
        .await
        .unwrap();

    // Exactly at the threshold the previous flag survives.
    ItemRepo::sweep_replacement(&pool, THRESHOLD, purchased() + Duration::days(100))
        .await
        .unwrap();
    let at_threshold = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(at_threshold.total_usage_days, 100);
    assert!(at_threshold.is_replacement_needed);

    ItemRepo::sweep_replacement(&pool, THRESHOLD, purchased() + Duration::days(50))
        .await
        .unwrap();
    let below = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(below.total_usage_days, 50);
    assert!(!below.is_replacement_needed);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sweep_skips_deleted_items(pool: PgPool) {
    let id = seed_item(&pool).await;
    ItemRepo::soft_delete(&pool, id).await.unwrap();

    let swept = ItemRepo::sweep_replacement(&pool, THRESHOLD, purchased() + Duration::days(150))
        .await
        .unwrap();
    assert!(swept.is_empty());

    let row = ItemRepo::find_by_id_include_deleted(&pool, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_usage_days, 0);
    assert!(!row.is_replacement_needed);
}
