//! Integration tests for menu seeding against the database.
//!
//! These tests require a migrated `PostgreSQL` database in `DATABASE_URL`.

use iolo_admin::db::FoodRepository;
use iolo_core::menu::FoodDraft;
use iolo_core::{Category, Price};
use iolo_integration_tests::database;

fn draft(name: &str) -> FoodDraft {
    FoodDraft {
        name: name.to_owned(),
        description: None,
        price: Price::parse("49.99").expect("valid price"),
        category: Category::Side,
        ingredients: vec![],
        images: vec![],
        is_available: true,
    }
}

async fn food_count(pool: &sqlx::PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM menu.food")
        .fetch_one(pool)
        .await
        .expect("Failed to count foods")
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_failed_seed_leaves_menu_untouched() {
    let pool = database().await;
    let repo = FoodRepository::new(&pool);
    let before = food_count(&pool).await;

    // The blank name passes through the repository but fails the column check
    let drafts = [draft(&format!("Test {}", uuid::Uuid::new_v4())), draft("   ")];
    assert!(repo.seed(&drafts, true).await.is_err());

    assert_eq!(food_count(&pool).await, before);
}
