//! Cart mutation flows against a real embedded store

use canteen_server::{AppError, CartService, Config, ServerState};
use shared::MenuCategory;
use surrealdb::RecordId;
use tempfile::TempDir;

use canteen_server::db::models::{MenuItem, MenuItemCreate, UserCreate};
use canteen_server::db::repository::{MenuItemRepository, UserRepository};

async fn test_state() -> (TempDir, ServerState) {
    let tmp = TempDir::new().expect("tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await.expect("state init");
    (tmp, state)
}

async fn make_user(state: &ServerState, email: &str) -> RecordId {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            name: "Test User".into(),
            email: email.into(),
            phone: "9800000000".into(),
            password: "secret-password".into(),
            is_admin: false,
        })
        .await
        .expect("create user");
    user.id.expect("user id")
}

async fn make_item(state: &ServerState, name: &str, price: i64, available: bool) -> MenuItem {
    let repo = MenuItemRepository::new(state.get_db());
    repo.create(MenuItemCreate {
        name: name.into(),
        description: String::new(),
        price,
        half_price: None,
        has_half_option: false,
        category: MenuCategory::Meals,
        image: None,
        available: Some(available),
        popular: None,
    })
    .await
    .expect("create menu item")
}

fn item_id(item: &MenuItem) -> String {
    item.id.as_ref().expect("menu item id").to_string()
}

#[tokio::test]
async fn add_then_get_reflects_quantity() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "a@example.edu").await;
    let dosa = make_item(&state, "Masala Dosa", 101, true).await;

    let service = CartService::from_state(&state);
    service
        .add_item(&user, &item_id(&dosa), None, None, 2, None)
        .await
        .expect("add");

    let cart = service.get(&user).await.expect("get");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 2);
    assert_eq!(cart.items[0].name, "Masala Dosa");
    assert_eq!(cart.items[0].price, 101);
    assert_eq!(cart.total(), 202);
    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn quantity_out_of_bounds_is_rejected() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "b@example.edu").await;
    let dosa = make_item(&state, "Masala Dosa", 101, true).await;
    let service = CartService::from_state(&state);

    for bad in [0u32, 11, 100] {
        let err = service
            .add_item(&user, &item_id(&dosa), None, None, bad, None)
            .await
            .expect_err("quantity should be rejected");
        assert!(matches!(err, AppError::Validation(_)), "q={bad}: {err}");
    }

    // Boundaries are inclusive
    service
        .add_item(&user, &item_id(&dosa), None, None, 1, None)
        .await
        .expect("q=1");
    let cart = service
        .add_item(&user, &item_id(&dosa), None, None, 9, None)
        .await
        .expect("q=9 merges to 10");
    assert_eq!(cart.items[0].quantity, 10);
}

#[tokio::test]
async fn same_line_merges_and_caps() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "c@example.edu").await;
    let dosa = make_item(&state, "Masala Dosa", 101, true).await;
    let service = CartService::from_state(&state);

    service
        .add_item(&user, &item_id(&dosa), None, None, 3, None)
        .await
        .unwrap();
    let cart = service
        .add_item(&user, &item_id(&dosa), None, None, 4, None)
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1, "identical lines merge");
    assert_eq!(cart.items[0].quantity, 7);

    // Different instructions start a new line
    let cart = service
        .add_item(
            &user,
            &item_id(&dosa),
            None,
            None,
            1,
            Some("extra chutney".into()),
        )
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 2);

    // Merging past the limit caps at 10
    let cart = service
        .add_item(&user, &item_id(&dosa), None, None, 8, None)
        .await
        .unwrap();
    let merged = cart
        .items
        .iter()
        .find(|l| l.instructions.is_empty())
        .unwrap();
    assert_eq!(merged.quantity, 10);
}

#[tokio::test]
async fn update_quantity_paths() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "d@example.edu").await;
    let dosa = make_item(&state, "Masala Dosa", 101, true).await;
    let service = CartService::from_state(&state);

    // No cart yet
    let err = service
        .update_quantity(&user, "nonexistent", 2)
        .await
        .expect_err("no cart");
    assert!(matches!(err, AppError::NotFound(_)));

    let cart = service
        .add_item(&user, &item_id(&dosa), None, None, 2, None)
        .await
        .unwrap();
    let line_id = cart.items[0].item_id.clone();

    let cart = service.update_quantity(&user, &line_id, 5).await.unwrap();
    assert_eq!(cart.items[0].quantity, 5);

    let err = service
        .update_quantity(&user, &line_id, 11)
        .await
        .expect_err("over limit");
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .update_quantity(&user, "missing-line", 2)
        .await
        .expect_err("unknown line");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn remove_last_item_keeps_empty_cart() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "e@example.edu").await;
    let dosa = make_item(&state, "Masala Dosa", 101, true).await;
    let service = CartService::from_state(&state);

    let cart = service
        .add_item(&user, &item_id(&dosa), None, None, 1, None)
        .await
        .unwrap();
    let line_id = cart.items[0].item_id.clone();

    let cart = service.remove_item(&user, &line_id).await.unwrap();
    assert!(cart.items.is_empty());

    // The cart document survives and is readable
    let cart = service.get(&user).await.unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);

    let err = service
        .remove_item(&user, &line_id)
        .await
        .expect_err("already removed");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn clear_is_idempotent() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "f@example.edu").await;
    let dosa = make_item(&state, "Masala Dosa", 101, true).await;
    let service = CartService::from_state(&state);

    // Clear before any cart exists creates one
    let cart = service.clear(&user).await.unwrap();
    assert!(cart.is_empty());

    service
        .add_item(&user, &item_id(&dosa), None, None, 3, None)
        .await
        .unwrap();
    let cart = service.clear(&user).await.unwrap();
    assert!(cart.is_empty());

    let cart = service.clear(&user).await.unwrap();
    assert!(cart.is_empty());
}

#[tokio::test]
async fn unavailable_and_missing_items_are_rejected() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "g@example.edu").await;
    let off_menu = make_item(&state, "Seasonal Special", 150, false).await;
    let service = CartService::from_state(&state);

    let err = service
        .add_item(&user, &item_id(&off_menu), None, None, 1, None)
        .await
        .expect_err("unavailable");
    assert!(matches!(err, AppError::InvalidState(_)));

    let err = service
        .add_item(&user, "menu_item:doesnotexist", None, None, 1, None)
        .await
        .expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn half_portion_uses_listed_price_only() {
    let (_tmp, state) = test_state().await;
    let user = make_user(&state, "h@example.edu").await;
    let repo = MenuItemRepository::new(state.get_db());
    let thali = repo
        .create(MenuItemCreate {
            name: "Veg Thali".into(),
            description: String::new(),
            price: 120,
            half_price: Some(70),
            has_half_option: true,
            category: MenuCategory::Meals,
            image: None,
            available: None,
            popular: None,
        })
        .await
        .unwrap();
    let thali_id = thali.id.as_ref().unwrap().to_string();
    let service = CartService::from_state(&state);

    // Half portion at the listed half price
    let cart = service
        .add_item(
            &user,
            &thali_id,
            Some("Veg Thali (half)".into()),
            Some(70),
            1,
            None,
        )
        .await
        .expect("half portion");
    assert_eq!(cart.items[0].price, 70);

    // Arbitrary prices are rejected
    let err = service
        .add_item(&user, &thali_id, None, Some(55), 1, None)
        .await
        .expect_err("unlisted price");
    assert!(matches!(err, AppError::Validation(_)));

    // Half portion is its own line next to the full portion
    let cart = service
        .add_item(&user, &thali_id, None, None, 1, None)
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 2);
}
