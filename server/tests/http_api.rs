//! HTTP surface tests: routes, envelope shape, status codes, auth rules
//!
//! Drives the assembled router in-process, the same way a client would.

use axum::Router;
use axum::body::Body;
use canteen_server::{Config, ServerState, build_app};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@canteen.local";
const ADMIN_PASSWORD: &str = "admin-secret-password";

async fn test_app() -> (TempDir, Router) {
    let tmp = TempDir::new().expect("tempdir");
    let mut config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    config.admin_email = Some(ADMIN_EMAIL.into());
    config.admin_password = Some(ADMIN_PASSWORD.into());
    config.delivery_fee = 20;
    config.tax_rate_percent = 5;
    let state = ServerState::initialize(&config).await.expect("state init");
    (tmp, build_app(state))
}

async fn call(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(app: &Router, email: &str) -> String {
    let (status, _) = call(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Test User",
            "email": email,
            "phone": "9800000000",
            "password": "secret-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, email, "secret-password").await
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    body["data"]["token"].as_str().expect("token").to_string()
}

async fn create_menu_item(app: &Router, admin: &str, name: &str, price: i64) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/menu",
        Some(admin),
        Some(json!({
            "name": name,
            "price": price,
            "category": "meals"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().expect("menu id").to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (_tmp, app) = test_app().await;
    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
}

#[tokio::test]
async fn registration_and_login_flow() {
    let (_tmp, app) = test_app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Asha",
            "email": "asha@example.edu",
            "phone": "9800000001",
            "password": "secret-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["is_admin"], json!(false));

    // Duplicate email
    let (status, body) = call(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Asha Again",
            "email": "asha@example.edu",
            "phone": "9800000001",
            "password": "secret-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("VALIDATION_ERROR"));

    // Wrong password gets the unified message
    let (status, body) = call(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "asha@example.edu", "password": "nope-nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid email or password"));

    let token = login(&app, "asha@example.edu", "secret-password").await;
    let (status, body) = call(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("asha@example.edu"));
}

#[tokio::test]
async fn protected_routes_require_token() {
    let (_tmp, app) = test_app().await;

    for (method, path) in [
        ("GET", "/cart"),
        ("POST", "/orders"),
        ("GET", "/orders"),
        ("GET", "/auth/me"),
    ] {
        let (status, body) = call(&app, method, path, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(body["success"], json!(false));
    }

    // Garbage token
    let (status, _) = call(&app, "GET", "/cart", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn menu_is_public_to_read_admin_to_write() {
    let (_tmp, app) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let customer = register_and_login(&app, "customer@example.edu").await;

    // Reads need no token
    let (status, body) = call(&app, "GET", "/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));

    // Customers cannot write
    let payload = json!({"name": "Poha", "price": 30, "category": "breakfast"});
    let (status, body) = call(&app, "POST", "/menu", Some(&customer), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("FORBIDDEN"));

    // Admins can
    let (status, _) = call(&app, "POST", "/menu", Some(&admin), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    // Bulk ingestion
    let (status, body) = call(
        &app,
        "POST",
        "/menu/import",
        Some(&admin),
        Some(json!([
            {"name": "Veg Thali", "price": 120, "category": "meals", "popular": true},
            {"name": "Lassi", "price": 45, "category": "beverages", "available": false}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["count"], json!(2));

    // Filters
    let (_, body) = call(&app, "GET", "/menu?category=breakfast", None, None).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["name"], json!("Poha"));

    let (_, body) = call(&app, "GET", "/menu?available=true", None, None).await;
    assert_eq!(body["count"], json!(2));

    let (_, body) = call(&app, "GET", "/menu?popular=true", None, None).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["name"], json!("Veg Thali"));

    let (status, body) = call(&app, "GET", "/menu?category=sushi", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn cart_and_checkout_over_http() {
    let (_tmp, app) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let customer = register_and_login(&app, "hungry@example.edu").await;

    let dosa = create_menu_item(&app, &admin, "Masala Dosa", 101).await;
    let coffee = create_menu_item(&app, &admin, "Filter Coffee", 66).await;

    // Empty cart checkout is rejected before any write
    let order_body = json!({
        "delivery": {"hostel": "North Block", "room": "214", "instructions": ""},
        "contact": {"name": "Asha", "phone": "9800000001"},
        "payment": {"method": "cash_on_delivery"}
    });
    let (status, body) = call(&app, "POST", "/orders", Some(&customer), Some(order_body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("INVALID_STATE"));

    // Fill the cart
    let (status, _) = call(
        &app,
        "POST",
        "/cart/add",
        Some(&customer),
        Some(json!({"menu_item_id": dosa, "quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = call(
        &app,
        "POST",
        "/cart/add",
        Some(&customer),
        Some(json!({"menu_item_id": coffee, "quantity": 1, "instructions": "less sugar"})),
    )
    .await;
    assert_eq!(body["data"]["total"], json!(268));
    assert_eq!(body["data"]["item_count"], json!(3));

    // Place the order
    let (status, body) = call(&app, "POST", "/orders", Some(&customer), Some(order_body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    let order_id = body["data"]["id"].as_str().expect("order id").to_string();
    assert_eq!(body["data"]["status"], json!("received"));
    assert_eq!(body["data"]["pricing"]["total"], json!(268 + 20 + 13));

    // Cart emptied by placement
    let (_, body) = call(&app, "GET", "/cart", Some(&customer), None).await;
    assert_eq!(body["data"]["item_count"], json!(0));

    // Paginated listing envelope
    let (status, body) = call(&app, "GET", "/orders?page=1&limit=10", Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["pages"], json!(1));

    // Another customer cannot see the order
    let stranger = register_and_login(&app, "stranger@example.edu").await;
    let (status, _) = call(&app, "GET", &format!("/orders/{order_id}"), Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The admin can
    let (status, _) = call(&app, "GET", &format!("/orders/{order_id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn order_lifecycle_and_admin_workflow() {
    let (_tmp, app) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let customer = register_and_login(&app, "lifecycle@example.edu").await;

    let item = create_menu_item(&app, &admin, "Veg Biryani", 140).await;
    call(
        &app,
        "POST",
        "/cart/add",
        Some(&customer),
        Some(json!({"menu_item_id": item, "quantity": 1})),
    )
    .await;
    let (_, body) = call(
        &app,
        "POST",
        "/orders",
        Some(&customer),
        Some(json!({
            "delivery": {"hostel": "South Block", "room": "9"},
            "contact": {"name": "Ravi", "phone": "9800000002"},
            "payment": {"method": "upi", "transaction_id": "TXN-1"}
        })),
    )
    .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    // Admin endpoints reject customers
    let (status, _) = call(&app, "GET", "/orders/admin/all", Some(&customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown status string is a validation error
    let status_path = format!("/orders/admin/{order_id}/status");
    let (status, body) = call(
        &app,
        "PUT",
        &status_path,
        Some(&admin),
        Some(json!({"status": "vaporized"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("VALIDATION_ERROR"));

    // Advance through the happy path; each call appends one history entry
    for (i, next) in ["preparing", "ready"].iter().enumerate() {
        let (status, body) = call(
            &app,
            "PUT",
            &status_path,
            Some(&admin),
            Some(json!({"status": next, "notes": "moving along"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], json!(next));
        assert_eq!(body["data"]["history"].as_array().unwrap().len(), i + 2);
    }

    // Past `received`, the customer cancel is rejected and nothing changes
    let (status, body) = call(
        &app,
        "PUT",
        &format!("/orders/{order_id}/cancel"),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("INVALID_STATE"));
    let (_, body) = call(&app, "GET", &format!("/orders/{order_id}"), Some(&customer), None).await;
    assert_eq!(body["data"]["status"], json!("ready"));

    // Admin override can still cancel, then the purge removes it
    let (status, _) = call(
        &app,
        "PUT",
        &status_path,
        Some(&admin),
        Some(json!({"status": "cancelled", "notes": "kitchen closed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "DELETE", "/orders/admin/cancelled", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(1));

    let (status, _) = call(&app, "GET", &format!("/orders/{order_id}"), Some(&customer), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_cancel_from_received() {
    let (_tmp, app) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let customer = register_and_login(&app, "canceller@example.edu").await;

    let item = create_menu_item(&app, &admin, "Samosa", 20).await;
    call(
        &app,
        "POST",
        "/cart/add",
        Some(&customer),
        Some(json!({"menu_item_id": item, "quantity": 4})),
    )
    .await;
    let (_, body) = call(
        &app,
        "POST",
        "/orders",
        Some(&customer),
        Some(json!({
            "delivery": {"hostel": "East Block", "room": "101"},
            "contact": {"name": "Meera", "phone": "9800000003"},
            "payment": {"method": "cash_on_delivery"}
        })),
    )
    .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/orders/{order_id}/cancel"),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("cancelled"));
    assert_eq!(body["data"]["history"].as_array().unwrap().len(), 2);
}
