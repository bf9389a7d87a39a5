//! End-to-end flow through the HTTP router: ring up sales, list the
//! day, refund, pull reports and the CSV export. Uses a throwaway
//! SQLite database per test and gateway-style identity headers.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use pos_server::db::repository::ItemRepository;
use pos_server::utils::time;
use pos_server::{Config, ServerState, api};
use shared::models::Item;

async fn setup() -> (tempfile::TempDir, Router, ServerState) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.db");
    let config = Config::with_overrides(path.to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.expect("state");
    let app = api::router(state.clone());
    (dir, app, state)
}

async fn seed_item(pool: &SqlitePool, company_id: &str, name: &str, price: f64) -> Item {
    let now = time::now_millis();
    let item = Item {
        id: Uuid::new_v4().to_string(),
        company_id: company_id.to_string(),
        name: name.to_string(),
        price,
        is_active: true,
        created_at: now,
        created_by: None,
        updated_at: now,
        updated_by: None,
        deleted_at: None,
        deleted_by: None,
    };
    ItemRepository::new(pool.clone())
        .insert(&item)
        .await
        .expect("seed item");
    item
}

fn with_identity(builder: http::request::Builder, company_id: &str) -> http::request::Builder {
    builder
        .header("x-user-id", "user-1")
        .header("x-user-role", "company_admin")
        .header("x-company-id", company_id)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn create_order(
    app: &Router,
    company_id: &str,
    lines: &[(&str, i64)],
    payment_type: &str,
) -> (StatusCode, serde_json::Value) {
    let items: Vec<_> = lines
        .iter()
        .map(|(id, qty)| serde_json::json!({"item_id": id, "quantity": qty}))
        .collect();
    let body = serde_json::json!({"items": items, "payment_type": payment_type});

    let request = with_identity(Request::builder(), company_id)
        .method("POST")
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn local_today(state: &ServerState) -> String {
    time::local_date_key(time::now_millis(), state.timezone())
}

#[tokio::test]
async fn test_create_order_and_list_today() {
    let (_dir, app, state) = setup().await;
    let a = seed_item(&state.pool, "co-1", "Teh Tarik", 10.00).await;
    let b = seed_item(&state.pool, "co-1", "Nasi Lemak", 5.50).await;

    let (status, body) =
        create_order(&app, "co-1", &[(&a.id, 2), (&b.id, 1)], "cash").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total_amount"], 25.5);
    assert_eq!(body["data"]["status"], "paid");

    let request = with_identity(Request::builder(), "co-1")
        .method("GET")
        .uri("/api/orders")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_refund_is_terminal_via_api() {
    let (_dir, app, state) = setup().await;
    let item = seed_item(&state.pool, "co-1", "Laksa", 8.00).await;

    let (_, body) = create_order(&app, "co-1", &[(&item.id, 1)], "touch_n_go").await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let refund_request = || {
        with_identity(Request::builder(), "co-1")
            .method("POST")
            .uri(format!("/api/orders/{order_id}/refund"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, refund_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "refunded");

    // Refunding twice is a conflict, not a silent success
    let (status, body) = send(&app, refund_request()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_report_excludes_refunded_and_exports_csv() {
    let (_dir, app, state) = setup().await;
    let cheap = seed_item(&state.pool, "co-1", "Kuih", 20.00).await;
    let dear = seed_item(&state.pool, "co-1", "Durian", 30.00).await;

    let (_, _) = create_order(&app, "co-1", &[(&cheap.id, 1)], "cash").await;
    let (_, body) = create_order(&app, "co-1", &[(&dear.id, 1)], "cash").await;
    let refunded_id = body["data"]["id"].as_str().unwrap().to_string();

    let request = with_identity(Request::builder(), "co-1")
        .method("POST")
        .uri(format!("/api/orders/{refunded_id}/refund"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let today = local_today(&state);
    let request = with_identity(Request::builder(), "co-1")
        .method("GET")
        .uri(format!(
            "/api/reports?start_date={today}&end_date={today}"
        ))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalRevenue"], 20.0);
    assert_eq!(body["data"]["totalOrders"], 1);
    assert_eq!(body["data"]["orders"].as_array().unwrap().len(), 1);

    // CSV download carries the paid order and the grand-total row
    let request = with_identity(Request::builder(), "co-1")
        .method("GET")
        .uri(format!(
            "/api/reports/export?start_date={today}&end_date={today}"
        ))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("Date,Time,Item Name"));
    assert!(csv.contains("\"Kuih\""));
    assert!(!csv.contains("\"Durian\""));
    assert!(csv.ends_with("\"TOTAL\",\"20.00\""));
}

#[tokio::test]
async fn test_dashboard_metrics() {
    let (_dir, app, state) = setup().await;
    let item = seed_item(&state.pool, "co-1", "Kopi", 4.00).await;

    create_order(&app, "co-1", &[(&item.id, 2)], "cash").await;
    create_order(&app, "co-1", &[(&item.id, 1)], "touch_n_go").await;

    let request = with_identity(Request::builder(), "co-1")
        .method("GET")
        .uri("/api/analytics/dashboard")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["todayRevenue"], 12.0);
    assert_eq!(body["data"]["ordersToday"], 2);
    assert_eq!(body["data"]["cashCount"], 1);
    assert_eq!(body["data"]["touchNGoCount"], 1);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let (_dir, app, _state) = setup().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/orders")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_super_admin_cannot_use_register() {
    let (_dir, app, _state) = setup().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/orders")
        .header("x-user-id", "root-1")
        .header("x-user-role", "super_admin")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tenant_isolation_across_companies() {
    let (_dir, app, state) = setup().await;
    let item = seed_item(&state.pool, "co-1", "Satay", 12.00).await;

    let (_, body) = create_order(&app, "co-1", &[(&item.id, 1)], "cash").await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    // Another company cannot order this item...
    let (status, _) = create_order(&app, "co-2", &[(&item.id, 1)], "cash").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // ...see the order...
    let request = with_identity(Request::builder(), "co-2")
        .method("GET")
        .uri("/api/orders")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&app, request).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // ...or refund it
    let request = with_identity(Request::builder(), "co-2")
        .method("POST")
        .uri(format!("/api/orders/{order_id}/refund"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_cart_is_bad_request() {
    let (_dir, app, _state) = setup().await;

    let (status, body) = create_order(&app, "co-1", &[], "cash").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_malformed_report_range_is_bad_request() {
    let (_dir, app, _state) = setup().await;

    let request = with_identity(Request::builder(), "co-1")
        .method("GET")
        .uri("/api/reports?start_date=yesterday&end_date=today")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
