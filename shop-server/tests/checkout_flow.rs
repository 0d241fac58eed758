//! Storefront checkout through the back office and back

mod common;

use common::{TestApp, error_code};
use http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::models::Role;

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

/// Category, brand and one product with `stock` units at 100.00
async fn seed_product(app: &TestApp, admin: &str, stock: i64) -> i64 {
    let (status, category) = app
        .post("/api/categories", Some(admin), json!({ "name": "Road" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{category}");
    let (status, brand) = app
        .post("/api/brands", Some(admin), json!({ "name": "Velo" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{brand}");

    let (status, product) = app
        .post(
            "/api/products",
            Some(admin),
            json!({
                "name": "Carbon bottle cage",
                "sku": "VC-CAGE-01",
                "category_id": category["id"],
                "brand_id": brand["id"],
                "price": "100.00",
                "stock": stock,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{product}");
    product["id"].as_i64().unwrap()
}

fn checkout_body(product_id: i64, quantity: u32, coupon: Option<&str>) -> Value {
    json!({
        "customer_name": "Ana Pereira",
        "customer_email": "ana@example.com",
        "shipping_address": "12 Chainring Road",
        "items": [{ "product_id": product_id, "quantity": quantity }],
        "coupon_code": coupon,
    })
}

#[tokio::test]
async fn test_checkout_with_coupon_then_cancel() {
    let app = TestApp::new();
    let admin = app.token_for(Role::Admin);
    let product_id = seed_product(&app, &admin, 2).await;

    let (status, coupon) = app
        .post(
            "/api/coupons",
            Some(&admin),
            json!({ "code": "spring10", "discount": { "type": "percent", "value": 10 } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{coupon}");
    assert_eq!(coupon["code"], "SPRING10");

    // Public coupon preview
    let (status, check) = app
        .get("/api/shop/coupons/Spring10?subtotal=200.00", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&check["amount_off"]), Decimal::new(2000, 2));

    // Anonymous checkout
    let (status, order) = app
        .post(
            "/api/shop/orders",
            None,
            checkout_body(product_id, 2, Some("spring10")),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["status"], "pending");
    assert_eq!(decimal(&order["subtotal"]), Decimal::new(20000, 2));
    assert_eq!(decimal(&order["discount"]), Decimal::new(2000, 2));
    assert_eq!(decimal(&order["total"]), Decimal::new(18000, 2));
    let order_id = order["id"].as_i64().unwrap();

    // Stock is gone
    let (status, product) = app.get(&format!("/api/products/{product_id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["stock"], 0);
    let (status, body) = app
        .post("/api/shop/orders", None, checkout_body(product_id, 1, None))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), 6003);

    // Customer lookup needs the matching email
    let (status, _) = app
        .get(
            &format!("/api/shop/orders/{order_id}?email=someone@example.com"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, found) = app
        .get(
            &format!("/api/shop/orders/{order_id}?email=ANA@example.com"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], order_id);

    // Sales staff cancel; stock comes back
    let sales = app.token_for(Role::Sales);
    let (status, cancelled) = app
        .put(
            &format!("/api/orders/{order_id}/status"),
            Some(&sales),
            json!({ "status": "cancelled", "note": "customer changed their mind" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{cancelled}");
    assert_eq!(cancelled["status"], "cancelled");

    let (_, product) = app.get(&format!("/api/products/{product_id}"), Some(&admin)).await;
    assert_eq!(product["stock"], 2);

    // Terminal state
    let (status, body) = app
        .put(
            &format!("/api/orders/{order_id}/status"),
            Some(&sales),
            json!({ "status": "paid" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 4003);
}

#[tokio::test]
async fn test_empty_order_and_unknown_coupon() {
    let app = TestApp::new();
    let admin = app.token_for(Role::Admin);
    let product_id = seed_product(&app, &admin, 5).await;

    let mut empty = checkout_body(product_id, 1, None);
    empty["items"] = json!([]);
    let (status, body) = app.post("/api/shop/orders", None, empty).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 4002);

    let (status, body) = app
        .post(
            "/api/shop/orders",
            None,
            checkout_body(product_id, 1, Some("NOPE")),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 5001);

    // Failed checkout left stock untouched
    let (_, product) = app.get(&format!("/api/products/{product_id}"), Some(&admin)).await;
    assert_eq!(product["stock"], 5);
}

#[tokio::test]
async fn test_summary_report_counts_revenue() {
    let app = TestApp::new();
    let admin = app.token_for(Role::Admin);
    let product_id = seed_product(&app, &admin, 10).await;

    let (_, order) = app
        .post("/api/shop/orders", None, checkout_body(product_id, 1, None))
        .await;
    let order_id = order["id"].as_i64().unwrap();
    let (status, _) = app
        .put(
            &format!("/api/orders/{order_id}/status"),
            Some(&admin),
            json!({ "status": "paid" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let manager = app.token_for(Role::Manager);
    let (status, report) = app.get("/api/reports/summary", Some(&manager)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["orders_by_status"]["paid"], 1);
    assert_eq!(decimal(&report["revenue"]), Decimal::new(10000, 2));
}

#[tokio::test]
async fn test_extreme_amounts_are_rejected_not_overflowed() {
    let app = TestApp::new();
    let admin = app.token_for(Role::Admin);
    let product_id = seed_product(&app, &admin, 3).await;

    let (status, _) = app
        .post(
            "/api/coupons",
            Some(&admin),
            json!({ "code": "TEN", "discount": { "type": "percent", "value": 10 } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let max = Decimal::MAX.to_string();
    let (status, body) = app
        .get(&format!("/api/shop/coupons/TEN?subtotal={max}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(error_code(&body), 8);

    let (status, body) = app
        .put(
            &format!("/api/products/{product_id}"),
            Some(&admin),
            json!({ "price": max }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(error_code(&body), 6002);

    let (status, body) = app
        .post(
            &format!("/api/products/{product_id}/stock"),
            Some(&admin),
            json!({ "delta": i64::MAX }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(error_code(&body), 8);

    // Nothing moved
    let (_, product) = app
        .get(&format!("/api/products/{product_id}"), Some(&admin))
        .await;
    assert_eq!(product["stock"], 3);
    assert_eq!(decimal(&product["price"]), Decimal::new(10000, 2));
}
