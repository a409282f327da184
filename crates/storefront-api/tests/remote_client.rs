use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use storefront_api::{ApiError, RemoteClient, StorefrontApi};
use storefront_shared::{CreateCustomerRequest, CreateOrderRequest, OrderItemRequest};

/// Serve `router` on an ephemeral loopback port and return its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

fn client(base_url: &str) -> RemoteClient {
    RemoteClient::new(base_url, Duration::from_secs(5)).unwrap()
}

fn order_request(customer_id: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id,
        order_date: chrono::Utc::now(),
        status: "pending".into(),
        total_amount: Decimal::from(250),
        discount_amount: Decimal::ZERO,
        items: vec![
            OrderItemRequest {
                product_id: 1,
                quantity: 2,
                price: Decimal::from(100),
                subtotal: Decimal::from(200),
            },
            OrderItemRequest {
                product_id: 2,
                quantity: 1,
                price: Decimal::from(50),
                subtotal: Decimal::from(50),
            },
        ],
    }
}

#[tokio::test]
async fn lists_products_with_paging_query() {
    async fn products(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
        assert_eq!(q.get("page").map(String::as_str), Some("2"));
        assert_eq!(q.get("pageSize").map(String::as_str), Some("10"));
        Json(json!({
            "success": true,
            "status": 200,
            "message": "ok",
            "result": [
                {"id": 1, "productName": "Rice", "barcode": "893", "price": 25000, "unit": "kg"},
                {"id": 2, "productName": "Tea", "barcode": "894", "price": "12.5", "unit": "box"}
            ],
            "meta": {"currentPage": 2, "pageSize": 10, "totalPage": 3, "totalItems": 22}
        }))
    }

    let base = spawn(Router::new().route("/api/v1/products", get(products))).await;
    let products = client(&base).list_products(2, 10).await;

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].price, Decimal::new(125, 1));
}

#[tokio::test]
async fn unsuccessful_envelope_is_treated_as_failure() {
    async fn products() -> Json<Value> {
        Json(json!({"success": false, "status": 500, "message": "db down", "result": [{"id": 1}]}))
    }
    async fn customer() -> Json<Value> {
        Json(json!({"success": false, "status": 409, "message": "dup", "data": {"id": 42}}))
    }

    let base = spawn(
        Router::new()
            .route("/api/v1/products", get(products))
            .route("/api/v1/customers", post(customer)),
    )
    .await;
    let api = client(&base);

    assert!(api.list_products(1, 50).await.is_empty());
    assert!(api
        .create_customer(&CreateCustomerRequest::default())
        .await
        .is_none());

    let err = api.try_list_products(1, 50).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
}

#[tokio::test]
async fn non_success_status_is_failure_even_with_good_body() {
    async fn product() -> (StatusCode, Json<Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"success": true, "status": 200, "data": {"id": 1}})),
        )
    }

    let base = spawn(Router::new().route("/api/v1/products/:id", get(product))).await;
    let api = client(&base);

    assert!(api.get_product(1).await.is_none());
    assert!(matches!(
        api.try_get_product(1).await.unwrap_err(),
        ApiError::Status(404)
    ));
}

#[tokio::test]
async fn malformed_body_is_failure() {
    async fn product() -> &'static str {
        "<html>gateway error</html>"
    }

    let base = spawn(Router::new().route("/api/v1/products/:id", get(product))).await;
    let api = client(&base);

    assert!(api.get_product(3).await.is_none());
    assert!(matches!(
        api.try_get_product(3).await.unwrap_err(),
        ApiError::Decode(_)
    ));
}

#[tokio::test]
async fn creates_customer_and_order() {
    type Seen = Arc<Mutex<Option<Value>>>;

    async fn customer(Json(body): Json<CreateCustomerRequest>) -> Json<Value> {
        Json(json!({
            "success": true,
            "status": 201,
            "message": "created",
            "data": {"id": 42, "name": body.name, "phone": body.phone,
                     "email": body.email, "address": body.address}
        }))
    }

    async fn order(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
        let customer_id = body["customerId"].clone();
        *seen.lock().unwrap() = Some(body);
        Json(json!({
            "success": true,
            "status": 201,
            "message": "created",
            "data": {"id": 901, "customerId": customer_id, "status": "pending",
                     "orderDate": "2024-05-01T10:00:00", "totalAmount": 250, "discountAmount": 0}
        }))
    }

    let seen: Seen = Arc::new(Mutex::new(None));
    let base = spawn(
        Router::new()
            .route("/api/v1/customers", post(customer))
            .route("/api/v1/orders", post(order))
            .with_state(seen.clone()),
    )
    .await;
    let api = client(&base);

    let created = api
        .create_customer(&CreateCustomerRequest {
            name: "Hoa".into(),
            phone: "0904".into(),
            email: "hoa@example.com".into(),
            address: "Hue".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 42);
    assert_eq!(created.name, "Hoa");

    let order = api.create_order(&order_request(created.id)).await.unwrap();
    assert_eq!(order.id, 901);
    assert_eq!(order.customer_id, 42);

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["customerId"], 42);
    assert_eq!(body["totalAmount"], 250.0);
    assert_eq!(body["discountAmount"], 0.0);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["productId"], 1);
    assert_eq!(body["items"][0]["subtotal"], 200.0);
}

#[tokio::test]
async fn fetches_order_detail() {
    async fn detail(Path(id): Path<i64>) -> Json<Value> {
        Json(json!({
            "success": true,
            "status": 200,
            "message": "ok",
            "data": {
                "id": id,
                "orderDate": "2024-05-01T10:00:00Z",
                "status": "confirmed",
                "totalAmount": 250,
                "discountAmount": 10,
                "customer": {"id": 42, "name": "Hoa", "phone": "0904"},
                "user": {"id": 3, "username": "staff", "fullName": "Staff One", "role": "cashier"},
                "items": [
                    {"id": 1, "productId": 1, "productName": "Rice", "quantity": 2,
                     "price": 100, "subtotal": 200}
                ]
            }
        }))
    }

    let base = spawn(Router::new().route("/api/v1/orders/:id", get(detail))).await;
    let detail = client(&base).get_order_detail(901).await.unwrap();

    assert_eq!(detail.id, 901);
    assert_eq!(detail.customer.unwrap().id, 42);
    assert_eq!(detail.user.unwrap().full_name, "Staff One");
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.discount_amount, Decimal::from(10));
}

#[tokio::test]
async fn timeout_is_an_ordinary_failure() {
    async fn slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Json(json!({"success": true, "status": 200, "result": []}))
    }

    let base = spawn(Router::new().route("/api/v1/products", get(slow))).await;
    let api = RemoteClient::new(&base, Duration::from_millis(200)).unwrap();

    assert!(api.list_products(1, 50).await.is_empty());
    assert!(api.try_list_products(1, 50).await.unwrap_err().is_timeout());
}

#[tokio::test]
async fn unreachable_server_is_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{addr}/api/v1"));
    assert!(api.list_products(1, 50).await.is_empty());
    assert!(api.get_order_detail(1).await.is_none());
    assert!(api.create_order(&order_request(1)).await.is_none());
}
