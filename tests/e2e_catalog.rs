use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

#[tokio::test]
async fn e2e_product_create_requires_name_and_price() {
    let app = support::TestApp::new();

    let resp = app
        .admin(Method::POST, "/api/v1/products", Some(json!({ "name": "Mug" })))
        .await;
    support::assert_error(&resp, StatusCode::BAD_REQUEST, "name and price are required");

    let resp = app
        .admin(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Mug", "price": "" })),
        )
        .await;
    support::assert_error(&resp, StatusCode::BAD_REQUEST, "name and price are required");
}

#[tokio::test]
async fn e2e_product_create_accepts_full_payload() {
    let app = support::TestApp::new();

    let (status, body) = app
        .admin(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "name": "Hoodie",
                "productNumber": "HD-01",
                "price": "39.90",
                "stock": "12",
                "category": "Apparel",
                "location": "Shelf 3",
                "type": "clothing",
                "images": ["a.jpg", "b.jpg"],
                "colorVariants": [{ "color": "red" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], "Hoodie");
    assert_eq!(body["productNumber"], "HD-01");
    assert_eq!(body["stock"], 12);
    assert_eq!(body["type"], "clothing");
    assert_eq!(body["images"], json!(["a.jpg", "b.jpg"]));
    assert_eq!(body["colorVariants"], json!([{ "color": "red" }]));
}

#[tokio::test]
async fn e2e_product_update_keeps_stock() {
    let app = support::TestApp::new();
    let id = app.seed_product("Mug", 7).await;

    let (status, body) = app
        .admin(
            Method::PUT,
            &format!("/api/v1/products/{id}"),
            Some(json!({ "name": "Big mug", "price": 9, "stock": 100 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], "Big mug");
    assert_eq!(body["stock"], 7);
}

#[tokio::test]
async fn e2e_product_update_of_missing_product_returns_404() {
    let app = support::TestApp::new();

    let resp = app
        .admin(
            Method::PUT,
            "/api/v1/products/77",
            Some(json!({ "name": "Ghost", "price": 1 })),
        )
        .await;
    support::assert_error(&resp, StatusCode::NOT_FOUND, "product not found");
}

#[tokio::test]
async fn e2e_products_are_listed_by_name() {
    let app = support::TestApp::new();
    app.seed_product("Zebra", 1).await;
    app.seed_product("Apple", 1).await;

    let (status, body) = app.get("/api/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apple", "Zebra"]);
}

#[tokio::test]
async fn e2e_category_crud_and_duplicate_names() {
    let app = support::TestApp::new();

    let (status, created) = app
        .admin(
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "name": "Apparel", "description": "Clothes" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .admin(
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "name": "Apparel", "description": "Again" })),
        )
        .await;
    support::assert_error(&resp, StatusCode::BAD_REQUEST, "category name already exists");

    let (status, updated) = app
        .admin(
            Method::PUT,
            &format!("/api/v1/categories/{id}"),
            Some(json!({ "name": "Garments", "description": "Clothes" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["name"], "Garments");

    let (status, fetched) = app.get(&format!("/api/v1/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["description"], "Clothes");

    let (status, body) = app
        .admin(Method::DELETE, &format!("/api/v1/categories/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let resp = app.get(&format!("/api/v1/categories/{id}"), None).await;
    support::assert_error(&resp, StatusCode::NOT_FOUND, "category not found");
}

#[tokio::test]
async fn e2e_malformed_json_returns_400() {
    let app = support::TestApp::new();

    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/categories")
        .header("authorization", format!("Bearer {}", support::ADMIN_TOKEN))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let resp = tower::util::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn e2e_price_must_fit_two_decimals_and_ten_digits() {
    let app = support::TestApp::new();

    let resp = app
        .admin(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Mug", "price": "19.999" })),
        )
        .await;
    support::assert_error(
        &resp,
        StatusCode::BAD_REQUEST,
        "price cannot have more than 2 decimal places",
    );

    let resp = app
        .admin(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Mug", "price": "123456789012.50" })),
        )
        .await;
    support::assert_error(&resp, StatusCode::BAD_REQUEST, "price must be less than 10000000000");

    let (_, list) = app.get("/api/v1/products", None).await;
    assert_eq!(list, json!([]));

    let id = app.seed_product("Mug", 1).await;
    let resp = app
        .admin(
            Method::PUT,
            &format!("/api/v1/products/{id}"),
            Some(json!({ "name": "Mug", "price": "0.001" })),
        )
        .await;
    assert_eq!(resp.0, StatusCode::BAD_REQUEST, "{}", resp.1);
    let (_, product) = app.get(&format!("/api/v1/products/{id}"), None).await;
    assert_eq!(product["price"], "12.50");
}
