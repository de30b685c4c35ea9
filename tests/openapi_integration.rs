use axum::http::StatusCode;

mod support;

#[tokio::test]
async fn openapi_document_is_served() {
    let app = support::TestApp::new();

    let (status, doc) = app.get("/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/leftovers/{id}"]["put"].is_object());
    assert_eq!(
        doc["paths"]["/api/v1/audit-logs"]["get"]["security"][0]["bearerAuth"],
        serde_json::json!([])
    );
}
