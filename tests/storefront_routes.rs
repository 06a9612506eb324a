mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{RecordingMailer, form_post, get, json_body, location, send, test_app, test_config};

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app(&test_config(), Arc::default());

    let response = send(app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn removing_from_an_empty_cart_redirects_to_cart() {
    let app = test_app(&test_config(), Arc::default());

    let response = send(app, form_post("/remove-from-cart/42", "")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cart"));
}

#[tokio::test]
async fn checkout_page_with_empty_cart_goes_home() {
    let app = test_app(&test_config(), Arc::default());

    let response = send(app, get("/checkout")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn placing_an_order_with_empty_cart_sends_nothing() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = test_app(&test_config(), mailer.clone());

    let response = send(
        app,
        form_post(
            "/checkout",
            "name=Lina&phone=70123456&address=Main+St&city=Tripoli&region=tripoli",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn order_success_without_an_order_goes_home() {
    let app = test_app(&test_config(), Arc::default());

    let response = send(app, get("/order-success")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn invalid_review_is_rejected_with_field_errors() {
    let app = test_app(&test_config(), Arc::default());

    let response = send(app, form_post("/reviews", "name=+&text=Lovely&stars=9")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Please correct the errors below.");
    assert!(body["errors"].get("name").is_some());
    assert!(body["errors"].get("stars").is_some());
}
