use actix_web::test;
use serde_json::Value;

use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn health_reports_ok_and_game_count() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["games"], 0);
    assert!(body["app_version"].is_string());
    assert!(body["time"].is_string());
}
