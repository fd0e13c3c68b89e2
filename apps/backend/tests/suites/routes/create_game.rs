use actix_web::http::StatusCode;
use actix_web::test;
use chess_backend::domain::Color;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::{create_test_app, test_state};

fn create_body(color: &str, initial_time: i64, time_control: i64) -> Value {
    json!({
        "game_mode": "blitz",
        "color": color,
        "initial_time": initial_time,
        "time_control": time_control,
    })
}

#[actix_web::test]
async fn create_registers_a_game_without_auth() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/create")
        .set_json(create_body("black", 5, 3))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().expect("id is a string");
    assert_eq!(id.len(), 10);
    assert!(id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

    let game = state.games().lookup(id).expect("game is registered");
    let snapshot = game.snapshot();
    assert!(!snapshot.started);
    assert_eq!(snapshot.color_preference, Color::Black);
    assert_eq!(snapshot.white, None);
    assert_eq!(snapshot.black, None);
}

#[actix_web::test]
async fn creates_get_distinct_ids() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;

    let mut ids = Vec::new();
    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/v1/create")
            .set_json(create_body("white", 10, 0))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    assert_eq!(state.games().len(), 5);
}

#[actix_web::test]
async fn unknown_color_is_a_validation_error() {
    let app = create_test_app(test_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/create")
        .set_json(create_body("purple", 10, 0))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(resp, 400, "VALIDATION_ERROR", "purple").await;
}

#[actix_web::test]
async fn negative_increment_is_rejected() {
    let app = create_test_app(test_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/create")
        .set_json(create_body("white", 10, -2))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(
        resp,
        400,
        "VALIDATION_ERROR",
        "time_control must not be negative",
    )
    .await;
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let app = create_test_app(test_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/create")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Invalid JSON").await;
}

#[actix_web::test]
async fn missing_fields_are_a_bad_request() {
    let app = create_test_app(test_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/create")
        .set_json(json!({"color": "white"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn oversized_initial_time_is_rejected() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/create")
        .set_json(create_body("white", 4_294_967_295, 0))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(
        resp,
        400,
        "VALIDATION_ERROR",
        "initial_time must be between 1 and 1440 minutes",
    )
    .await;
    assert!(state.games().is_empty());
}
