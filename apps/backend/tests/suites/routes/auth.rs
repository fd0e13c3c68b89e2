use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::{unique_email, unique_username};
use chess_backend::verify_access_token;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn register_then_login_issues_a_token() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;
    let username = unique_username("alice");

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": username,
            "email": unique_email("alice"),
            "password": "correct horse",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let registered: Value = test::read_body_json(resp).await;
    assert_eq!(registered["username"], username.as_str());

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": username, "password": "correct horse"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let claims = verify_access_token(body["token"].as_str().unwrap(), &state.security).unwrap();
    assert_eq!(claims.sub, registered["id"].as_str().unwrap());
    assert_eq!(claims.username, username);
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let app = create_test_app(test_state()).build().await;
    let username = unique_username("bob");

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": username,
            "email": unique_email("bob"),
            "password": "password123",
        }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": username, "password": "password124"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(
        resp,
        400,
        "INVALID_CREDENTIALS",
        "invalid username or password",
    )
    .await;
}

#[actix_web::test]
async fn duplicate_username_conflicts() {
    let app = create_test_app(test_state()).build().await;
    let username = unique_username("dup");

    for (i, expected) in [StatusCode::CREATED, StatusCode::BAD_REQUEST]
        .into_iter()
        .enumerate()
    {
        let req = test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({
                "username": username,
                "email": unique_email(&format!("dup{i}")),
                "password": "password123",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
        if expected == StatusCode::BAD_REQUEST {
            assert_problem_details_structure(resp, 400, "USERNAME_TAKEN", "already exists").await;
        }
    }
}

#[actix_web::test]
async fn short_username_fails_validation() {
    let app = create_test_app(test_state()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": "abc",
            "email": "abc@example.test",
            "password": "password123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(
        resp,
        400,
        "VALIDATION_ERROR",
        "username must be between 4 and 20 characters",
    )
    .await;
}
