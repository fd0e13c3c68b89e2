use actix_web::http::StatusCode;
use actix_web::test;
use chess_backend::domain::{Color, GameSettings, TimeControl};
use chess_backend::state::app_state::AppState;
use serde_json::Value;

use crate::common::assert_problem_details_structure;
use crate::support::auth::{bearer, seed_user};
use crate::support::{create_test_app, test_state};

fn new_game(state: &AppState, preference: Color) -> String {
    state
        .games()
        .create(GameSettings {
            time_control: TimeControl {
                initial_minutes: 10,
                increment_seconds: 0,
            },
            color_preference: preference,
        })
        .expect("create game")
}

fn join_uri(id: &str) -> String {
    format!("/api/v1/game/{id}/join")
}

#[actix_web::test]
async fn first_joiner_gets_preferred_color_second_starts_game() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;
    let id = new_game(&state, Color::Black);
    let alice = seed_user(&state, "alice").await;
    let bob = seed_user(&state, "bob").await;

    let req = test::TestRequest::post()
        .uri(&join_uri(&id))
        .insert_header(bearer(&alice.token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["color"], "black");
    assert_eq!(body["started"], false);

    let req = test::TestRequest::post()
        .uri(&join_uri(&id))
        .insert_header(bearer(&bob.token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["color"], "white");
    assert_eq!(body["started"], true);

    let snapshot = state.games().lookup(&id).unwrap().snapshot();
    assert_eq!(snapshot.black.as_deref(), Some(alice.username.as_str()));
    assert_eq!(snapshot.white.as_deref(), Some(bob.username.as_str()));
    assert_eq!(snapshot.turn, Some(Color::White));
}

#[actix_web::test]
async fn rejoining_is_idempotent() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;
    let id = new_game(&state, Color::White);
    let alice = seed_user(&state, "alice").await;

    for expected in [Value::from("white"), Value::Null] {
        let req = test::TestRequest::post()
            .uri(&join_uri(&id))
            .insert_header(bearer(&alice.token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["color"], expected);
        assert_eq!(body["started"], false);
    }
}

#[actix_web::test]
async fn third_user_is_rejected_when_full() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;
    let id = new_game(&state, Color::White);

    for prefix in ["alice", "bob"] {
        let user = seed_user(&state, prefix).await;
        let req = test::TestRequest::post()
            .uri(&join_uri(&id))
            .insert_header(bearer(&user.token))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    let carol = seed_user(&state, "carol").await;
    let req = test::TestRequest::post()
        .uri(&join_uri(&id))
        .insert_header(bearer(&carol.token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(resp, 400, "GAME_FULL", "game already full").await;
}

#[actix_web::test]
async fn unknown_game_is_reported_before_auth() {
    let app = create_test_app(test_state()).build().await;

    let req = test::TestRequest::post()
        .uri(&join_uri("AAAAAAAAAA"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(
        resp,
        400,
        "GAME_NOT_FOUND",
        "game AAAAAAAAAA does not exist",
    )
    .await;
}

#[actix_web::test]
async fn join_requires_a_token() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;
    let id = new_game(&state, Color::White);

    let req = test::TestRequest::post().uri(&join_uri(&id)).to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(resp, 400, "UNAUTHENTICATED", "user has no JWT").await;
}

#[actix_web::test]
async fn garbage_token_is_invalid() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;
    let id = new_game(&state, Color::White);

    let req = test::TestRequest::post()
        .uri(&join_uri(&id))
        .insert_header(bearer("not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(resp, 400, "INVALID_TOKEN", "invalid JWT").await;
}

#[actix_web::test]
async fn token_for_deleted_user_is_rejected() {
    let state = test_state();
    let app = create_test_app(state.clone()).build().await;
    let id = new_game(&state, Color::White);

    // Token signed with the right key for an account the store never saw.
    let token = chess_backend::mint_access_token(
        "no-such-user",
        "ghost",
        std::time::SystemTime::now(),
        &state.security,
    )
    .unwrap();

    let req = test::TestRequest::post()
        .uri(&join_uri(&id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(resp, 400, "USER_NOT_FOUND", "user in JWT does not exist")
        .await;
}
