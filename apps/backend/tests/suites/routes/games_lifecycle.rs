use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, Error};
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::test_state::build_test_state_with_code_length;
use crate::support::{build_test_state, create_test_app};

async fn create_game<S>(app: &S, first_hand: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/games")
        .set_json(json!({ "firstHand": first_hand }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    body["code"].as_str().expect("code").to_string()
}

#[actix_web::test]
async fn rock_against_scissors_closes_with_player_one_win() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/games")
        .set_json(json!({ "firstHand": "ROCK" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Location header")
        .to_string();
    let body: Value = test::read_body_json(resp).await;
    let code = body["code"].as_str().expect("code").to_string();

    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(location, format!("/games/{code}"));

    let req = test::TestRequest::put()
        .uri(&format!("/games/{code}"))
        .set_json(json!({ "secondHand": "SCISSORS" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "code": code,
            "state": "CLOSED",
            "player1": "ROCK",
            "player2": "SCISSORS",
            "outcome": "PLAYER_1_WIN"
        })
    );

    let req = test::TestRequest::get()
        .uri(&format!("/games/{code}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["outcome"], "PLAYER_1_WIN");
    assert_eq!(body["player2"], "SCISSORS");
}

#[actix_web::test]
async fn active_game_hides_the_first_hand() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let code = create_game(&app, "PAPER").await;

    let req = test::TestRequest::get()
        .uri(&format!("/games/{code}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "code": code, "state": "ACTIVE" }));
}

#[actix_web::test]
async fn second_submission_is_not_found() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let code = create_game(&app, "ROCK").await;

    let submit = |hand: &str| {
        test::TestRequest::put()
            .uri(&format!("/games/{code}"))
            .set_json(json!({ "secondHand": hand }))
            .to_request()
    };

    let resp = test::call_service(&app, submit("ROCK")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["outcome"], "DRAW");

    let resp = test::call_service(&app, submit("PAPER")).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "GAME_NOT_FOUND").await;

    // The first result stands.
    let req = test::TestRequest::get()
        .uri(&format!("/games/{code}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["player2"], "ROCK");
    assert_eq!(body["outcome"], "DRAW");
}

#[actix_web::test]
async fn hands_are_case_insensitive() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let code = create_game(&app, "scissors").await;

    let req = test::TestRequest::put()
        .uri(&format!("/games/{code}"))
        .set_json(json!({ "secondHand": "Paper" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["player1"], "SCISSORS");
    assert_eq!(body["player2"], "PAPER");
    assert_eq!(body["outcome"], "PLAYER_1_WIN");
}

#[actix_web::test]
async fn unknown_code_is_not_found() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/games/nope1234").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "GAME_NOT_FOUND").await;

    let req = test::TestRequest::put()
        .uri("/games/nope1234")
        .set_json(json!({ "secondHand": "ROCK" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem(resp, StatusCode::NOT_FOUND, "GAME_NOT_FOUND").await;
    assert!(problem.detail.contains("nope1234"));
}

#[actix_web::test]
async fn code_length_follows_configuration() {
    let state = build_test_state_with_code_length(12)
        .await
        .expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let code = create_game(&app, "ROCK").await;
    assert_eq!(code.len(), 12);
}

#[actix_web::test]
async fn successful_responses_carry_request_id() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/games")
        .set_json(json!({ "firstHand": "ROCK" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert_eq!(request_id.len(), 36);
}
