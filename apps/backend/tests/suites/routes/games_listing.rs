use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::{build_test_state, create_test_app};

/// Creates three games and closes the first; returns (closed, active codes).
async fn seed<S>(app: &S) -> (String, Vec<String>)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let mut codes = Vec::new();
    for hand in ["ROCK", "PAPER", "SCISSORS"] {
        let req = test::TestRequest::post()
            .uri("/games")
            .set_json(json!({ "firstHand": hand }))
            .to_request();
        let body: Value = test::call_and_read_body_json(app, req).await;
        codes.push(body["code"].as_str().expect("code").to_string());
    }

    let closed = codes.remove(0);
    let req = test::TestRequest::put()
        .uri(&format!("/games/{closed}"))
        .set_json(json!({ "secondHand": "PAPER" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    codes.sort();
    (closed, codes)
}

#[actix_web::test]
async fn active_listing_shows_codes_only() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let (_, active) = seed(&app).await;

    let req = test::TestRequest::get()
        .uri("/games?state=active")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let expected: Vec<Value> = active
        .iter()
        .map(|code| json!({ "code": code, "state": "ACTIVE" }))
        .collect();
    assert_eq!(body, Value::Array(expected));
}

#[actix_web::test]
async fn closed_listing_shows_full_records() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let (closed, _) = seed(&app).await;

    let req = test::TestRequest::get()
        .uri("/games?state=closed")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!([{
            "code": closed,
            "state": "CLOSED",
            "player1": "ROCK",
            "player2": "PAPER",
            "outcome": "PLAYER_2_WIN"
        }])
    );
}

#[actix_web::test]
async fn default_listing_groups_by_state() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let (closed, active) = seed(&app).await;

    for uri in ["/games", "/games?state=all", "/games?state=ALL"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let active_codes: Vec<&str> = body["activeGames"]
            .as_array()
            .expect("activeGames")
            .iter()
            .map(|g| g["code"].as_str().expect("code"))
            .collect();
        assert_eq!(active_codes, active.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(body["activeGames"][0].get("player1").is_none());

        let closed_games = body["closedGames"].as_array().expect("closedGames");
        assert_eq!(closed_games.len(), 1);
        assert_eq!(closed_games[0]["code"], closed.as_str());
        assert_eq!(closed_games[0]["outcome"], "PLAYER_2_WIN");
    }
}

#[actix_web::test]
async fn empty_store_lists_nothing() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/games").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "activeGames": [], "closedGames": [] }));
}

#[actix_web::test]
async fn unknown_state_filter_is_rejected() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/games?state=finished")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_STATE_FILTER").await;
}
