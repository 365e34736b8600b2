use actix_web::http::StatusCode;
use actix_web::test;
use backend::state::app_state::AppState;
use serde_json::Value;

use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn root_greets() {
    let app = create_test_app(AppState::new_without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(!body.is_empty());
}

#[actix_web::test]
async fn health_reports_database_and_migrations() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20240601_000002_add_outcome_to_games");
    assert!(body.get("db_error").is_none());
    assert!(body["time"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn health_without_database_still_answers() {
    let app = create_test_app(AppState::new_without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
    assert!(body["db_error"].as_str().is_some());
}
