use actix_web::http::StatusCode;
use actix_web::test;
use backend::adapters::games_sea::{self as games_adapter, GameUpsert};
use backend::db::require_db;
use backend::domain::{GameState, Hand, PvpOutcome};
use backend::errors::domain::{DomainError, InfraErrorKind};
use backend::repos::games;
use backend::AppError;

use crate::common::assert_problem;
use crate::support::{build_test_state, create_test_app};

fn row(code: &str, p1: &str, p2: Option<&str>, state: &str, outcome: Option<&str>) -> GameUpsert {
    GameUpsert {
        code: code.to_string(),
        player1: Some(p1.to_string()),
        player2: p2.map(str::to_string),
        state: state.to_string(),
        outcome: outcome.map(str::to_string),
    }
}

#[tokio::test]
async fn unknown_hand_in_row_is_data_corruption() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;

    let raw = row("bad1", "LIZARD", None, "ACTIVE", None);
    assert!(games_adapter::insert_if_absent(conn, raw).await?);

    let err = games::find_by_code(conn, "bad1").await.unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::DataCorruption, _)));
    assert!(err.to_string().contains("LIZARD"));
    Ok(())
}

#[tokio::test]
async fn closed_row_with_wrong_outcome_is_data_corruption() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;

    assert!(games_adapter::insert_if_absent(
        conn,
        row("bad2", "ROCK", Some("PAPER"), "CLOSED", Some("PLAYER_1_WIN")),
    )
    .await?);

    let err = games::find_all_by_state(conn, GameState::Closed)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::DataCorruption, _)));
    Ok(())
}

#[tokio::test]
async fn legacy_lowercase_and_padded_values_are_read() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;

    assert!(games_adapter::insert_if_absent(
        conn,
        row("old1", "rock ", Some(" scissors"), "CLOSED", Some("PLAYER_1_WIN")),
    )
    .await?);

    let record = games::find_by_code(conn, "old1").await?.expect("row");
    assert_eq!(record.outcome, Some(PvpOutcome::Player1Win));
    Ok(())
}

#[tokio::test]
async fn legacy_active_row_closes_with_decided_outcome() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;

    let raw = row("old2", " paper", None, "ACTIVE", None);
    assert!(games_adapter::insert_if_absent(conn, raw).await?);

    let closed = games::close_if_active(conn, "old2", Hand::Rock)
        .await?
        .expect("active game closes");
    assert_eq!(closed.player1, Some(Hand::Paper));
    assert_eq!(closed.outcome, Some(PvpOutcome::Player1Win));
    Ok(())
}

#[tokio::test]
async fn unreadable_first_hand_fails_the_close() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;

    let raw = row("bad4", "LIZARD", None, "ACTIVE", None);
    assert!(games_adapter::insert_if_absent(conn, raw).await?);

    let err = games::close_if_active(conn, "bad4", Hand::Rock)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::DataCorruption, _)));
    Ok(())
}

#[tokio::test]
async fn backfill_fills_missing_outcomes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;

    for raw in [
        row("pre1", "PAPER", Some("ROCK"), "CLOSED", None),
        row("pre2", "ROCK", None, "ACTIVE", None),
    ] {
        assert!(games_adapter::insert_if_absent(conn, raw).await?);
    }

    let updated = migration::backfill_outcomes(conn).await?;
    assert_eq!(updated, 1);

    let record = games::find_by_code(conn, "pre1").await?.expect("row");
    assert_eq!(record.outcome, Some(PvpOutcome::Player1Win));
    let active = games::find_by_code(conn, "pre2").await?.expect("row");
    assert_eq!(active.outcome, None);
    Ok(())
}

#[actix_web::test]
async fn corrupt_row_surfaces_as_internal_error() {
    let state = build_test_state().await.expect("test state");
    {
        let conn = require_db(&state).expect("db");
        let raw = row("bad3", "ROCK", Some("ROCK"), "CLOSED", None);
        let inserted = games_adapter::insert_if_absent(conn, raw)
            .await
            .expect("raw insert");
        assert!(inserted);
    }
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/games/bad3").to_request();
    let resp = test::call_service(&app, req).await;
    let problem =
        assert_problem(resp, StatusCode::INTERNAL_SERVER_ERROR, "DATA_CORRUPTION").await;
    assert!(problem.detail.contains("bad3"));
}
