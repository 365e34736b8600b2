use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::domain::{GameState, GameView, Hand, PvpOutcome};
use backend::errors::domain::{DomainError, NotFoundKind};
use backend::services::games::GameService;
use backend::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::support::build_test_state;

#[tokio::test]
async fn create_then_close_in_separate_transactions() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let code_length = state.code_length();

    let code = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let mut rng = StdRng::seed_from_u64(11);
            let code = GameService::new(code_length)
                .create_game(txn, &mut rng, Hand::Paper)
                .await?;
            Ok::<_, AppError>(code)
        })
    })
    .await?;

    let closed = with_txn(None, &state, |txn| {
        let code = code.clone();
        Box::pin(async move {
            let closed = GameService::new(code_length)
                .submit_second_hand(txn, &code, Hand::Rock)
                .await?;
            Ok::<_, AppError>(closed)
        })
    })
    .await?;

    assert_eq!(closed.code, code);
    assert_eq!(closed.state, GameState::Closed);
    assert_eq!(closed.player1, Some(Hand::Paper));
    assert_eq!(closed.player2, Some(Hand::Rock));
    assert_eq!(closed.outcome, Some(PvpOutcome::Player1Win));

    let conn = require_db(&state)?;
    let view = GameService::new(code_length).get_game(conn, &code).await?;
    assert_eq!(view, GameView::Settled(closed));
    Ok(())
}

#[tokio::test]
async fn active_game_is_pending() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;
    let service = GameService::new(8);

    let code = service
        .create_game(conn, &mut StdRng::seed_from_u64(3), Hand::Scissors)
        .await?;

    let view = service.get_game(conn, &code).await?;
    assert_eq!(view, GameView::Pending { code });
    Ok(())
}

#[tokio::test]
async fn closing_twice_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;
    let service = GameService::new(8);

    let code = service
        .create_game(conn, &mut StdRng::seed_from_u64(5), Hand::Rock)
        .await?;
    service.submit_second_hand(conn, &code, Hand::Rock).await?;

    let err = service
        .submit_second_hand(conn, &code, Hand::Paper)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));

    let view = service.get_game(conn, &code).await?;
    let GameView::Settled(record) = view else {
        panic!("expected a settled game");
    };
    assert_eq!(record.player2, Some(Hand::Rock));
    assert_eq!(record.outcome, Some(PvpOutcome::Draw));
    Ok(())
}

#[tokio::test]
async fn concurrent_submissions_close_exactly_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;
    let service = GameService::new(8);

    let code = service
        .create_game(conn, &mut StdRng::seed_from_u64(9), Hand::Rock)
        .await?;

    let (first, second) = tokio::join!(
        service.submit_second_hand(conn, &code, Hand::Paper),
        service.submit_second_hand(conn, &code, Hand::Scissors),
    );

    let winners: Vec<_> = [&first, &second]
        .into_iter()
        .filter_map(|r| r.as_ref().ok())
        .collect();
    assert_eq!(winners.len(), 1, "exactly one submission may close the game");

    let loser = [first.as_ref(), second.as_ref()]
        .into_iter()
        .find_map(|r| r.err())
        .expect("one submission must lose");
    assert!(matches!(loser, DomainError::NotFound(NotFoundKind::Game, _)));

    let GameView::Settled(stored) = service.get_game(conn, &code).await? else {
        panic!("expected a settled game");
    };
    assert_eq!(&stored, winners[0]);
    Ok(())
}

#[tokio::test]
async fn listings_split_by_state_and_sort_by_code() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = require_db(&state)?;
    let service = GameService::new(8);
    let mut rng = StdRng::seed_from_u64(21);

    let mut codes = Vec::new();
    for hand in [Hand::Rock, Hand::Paper, Hand::Scissors, Hand::Rock] {
        codes.push(service.create_game(conn, &mut rng, hand).await?);
    }
    service.submit_second_hand(conn, &codes[1], Hand::Scissors).await?;
    service.submit_second_hand(conn, &codes[3], Hand::Paper).await?;

    let active: Vec<String> = service
        .list_active(conn)
        .await?
        .into_iter()
        .map(|g| g.code)
        .collect();
    let mut expected_active = vec![codes[0].clone(), codes[2].clone()];
    expected_active.sort();
    assert_eq!(active, expected_active);

    let closed = service.list_closed(conn).await?;
    assert_eq!(closed.len(), 2);
    assert!(closed.windows(2).all(|w| w[0].code < w[1].code));
    assert!(closed.iter().all(|g| g.state == GameState::Closed));
    assert!(closed
        .iter()
        .all(|g| g.outcome == Some(PvpOutcome::Player2Win)));
    Ok(())
}

#[tokio::test]
async fn rollback_policy_discards_work() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = with_txn(None, &state, |txn| {
        Box::pin(async move {
            GameService::new(8)
                .create_game(txn, &mut StdRng::seed_from_u64(1), Hand::Rock)
                .await?;
            Err::<(), _>(AppError::internal("abort after insert"))
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), backend::ErrorCode::Internal);

    let conn = require_db(&state)?;
    assert!(GameService::new(8).list_active(conn).await?.is_empty());
    Ok(())
}
