#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Each test owns a fresh in-memory database, so committing is safe. Flip
// with `RPS_TXN_POLICY=rollback`.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("RPS_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => backend::db::txn_policy::TxnPolicy::RollbackOnOk,
        _ => backend::db::txn_policy::TxnPolicy::CommitOnOk,
    };
    backend::db::txn_policy::set_txn_policy(policy);
}

/// Problem-details contract plus the media type.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ProblemDetailsLike {
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let problem =
        assert_problem_details_from_service_response(resp, expected_code, expected_status).await;
    assert!(!problem.trace_id.is_empty());
    assert_ne!(problem.trace_id, "unknown", "error rendered outside the trace context");
    problem
}
