use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use game_rules::Hand;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

/// `{hand}` path segment parsed as a `Hand` (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandParam(pub Hand);

impl FromRequest for HandParam {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("hand") {
            Some(raw) => raw
                .parse::<Hand>()
                .map(HandParam)
                .map_err(|e| AppError::from(DomainError::from(e))),
            None => Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "Missing hand path parameter",
            )),
        };
        ready(result)
    }
}
