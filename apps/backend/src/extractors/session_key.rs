use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

const MAX_SESSION_ID_LEN: usize = 128;

/// Session id taken from the `{session_id}` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey(pub String);

impl SessionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionKey {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_session_id(req.match_info().get("session_id")))
    }
}

fn parse_session_id(raw: Option<&str>) -> Result<SessionKey, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidSessionId, "Missing session_id parameter")
    })?;

    if raw.trim().is_empty() || raw.len() > MAX_SESSION_ID_LEN {
        return Err(AppError::bad_request(
            ErrorCode::InvalidSessionId,
            format!("Invalid session id: {raw:?}"),
        ));
    }

    Ok(SessionKey(raw.to_string()))
}

/// Round index taken from the `{round}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundIndex(pub u32);

impl FromRequest for RoundIndex {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("round").unwrap_or_default();
        ready(raw.parse::<u32>().map(RoundIndex).map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidRound,
                format!("Round must be a non-negative integer, got: {raw:?}"),
            )
        }))
    }
}
