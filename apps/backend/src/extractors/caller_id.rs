use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::HeaderMap, FromRequest, HttpRequest};

use crate::AppError;

pub const CALLER_ID_HEADER: &str = "x-caller-id";

/// Verified caller identity supplied by the hosting platform.
///
/// The service never authenticates the value itself; it only requires that
/// one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trimmed, non-blank `x-caller-id` value, if any.
pub fn caller_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CALLER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl FromRequest for CallerId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match caller_from_headers(req.headers()) {
            Some(id) => Ok(CallerId(id)),
            None => Err(AppError::unauthorized(format!(
                "Missing or blank {CALLER_ID_HEADER} header"
            ))),
        })
    }
}
