//! One `request_completed` event per request.
//!
//! Sees the final status of every response, including ones produced by
//! rejected extractors. Must run inside `RequestTrace`.

use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use super::request_trace::context_of;
use crate::request_ctx::RequestContext;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let ctx = context_of(&req);
        let method = req.method().to_string();
        let path = req.path().to_string();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };

            RequestLine {
                ctx,
                method,
                path,
                status,
                elapsed: started.elapsed(),
            }
            .emit();
            result
        })
    }
}

/// Fields of one completed request.
#[derive(Debug)]
pub struct RequestLine {
    pub ctx: RequestContext,
    pub method: String,
    pub path: String,
    pub status: StatusCode,
    pub elapsed: Duration,
}

impl RequestLine {
    pub fn level(&self) -> Level {
        if self.status.is_server_error() {
            Level::ERROR
        } else if self.status.is_client_error() {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    /// `ok`, `rejected` or `failed`, for filtering without status ranges.
    pub fn outcome(&self) -> &'static str {
        match self.level() {
            Level::ERROR => "failed",
            Level::WARN => "rejected",
            _ => "ok",
        }
    }

    pub fn emit(&self) {
        // tracing needs a const level per callsite
        macro_rules! completed {
            ($level:expr, $line:expr) => {
                tracing::event!(
                    $level,
                    trace_id = %$line.ctx.trace_id,
                    caller = %$line.ctx.caller_or_dash(),
                    http.method = %$line.method,
                    url.path = %$line.path,
                    http.status_code = $line.status.as_u16(),
                    outcome = $line.outcome(),
                    duration_us = $line.elapsed.as_micros() as u64,
                    "request_completed"
                )
            };
        }

        match self.level() {
            Level::ERROR => completed!(Level::ERROR, self),
            Level::WARN => completed!(Level::WARN, self),
            _ => completed!(Level::INFO, self),
        }
    }
}
