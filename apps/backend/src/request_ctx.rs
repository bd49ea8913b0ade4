//! Request-scoped context: trace id and caller.
//!
//! `RequestTrace` scopes one `RequestContext` around each request so error
//! rendering and logs can name the request without threading it through
//! handlers. Outside a request every accessor falls back to `UNKNOWN`/`None`.

use std::future::Future;

use tokio::task_local;

pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub trace_id: String,
    pub caller: Option<String>,
}

impl RequestContext {
    pub fn new(trace_id: impl Into<String>, caller: Option<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            caller,
        }
    }

    /// Caller for log fields; `-` when the request carried none.
    pub fn caller_or_dash(&self) -> &str {
        self.caller.as_deref().unwrap_or("-")
    }

    pub fn detached() -> Self {
        Self::new(UNKNOWN, None)
    }
}

task_local! {
    static CURRENT: RequestContext;
}

/// Snapshot of the active context, or a detached one.
pub fn current() -> RequestContext {
    CURRENT
        .try_with(Clone::clone)
        .unwrap_or_else(|_| RequestContext::detached())
}

pub fn trace_id() -> String {
    CURRENT
        .try_with(|ctx| ctx.trace_id.clone())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

pub fn caller() -> Option<String> {
    CURRENT.try_with(|ctx| ctx.caller.clone()).ok().flatten()
}

/// Run `future` with `ctx` as the current request context.
pub async fn scope<F: Future>(ctx: RequestContext, future: F) -> F::Output {
    CURRENT.scope(ctx, future).await
}
