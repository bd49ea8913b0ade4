//! HTTP middleware. Wire order in `App` (the last `wrap` is outermost):
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)

pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use request_trace::{context_of, RequestTrace};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
