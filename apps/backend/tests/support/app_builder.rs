use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};
use skirmish_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use skirmish_backend::{build_state, routes, AppState};

/// The production App wiring (middleware and routes) over `state`.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(StructuredLogger)
        .wrap(TraceSpan)
        .wrap(RequestTrace)
        .app_data(web::Data::new(state))
        .configure(routes::configure)
}

pub async fn memory_state() -> AppState {
    build_state().build().await.expect("memory state")
}
