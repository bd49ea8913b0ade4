use actix_web::{web, App, HttpServer};
use skirmish_backend::config::{HttpConfig, StoreProfile};
use skirmish_backend::infra::state::build_state;
use skirmish_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use skirmish_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    let http = match HttpConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid HTTP configuration");
            std::process::exit(1);
        }
    };

    let profile = match StoreProfile::from_env() {
        Ok(profile) => profile,
        Err(e) => {
            error!(error = %e, "invalid store configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_store(profile).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %http.host,
        port = http.port,
        store = app_state.store_backend(),
        "starting skirmish backend"
    );

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((http.host.as_str(), http.port))?
    .run()
    .await
}
