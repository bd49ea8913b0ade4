use actix_web::web;

pub mod health;
pub mod sessions;

/// Register every route. Used by `main.rs` and by the route test suites.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Sessions: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));
}
