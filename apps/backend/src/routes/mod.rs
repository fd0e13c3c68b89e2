use actix_web::web;

pub mod auth;
pub mod games;
pub mod health;

/// Register every route: `/health` at the root and the API under `/api/v1`.
///
/// Shared by `main.rs` and the integration tests; middleware is applied by
/// the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::configure_routes)
            .configure(games::configure_routes),
    );
}
