//! HTTP handlers and route configuration.

mod auth;
mod health;

use actix_web::web;

/// Configure all application routes.
///
/// The auth scope sits at `/auth` because the refresh cookie is scoped to
/// that path.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/sign-up", web::post().to(auth::sign_up))
            .route("/sign-in", web::post().to(auth::sign_in))
            .route("/refresh", web::post().to(auth::refresh)),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/me", web::get().to(auth::me)),
    );
}
