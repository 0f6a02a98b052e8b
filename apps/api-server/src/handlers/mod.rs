//! HTTP handlers and route configuration.

mod health;
mod posts;
mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/v1/posts")
                        // Fixed paths first so they never match `/{id}`
                        .route("/upload", web::post().to(posts::upload))
                        .route("/_list", web::post().to(posts::list))
                        .route("/_report", web::post().to(posts::report))
                        .route("", web::post().to(posts::create))
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(posts::get))
                                .route(web::put().to(posts::update))
                                .route(web::delete().to(posts::delete)),
                        ),
                )
                .service(
                    web::scope("/v1/users")
                        .route("", web::get().to(users::list))
                        .route("", web::post().to(users::create))
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(users::get))
                                .route(web::put().to(users::update))
                                .route(web::delete().to(users::delete)),
                        ),
                ),
        );
}
