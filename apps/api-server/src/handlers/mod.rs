//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod health;
mod users;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/logout", web::post().to(auth::logout)),
                )
                // Profile routes - all protected
                .service(
                    web::scope("/users")
                        .route("/profile", web::get().to(users::profile))
                        .route("/completeprofile", web::put().to(users::complete_profile))
                        .route("/{id}", web::get().to(users::public_profile)),
                )
                // Blog routes - reads are public
                .service(
                    web::scope("/blogs")
                        .route("", web::get().to(blogs::list))
                        .route("", web::post().to(blogs::create))
                        .route("/my/blogs", web::get().to(blogs::mine))
                        .route("/{id}", web::get().to(blogs::get))
                        .route("/{id}", web::put().to(blogs::update))
                        .route("/{id}", web::delete().to(blogs::delete))
                        .route("/{id}/like", web::put().to(blogs::like))
                        .route("/{id}/dislike", web::put().to(blogs::dislike))
                        .route("/{id}/comment", web::post().to(blogs::comment)),
                ),
        );
}
