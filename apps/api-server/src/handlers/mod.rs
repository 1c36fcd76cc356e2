//! HTTP handlers and route configuration.

mod authors;
mod blog_posts;
mod health;

use actix_web::{HttpResponse, web};
use quill_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/blog-posts")
                .route("", web::get().to(blog_posts::list_posts))
                .route("", web::post().to(blog_posts::create_post))
                .route("/{id}", web::get().to(blog_posts::get_post))
                .route("/{id}", web::put().to(blog_posts::update_post))
                .route("/{id}", web::delete().to(blog_posts::delete_post)),
        )
        .service(
            web::scope("/authors")
                .route("", web::post().to(authors::create_author))
                .route("/{id}", web::put().to(authors::update_author))
                .route("/{id}", web::delete().to(authors::delete_author)),
        );
}

/// Catch-all for requests to non-existent endpoints.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found())
}
