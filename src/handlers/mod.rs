/// HTTP handlers for the article service
///
/// This module contains the article views (list, detail, create, update,
/// delete) plus the service healthcheck, and the route table shared between
/// the server bootstrap and the integration tests.
pub mod articles;

#[cfg(feature = "unsafe-delete")]
pub use articles::delete_article;
pub use articles::{
    create_article, create_article_form, get_article, list_articles, safe_delete_article,
    update_article, update_article_form,
};

use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Service healthcheck: one pool round trip
pub async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "article-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "article-service"
        })),
    }
}

/// Register every route this service serves
///
/// Static segments are registered before the `{article_id}` routes so
/// `/articles/create` never parses as an article id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Markdown bodies routinely exceed actix's 16KiB form default.
    cfg.app_data(web::FormConfig::default().limit(2 * 1024 * 1024));

    let scope = web::scope("/articles")
        .service(
            web::resource("/create")
                .route(web::get().to(create_article_form))
                .route(web::post().to(create_article)),
        )
        .service(
            web::resource("/{article_id}/update")
                .route(web::get().to(update_article_form))
                .route(web::post().to(update_article)),
        )
        .service(
            web::resource("/{article_id}/safe-delete")
                .route(web::route().to(safe_delete_article)),
        );

    #[cfg(feature = "unsafe-delete")]
    let scope = scope.service(
        web::resource("/{article_id}/delete")
            .route(web::get().to(delete_article))
            .route(web::post().to(delete_article)),
    );

    let scope = scope
        .service(web::resource("").route(web::get().to(list_articles)))
        .service(web::resource("/{article_id}").route(web::get().to(get_article)));

    cfg.service(scope).route("/health", web::get().to(health));
}
