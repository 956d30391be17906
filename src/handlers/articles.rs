/// Article handlers - HTTP endpoints for the blog article views
use actix_web::http::{header, Method};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{ArticleForm, ArticleOrder};
use crate::services::{pagination, ArticleDetail, ArticleService};

/// Listing query parameters; all optional, all tolerant of garbage values
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
}

/// 302 so form submissions land on the next view
fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// List articles with optional search, ordering and a page window
pub async fn list_articles(
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let search = query.search.as_deref().unwrap_or("");
    let order = ArticleOrder::from_query(query.order.as_deref());
    let page = pagination::parse_page(query.page.as_deref());

    let service = ArticleService::new((**pool).clone());
    let articles = service.list(search, order, page).await?;

    Ok(HttpResponse::Ok().json(json!({
        "articles": articles,
        "order": order.as_str(),
        "search": search,
    })))
}

/// Read one article; the body arrives already rendered to HTML and each
/// fetch counts one view
pub async fn get_article(
    pool: web::Data<PgPool>,
    article_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ArticleService::new((**pool).clone());
    let ArticleDetail {
        mut article,
        html,
        toc,
        comments,
    } = service.read(*article_id).await?;

    article.body = html;

    Ok(HttpResponse::Ok().json(json!({
        "article": article,
        "toc": toc,
        "comments": comments,
    })))
}

/// Blank form for the create view
pub async fn create_article_form(_user: AuthUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "form": { "title": "", "body": "" },
    })))
}

/// Create an article and redirect to the listing
pub async fn create_article(
    pool: web::Data<PgPool>,
    user: AuthUser,
    form: web::Form<ArticleForm>,
) -> Result<HttpResponse> {
    let service = ArticleService::new((**pool).clone());
    service.create(&user, &form).await?;

    Ok(redirect_to("/articles"))
}

/// Form pre-filled with the current title and body; author only
pub async fn update_article_form(
    pool: web::Data<PgPool>,
    user: AuthUser,
    article_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ArticleService::new((**pool).clone());
    let article = service.get_owned(&user, *article_id).await?;

    let form = json!({ "title": article.title.clone(), "body": article.body.clone() });
    Ok(HttpResponse::Ok().json(json!({
        "article": article,
        "form": form,
    })))
}

/// Overwrite title and body, then redirect to the detail view
pub async fn update_article(
    pool: web::Data<PgPool>,
    user: AuthUser,
    article_id: web::Path<Uuid>,
    form: web::Form<ArticleForm>,
) -> Result<HttpResponse> {
    let service = ArticleService::new((**pool).clone());
    let article = service.update(&user, *article_id, &form).await?;

    Ok(redirect_to(&format!("/articles/{}", article.id)))
}

/// Legacy delete endpoint: no authentication, no ownership check
#[cfg(feature = "unsafe-delete")]
pub async fn delete_article(
    pool: web::Data<PgPool>,
    article_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ArticleService::new((**pool).clone());
    service.unsafe_delete(*article_id).await?;

    Ok(redirect_to("/articles"))
}

/// Delete with an ownership check, POST only
///
/// Registered for every method: ownership is decided before the method so a
/// non-author GET gets the 403 rather than the 405, matching the legacy flow.
pub async fn safe_delete_article(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    user: AuthUser,
    article_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ArticleService::new((**pool).clone());
    let article = service.get_owned(&user, *article_id).await?;

    if req.method() != Method::POST {
        return Err(AppError::MethodNotAllowed(
            "Only POST requests are allowed".to_string(),
        ));
    }

    service.delete_owned(&article).await?;

    Ok(redirect_to("/articles"))
}
