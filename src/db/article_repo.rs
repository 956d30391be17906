//! SQL queries for articles
use crate::models::{Article, ArticleOrder};
use sqlx::PgPool;
use uuid::Uuid;

const ARTICLE_COLUMNS: &str = "id, title, body, author_id, total_views, created_at, updated_at";

/// ORDER BY clause for a listing. Whitelisted per sort key, never built from
/// request input.
fn order_clause(order: ArticleOrder) -> &'static str {
    match order {
        ArticleOrder::Insertion => "created_at ASC, id ASC",
        ArticleOrder::TotalViews => "total_views DESC, created_at ASC, id ASC",
    }
}

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Count articles matching an optional case-insensitive title/body search
pub async fn count_articles(pool: &PgPool, search: &str) -> Result<i64, sqlx::Error> {
    let count: i64 = if search.is_empty() {
        sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(pool)
            .await?
    } else {
        sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE title ILIKE $1 OR body ILIKE $1")
            .bind(format!("%{}%", escape_like(search)))
            .fetch_one(pool)
            .await?
    };

    Ok(count)
}

/// Fetch one page of the listing, filtered and ordered
pub async fn list_articles(
    pool: &PgPool,
    search: &str,
    order: ArticleOrder,
    limit: i64,
    offset: i64,
) -> Result<Vec<Article>, sqlx::Error> {
    let articles = if search.is_empty() {
        let query = format!(
            r#"
            SELECT {}
            FROM articles
            ORDER BY {}
            LIMIT $1 OFFSET $2
            "#,
            ARTICLE_COLUMNS,
            order_clause(order)
        );

        sqlx::query_as::<_, Article>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
    } else {
        let query = format!(
            r#"
            SELECT {}
            FROM articles
            WHERE title ILIKE $1 OR body ILIKE $1
            ORDER BY {}
            LIMIT $2 OFFSET $3
            "#,
            ARTICLE_COLUMNS,
            order_clause(order)
        );

        sqlx::query_as::<_, Article>(&query)
            .bind(format!("%{}%", escape_like(search)))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
    };

    Ok(articles)
}

/// Find an article by ID
pub async fn find_article_by_id(
    pool: &PgPool,
    article_id: Uuid,
) -> Result<Option<Article>, sqlx::Error> {
    let query = format!("SELECT {} FROM articles WHERE id = $1", ARTICLE_COLUMNS);

    sqlx::query_as::<_, Article>(&query)
        .bind(article_id)
        .fetch_optional(pool)
        .await
}

/// Bump the view counter and return the updated article in one statement,
/// so concurrent reads never lose an increment
pub async fn increment_view_count(
    pool: &PgPool,
    article_id: Uuid,
) -> Result<Option<Article>, sqlx::Error> {
    let query = format!(
        r#"
        UPDATE articles
        SET total_views = total_views + 1
        WHERE id = $1
        RETURNING {}
        "#,
        ARTICLE_COLUMNS
    );

    sqlx::query_as::<_, Article>(&query)
        .bind(article_id)
        .fetch_optional(pool)
        .await
}

/// Create a new article
pub async fn create_article(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    body: &str,
) -> Result<Article, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO articles (title, body, author_id)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        ARTICLE_COLUMNS
    );

    sqlx::query_as::<_, Article>(&query)
        .bind(title)
        .bind(body)
        .bind(author_id)
        .fetch_one(pool)
        .await
}

/// Overwrite title and body; the author never changes
pub async fn update_article(
    pool: &PgPool,
    article_id: Uuid,
    title: &str,
    body: &str,
) -> Result<Option<Article>, sqlx::Error> {
    let query = format!(
        r#"
        UPDATE articles
        SET title = $2, body = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        ARTICLE_COLUMNS
    );

    sqlx::query_as::<_, Article>(&query)
        .bind(article_id)
        .bind(title)
        .bind(body)
        .fetch_optional(pool)
        .await
}

/// Delete an article; returns whether a row was removed
pub async fn delete_article(pool: &PgPool, article_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(article_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_order_clause_whitelist() {
        assert_eq!(
            order_clause(ArticleOrder::Insertion),
            "created_at ASC, id ASC"
        );
        assert_eq!(
            order_clause(ArticleOrder::TotalViews),
            "total_views DESC, created_at ASC, id ASC"
        );
    }
}
