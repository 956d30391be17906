//! SQL queries for comments
//!
//! Comments are written by the comment service; this service only reads them
//! for the article detail view.
use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// All comments on an article, oldest first
pub async fn find_comments_by_article(
    pool: &PgPool,
    article_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, article_id, author_id, content, created_at
        FROM comments
        WHERE article_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
}
