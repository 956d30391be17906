/// Data models for the article service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Article entity - a blog post with a denormalized view counter
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub total_views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment entity - read-only here, written by the comment service
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Create/update form payload (urlencoded)
///
/// Fields default to empty strings so an absent field and a blank field both
/// fail validation the same way.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArticleForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub body: String,
}

/// Sort key for the article listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleOrder {
    /// Insertion order, oldest first
    #[default]
    Insertion,
    /// Most viewed first
    TotalViews,
}

impl ArticleOrder {
    /// Parse the `order` query-string value; anything unrecognized falls back
    /// to insertion order.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("total_views") => ArticleOrder::TotalViews,
            _ => ArticleOrder::Insertion,
        }
    }

    /// Value echoed back to the client in listing responses
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleOrder::Insertion => "",
            ArticleOrder::TotalViews => "total_views",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_rejects_blank_fields() {
        let form = ArticleForm {
            title: String::new(),
            body: "hello".to_string(),
        };
        assert!(form.validate().is_err());

        let form = ArticleForm {
            title: "hello".to_string(),
            body: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_title_length_limit() {
        let form = ArticleForm {
            title: "x".repeat(100),
            body: "content".to_string(),
        };
        assert!(form.validate().is_ok());

        let form = ArticleForm {
            title: "x".repeat(101),
            body: "content".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!(
            ArticleOrder::from_query(Some("total_views")),
            ArticleOrder::TotalViews
        );
        assert_eq!(
            ArticleOrder::from_query(Some("nonsense")),
            ArticleOrder::Insertion
        );
        assert_eq!(ArticleOrder::from_query(None), ArticleOrder::Insertion);
    }
}
