/// Authorization for the article service
///
/// Ownership is decided in exactly one place. Update and safe delete both
/// call this predicate; no handler compares author ids on its own.
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Article;

/// Result type for permission checks
pub type PermissionResult = Result<(), AppError>;

/// Check that a user authored an article before letting them modify it
pub fn check_article_ownership(user_id: Uuid, article: &Article) -> PermissionResult {
    if article.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have permission to modify this article".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article_by(author_id: Uuid) -> Article {
        Article {
            id: Uuid::new_v4(),
            title: "title".to_string(),
            body: "body".to_string(),
            author_id,
            total_views: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_author_passes() {
        let author = Uuid::new_v4();
        assert!(check_article_ownership(author, &article_by(author)).is_ok());
    }

    #[test]
    fn test_other_user_is_forbidden() {
        let err = check_article_ownership(Uuid::new_v4(), &article_by(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(
            err.to_string(),
            "You do not have permission to modify this article"
        );
    }
}
