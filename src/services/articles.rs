/// Article service - listing, reading, authoring and deleting articles
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{article_repo, comment_repo};
use crate::error::{AppError, Result};
use crate::middleware::{check_article_ownership, AuthUser};
use crate::models::{Article, ArticleForm, ArticleOrder, Comment};
use crate::services::markdown::{self, RenderedMarkdown, TocEntry};
use crate::services::pagination::{self, Paginated, PAGE_SIZE};

pub struct ArticleService {
    pool: PgPool,
}

/// Everything the detail view renders: the article with its body already
/// converted to HTML, the table of contents, and the comments
#[derive(Debug)]
pub struct ArticleDetail {
    pub article: Article,
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub comments: Vec<Comment>,
}

impl ArticleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of the listing, with optional search and ordering
    pub async fn list(
        &self,
        search: &str,
        order: ArticleOrder,
        page: i64,
    ) -> Result<Paginated<Article>> {
        let total = article_repo::count_articles(&self.pool, search).await?;
        let items = article_repo::list_articles(
            &self.pool,
            search,
            order,
            PAGE_SIZE,
            pagination::offset_for(page),
        )
        .await?;

        Ok(Paginated::new(items, page, total))
    }

    /// Read one article. Every call counts as a view, so the counter bump and
    /// the fetch are a single statement.
    pub async fn read(&self, article_id: Uuid) -> Result<ArticleDetail> {
        let article = article_repo::increment_view_count(&self.pool, article_id)
            .await?
            .ok_or_else(|| article_not_found(article_id))?;

        let comments = comment_repo::find_comments_by_article(&self.pool, article_id).await?;
        let RenderedMarkdown { html, toc } = markdown::render(&article.body);

        Ok(ArticleDetail {
            article,
            html,
            toc,
            comments,
        })
    }

    /// Create an article authored by the requesting user
    pub async fn create(&self, user: &AuthUser, form: &ArticleForm) -> Result<Article> {
        form.validate()?;

        let article =
            article_repo::create_article(&self.pool, user.id, &form.title, &form.body).await?;
        tracing::info!(article_id = %article.id, author_id = %user.id, "article created");

        Ok(article)
    }

    /// Ownership gate for mutations: load the article and require that the
    /// requester authored it
    pub async fn get_owned(&self, user: &AuthUser, article_id: Uuid) -> Result<Article> {
        let article = self.find(article_id).await?;
        check_article_ownership(user.id, &article)?;
        Ok(article)
    }

    /// Overwrite title and body; the author never changes
    pub async fn update(
        &self,
        user: &AuthUser,
        article_id: Uuid,
        form: &ArticleForm,
    ) -> Result<Article> {
        self.get_owned(user, article_id).await?;
        form.validate()?;

        let article = article_repo::update_article(&self.pool, article_id, &form.title, &form.body)
            .await?
            .ok_or_else(|| article_not_found(article_id))?;
        tracing::info!(article_id = %article.id, "article updated");

        Ok(article)
    }

    /// Remove an article that `get_owned` vetted for the requester
    pub async fn delete_owned(&self, article: &Article) -> Result<()> {
        article_repo::delete_article(&self.pool, article.id).await?;
        tracing::info!(article_id = %article.id, "article deleted");
        Ok(())
    }

    /// Remove an article with no authentication or ownership check. Compiled
    /// only with the `unsafe-delete` feature; demos against throwaway data.
    #[cfg(feature = "unsafe-delete")]
    pub async fn unsafe_delete(&self, article_id: Uuid) -> Result<()> {
        if !article_repo::delete_article(&self.pool, article_id).await? {
            return Err(article_not_found(article_id));
        }
        tracing::warn!(%article_id, "article deleted without ownership check");
        Ok(())
    }

    async fn find(&self, article_id: Uuid) -> Result<Article> {
        article_repo::find_article_by_id(&self.pool, article_id)
            .await?
            .ok_or_else(|| article_not_found(article_id))
    }
}

fn article_not_found(article_id: Uuid) -> AppError {
    AppError::NotFound(format!("Article {} not found", article_id))
}
