/// Business logic layer for the article service
///
/// This module provides:
/// - Article service: listing, reading, authoring, deleting
/// - Markdown rendering with anchors and a table of contents
/// - Page-window pagination for the listing
pub mod articles;
pub mod markdown;
pub mod pagination;

pub use articles::{ArticleDetail, ArticleService};
pub use markdown::{RenderedMarkdown, TocEntry};
pub use pagination::{Paginated, PAGE_SIZE};
