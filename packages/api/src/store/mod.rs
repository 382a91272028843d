//! Read access to laws and articles.
//!
//! [`PgStore`] reads the database, [`FileStore`] reads the content tree and
//! [`FallbackStore`] tries the first and falls back to the second when the
//! database is unavailable.

use async_trait::async_trait;
use osaka_kenpo_corpus::{
    Article, ArticleSummary, ChaptersData, FamousArticles, LawMetadata, LawRecord, LawSummary,
};

use crate::error::Result;

pub mod database;
pub mod fallback;
pub mod files;

pub use database::PgStore;
pub use fallback::FallbackStore;
pub use files::FileStore;

/// Read-only law storage.
///
/// Listings are returned in their canonical order: laws by category then
/// id, articles by article id (numbers first).
#[async_trait]
pub trait LawStore: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn list_laws(&self) -> Result<Vec<LawRecord>>;

    async fn laws_in_category(&self, category: &str) -> Result<Vec<LawSummary>>;

    async fn law_metadata(&self, category: &str, law: &str) -> Result<Option<LawMetadata>>;

    async fn article(&self, category: &str, law: &str, article: &str) -> Result<Option<Article>>;

    async fn articles(&self, category: &str, law: &str) -> Result<Vec<ArticleSummary>>;

    async fn chapters(&self, category: &str, law: &str) -> Result<Option<ChaptersData>>;

    async fn famous_articles(&self, category: &str, law: &str) -> Result<Option<FamousArticles>>;
}
