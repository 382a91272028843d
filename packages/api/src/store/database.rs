use async_trait::async_trait;
use osaka_kenpo_corpus::ordering::sort_by_article_id;
use osaka_kenpo_corpus::{
    Article, ArticleSummary, Chapter, ChaptersData, FamousArticles, LawMetadata, LawRecord,
    LawSummary,
};
use sqlx::PgPool;

use super::LawStore;
use crate::error::Result;
use crate::models::{ArticleListRow, ArticleRow, ChapterRow, LawRow};

const LAW_COLUMNS: &str =
    "category, name, display_name, short_name, badge, year, source, description, links";

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LawStore for PgStore {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn list_laws(&self) -> Result<Vec<LawRecord>> {
        let rows = sqlx::query_as::<_, LawRow>(&format!(
            "SELECT {LAW_COLUMNS} FROM laws ORDER BY category, name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LawRow::into_record).collect())
    }

    async fn laws_in_category(&self, category: &str) -> Result<Vec<LawSummary>> {
        let rows = sqlx::query_as::<_, LawRow>(&format!(
            "SELECT {LAW_COLUMNS} FROM laws WHERE category = $1 ORDER BY name"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_record().summary())
            .collect())
    }

    async fn law_metadata(&self, category: &str, law: &str) -> Result<Option<LawMetadata>> {
        let row = sqlx::query_as::<_, LawRow>(&format!(
            "SELECT {LAW_COLUMNS} FROM laws WHERE category = $1 AND name = $2"
        ))
        .bind(category)
        .bind(law)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.into_record().metadata))
    }

    async fn article(&self, category: &str, law: &str, article: &str) -> Result<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT article, is_suppl, is_deleted, title, title_osaka,
                   original_text, osaka_text, commentary, commentary_osaka
            FROM articles
            WHERE category = $1 AND law_name = $2 AND article = $3
            "#,
        )
        .bind(category)
        .bind(law)
        .bind(article)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Article::from))
    }

    async fn articles(&self, category: &str, law: &str) -> Result<Vec<ArticleSummary>> {
        let rows = sqlx::query_as::<_, ArticleListRow>(
            r#"
            SELECT article, title, title_osaka, is_deleted
            FROM articles
            WHERE category = $1 AND law_name = $2
            "#,
        )
        .bind(category)
        .bind(law)
        .fetch_all(&self.pool)
        .await?;

        let mut articles: Vec<ArticleSummary> = rows.into_iter().map(ArticleSummary::from).collect();
        sort_by_article_id(&mut articles, |a| a.article.as_str());
        Ok(articles)
    }

    async fn chapters(&self, category: &str, law: &str) -> Result<Option<ChaptersData>> {
        let rows = sqlx::query_as::<_, ChapterRow>(
            r#"
            SELECT chapter, title, title_osaka, description, description_osaka, articles
            FROM chapters
            WHERE category = $1 AND law_name = $2
            ORDER BY position
            "#,
        )
        .bind(category)
        .bind(law)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(ChaptersData {
            chapters: rows.into_iter().map(Chapter::from).collect(),
        }))
    }

    async fn famous_articles(&self, category: &str, law: &str) -> Result<Option<FamousArticles>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT article, badge FROM famous_articles WHERE category = $1 AND law_name = $2",
        )
        .bind(category)
        .bind(law)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.into_iter().collect()))
    }
}
