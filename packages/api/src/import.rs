//! Offline import of one law from the content tree into the database.

use osaka_kenpo_corpus::ContentTree;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub articles: usize,
    pub chapters: usize,
    pub famous_articles: usize,
}

/// Replace the database rows of one law with the contents of its directory.
///
/// Runs in a single transaction: the law row is deleted (cascading to its
/// articles, chapters and famous articles) and everything is inserted again.
/// Articles that fail validation are skipped by the loader.
pub async fn import_law(
    pool: &PgPool,
    tree: &ContentTree,
    category: &str,
    law: &str,
) -> Result<ImportSummary> {
    let metadata = tree
        .load_law_metadata(category, law)
        .await?
        .ok_or_else(|| StoreError::LawNotFound(format!("{category}/{law}")))?;
    let chapters = tree.load_chapters(category, law).await?.unwrap_or_default();
    let famous = tree
        .load_famous_articles(category, law)
        .await?
        .unwrap_or_default();
    let articles = tree.load_all_articles(category, law).await?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM laws WHERE category = $1 AND name = $2")
        .bind(category)
        .bind(law)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO laws (category, name, display_name, short_name, badge, year, source, description, links)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(category)
    .bind(law)
    .bind(&metadata.name)
    .bind(&metadata.short_name)
    .bind(&metadata.badge)
    .bind(metadata.year)
    .bind(&metadata.source)
    .bind(&metadata.description)
    .bind(metadata.links.as_ref().map(Json))
    .execute(&mut *tx)
    .await?;

    for (position, chapter) in (0_i32..).zip(&chapters.chapters) {
        sqlx::query(
            r#"
            INSERT INTO chapters (category, law_name, position, chapter, title, title_osaka,
                                  description, description_osaka, articles)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(category)
        .bind(law)
        .bind(position)
        .bind(&chapter.chapter)
        .bind(&chapter.title)
        .bind(&chapter.title_osaka)
        .bind(&chapter.description)
        .bind(&chapter.description_osaka)
        .bind(Json(&chapter.articles))
        .execute(&mut *tx)
        .await?;
    }

    for (article, badge) in &famous {
        sqlx::query(
            "INSERT INTO famous_articles (category, law_name, article, badge) VALUES ($1, $2, $3, $4)",
        )
        .bind(category)
        .bind(law)
        .bind(article)
        .bind(badge)
        .execute(&mut *tx)
        .await?;
    }

    for article in &articles {
        let title_osaka = Some(article.title_osaka.as_str()).filter(|t| !t.is_empty());
        sqlx::query(
            r#"
            INSERT INTO articles (category, law_name, article, is_suppl, is_deleted, title,
                                  title_osaka, original_text, osaka_text, commentary, commentary_osaka)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(category)
        .bind(law)
        .bind(&article.article)
        .bind(article.is_suppl)
        .bind(article.is_deleted)
        .bind(&article.title)
        .bind(title_osaka)
        .bind(Json(&article.original_text))
        .bind(Json(&article.osaka_text))
        .bind(Json(&article.commentary))
        .bind(Json(&article.commentary_osaka))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let summary = ImportSummary {
        articles: articles.len(),
        chapters: chapters.chapters.len(),
        famous_articles: famous.len(),
    };
    tracing::info!(
        category,
        law,
        articles = summary.articles,
        chapters = summary.chapters,
        famous_articles = summary.famous_articles,
        "law imported"
    );
    Ok(summary)
}
