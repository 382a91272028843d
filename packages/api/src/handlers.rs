use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use osaka_kenpo_corpus::{is_valid_identifier, Article, ArticleSummary, BatchMetadata, LawSummary};

use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::models::{ApiResponse, ArticleBatch, LawBatch, MetadataDocument};
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Category and law served by the `/api/constitution/{article}` shortcut.
pub const CONSTITUTION: (&str, &str) = ("jp", "constitution");

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if is_valid_identifier(value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Missing or invalid {field}")))
    }
}

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::new(data)))
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

pub async fn list_laws(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> ApiResult<Vec<LawSummary>> {
    require("law category", &category)?;
    ok(state.store.laws_in_category(&category).await?)
}

pub async fn list_articles(
    State(state): State<AppState>,
    ApiPath((category, law)): ApiPath<(String, String)>,
) -> ApiResult<Vec<ArticleSummary>> {
    require("law category", &category)?;
    require("law", &law)?;
    ok(state.store.articles(&category, &law).await?)
}

async fn find_article(
    state: &AppState,
    category: &str,
    law: &str,
    article: &str,
) -> Result<Article, ApiError> {
    require("law category", category)?;
    require("law", law)?;
    require("article", article)?;

    state
        .store
        .article(category, law, article)
        .await?
        .ok_or_else(|| {
            tracing::debug!(category, law, article, "article not found");
            ApiError::NotFound(format!(
                "Article {article} for law {law} in category {category} not found"
            ))
        })
}

pub async fn get_article(
    State(state): State<AppState>,
    ApiPath((category, law, article)): ApiPath<(String, String, String)>,
) -> ApiResult<Article> {
    ok(find_article(&state, &category, &law, &article).await?)
}

pub async fn get_constitution_article(
    State(state): State<AppState>,
    ApiPath(article): ApiPath<String>,
) -> ApiResult<Article> {
    let (category, law) = CONSTITUTION;
    ok(find_article(&state, category, law, &article).await?)
}

pub async fn article_batch(
    State(state): State<AppState>,
    ApiPath((category, law, article)): ApiPath<(String, String, String)>,
) -> ApiResult<ArticleBatch> {
    require("law category", &category)?;
    require("law", &law)?;
    require("article", &article)?;

    let (article_data, law_metadata, all_articles) = tokio::try_join!(
        state.store.article(&category, &law, &article),
        state.store.law_metadata(&category, &law),
        state.store.articles(&category, &law),
    )?;

    ok(ArticleBatch {
        article_data,
        law_metadata,
        all_articles,
    })
}

pub async fn laws_metadata(
    State(state): State<AppState>,
) -> ApiResult<BTreeMap<String, Vec<LawSummary>>> {
    let laws = state.store.list_laws().await?;
    ok(BatchMetadata::assemble(laws).laws_metadata)
}

pub async fn metadata_batch(State(state): State<AppState>) -> ApiResult<BatchMetadata> {
    let laws = state.store.list_laws().await?;
    ok(BatchMetadata::assemble(laws))
}

pub async fn law_batch(
    State(state): State<AppState>,
    ApiPath((category, law)): ApiPath<(String, String)>,
) -> ApiResult<LawBatch> {
    require("law category", &category)?;
    require("law", &law)?;

    let (law_metadata, chapters, famous_articles) = tokio::try_join!(
        state.store.law_metadata(&category, &law),
        state.store.chapters(&category, &law),
        state.store.famous_articles(&category, &law),
    )?;

    ok(LawBatch {
        law_metadata,
        chapters,
        famous_articles: famous_articles.unwrap_or_default(),
    })
}

pub async fn law_document(
    State(state): State<AppState>,
    ApiPath((category, law, kind)): ApiPath<(String, String, String)>,
) -> ApiResult<MetadataDocument> {
    require("law category", &category)?;
    require("law", &law)?;

    let document = match kind.as_str() {
        "law_metadata" => state
            .store
            .law_metadata(&category, &law)
            .await?
            .map(MetadataDocument::LawMetadata)
            .ok_or_else(|| ApiError::NotFound("Law not found".to_string()))?,
        "chapters" => state
            .store
            .chapters(&category, &law)
            .await?
            .map(MetadataDocument::Chapters)
            .ok_or_else(|| ApiError::NotFound("Chapters not found".to_string()))?,
        "famous_articles" => MetadataDocument::FamousArticles(
            state
                .store
                .famous_articles(&category, &law)
                .await?
                .unwrap_or_default(),
        ),
        _ => return Err(ApiError::BadRequest("Unknown metadata type".to_string())),
    };

    ok(document)
}
