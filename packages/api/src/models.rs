//! Database rows and API response shapes.
//!
//! JSON columns are decoded leniently: anything that is not the expected
//! shape reads as an empty list or as absent links.

use osaka_kenpo_corpus::{
    Article, ArticleSummary, Chapter, ChaptersData, FamousArticles, LawMetadata, LawRecord, Link,
};
use serde::Serialize;
use serde_json::Value;

/// `{"data": ...}` envelope of every successful response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Article detail, law metadata and the article list for one page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleBatch {
    pub article_data: Option<Article>,
    pub law_metadata: Option<LawMetadata>,
    pub all_articles: Vec<ArticleSummary>,
}

/// All per-law metadata documents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LawBatch {
    pub law_metadata: Option<LawMetadata>,
    pub chapters: Option<ChaptersData>,
    pub famous_articles: FamousArticles,
}

/// One per-law metadata document, serialized without a wrapper.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MetadataDocument {
    LawMetadata(LawMetadata),
    Chapters(ChaptersData),
    FamousArticles(FamousArticles),
}

fn string_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn links(value: Option<Value>) -> Option<Vec<Link>> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

#[derive(Debug, sqlx::FromRow)]
pub struct LawRow {
    pub category: String,
    pub name: String,
    pub display_name: String,
    pub short_name: Option<String>,
    pub badge: Option<String>,
    pub year: Option<i32>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub links: Option<Value>,
}

impl LawRow {
    pub fn into_record(self) -> LawRecord {
        let metadata = LawMetadata {
            name: self.display_name,
            short_name: self.short_name,
            badge: self.badge,
            year: self.year,
            source: self.source,
            description: self.description,
            links: links(self.links),
        };
        LawRecord::new(self.category, self.name, metadata)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ArticleRow {
    pub article: String,
    pub is_suppl: bool,
    pub is_deleted: bool,
    pub title: String,
    pub title_osaka: Option<String>,
    pub original_text: Value,
    pub osaka_text: Value,
    pub commentary: Value,
    pub commentary_osaka: Value,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            article: row.article,
            is_suppl: row.is_suppl,
            is_deleted: row.is_deleted,
            title: row.title,
            title_osaka: row.title_osaka.unwrap_or_default(),
            original_text: string_list(row.original_text),
            osaka_text: string_list(row.osaka_text),
            commentary: string_list(row.commentary),
            commentary_osaka: string_list(row.commentary_osaka),
        }
        .normalized()
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ArticleListRow {
    pub article: String,
    pub title: String,
    pub title_osaka: Option<String>,
    pub is_deleted: bool,
}

impl From<ArticleListRow> for ArticleSummary {
    fn from(row: ArticleListRow) -> Self {
        ArticleSummary::new(
            &row.article,
            &row.title,
            row.title_osaka.as_deref(),
            row.is_deleted,
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ChapterRow {
    pub chapter: String,
    pub title: String,
    pub title_osaka: Option<String>,
    pub description: Option<String>,
    pub description_osaka: Option<String>,
    pub articles: Value,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter {
            chapter: row.chapter,
            title: row.title,
            title_osaka: row.title_osaka,
            description: row.description,
            description_osaka: row.description_osaka,
            articles: string_list(row.articles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_string_list_is_lenient() {
        assert_eq!(string_list(json!(["a", "b"])), vec!["a", "b"]);
        assert_eq!(string_list(json!([1, "2_2", null])), vec!["1", "2_2"]);
        assert!(string_list(json!("not a list")).is_empty());
        assert!(string_list(Value::Null).is_empty());
    }

    #[test]
    fn test_links_are_lenient() {
        assert!(links(Some(json!({"text": "e-Gov"}))).is_none());
        assert!(links(None).is_none());
        let parsed = links(Some(json!([{"text": "e-Gov", "url": "https://laws.e-gov.go.jp/"}])));
        assert_eq!(parsed.map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_article_row_conversion() {
        let row = ArticleRow {
            article: "9".into(),
            is_suppl: false,
            is_deleted: false,
            title: "戦争の放棄".into(),
            title_osaka: None,
            original_text: json!(["原文"]),
            osaka_text: json!(["大阪弁"]),
            commentary: json!({"broken": true}),
            commentary_osaka: Value::Null,
        };
        let article = Article::from(row);
        assert_eq!(article.title_osaka, "");
        assert!(article.commentary.is_empty());
        assert_eq!(article.osaka_text, vec!["大阪弁"]);
    }

    #[test]
    fn test_deleted_marker_in_row() {
        let row = ArticleRow {
            article: "38".into(),
            is_suppl: false,
            is_deleted: false,
            title: String::new(),
            title_osaka: None,
            original_text: json!(["削除"]),
            osaka_text: json!([]),
            commentary: json!([]),
            commentary_osaka: json!([]),
        };
        assert!(Article::from(row).is_deleted);
    }

    #[test]
    fn test_response_envelopes() {
        let batch = ArticleBatch {
            article_data: None,
            law_metadata: None,
            all_articles: vec![ArticleSummary::new("1", "天皇", None, false)],
        };
        let value = serde_json::to_value(ApiResponse::new(batch)).expect("serialize");
        assert_eq!(value["data"]["articleData"], Value::Null);
        assert_eq!(value["data"]["allArticles"][0]["titleOsaka"], "天皇");
    }
}
