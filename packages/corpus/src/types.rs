//! Core data types for laws, articles and their metadata.
//!
//! Field names serialize in camelCase, matching both the YAML content files
//! and the JSON returned by the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DELETED_MARKER;

/// Famous article badges of a law: article id -> badge text.
pub type FamousArticles = BTreeMap<String, String>;

/// A single article of a law.
///
/// Deserializes both the current YAML layout (`originalText`, `osakaText`
/// as paragraph lists) and the legacy JSON layout (`original`, `osaka`,
/// `commentary` as blank-line separated strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(deserialize_with = "string_or_number")]
    pub article: String,
    #[serde(default, deserialize_with = "nullable_bool")]
    pub is_suppl: bool,
    #[serde(default, deserialize_with = "nullable_bool")]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title_osaka: String,
    #[serde(default, alias = "original", deserialize_with = "paragraphs")]
    pub original_text: Vec<String>,
    #[serde(default, alias = "osaka", deserialize_with = "paragraphs")]
    pub osaka_text: Vec<String>,
    #[serde(default, deserialize_with = "paragraphs")]
    pub commentary: Vec<String>,
    #[serde(default, deserialize_with = "paragraphs")]
    pub commentary_osaka: Vec<String>,
}

impl Article {
    /// Apply content conventions that are implied rather than stored.
    ///
    /// An article whose first original paragraph is the deletion marker is
    /// deleted even if the flag was never written.
    pub fn normalized(mut self) -> Self {
        if !self.is_deleted {
            self.is_deleted = self
                .original_text
                .first()
                .is_some_and(|p| p.trim() == DELETED_MARKER);
        }
        self
    }

    /// Summary entry used in article listings.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary::new(
            &self.article,
            &self.title,
            Some(self.title_osaka.as_str()),
            self.is_deleted,
        )
    }
}

/// Article listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: String,
    pub article: String,
    pub title: String,
    pub title_osaka: String,
    pub is_deleted: bool,
}

impl ArticleSummary {
    /// Build a listing entry; an absent or empty dialect title falls back to the title.
    pub fn new(article: &str, title: &str, title_osaka: Option<&str>, is_deleted: bool) -> Self {
        let title_osaka = match title_osaka {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => title.to_string(),
        };
        Self {
            id: article.to_string(),
            article: article.to_string(),
            title: title.to_string(),
            title_osaka,
            is_deleted,
        }
    }
}

/// Descriptive link attached to a law.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// Detailed metadata of one law (`law_metadata.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawMetadata {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    /// Enactment year; negative for BCE.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<Link>>,
}

/// Law entry in a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawSummary {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub badge: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
}

/// A law together with its location in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawRecord {
    pub category: String,
    pub id: String,
    pub metadata: LawMetadata,
}

impl LawRecord {
    pub fn new(category: impl Into<String>, id: impl Into<String>, metadata: LawMetadata) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
            metadata,
        }
    }

    /// `category/law` key used by the batch metadata map.
    pub fn key(&self) -> String {
        format!("{}/{}", self.category, self.id)
    }

    pub fn summary(&self) -> LawSummary {
        LawSummary {
            id: self.id.clone(),
            name: self.metadata.name.clone(),
            short_name: self.metadata.short_name.clone(),
            badge: self.metadata.badge.clone(),
            year: self.metadata.year,
            description: self.metadata.description.clone(),
        }
    }
}

/// One chapter of a law.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(deserialize_with = "string_or_number")]
    pub chapter: String,
    pub title: String,
    #[serde(default)]
    pub title_osaka: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_osaka: Option<String>,
    #[serde(default, deserialize_with = "article_ids")]
    pub articles: Vec<String>,
}

/// Chapter structure of a law (`chapters.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaptersData {
    pub chapters: Vec<Chapter>,
}

/// Split legacy single-string text into paragraphs on blank lines.
///
/// # Examples
/// ```
/// use osaka_kenpo_corpus::types::split_paragraphs;
///
/// assert_eq!(split_paragraphs("一\n\n 二 \n\n\n"), vec!["一", "二"]);
/// ```
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

// Article and chapter numbers are written as bare integers in most files.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into())
}

fn article_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Option<Vec<StringOrNumber>> = Option::deserialize(deserializer)?;
    Ok(ids
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

fn paragraphs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Paragraphs {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<Paragraphs>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Paragraphs::Text(text)) => split_paragraphs(&text),
        Some(Paragraphs::List(list)) => list,
    })
}
