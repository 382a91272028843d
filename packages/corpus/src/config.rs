//! Configuration constants and identifier validation for the content tree.
//!
//! The content tree is laid out as
//! `<root>/laws/<category>/<law>/<article>.yaml`, with per-law metadata
//! files next to the articles.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CorpusError, Result};

/// Directory under the content root that holds all laws.
pub const LAWS_DIR: &str = "laws";

/// Per-law metadata file (display name, year, source, links).
pub const LAW_METADATA_FILE: &str = "law_metadata.yaml";

/// Per-law chapter structure file.
pub const CHAPTERS_FILE: &str = "chapters.yaml";

/// Per-law famous article badges file.
pub const FAMOUS_ARTICLES_FILE: &str = "famous_articles.yaml";

/// File stems that live next to articles but are never articles themselves.
pub const RESERVED_FILE_STEMS: &[&str] = &["law_metadata", "chapters", "famous_articles"];

/// Original text of an article that was repealed.
pub const DELETED_MARKER: &str = "削除";

/// Maximum document size in bytes (1 MB).
///
/// The longest commentary files are a few tens of KB.
pub const MAX_DOCUMENT_SIZE: usize = 1_000_000;

/// Maximum identifier length for categories, laws and articles.
pub const MAX_IDENTIFIER_LEN: usize = 100;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// Check whether an identifier is safe to use as a path segment.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_IDENTIFIER_LEN && IDENTIFIER_PATTERN.is_match(id)
}

/// Validate a category, law or article identifier.
///
/// # Examples
/// ```
/// use osaka_kenpo_corpus::config::validate_identifier;
///
/// assert!(validate_identifier("minpou").is_ok());
/// assert!(validate_identifier("suppl_1").is_ok());
/// assert!(validate_identifier("../secrets").is_err());
/// ```
pub fn validate_identifier(id: &str) -> Result<()> {
    if is_valid_identifier(id) {
        Ok(())
    } else {
        Err(CorpusError::InvalidIdentifier(id.to_string()))
    }
}

/// Whether a file stem names a metadata file rather than an article.
pub fn is_reserved_stem(stem: &str) -> bool {
    RESERVED_FILE_STEMS.contains(&stem) || stem.contains("metadata")
}
