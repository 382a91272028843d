//! Content validation for articles and per-law metadata.
//!
//! Each check returns a list of `field: message` problems; an empty list
//! means the document is valid.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{self, LAWS_DIR};
use crate::error::Result;
use crate::loader;
use crate::types::{Article, ChaptersData, FamousArticles, LawMetadata};

fn check_paragraphs(field: &str, paragraphs: &[String], required: bool, problems: &mut Vec<String>) {
    if required && paragraphs.is_empty() {
        problems.push(format!("{field}: must not be empty"));
    }
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if paragraph.trim().is_empty() {
            problems.push(format!("{field}[{i}]: paragraph must not be empty"));
        }
    }
}

/// Validate an article.
///
/// Deleted articles may have empty text lists; every other article needs
/// original text, dialect text and commentary.
pub fn article_problems(article: &Article) -> Vec<String> {
    let mut problems = Vec::new();

    if !config::is_valid_identifier(&article.article) {
        problems.push(format!("article: invalid identifier '{}'", article.article));
    }

    let required = !article.is_deleted;
    check_paragraphs("originalText", &article.original_text, required, &mut problems);
    check_paragraphs("osakaText", &article.osaka_text, required, &mut problems);
    check_paragraphs("commentary", &article.commentary, required, &mut problems);
    check_paragraphs("commentaryOsaka", &article.commentary_osaka, false, &mut problems);

    problems
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace))
}

/// Validate law metadata.
pub fn law_metadata_problems(metadata: &LawMetadata) -> Vec<String> {
    let mut problems = Vec::new();

    if metadata.name.trim().is_empty() {
        problems.push("name: must not be empty".to_string());
    }
    if metadata.year.is_none() {
        problems.push("year: is required".to_string());
    }
    if metadata.source.as_deref().is_none_or(|s| s.trim().is_empty()) {
        problems.push("source: is required".to_string());
    }
    if metadata
        .description
        .as_deref()
        .is_none_or(|s| s.trim().is_empty())
    {
        problems.push("description: is required".to_string());
    }
    for (i, link) in metadata.links.iter().flatten().enumerate() {
        if link.text.trim().is_empty() {
            problems.push(format!("links[{i}].text: must not be empty"));
        }
        if !is_http_url(&link.url) {
            problems.push(format!("links[{i}].url: not an http(s) URL: '{}'", link.url));
        }
    }

    problems
}

/// Validate a chapter structure.
pub fn chapters_problems(data: &ChaptersData) -> Vec<String> {
    let mut problems = Vec::new();

    if data.chapters.is_empty() {
        problems.push("chapters: must not be empty".to_string());
    }
    for (i, chapter) in data.chapters.iter().enumerate() {
        if chapter.title.trim().is_empty() {
            problems.push(format!("chapters[{i}].title: must not be empty"));
        }
        if chapter.articles.is_empty() {
            problems.push(format!("chapters[{i}].articles: must not be empty"));
        }
    }

    problems
}

/// Validate famous article badges: keys are article numbers, badges are non-empty.
pub fn famous_articles_problems(famous: &FamousArticles) -> Vec<String> {
    let mut problems = Vec::new();

    for (article, badge) in famous {
        if article.is_empty() || !article.chars().all(|c| c.is_ascii_digit()) {
            problems.push(format!("{article}: article number must be digits"));
        }
        if badge.trim().is_empty() {
            problems.push(format!("{article}: badge must not be empty"));
        }
    }

    problems
}

/// Outcome of validating a whole content tree.
#[derive(Debug, Default)]
pub struct TreeReport {
    /// Number of documents checked.
    pub checked: usize,
    /// Documents with problems, in walk order.
    pub failures: Vec<(PathBuf, Vec<String>)>,
}

impl TreeReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

fn document_problems(path: &Path) -> Vec<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return vec![format!("read: {e}")],
    };

    let problems = match stem {
        "law_metadata" => loader::parse_law_metadata(&content, path)
            .map(|metadata| law_metadata_problems(&metadata)),
        "chapters" => loader::parse_chapters(&content, path).map(|data| chapters_problems(&data)),
        "famous_articles" => loader::parse_famous_articles(&content, path)
            .map(|famous| famous_articles_problems(&famous)),
        _ => loader::parse_article_file(&content, path, stem)
            .map(|article| article_problems(&article)),
    };

    problems.unwrap_or_else(|e| vec![e.to_string()])
}

/// Validate every law document below `<root>/laws`.
///
/// Unreadable or unparsable documents are reported as failures rather than
/// aborting the walk.
pub fn validate_tree(root: &Path) -> Result<TreeReport> {
    let mut report = TreeReport::default();

    for entry in WalkDir::new(root.join(LAWS_DIR))
        .min_depth(3)
        .max_depth(3)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !loader::is_content_file(path) {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if config::is_reserved_stem(stem)
            && !matches!(stem, "law_metadata" | "chapters" | "famous_articles")
        {
            continue;
        }

        report.checked += 1;
        let problems = document_problems(path);
        if !problems.is_empty() {
            tracing::debug!(path = %path.display(), count = problems.len(), "validation failed");
            report.failures.push((path.to_path_buf(), problems));
        }
    }

    Ok(report)
}
