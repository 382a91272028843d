//! Content tree reader.
//!
//! Articles are read from `<root>/laws/<category>/<law>/<article>.yaml`,
//! falling back to the legacy `<article>.json` when no YAML file exists.
//! The file stem is the canonical article id.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{
    self, CHAPTERS_FILE, FAMOUS_ARTICLES_FILE, LAWS_DIR, LAW_METADATA_FILE, MAX_DOCUMENT_SIZE,
};
use crate::error::{CorpusError, Result};
use crate::ordering::sort_by_article_id;
use crate::types::{Article, ChaptersData, FamousArticles, LawMetadata, LawRecord};
use crate::validate::article_problems;

fn check_size(content: &str, path: &Path) -> Result<()> {
    if content.len() > MAX_DOCUMENT_SIZE {
        tracing::warn!(
            path = %path.display(),
            size = content.len(),
            max = MAX_DOCUMENT_SIZE,
            "document exceeds size limit"
        );
        return Err(CorpusError::TooLarge {
            path: path.to_path_buf(),
            size: content.len(),
            max: MAX_DOCUMENT_SIZE,
        });
    }
    Ok(())
}

fn from_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &Path) -> Result<T> {
    check_size(content, path)?;
    serde_yaml_ng::from_str(content).map_err(|source| CorpusError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether a path has a content file extension (`.yaml` or `.json`).
pub fn is_content_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "json")
    )
}

/// Parse an article document, choosing YAML or legacy JSON by extension.
///
/// The returned article takes `id` as its article number and has implied
/// flags applied (see [`Article::normalized`]).
pub fn parse_article_file(content: &str, path: &Path, id: &str) -> Result<Article> {
    check_size(content, path)?;
    let article: Article = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(content).map_err(|source| CorpusError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        from_yaml(content, path)?
    };

    if article.article != id {
        tracing::debug!(path = %path.display(), stored = %article.article, id, "article number differs from file name");
    }

    Ok(Article {
        article: id.to_string(),
        ..article
    }
    .normalized())
}

/// Parse `law_metadata.yaml`.
pub fn parse_law_metadata(content: &str, path: &Path) -> Result<LawMetadata> {
    from_yaml(content, path)
}

/// Parse `chapters.yaml`.
pub fn parse_chapters(content: &str, path: &Path) -> Result<ChaptersData> {
    from_yaml(content, path)
}

/// Parse `famous_articles.yaml`.
///
/// Keys are usually bare integers in YAML; they are converted to strings.
pub fn parse_famous_articles(content: &str, path: &Path) -> Result<FamousArticles> {
    let value: serde_yaml_ng::Value = from_yaml(content, path)?;

    let invalid = |message: String| CorpusError::Invalid {
        path: path.to_path_buf(),
        problems: vec![message],
    };

    let mapping = match value {
        serde_yaml_ng::Value::Mapping(mapping) => mapping,
        serde_yaml_ng::Value::Null => return Ok(FamousArticles::new()),
        _ => return Err(invalid("expected a mapping of article to badge".to_string())),
    };

    let mut famous = FamousArticles::new();
    for (key, badge) in mapping {
        let key = match key {
            serde_yaml_ng::Value::String(s) => s,
            serde_yaml_ng::Value::Number(n) => n.to_string(),
            other => return Err(invalid(format!("unsupported article key: {other:?}"))),
        };
        let badge = match badge {
            serde_yaml_ng::Value::String(s) => s,
            other => return Err(invalid(format!("{key}: badge must be a string, got {other:?}"))),
        };
        famous.insert(key, badge);
    }
    Ok(famous)
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CorpusError::io(path, e)),
    }
}

/// Read-only view of a content tree on disk.
#[derive(Debug, Clone)]
pub struct ContentTree {
    root: PathBuf,
}

impl ContentTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory of one law. Identifiers must already be validated.
    pub fn law_dir(&self, category: &str, law: &str) -> PathBuf {
        self.root.join(LAWS_DIR).join(category).join(law)
    }

    /// Load one article, or `None` when neither YAML nor JSON exists.
    ///
    /// Documents that parse but fail validation are errors.
    pub async fn load_article(
        &self,
        category: &str,
        law: &str,
        article: &str,
    ) -> Result<Option<Article>> {
        config::validate_identifier(category)?;
        config::validate_identifier(law)?;
        config::validate_identifier(article)?;

        let dir = self.law_dir(category, law);
        for extension in ["yaml", "json"] {
            let path = dir.join(format!("{article}.{extension}"));
            if let Some(content) = read_optional(&path).await? {
                tracing::debug!(path = %path.display(), "loading article");
                let parsed = parse_article_file(&content, &path, article)?;
                let problems = article_problems(&parsed);
                if !problems.is_empty() {
                    return Err(CorpusError::Invalid { path, problems });
                }
                return Ok(Some(parsed));
            }
        }

        Ok(None)
    }

    /// Load every article of a law in article order.
    ///
    /// Unreadable or invalid article files are skipped with a warning. A law
    /// directory that does not exist yields an empty list.
    pub async fn load_all_articles(&self, category: &str, law: &str) -> Result<Vec<Article>> {
        config::validate_identifier(category)?;
        config::validate_identifier(law)?;

        let dir = self.law_dir(category, law);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CorpusError::io(&dir, e)),
        };

        // stem -> path, YAML wins over JSON for the same stem
        let mut files: BTreeMap<String, PathBuf> = BTreeMap::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CorpusError::io(&dir, e))?
        {
            let path = entry.path();
            if !is_content_file(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(String::from) else {
                continue;
            };
            if config::is_reserved_stem(&stem) || !config::is_valid_identifier(&stem) {
                continue;
            }
            let is_yaml = path.extension().is_some_and(|e| e == "yaml");
            if is_yaml || !files.contains_key(&stem) {
                files.insert(stem, path);
            }
        }

        let mut articles = Vec::with_capacity(files.len());
        for (stem, path) in files {
            let loaded = match read_optional(&path).await {
                Ok(Some(content)) => parse_article_file(&content, &path, &stem),
                Ok(None) => continue,
                Err(e) => Err(e),
            };
            match loaded {
                Ok(article) => {
                    let problems = article_problems(&article);
                    if problems.is_empty() {
                        articles.push(article);
                    } else {
                        tracing::warn!(path = %path.display(), problems = ?problems, "skipping invalid article");
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable article");
                }
            }
        }

        sort_by_article_id(&mut articles, |a| a.article.as_str());
        Ok(articles)
    }

    /// Load `law_metadata.yaml` of a law.
    pub async fn load_law_metadata(&self, category: &str, law: &str) -> Result<Option<LawMetadata>> {
        config::validate_identifier(category)?;
        config::validate_identifier(law)?;

        let path = self.law_dir(category, law).join(LAW_METADATA_FILE);
        match read_optional(&path).await? {
            Some(content) => parse_law_metadata(&content, &path).map(Some),
            None => Ok(None),
        }
    }

    /// Load `chapters.yaml` of a law.
    pub async fn load_chapters(&self, category: &str, law: &str) -> Result<Option<ChaptersData>> {
        config::validate_identifier(category)?;
        config::validate_identifier(law)?;

        let path = self.law_dir(category, law).join(CHAPTERS_FILE);
        match read_optional(&path).await? {
            Some(content) => parse_chapters(&content, &path).map(Some),
            None => Ok(None),
        }
    }

    /// Load `famous_articles.yaml` of a law.
    pub async fn load_famous_articles(
        &self,
        category: &str,
        law: &str,
    ) -> Result<Option<FamousArticles>> {
        config::validate_identifier(category)?;
        config::validate_identifier(law)?;

        let path = self.law_dir(category, law).join(FAMOUS_ARTICLES_FILE);
        match read_optional(&path).await? {
            Some(content) => parse_famous_articles(&content, &path).map(Some),
            None => Ok(None),
        }
    }

    async fn subdirectories(&self, dir: &Path) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CorpusError::io(dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CorpusError::io(dir, e))?
        {
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| CorpusError::io(entry.path(), e))?
                .is_dir();
            if let (true, Some(name)) = (is_dir, entry.file_name().to_str()) {
                if config::is_valid_identifier(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// All laws of one category that have a `law_metadata.yaml`, ordered by id.
    pub async fn list_laws_in_category(&self, category: &str) -> Result<Vec<LawRecord>> {
        config::validate_identifier(category)?;

        let mut laws = Vec::new();
        for law in self.subdirectories(&self.root.join(LAWS_DIR).join(category)).await? {
            match self.load_law_metadata(category, &law).await {
                Ok(Some(metadata)) => laws.push(LawRecord::new(category, law, metadata)),
                Ok(None) => {
                    tracing::debug!(category, law = %law, "law directory without metadata");
                }
                Err(e) => {
                    tracing::warn!(category, law = %law, error = %e, "skipping law with unreadable metadata");
                }
            }
        }
        Ok(laws)
    }

    /// All laws of all categories, ordered by category then id.
    pub async fn list_laws(&self) -> Result<Vec<LawRecord>> {
        let mut laws = Vec::new();
        for category in self.subdirectories(&self.root.join(LAWS_DIR)).await? {
            laws.extend(self.list_laws_in_category(&category).await?);
        }
        Ok(laws)
    }
}
