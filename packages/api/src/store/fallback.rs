use std::sync::Arc;

use async_trait::async_trait;
use osaka_kenpo_corpus::{
    Article, ArticleSummary, ChaptersData, FamousArticles, LawMetadata, LawRecord, LawSummary,
};

use super::LawStore;
use crate::error::{Result, StoreError};

/// Reads from `primary` and retries on `fallback` when the primary is
/// unavailable.
///
/// Only [`StoreError::is_unavailable`] errors trigger the fallback; a
/// primary "not found" is returned as is.
pub struct FallbackStore {
    primary: Option<Arc<dyn LawStore>>,
    fallback: Arc<dyn LawStore>,
}

impl FallbackStore {
    pub fn new(primary: Option<Arc<dyn LawStore>>, fallback: Arc<dyn LawStore>) -> Self {
        Self { primary, fallback }
    }

    /// `Some(result)` when the primary answered, `None` when the fallback
    /// must be asked.
    fn settle<T>(&self, operation: &'static str, result: Result<T>) -> Option<Result<T>> {
        match result {
            Err(e) if e.is_unavailable() => {
                self.log_fallback(operation, &e);
                None
            }
            other => Some(other),
        }
    }

    fn log_fallback(&self, operation: &'static str, error: &StoreError) {
        let primary = self.primary.as_ref().map(|p| p.name()).unwrap_or("none");
        tracing::warn!(
            operation,
            primary,
            fallback = self.fallback.name(),
            error = %error,
            "primary store unavailable, falling back"
        );
    }
}

#[async_trait]
impl LawStore for FallbackStore {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn list_laws(&self) -> Result<Vec<LawRecord>> {
        if let Some(primary) = &self.primary {
            if let Some(result) = self.settle("list_laws", primary.list_laws().await) {
                return result;
            }
        }
        self.fallback.list_laws().await
    }

    async fn laws_in_category(&self, category: &str) -> Result<Vec<LawSummary>> {
        if let Some(primary) = &self.primary {
            let result = primary.laws_in_category(category).await;
            if let Some(result) = self.settle("laws_in_category", result) {
                return result;
            }
        }
        self.fallback.laws_in_category(category).await
    }

    async fn law_metadata(&self, category: &str, law: &str) -> Result<Option<LawMetadata>> {
        if let Some(primary) = &self.primary {
            let result = primary.law_metadata(category, law).await;
            if let Some(result) = self.settle("law_metadata", result) {
                return result;
            }
        }
        self.fallback.law_metadata(category, law).await
    }

    async fn article(&self, category: &str, law: &str, article: &str) -> Result<Option<Article>> {
        if let Some(primary) = &self.primary {
            let result = primary.article(category, law, article).await;
            if let Some(result) = self.settle("article", result) {
                return result;
            }
        }
        self.fallback.article(category, law, article).await
    }

    async fn articles(&self, category: &str, law: &str) -> Result<Vec<ArticleSummary>> {
        if let Some(primary) = &self.primary {
            let result = primary.articles(category, law).await;
            if let Some(result) = self.settle("articles", result) {
                return result;
            }
        }
        self.fallback.articles(category, law).await
    }

    async fn chapters(&self, category: &str, law: &str) -> Result<Option<ChaptersData>> {
        if let Some(primary) = &self.primary {
            let result = primary.chapters(category, law).await;
            if let Some(result) = self.settle("chapters", result) {
                return result;
            }
        }
        self.fallback.chapters(category, law).await
    }

    async fn famous_articles(&self, category: &str, law: &str) -> Result<Option<FamousArticles>> {
        if let Some(primary) = &self.primary {
            let result = primary.famous_articles(category, law).await;
            if let Some(result) = self.settle("famous_articles", result) {
                return result;
            }
        }
        self.fallback.famous_articles(category, law).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osaka_kenpo_corpus::CorpusError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Behaviour {
        Unavailable,
        Empty,
        BadContent,
    }

    /// Test double answering every read the same way.
    struct StubStore {
        name: &'static str,
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl StubStore {
        fn new(name: &'static str, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                name,
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }

        fn answer<T: Default>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Unavailable => Err(StoreError::Database(sqlx::Error::PoolTimedOut)),
                Behaviour::Empty => Ok(T::default()),
                Behaviour::BadContent => Err(StoreError::Corpus(CorpusError::Invalid {
                    path: "laws/jp/x/1.yaml".into(),
                    problems: vec!["osakaText: must not be empty".into()],
                })),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LawStore for StubStore {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn list_laws(&self) -> Result<Vec<LawRecord>> {
            self.answer()
        }

        async fn laws_in_category(&self, _category: &str) -> Result<Vec<LawSummary>> {
            self.answer()
        }

        async fn law_metadata(&self, _category: &str, _law: &str) -> Result<Option<LawMetadata>> {
            self.answer()
        }

        async fn article(
            &self,
            _category: &str,
            _law: &str,
            article: &str,
        ) -> Result<Option<Article>> {
            self.answer::<Option<Article>>()?;
            Ok(Some(Article {
                article: article.to_string(),
                is_suppl: false,
                is_deleted: false,
                title: self.name.to_string(),
                title_osaka: String::new(),
                original_text: vec![],
                osaka_text: vec![],
                commentary: vec![],
                commentary_osaka: vec![],
            }))
        }

        async fn articles(&self, _category: &str, _law: &str) -> Result<Vec<ArticleSummary>> {
            self.answer()
        }

        async fn chapters(&self, _category: &str, _law: &str) -> Result<Option<ChaptersData>> {
            self.answer()
        }

        async fn famous_articles(
            &self,
            _category: &str,
            _law: &str,
        ) -> Result<Option<FamousArticles>> {
            self.answer()
        }
    }

    #[tokio::test]
    async fn test_unavailable_primary_falls_back() {
        let primary = StubStore::new("primary", Behaviour::Unavailable);
        let fallback = StubStore::new("fallback", Behaviour::Empty);
        let store = FallbackStore::new(Some(primary.clone()), fallback.clone());

        let article = store.article("jp", "minpou", "1").await.expect("article");
        assert_eq!(article.map(|a| a.title), Some("fallback".to_string()));
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_primary_not_found_is_authoritative() {
        let primary = StubStore::new("primary", Behaviour::Empty);
        let fallback = StubStore::new("fallback", Behaviour::Empty);
        let store = FallbackStore::new(Some(primary.clone()), fallback.clone());

        let metadata = store.law_metadata("jp", "nope").await.expect("metadata");
        assert!(metadata.is_none());
        assert!(store.chapters("jp", "nope").await.expect("chapters").is_none());
        assert_eq!(primary.calls(), 2);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_content_errors_do_not_fall_back() {
        let primary = StubStore::new("primary", Behaviour::BadContent);
        let fallback = StubStore::new("fallback", Behaviour::Empty);
        let store = FallbackStore::new(Some(primary.clone()), fallback.clone());

        let err = store.articles("jp", "minpou").await.expect_err("bad content");
        assert!(matches!(err, StoreError::Corpus(_)));
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_without_primary_uses_fallback() {
        let fallback = StubStore::new("fallback", Behaviour::Empty);
        let store = FallbackStore::new(None, fallback.clone());

        assert!(store.list_laws().await.expect("laws").is_empty());
        assert!(store.laws_in_category("jp").await.expect("laws").is_empty());
        assert!(store
            .famous_articles("jp", "constitution")
            .await
            .expect("famous")
            .is_none());
        assert_eq!(fallback.calls(), 3);
    }

    #[tokio::test]
    async fn test_both_unavailable_returns_fallback_error() {
        let primary = StubStore::new("primary", Behaviour::Unavailable);
        let fallback = StubStore::new("fallback", Behaviour::Unavailable);
        let store = FallbackStore::new(Some(primary), fallback);

        let err = store.list_laws().await.expect_err("both down");
        assert!(err.is_unavailable());
    }
}
