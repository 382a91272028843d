use async_trait::async_trait;
use osaka_kenpo_corpus::{
    Article, ArticleSummary, ChaptersData, ContentTree, FamousArticles, LawMetadata, LawRecord,
    LawSummary,
};

use super::LawStore;
use crate::error::Result;

/// Store over the on-disk content tree.
#[derive(Debug, Clone)]
pub struct FileStore {
    tree: ContentTree,
}

impl FileStore {
    pub fn new(tree: ContentTree) -> Self {
        Self { tree }
    }
}

#[async_trait]
impl LawStore for FileStore {
    fn name(&self) -> &'static str {
        "files"
    }

    async fn list_laws(&self) -> Result<Vec<LawRecord>> {
        Ok(self.tree.list_laws().await?)
    }

    async fn laws_in_category(&self, category: &str) -> Result<Vec<LawSummary>> {
        let laws = self.tree.list_laws_in_category(category).await?;
        Ok(laws.iter().map(LawRecord::summary).collect())
    }

    async fn law_metadata(&self, category: &str, law: &str) -> Result<Option<LawMetadata>> {
        Ok(self.tree.load_law_metadata(category, law).await?)
    }

    async fn article(&self, category: &str, law: &str, article: &str) -> Result<Option<Article>> {
        Ok(self.tree.load_article(category, law, article).await?)
    }

    async fn articles(&self, category: &str, law: &str) -> Result<Vec<ArticleSummary>> {
        let articles = self.tree.load_all_articles(category, law).await?;
        Ok(articles.iter().map(Article::summary).collect())
    }

    async fn chapters(&self, category: &str, law: &str) -> Result<Option<ChaptersData>> {
        Ok(self.tree.load_chapters(category, law).await?)
    }

    async fn famous_articles(&self, category: &str, law: &str) -> Result<Option<FamousArticles>> {
        Ok(self.tree.load_famous_articles(category, law).await?)
    }
}
