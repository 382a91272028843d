//! Osaka Kenpo corpus - read and validate the law content tree.
//!
//! Laws are stored as YAML files below a content root, one directory per
//! law, one file per article. This crate parses those files, orders
//! articles, assembles metadata listings and validates documents.
//!
//! # Example
//!
//! ```
//! use osaka_kenpo_corpus::{config, ordering};
//! use std::cmp::Ordering;
//!
//! assert!(config::validate_identifier("constitution").is_ok());
//! assert_eq!(ordering::compare_article_ids("9", "10"), Ordering::Less);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Layout constants and identifier validation
//! - [`types`]: Articles, law metadata, chapters
//! - [`error`]: Error types and Result alias
//! - [`loader`]: Async content tree reader
//! - [`ordering`]: Article id ordering
//! - [`batch`]: All-category metadata assembly
//! - [`validate`]: Document and tree validation

pub mod batch;
pub mod config;
pub mod error;
pub mod loader;
pub mod ordering;
pub mod types;
pub mod validate;

pub use batch::BatchMetadata;
pub use config::{is_valid_identifier, validate_identifier};
pub use error::{CorpusError, Result};
pub use loader::ContentTree;
pub use types::{
    Article, ArticleSummary, Chapter, ChaptersData, FamousArticles, LawMetadata, LawRecord,
    LawSummary, Link,
};
pub use validate::{validate_tree, TreeReport};
