//! Osaka Kenpo API - read-only JSON API over laws and articles.
//!
//! Content is read from PostgreSQL when a database is configured and
//! reachable, otherwise (and whenever the database fails) from the YAML
//! content tree handled by [`osaka_kenpo_corpus`].

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod import;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;

use osaka_kenpo_corpus::ContentTree;

pub use config::AppConfig;
pub use error::{ApiError, StoreError};
pub use routes::router;
pub use state::AppState;

/// Build the store stack for a configuration.
///
/// The content tree is always available; the database is placed in front
/// of it when it can be reached.
pub async fn build_state(config: &AppConfig) -> AppState {
    let files: Arc<dyn store::LawStore> =
        Arc::new(store::FileStore::new(ContentTree::new(&config.data_dir)));

    let primary = match &config.database {
        Some(database) => db::connect(database)
            .await
            .map(|pool| Arc::new(store::PgStore::new(pool)) as Arc<dyn store::LawStore>),
        None => None,
    };

    AppState::new(Arc::new(store::FallbackStore::new(primary, files)))
}
