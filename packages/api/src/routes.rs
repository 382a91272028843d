use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Any origin may read; only `GET` and preflight `OPTIONS` are allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn router(state: AppState) -> Router {
    let metadata_routes = Router::new()
        .route("/api/metadata/laws_metadata", get(handlers::laws_metadata))
        .route("/api/metadata/batch", get(handlers::metadata_batch))
        .route(
            "/api/metadata/{category}/{law}/batch",
            get(handlers::law_batch),
        )
        .route(
            "/api/metadata/{category}/{law}/{kind}",
            get(handlers::law_document),
        );

    let law_routes = Router::new()
        .route(
            "/api/constitution/{article}",
            get(handlers::get_constitution_article),
        )
        .route("/api/{category}", get(handlers::list_laws))
        .route("/api/{category}/{law}", get(handlers::list_articles))
        .route("/api/{category}/{law}/{article}", get(handlers::get_article))
        .route(
            "/api/{category}/{law}/{article}/batch",
            get(handlers::article_batch),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .merge(metadata_routes)
        .merge(law_routes)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
