//! API routes for the QA server

pub mod documents;
pub mod query;
pub mod reindex;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/query", post(query::query))
        .route("/documents", get(documents::list_documents))
        .route("/reindex", post(reindex::reindex))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "sante-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Extractive question answering over French patient health brochures",
        "endpoints": {
            "POST /api/query": "Ask a health question, receive a sectioned extractive answer",
            "GET /api/documents": "List indexed brochures",
            "POST /api/reindex": "Rebuild the index from the brochure directory and swap it in",
            "GET /api/info": "This document"
        }
    }))
}
