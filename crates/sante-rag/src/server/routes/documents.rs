//! Brochure listing endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::response::{DocumentListResponse, DocumentSummary};

/// GET /api/documents - list the indexed brochures
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let index = state.index();
    let documents: Vec<DocumentSummary> =
        index.documents().iter().map(DocumentSummary::from).collect();

    Ok(Json(DocumentListResponse {
        total_count: documents.len(),
        documents,
    }))
}
