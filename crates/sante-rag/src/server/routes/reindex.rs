//! Index rebuild endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::indexing::build_corpus_index;
use crate::server::state::AppState;

/// POST /api/reindex - rebuild the index from the brochure directory.
///
/// The current index keeps serving queries while the rebuild runs; the swap
/// happens only once the new index is complete and persisted.
pub async fn reindex(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let start = Instant::now();
    tracing::info!("Reindexing brochures...");

    let index = build_corpus_index(state.config(), state.embedder().as_ref()).await?;
    index.save(&state.config().corpus.index_path)?;

    let documents = index.documents().len();
    let chunks = index.len();
    state.swap_index(index);

    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Reindexed {} document(s), {} chunk(s) in {}ms",
        documents,
        chunks,
        elapsed_ms
    );

    Ok(Json(serde_json::json!({
        "documents": documents,
        "chunks": chunks,
        "processing_time_ms": elapsed_ms,
    })))
}
