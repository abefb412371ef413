//! Query endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse};

/// POST /api/query - answer one question from the brochures
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();

    tracing::info!("Question: \"{}\"", request.question);

    let index = state.index();
    let top_k = if request.top_k == 0 {
        state.retriever().default_top_k()
    } else {
        request.top_k
    };

    let results = state
        .retriever()
        .retrieve(&index, &request.question, top_k)
        .await?;

    let answer = state.composer().compose(&index, &request.question, &results);

    let processing_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Answered in {}ms ({} chunks retrieved, {} sections)",
        processing_time_ms,
        results.len(),
        answer.sections.len()
    );

    Ok(Json(QueryResponse {
        question: request.question,
        answer,
        chunks_retrieved: results.len(),
        processing_time_ms,
    }))
}
