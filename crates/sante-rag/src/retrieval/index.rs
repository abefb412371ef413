//! In-memory embedding index with cosine similarity search
//!
//! The index exclusively owns its documents, chunks and embedding records.
//! `build` and `load` are the only constructors; queries are read-only.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::error::{Error, Result};
use crate::types::{Chunk, Document};

/// One stored embedding, parallel to its chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Back-reference to the chunk this vector was computed from
    pub chunk_id: Uuid,
    /// L2-normalized embedding vector of the index dimension
    pub vector: Vec<f32>,
}

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is more similar)
    pub score: f32,
}

/// Embedding index over the brochure corpus.
///
/// Vectors are L2-normalized once at build time, so cosine similarity reduces
/// to a dot product at query time. Chunks are stored in document order, which
/// is also the tie-breaking order for equal scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingIndex {
    /// Embedding model the vectors were computed with
    model: String,
    /// Vector dimension D shared by every record
    dimensions: usize,
    /// Build timestamp
    built_at: chrono::DateTime<chrono::Utc>,
    /// Indexed brochures
    documents: Vec<Document>,
    /// Chunks in document order
    chunks: Vec<Chunk>,
    /// Embedding records, parallel to `chunks`
    records: Vec<EmbeddingRecord>,
}

impl EmbeddingIndex {
    /// Build an index by embedding every chunk.
    ///
    /// `corpus` pairs each document with its ordered chunk texts. Fails fast
    /// on the first embedding error: a half-built index is never returned.
    pub async fn build(
        corpus: Vec<(Document, Vec<String>)>,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        let dimensions = embedder.dimensions();
        let mut documents = Vec::with_capacity(corpus.len());
        let mut chunks = Vec::new();
        let mut records = Vec::new();

        for (mut document, texts) in corpus {
            document.total_chunks = texts.len() as u32;

            for (chunk_index, text) in texts.into_iter().enumerate() {
                debug_assert!(!text.trim().is_empty());
                let chunk = Chunk::new(document.id, text, chunk_index as u32);

                let vector = embedder.embed(&chunk.text).await?;
                if vector.len() != dimensions {
                    return Err(Error::embedding(format!(
                        "chunk {} of {}: got {} dimensions, expected {}",
                        chunk.chunk_index,
                        document.filename,
                        vector.len(),
                        dimensions
                    )));
                }

                records.push(EmbeddingRecord {
                    chunk_id: chunk.id,
                    vector: normalize(vector),
                });
                chunks.push(chunk);
            }

            tracing::info!(
                "Indexed {} ({} chunks)",
                document.filename,
                document.total_chunks
            );
            documents.push(document);
        }

        Ok(Self {
            model: embedder.name().to_string(),
            dimensions,
            built_at: chrono::Utc::now(),
            documents,
            chunks,
            records,
        })
    }

    /// Search the `k` most similar chunks to an already-embedded query.
    ///
    /// Results are ordered by descending score; equal scores keep document
    /// order. Read-only and repeatable; `k == 0` yields an empty result.
    pub fn query(&self, query_vector: &[f32], k: usize) -> Vec<ScoredChunk> {
        if k == 0 || self.chunks.is_empty() || query_vector.len() != self.dimensions {
            return Vec::new();
        }

        let query = normalize(query_vector.to_vec());

        let mut scored: Vec<(usize, f32)> = self
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx, dot(&query, &record.vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(idx, score)| ScoredChunk {
                chunk: self.chunks[idx].clone(),
                score,
            })
            .collect()
    }

    /// Persist the index as JSON. `load(save(index)) == index` exactly.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(self)?;
        std::fs::write(path, content)?;
        tracing::info!(
            "Saved index to {} ({} documents, {} chunks)",
            path.display(),
            self.documents.len(),
            self.chunks.len()
        );
        Ok(())
    }

    /// Load a persisted index and validate its invariants
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let index: Self = serde_json::from_str(&content)?;
        index.validate()?;
        tracing::info!(
            "Loaded index from {} ({} documents, {} chunks, model {})",
            path.display(),
            index.documents.len(),
            index.chunks.len(),
            index.model
        );
        Ok(index)
    }

    /// Check the structural invariants: one record per chunk, shared vector
    /// dimension, and resolvable back-references.
    fn validate(&self) -> Result<()> {
        if self.records.len() != self.chunks.len() {
            return Err(Error::index(format!(
                "{} records for {} chunks",
                self.records.len(),
                self.chunks.len()
            )));
        }

        let document_ids: HashSet<Uuid> = self.documents.iter().map(|d| d.id).collect();

        for (chunk, record) in self.chunks.iter().zip(&self.records) {
            if record.vector.len() != self.dimensions {
                return Err(Error::index(format!(
                    "record {} has {} dimensions, expected {}",
                    record.chunk_id,
                    record.vector.len(),
                    self.dimensions
                )));
            }
            if record.chunk_id != chunk.id {
                return Err(Error::index(format!(
                    "record {} does not match chunk {}",
                    record.chunk_id, chunk.id
                )));
            }
            if chunk.text.trim().is_empty() {
                return Err(Error::index(format!("chunk {} has empty text", chunk.id)));
            }
            if !document_ids.contains(&chunk.document_id) {
                return Err(Error::index(format!(
                    "chunk {} references unknown document {}",
                    chunk.id, chunk.document_id
                )));
            }
        }

        Ok(())
    }

    /// Indexed brochures
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Find the document a chunk belongs to
    pub fn document_for(&self, chunk: &Chunk) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == chunk.document_id)
    }

    /// Embedding model name recorded at build time
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Vector dimension D
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// L2-normalize a vector; the zero vector stays zero
fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
