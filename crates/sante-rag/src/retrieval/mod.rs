//! Embedding index and retriever

mod index;
mod retriever;

pub use index::{EmbeddingIndex, EmbeddingRecord, ScoredChunk};
pub use retriever::Retriever;
