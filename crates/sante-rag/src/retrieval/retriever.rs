//! Query-time retrieval
//!
//! Embeds the question with the same provider the index was built with and
//! returns the closest chunks. Stateless: a pure function of the question and
//! the current index contents.

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;

use super::index::{EmbeddingIndex, ScoredChunk};

/// Retriever over an embedding index
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, config: RetrievalConfig) -> Self {
        Self { embedder, config }
    }

    /// Retrieve the top-`k` chunks for a question, dropping results under the
    /// configured score floor. An empty index short-circuits without calling
    /// the embedding model.
    pub async fn retrieve(
        &self,
        index: &EmbeddingIndex,
        question: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        if k == 0 || index.is_empty() || question.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(question).await?;
        let mut results = index.query(&query_vector, k);
        results.retain(|r| r.score >= self.config.min_score);
        Ok(results)
    }

    /// Default number of chunks to retrieve
    pub fn default_top_k(&self) -> usize {
        self.config.top_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::HashEmbedder;
    use crate::types::{Document, FileType};
    use std::path::PathBuf;

    fn doc(name: &str) -> Document {
        Document::new(
            name.to_string(),
            PathBuf::from(name),
            FileType::Txt,
            format!("hash-{}", name),
            100,
        )
    }

    async fn sample_index() -> EmbeddingIndex {
        let embedder = HashEmbedder::new(64);
        let corpus = vec![
            (
                doc("diabete.txt"),
                vec![
                    "Les symptômes du diabète sont la soif intense, la fatigue et un besoin fréquent d'uriner.".to_string(),
                ],
            ),
            (
                doc("grippe.txt"),
                vec!["La grippe provoque une fièvre élevée et des courbatures.".to_string()],
            ),
        ];
        EmbeddingIndex::build(corpus, &embedder).await.unwrap()
    }

    fn retriever(min_score: f32) -> Retriever {
        Retriever::new(
            Arc::new(HashEmbedder::new(64)),
            RetrievalConfig { top_k: 3, min_score },
        )
    }

    #[tokio::test]
    async fn retrieves_the_matching_brochure_first() {
        let index = sample_index().await;
        let results = retriever(0.0)
            .retrieve(&index, "Quels sont les symptômes du diabète ?", 2)
            .await
            .unwrap();

        assert!(!results.is_empty());
        let top_doc = index.document_for(&results[0].chunk).unwrap();
        assert_eq!(top_doc.filename, "diabete.txt");
    }

    #[tokio::test]
    async fn empty_index_short_circuits() {
        let embedder = HashEmbedder::new(64);
        let index = EmbeddingIndex::build(Vec::new(), &embedder).await.unwrap();
        let results = retriever(0.0).retrieve(&index, "diabète", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn k_zero_yields_empty() {
        let index = sample_index().await;
        let results = retriever(0.0).retrieve(&index, "diabète", 0).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn score_floor_drops_unrelated_chunks() {
        let index = sample_index().await;
        let results = retriever(0.99)
            .retrieve(&index, "sujet sans aucun rapport evident", 3)
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
