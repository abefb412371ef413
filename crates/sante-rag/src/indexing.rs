//! Offline indexing pass: load → clean → chunk → embed
//!
//! Runs to completion before any query is served. Rebuilding produces a
//! complete new index; callers swap it in atomically.

use crate::config::AppConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::ingestion::{clean, load_corpus, TextChunker};
use crate::retrieval::EmbeddingIndex;

/// Build the embedding index over the configured brochure directory.
///
/// Per-file load failures are skipped with a warning; an embedding failure
/// aborts the whole pass. An empty directory yields an empty (but valid)
/// index.
pub async fn build_corpus_index(
    config: &AppConfig,
    embedder: &dyn EmbeddingProvider,
) -> Result<EmbeddingIndex> {
    let loaded = load_corpus(&config.corpus.brochures_dir)?;
    tracing::info!(
        "Loaded {} brochure(s) from {}",
        loaded.len(),
        config.corpus.brochures_dir.display()
    );

    let chunker = TextChunker::from_config(&config.chunking);
    let mut corpus = Vec::with_capacity(loaded.len());

    for item in loaded {
        let cleaned = clean(&item.raw_text);
        if cleaned.is_empty() {
            tracing::warn!(
                "Skipping {}: nothing left after cleaning",
                item.document.filename
            );
            continue;
        }

        let chunks = chunker.chunk(&cleaned);
        corpus.push((item.document, chunks));
    }

    tracing::info!("Embedding {} document(s)...", corpus.len());
    EmbeddingIndex::build(corpus, embedder).await
}

/// Load the persisted index when present, otherwise run a fresh indexing
/// pass and persist it.
pub async fn load_or_build_index(
    config: &AppConfig,
    embedder: &dyn EmbeddingProvider,
) -> Result<EmbeddingIndex> {
    let path = &config.corpus.index_path;

    if path.is_file() {
        match EmbeddingIndex::load(path) {
            Ok(index) => return Ok(index),
            Err(e) => {
                tracing::warn!("Ignoring unusable index at {}: {}", path.display(), e);
            }
        }
    }

    let index = build_corpus_index(config, embedder).await?;
    index.save(path)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::AnswerComposer;
    use crate::config::{ComposerConfig, RetrievalConfig};
    use crate::embedding::testing::HashEmbedder;
    use crate::retrieval::Retriever;
    use crate::types::SectionLabel;
    use std::sync::Arc;

    const DIABETES_BROCHURE: &str = "\
Le diabète est une maladie chronique caractérisée par un excès durable de sucre dans le sang.
Les symptômes du diabète sont une soif intense, une fatigue durable et un besoin fréquent d'uriner.
Le traitement du diabète repose sur une alimentation équilibrée, une activité physique régulière et parfois des médicaments.
Consultez votre médecin traitant si vous constatez ces signes de façon répétée.";

    fn test_config(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.corpus.brochures_dir = dir.join("brochures");
        config.corpus.index_path = dir.join("store").join("index.json");
        config
    }

    #[tokio::test]
    async fn end_to_end_diabetes_question() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.corpus.brochures_dir).unwrap();
        std::fs::write(
            config.corpus.brochures_dir.join("diabete.txt"),
            DIABETES_BROCHURE,
        )
        .unwrap();

        let embedder = Arc::new(HashEmbedder::new(64));
        let index = build_corpus_index(&config, embedder.as_ref()).await.unwrap();
        assert!(!index.is_empty());

        let retriever = Retriever::new(
            embedder,
            RetrievalConfig {
                top_k: 3,
                min_score: 0.0,
            },
        );
        let composer = AnswerComposer::new(ComposerConfig::default());

        let question = "Quels sont les symptômes du diabète ?";
        let results = retriever.retrieve(&index, question, 3).await.unwrap();
        let answer = composer.compose(&index, question, &results);

        let symptoms = answer
            .sections
            .iter()
            .find(|s| s.label == SectionLabel::Symptoms)
            .expect("symptoms section present");
        assert!(!symptoms.text.is_empty());

        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].filename, "diabete.txt");
    }

    #[tokio::test]
    async fn empty_corpus_answers_no_information() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.corpus.brochures_dir).unwrap();

        let embedder = Arc::new(HashEmbedder::new(64));
        let index = build_corpus_index(&config, embedder.as_ref()).await.unwrap();
        assert!(index.is_empty());

        let retriever = Retriever::new(embedder, RetrievalConfig::default());
        let composer = AnswerComposer::new(ComposerConfig::default());

        let results = retriever
            .retrieve(&index, "Quels sont les symptômes du diabète ?", 3)
            .await
            .unwrap();
        let answer = composer.compose(&index, "Quels sont les symptômes du diabète ?", &results);

        assert!(answer.sections.is_empty());
        assert!(answer.sources.is_empty());
        assert!(answer.notice.contains("aucune information"));
    }

    #[tokio::test]
    async fn load_or_build_persists_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.corpus.brochures_dir).unwrap();
        std::fs::write(
            config.corpus.brochures_dir.join("diabete.txt"),
            DIABETES_BROCHURE,
        )
        .unwrap();

        let embedder = HashEmbedder::new(64);
        let built = load_or_build_index(&config, &embedder).await.unwrap();
        assert!(config.corpus.index_path.is_file());

        let reloaded = load_or_build_index(&config, &embedder).await.unwrap();
        assert_eq!(reloaded, built);
    }
}
