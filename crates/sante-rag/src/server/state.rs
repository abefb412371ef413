//! Application state for the QA server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::composition::AnswerComposer;
use crate::config::AppConfig;
use crate::embedding::EmbeddingProvider;
use crate::retrieval::{EmbeddingIndex, Retriever};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Embedding provider shared by retriever and rebuilds
    embedder: Arc<dyn EmbeddingProvider>,
    /// Retriever over the current index
    retriever: Retriever,
    /// Answer composer
    composer: AnswerComposer,
    /// Current embedding index. Swapped wholesale on rebuild; queries in
    /// flight keep the Arc they read, so a half-built index is never visible.
    index: RwLock<Arc<EmbeddingIndex>>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state around a fully built index
    pub fn new(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: EmbeddingIndex,
    ) -> Self {
        let retriever = Retriever::new(Arc::clone(&embedder), config.retrieval.clone());
        let composer = AnswerComposer::new(config.composer.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                retriever,
                composer,
                index: RwLock::new(Arc::new(index)),
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the embedding provider
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Get the retriever
    pub fn retriever(&self) -> &Retriever {
        &self.inner.retriever
    }

    /// Get the answer composer
    pub fn composer(&self) -> &AnswerComposer {
        &self.inner.composer
    }

    /// Snapshot of the current index
    pub fn index(&self) -> Arc<EmbeddingIndex> {
        Arc::clone(&self.inner.index.read())
    }

    /// Atomically replace the index with a freshly built one
    pub fn swap_index(&self, new_index: EmbeddingIndex) {
        let mut guard = self.inner.index.write();
        *guard = Arc::new(new_index);
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::HashEmbedder;
    use crate::types::{Document, FileType};
    use std::path::PathBuf;

    async fn empty_index() -> EmbeddingIndex {
        EmbeddingIndex::build(Vec::new(), &HashEmbedder::new(8)).await.unwrap()
    }

    #[tokio::test]
    async fn swap_replaces_the_visible_index() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(HashEmbedder::new(8)),
            empty_index().await,
        );
        assert!(state.index().is_empty());

        let document = Document::new(
            "fievre.txt".to_string(),
            PathBuf::from("fievre.txt"),
            FileType::Txt,
            "hash".to_string(),
            50,
        );
        let corpus = vec![(
            document,
            vec!["La fièvre est une élévation de la température corporelle.".to_string()],
        )];
        let rebuilt = EmbeddingIndex::build(corpus, &HashEmbedder::new(8)).await.unwrap();

        state.swap_index(rebuilt);
        assert_eq!(state.index().len(), 1);
    }

    #[tokio::test]
    async fn queries_in_flight_keep_their_snapshot() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(HashEmbedder::new(8)),
            empty_index().await,
        );

        let snapshot = state.index();
        state.swap_index(empty_index().await);

        // The old Arc is still valid and unchanged
        assert!(snapshot.is_empty());
        assert!(!Arc::ptr_eq(&snapshot, &state.index()));
    }
}
