//! Configuration for the brochure QA system

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Corpus locations
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Answer composition configuration
    #[serde(default)]
    pub composer: ComposerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Cannot parse {}: {}", path.display(), e)))
    }

    /// Load from a file if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Corpus locations: where brochures live and where the index is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory containing the PDF/TXT brochures
    pub brochures_dir: PathBuf,
    /// Path of the persisted embedding index
    pub index_path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
            .join("sante-rag");

        Self {
            brochures_dir: PathBuf::from("data/brochures"),
            index_path: data_dir.join("index.json"),
        }
    }
}

/// Embedding configuration (Ollama-backed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub max_chars: usize,
    /// Minimum chunk size; a shorter trailing fragment is merged backwards
    pub min_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: 800,
            min_chars: 120,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per query
    pub top_k: usize,
    /// Minimum cosine similarity; results under the floor are discarded
    pub min_score: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            min_score: 0.25,
        }
    }
}

/// Answer composition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Maximum sentences kept per answer section
    pub max_sentences_per_section: usize,
    /// Maximum characters per section snippet (word-boundary truncation)
    pub max_snippet_chars: usize,
    /// Sentences shorter than this are treated as noise and skipped
    pub min_sentence_chars: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_sentences_per_section: 3,
            max_snippet_chars: 600,
            min_sentence_chars: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = AppConfig::default();
        assert_eq!(config.embedding.dimensions, 768);
        assert!(config.chunking.min_chars < config.chunking.max_chars);
        assert!(config.retrieval.top_k > 0);
        assert!(config.retrieval.min_score >= 0.0 && config.retrieval.min_score < 1.0);
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.embedding.model, config.embedding.model);
        assert_eq!(parsed.chunking.max_chars, config.chunking.max_chars);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[server]\nhost = \"127.0.0.1\"\nport = 9000\nenable_cors = false\n").unwrap();
        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.embedding.model, EmbeddingConfig::default().model);
        assert_eq!(parsed.composer.max_snippet_chars, 600);
    }
}
